// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use std::time::Duration;

/// Delay before retry `attempt` (0-based): `base * 2^attempt`, no jitter.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

/// Deterministic doubling schedule bounded by `max_retries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffSchedule {
    pub base: Duration,
    pub max_retries: u32,
}

impl BackoffSchedule {
    pub fn new(base: Duration, max_retries: u32) -> Self {
        Self { base, max_retries }
    }

    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_retries).map(|attempt| backoff_delay(self.base, attempt))
    }

    pub fn total(&self) -> Duration {
        self.delays().fold(Duration::ZERO, Duration::saturating_add)
    }
}
