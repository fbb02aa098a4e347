// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

pub mod auth;
pub mod confirmation;
pub mod faucet;
pub mod gate;
pub mod operations;
pub mod orchestrator;
pub mod selection;
pub mod stats;
