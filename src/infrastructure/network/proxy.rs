// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::error::AppError;
use crate::domain::types::ProxyBinding;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs;
use std::path::Path;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENTS: [&str; 6] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:138.0) Gecko/20100101 Firefox/138.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36 Edg/136.0.0.0",
];

pub fn random_user_agent<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    USER_AGENTS.choose(rng).copied().unwrap_or(USER_AGENTS[0])
}

/// Proxies loaded once at startup. Empty means direct connections.
#[derive(Debug, Clone, Default)]
pub struct ProxyPool {
    proxies: Vec<String>,
}

impl ProxyPool {
    pub fn new(proxies: Vec<String>) -> Self {
        Self { proxies }
    }

    /// Newline-delimited file; blank lines ignored. A missing file yields an empty pool.
    pub fn load(path: &str) -> Self {
        if !Path::new(path).exists() {
            tracing::warn!(target: "proxy", path, "No proxy file found, using direct mode");
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(raw) => {
                let pool = Self::parse(&raw);
                tracing::info!(target: "proxy", count = pool.len(), path, "Loaded proxies");
                pool
            }
            Err(e) => {
                tracing::warn!(target: "proxy", path, error = %e, "Proxy file unreadable, using direct mode");
                Self::default()
            }
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(ToString::to_string)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Uniform pick, re-rolled per wallet per cycle.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ProxyBinding> {
        self.proxies
            .choose(rng)
            .map(|url| ProxyBinding { url: url.clone() })
    }
}

/// Hides proxy credentials (`user:pass@`) in log output.
pub fn redact_proxy(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) if !parsed.username().is_empty() || parsed.password().is_some() => {
            let _ = parsed.set_username("***");
            let _ = parsed.set_password(None);
            parsed.to_string()
        }
        Ok(parsed) => parsed.to_string(),
        Err(_) => "<unparseable proxy>".to_string(),
    }
}

/// reqwest client shared by the RPC transport and the API client of one wallet-cycle.
pub fn build_http_client(
    proxy: Option<&ProxyBinding>,
    user_agent: &str,
) -> Result<reqwest::Client, AppError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(HTTP_TIMEOUT);
    if let Some(binding) = proxy {
        let proxy = reqwest::Proxy::all(&binding.url).map_err(|e| {
            AppError::Config(format!("Invalid proxy {}: {e}", redact_proxy(&binding.url)))
        })?;
        builder = builder.proxy(proxy);
    } else {
        builder = builder.no_proxy();
    }
    builder
        .build()
        .map_err(|e| AppError::Connection(format!("HTTP client build failed: {e}")))
}
