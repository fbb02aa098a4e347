// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use alloy::network::Ethereum;
use alloy::providers::RootProvider;
use alloy::rpc::client::RpcClient;
use alloy::transports::http::Http;
use url::Url;

pub type HttpProvider = RootProvider<Ethereum>;

pub struct ConnectionFactory;

impl ConnectionFactory {
    pub fn http(rpc_url: &str) -> Result<HttpProvider, AppError> {
        let url = parse_rpc_url(rpc_url)?;
        Ok(RootProvider::new_http(url))
    }

    /// HTTP provider over a caller-built client, so proxy and user agent apply to RPC traffic.
    pub fn http_with_client(
        rpc_url: &str,
        client: reqwest::Client,
    ) -> Result<HttpProvider, AppError> {
        let url = parse_rpc_url(rpc_url)?;
        let transport = Http::with_client(client, url);
        Ok(RootProvider::new(RpcClient::new(transport, false)))
    }
}

fn parse_rpc_url(rpc_url: &str) -> Result<Url, AppError> {
    Url::parse(rpc_url).map_err(|e| AppError::Config(format!("Invalid RPC URL: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_urls() {
        assert!(matches!(
            ConnectionFactory::http("not a url"),
            Err(AppError::Config(_))
        ));
    }

    #[tokio::test]
    async fn builds_provider_over_custom_client() {
        let client = reqwest::Client::new();
        assert!(ConnectionFactory::http_with_client("http://127.0.0.1:8545", client).is_ok());
    }
}
