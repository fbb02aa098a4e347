// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::common::constants::{API_REFERER, VERIFY_TASK_ID};
use crate::common::error::AppError;
use crate::domain::types::Credential;
use alloy::primitives::{Address, B256};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

const BROWSER_HEADERS: [(&str, &str); 10] = [
    ("accept", "application/json, text/plain, */*"),
    ("accept-language", "en-US,en;q=0.8"),
    (
        "sec-ch-ua",
        "\"Chromium\";v=\"136\", \"Brave\";v=\"136\", \"Not.A/Brand\";v=\"99\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-site"),
    ("sec-gpc", "1"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(default)]
    jwt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    #[serde(default)]
    user_info: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    #[serde(default)]
    verified: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "ID")]
    pub id: serde_json::Value,
    #[serde(rename = "TaskPoints", default)]
    pub task_points: Option<i64>,
    #[serde(rename = "TotalPoints", default)]
    pub total_points: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FaucetStatus {
    pub is_able_to_faucet: bool,
    /// Unix seconds. The field name is misspelled upstream.
    #[serde(rename = "avaliable_timestamp", default)]
    pub available_at: i64,
}

/// Off-chain points/verification service. Every call is bound to one wallet address.
#[async_trait]
pub trait VerificationApi: Send + Sync {
    async fn login(
        &self,
        address: Address,
        signature: &str,
        invite_code: &str,
    ) -> Result<Credential, AppError>;

    async fn check_in(&self, address: Address, credential: &Credential) -> Result<(), AppError>;

    async fn profile(
        &self,
        address: Address,
        credential: &Credential,
    ) -> Result<UserProfile, AppError>;

    async fn faucet_status(
        &self,
        address: Address,
        credential: &Credential,
    ) -> Result<FaucetStatus, AppError>;

    async fn claim_faucet(&self, address: Address, credential: &Credential)
    -> Result<(), AppError>;

    async fn verify_task(
        &self,
        address: Address,
        credential: &Credential,
        tx_hash: B256,
    ) -> Result<bool, AppError>;
}

/// reqwest implementation. The proxy and user agent live in the injected `Client`.
#[derive(Clone)]
pub struct HttpVerificationApi {
    client: Client,
    base_url: Url,
}

impl HttpVerificationApi {
    pub fn new(client: Client, base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid API base url {base_url}: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Single builder for every call: browser header set plus bearer credential.
    fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> Result<RequestBuilder, AppError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| AppError::Config(format!("Invalid API path {path}: {e}")))?;
        Ok(self
            .client
            .request(method, url)
            .headers(header_set(credential)?))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        builder: RequestBuilder,
    ) -> Result<Option<T>, AppError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| AppError::Connection(format!("{endpoint} request failed: {e}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AppError::Connection(format!("{endpoint} body read failed: {e}")))?;
        interpret(endpoint, status, &body)
    }
}

fn header_set(credential: Option<&Credential>) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    for (name, value) in BROWSER_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    headers.insert(header::REFERER, HeaderValue::from_static(API_REFERER));
    let bearer = match credential {
        Some(cred) => cred.bearer(),
        None => "Bearer null".to_string(),
    };
    let mut auth = HeaderValue::from_str(&bearer)
        .map_err(|_| AppError::Signing("credential is not a valid header value".into()))?;
    auth.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth);
    Ok(headers)
}

fn interpret<T: DeserializeOwned>(
    endpoint: &str,
    status: StatusCode,
    body: &str,
) -> Result<Option<T>, AppError> {
    if status == StatusCode::FORBIDDEN {
        return Err(AppError::CredentialRejected {
            endpoint: endpoint.to_string(),
        });
    }
    if !status.is_success() {
        return Err(AppError::ApiCall {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }
    let envelope: ApiEnvelope<T> = serde_json::from_str(body).map_err(|e| AppError::Api {
        endpoint: endpoint.to_string(),
        msg: format!("undecodable response: {e}"),
    })?;
    if envelope.code != 0 {
        return Err(AppError::Api {
            endpoint: endpoint.to_string(),
            msg: envelope.msg.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }
    Ok(envelope.data)
}

fn missing(endpoint: &str, what: &str) -> AppError {
    AppError::Api {
        endpoint: endpoint.to_string(),
        msg: format!("response carried no {what}"),
    }
}

#[async_trait]
impl VerificationApi for HttpVerificationApi {
    async fn login(
        &self,
        address: Address,
        signature: &str,
        invite_code: &str,
    ) -> Result<Credential, AppError> {
        let address = address.to_string();
        let builder = self.request(Method::POST, "/user/login", None)?.query(&[
            ("address", address.as_str()),
            ("signature", signature),
            ("invite_code", invite_code),
        ]);
        let data: Option<LoginData> = self.call("/user/login", builder).await?;
        data.and_then(|d| d.jwt)
            .filter(|jwt| !jwt.is_empty())
            .map(Credential::new)
            .ok_or_else(|| missing("/user/login", "jwt"))
    }

    async fn check_in(&self, address: Address, credential: &Credential) -> Result<(), AppError> {
        let builder = self
            .request(Method::POST, "/sign/in", Some(credential))?
            .query(&[("address", address.to_string())]);
        self.call::<serde_json::Value>("/sign/in", builder).await?;
        Ok(())
    }

    async fn profile(
        &self,
        address: Address,
        credential: &Credential,
    ) -> Result<UserProfile, AppError> {
        let builder = self
            .request(Method::GET, "/user/profile", Some(credential))?
            .query(&[("address", address.to_string())]);
        let data: Option<ProfileData> = self.call("/user/profile", builder).await?;
        data.and_then(|d| d.user_info)
            .ok_or_else(|| missing("/user/profile", "user_info"))
    }

    async fn faucet_status(
        &self,
        address: Address,
        credential: &Credential,
    ) -> Result<FaucetStatus, AppError> {
        let builder = self
            .request(Method::GET, "/faucet/status", Some(credential))?
            .query(&[("address", address.to_string())]);
        self.call("/faucet/status", builder)
            .await?
            .ok_or_else(|| missing("/faucet/status", "data"))
    }

    async fn claim_faucet(
        &self,
        address: Address,
        credential: &Credential,
    ) -> Result<(), AppError> {
        let builder = self
            .request(Method::POST, "/faucet/daily", Some(credential))?
            .query(&[("address", address.to_string())]);
        self.call::<serde_json::Value>("/faucet/daily", builder)
            .await?;
        Ok(())
    }

    async fn verify_task(
        &self,
        address: Address,
        credential: &Credential,
        tx_hash: B256,
    ) -> Result<bool, AppError> {
        let builder = self
            .request(Method::POST, "/task/verify", Some(credential))?
            .query(&[
                ("address", address.to_string()),
                ("task_id", VERIFY_TASK_ID.to_string()),
                ("tx_hash", tx_hash.to_string()),
            ]);
        let data: Option<VerifyData> = self.call("/task/verify", builder).await?;
        Ok(data.is_some_and(|d| d.verified))
    }
}
