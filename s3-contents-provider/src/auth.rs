/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Wire protocol and transport for the credential service.
//!
//! The session controller issues submit/check/delete requests against a
//! small HTTP+JSON endpoint; credential persistence lives behind that
//! endpoint, not in this crate.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{self, Error};
use crate::session::CredentialSet;

/// Fixed service path of the auth routes below the configured endpoint.
const AUTH_SERVICE_PATH: &str = "auth";

/// Response to an authentication-status check.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthStatus {
    /// Whether valid store credentials are currently established.
    pub authenticated: bool,
}

/// Response to a credential submit or revoke request.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthExchange {
    /// Whether the service accepted the request.
    pub success: bool,

    /// Raw service message on failure. Never surfaced to the user as-is;
    /// see [`crate::error`] for classification.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct CredentialPayload<'a> {
    url: &'a str,
    #[serde(rename = "accessKey")]
    access_key: &'a str,
    #[serde(rename = "secretKey")]
    secret_key: &'a str,
}

/// Transport to the credential service.
///
/// The production implementation is [`HttpAuthClient`]; tests and hosts
/// with their own plumbing can substitute another implementation.
#[async_trait]
pub trait AuthTransport: Send + Sync + fmt::Debug {
    /// `GET` the current authentication status.
    async fn fetch_status(&self) -> Result<AuthStatus, Error>;

    /// `POST` a credential set for validation and persistence.
    async fn submit(&self, credentials: &CredentialSet) -> Result<AuthExchange, Error>;

    /// `DELETE` the persisted credentials.
    async fn revoke(&self) -> Result<AuthExchange, Error>;
}

/// HTTP transport to the credential service.
#[derive(Debug)]
pub struct HttpAuthClient {
    http: reqwest::Client,
    url: String,
}

impl HttpAuthClient {
    /// Create a transport rooted at `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(error::transport)?;
        let url = format!("{}/{AUTH_SERVICE_PATH}", base_url.trim_end_matches('/'));
        Ok(Self { http, url })
    }

    async fn decode<T>(&self, response: reqwest::Response) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, url = %self.url, "auth endpoint returned non-success");
            return Err(error::transport(format!(
                "auth endpoint returned status {status}"
            )));
        }
        response.json::<T>().await.map_err(error::transport)
    }
}

#[async_trait]
impl AuthTransport for HttpAuthClient {
    async fn fetch_status(&self) -> Result<AuthStatus, Error> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(error::transport)?;
        self.decode(response).await
    }

    async fn submit(&self, credentials: &CredentialSet) -> Result<AuthExchange, Error> {
        let payload = CredentialPayload {
            url: credentials.endpoint_url(),
            access_key: credentials.access_key_id(),
            secret_key: credentials.secret_access_key(),
        };
        let response = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(error::transport)?;
        self.decode(response).await
    }

    async fn revoke(&self) -> Result<AuthExchange, Error> {
        let response = self
            .http
            .delete(&self.url)
            .send()
            .await
            .map_err(error::transport)?;
        self.decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_message_is_optional() {
        let ok: AuthExchange = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.success);
        assert!(ok.message.is_none());

        let rejected: AuthExchange =
            serde_json::from_str(r#"{"success": false, "message": "SignatureDoesNotMatch"}"#)
                .unwrap();
        assert!(!rejected.success);
        assert_eq!(rejected.message.as_deref(), Some("SignatureDoesNotMatch"));
    }

    #[test]
    fn status_decodes() {
        let status: AuthStatus = serde_json::from_str(r#"{"authenticated": false}"#).unwrap();
        assert!(!status.authenticated);
    }

    #[test]
    fn payload_uses_wire_field_names() {
        let credentials = CredentialSet::new("http://store.local", "AKIAEXAMPLE", "secret");
        let payload = CredentialPayload {
            url: credentials.endpoint_url(),
            access_key: credentials.access_key_id(),
            secret_key: credentials.secret_access_key(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["url"], "http://store.local");
        assert_eq!(json["accessKey"], "AKIAEXAMPLE");
        assert_eq!(json["secretKey"], "secret");
    }
}
