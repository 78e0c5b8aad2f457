/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Session state controller.
//!
//! Gates the contents provider behind a credential-challenge flow: the
//! controller decides whether the host may mount the file tree or must
//! first present the credential form, accepts new credentials, and revokes
//! stored ones. One controller instance exists per browsing panel.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::auth::{AuthTransport, HttpAuthClient};
use crate::client::{Client, Handle};
use crate::config::{loader, Config};
use crate::error::{self, Error};

/// Secret material held in an owned buffer that is zeroed on drop.
///
/// No explicit lifetime contract exists for the secret beyond the exchange
/// call, so the buffer is scrubbed as soon as the credential set goes away.
struct SecretBuf(Box<[u8]>);

impl SecretBuf {
    fn new(value: String) -> Self {
        Self(value.into_bytes().into_boxed_slice())
    }

    fn reveal(&self) -> &str {
        // constructed from a String, always valid utf-8
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl Drop for SecretBuf {
    fn drop(&mut self) {
        self.0.fill(0);
    }
}

/// Endpoint URL + access key id + secret access key, supplied by the user.
///
/// The set is consumed by [`SessionController::submit_credentials`] and the
/// secret is scrubbed from memory once the exchange call completes. `Debug`
/// output never reveals the secret.
pub struct CredentialSet {
    endpoint_url: String,
    access_key_id: String,
    secret_access_key: SecretBuf,
}

impl CredentialSet {
    /// Assemble a credential set for submission.
    pub fn new(
        endpoint_url: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: SecretBuf::new(secret_access_key.into()),
        }
    }

    /// Store endpoint the credentials are valid against.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// The access key id.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn secret_access_key(&self) -> &str {
        self.secret_access_key.reveal()
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// The view the host should mount, derived solely from the last known
/// authentication state. Exactly one is mounted at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionView {
    /// Render the credential form.
    CredentialForm,

    /// Render the file tree bound to the contents [`Client`].
    FileBrowser,
}

#[derive(Debug, Default)]
struct SessionInner {
    authenticated: bool,
    store: Option<aws_sdk_s3::Client>,
}

/// Shared session state between the controller and the contents client.
#[derive(Debug, Default)]
pub(crate) struct SessionHandle {
    inner: Mutex<SessionInner>,
}

impl SessionHandle {
    /// The signed store client, or `NotAuthenticated` before the session
    /// reaches the authenticated state.
    pub(crate) fn store_client(&self) -> Result<aws_sdk_s3::Client, Error> {
        let inner = self.inner.lock().unwrap();
        match &inner.store {
            Some(client) if inner.authenticated => Ok(client.clone()),
            _ => Err(error::not_authenticated()),
        }
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.inner.lock().unwrap().authenticated
    }

    pub(crate) fn establish(&self, store: aws_sdk_s3::Client) {
        let mut inner = self.inner.lock().unwrap();
        inner.authenticated = true;
        inner.store = Some(store);
    }

    pub(crate) fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.authenticated = false;
        inner.store = None;
    }
}

/// Controller for the credential state of one browsing panel.
///
/// Two states, `Unauthenticated` and `Authenticated`. A successful submit
/// transitions to `Authenticated`; a successful delete transitions back.
/// Failed submits and deletes leave the state unchanged. There is no
/// terminal state; the controller persists for the panel's lifetime.
#[derive(Debug)]
pub struct SessionController {
    config: Config,
    transport: Arc<dyn AuthTransport>,
    session: Arc<SessionHandle>,
}

impl SessionController {
    /// Create a controller talking to the auth endpoint named by `config`.
    pub fn new(config: Config) -> Result<Self, Error> {
        let transport = HttpAuthClient::new(config.auth_endpoint(), config.auth_timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a controller with an explicit auth transport.
    pub fn with_transport(config: Config, transport: Arc<dyn AuthTransport>) -> Self {
        Self {
            config,
            transport,
            session: Arc::new(SessionHandle::default()),
        }
    }

    /// Determine the current authentication state.
    ///
    /// Performed once per panel activation; the result decides the initial
    /// view. Fails with a transport error when the auth endpoint is
    /// unreachable or returns a non-success status.
    pub async fn check_authenticated(&self) -> Result<bool, Error> {
        let status = self.transport.fetch_status().await?;
        if status.authenticated {
            if !self.session.is_authenticated() {
                let store = match self.config.store_client_override() {
                    Some(client) => client.clone(),
                    None => loader::ambient_store_client(&self.config).await,
                };
                self.session.establish(store);
            }
            tracing::debug!("session already authenticated");
        } else {
            self.session.clear();
        }
        Ok(status.authenticated)
    }

    /// Submit a credential set for validation and persistence.
    ///
    /// On success the session transitions to `Authenticated`; the caller
    /// must swap the mounted view to the file browser and trigger an
    /// initial listing. On failure the error is classified
    /// (`InvalidCredentials` / `SignatureMismatch`) and the session state
    /// is unchanged. The set is consumed and its secret scrubbed either way.
    pub async fn submit_credentials(&self, credentials: CredentialSet) -> Result<(), Error> {
        let exchange = self.transport.submit(&credentials).await?;
        if !exchange.success {
            tracing::debug!(access_key_id = %credentials.access_key_id(), "credential exchange rejected");
            return Err(error::classify_exchange_failure(exchange.message));
        }

        let store = match self.config.store_client_override() {
            Some(client) => client.clone(),
            None => loader::store_client(&self.config, &credentials).await,
        };
        self.session.establish(store);
        tracing::info!(endpoint = %credentials.endpoint_url(), "session authenticated");
        Ok(())
    }

    /// Revoke the stored credentials at the auth service.
    ///
    /// Destructive: the host must obtain explicit user confirmation before
    /// invoking this. On success the session transitions to
    /// `Unauthenticated` and the caller must swap the mounted view back to
    /// the credential form.
    pub async fn delete_credentials(&self) -> Result<(), Error> {
        let exchange = self.transport.revoke().await?;
        if !exchange.success {
            let message = exchange
                .message
                .unwrap_or_else(|| "credential service refused the reset".to_owned());
            return Err(error::transport(message));
        }
        self.session.clear();
        tracing::info!("stored credentials revoked");
        Ok(())
    }

    /// Whether the session is currently authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The view the host should mount right now.
    pub fn view(&self) -> SessionView {
        if self.session.is_authenticated() {
            SessionView::FileBrowser
        } else {
            SessionView::CredentialForm
        }
    }

    /// The contents client bound to this session.
    ///
    /// Available in any state; operations fail with `NotAuthenticated`
    /// until the session is established.
    pub fn contents(&self) -> Client {
        Client::new(Arc::new(Handle::new(
            self.config.clone(),
            self.session.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthExchange, AuthStatus};
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use std::error::Error as _;

    #[derive(Debug)]
    struct ScriptedTransport {
        authenticated: bool,
        submit: AuthExchange,
        revoke: AuthExchange,
    }

    impl ScriptedTransport {
        fn accepting() -> Self {
            Self {
                authenticated: false,
                submit: AuthExchange {
                    success: true,
                    message: None,
                },
                revoke: AuthExchange {
                    success: true,
                    message: None,
                },
            }
        }

        fn rejecting_submit(message: &str) -> Self {
            Self {
                submit: AuthExchange {
                    success: false,
                    message: Some(message.to_owned()),
                },
                ..Self::accepting()
            }
        }
    }

    #[async_trait]
    impl AuthTransport for ScriptedTransport {
        async fn fetch_status(&self) -> Result<AuthStatus, Error> {
            Ok(AuthStatus {
                authenticated: self.authenticated,
            })
        }

        async fn submit(&self, _credentials: &CredentialSet) -> Result<AuthExchange, Error> {
            Ok(self.submit.clone())
        }

        async fn revoke(&self) -> Result<AuthExchange, Error> {
            Ok(self.revoke.clone())
        }
    }

    fn test_store_client() -> aws_sdk_s3::Client {
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("us-east-1"))
            .credentials_provider(aws_sdk_s3::config::Credentials::new(
                "akid", "secret", None, None, "test",
            ))
            .build();
        aws_sdk_s3::Client::from_conf(conf)
    }

    fn controller(transport: ScriptedTransport) -> SessionController {
        let config = Config::builder()
            .bucket("test-bucket")
            .auth_endpoint("http://auth.local")
            .store_client(test_store_client())
            .build();
        SessionController::with_transport(config, Arc::new(transport))
    }

    #[tokio::test]
    async fn initial_view_is_the_credential_form() {
        let controller = controller(ScriptedTransport::accepting());
        assert!(!controller.check_authenticated().await.unwrap());
        assert_eq!(controller.view(), SessionView::CredentialForm);
    }

    #[tokio::test]
    async fn successful_submit_swaps_to_the_file_browser() {
        let controller = controller(ScriptedTransport::accepting());
        controller
            .submit_credentials(CredentialSet::new("http://store.local", "AKIAEXAMPLE", "sk"))
            .await
            .unwrap();
        assert!(controller.is_authenticated());
        assert_eq!(controller.view(), SessionView::FileBrowser);
    }

    #[tokio::test]
    async fn rejected_signature_is_classified_and_leaves_state_unchanged() {
        let controller = controller(ScriptedTransport::rejecting_submit(
            "An error occurred (SignatureDoesNotMatch) when calling the ListBuckets operation",
        ));
        let err = controller
            .submit_credentials(CredentialSet::new(
                "http://store.local",
                "AKIAEXAMPLE",
                "wrong",
            ))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SignatureMismatch);
        assert_eq!(
            err.source().unwrap().to_string(),
            "The secret access key you entered was invalid"
        );
        assert!(!controller.is_authenticated());
        assert_eq!(controller.view(), SessionView::CredentialForm);
    }

    #[tokio::test]
    async fn delete_returns_to_the_credential_form() {
        let controller = controller(ScriptedTransport::accepting());
        controller
            .submit_credentials(CredentialSet::new("http://store.local", "AKIAEXAMPLE", "sk"))
            .await
            .unwrap();
        controller.delete_credentials().await.unwrap();
        assert!(!controller.is_authenticated());
        assert_eq!(controller.view(), SessionView::CredentialForm);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_session_authenticated() {
        let transport = ScriptedTransport {
            revoke: AuthExchange {
                success: false,
                message: Some("backing store unavailable".to_owned()),
            },
            ..ScriptedTransport::accepting()
        };
        let controller = controller(transport);
        controller
            .submit_credentials(CredentialSet::new("http://store.local", "AKIAEXAMPLE", "sk"))
            .await
            .unwrap();
        let err = controller.delete_credentials().await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Transport);
        assert!(controller.is_authenticated());
    }

    #[tokio::test]
    async fn check_bootstraps_an_established_session() {
        let transport = ScriptedTransport {
            authenticated: true,
            ..ScriptedTransport::accepting()
        };
        let controller = controller(transport);
        assert!(controller.check_authenticated().await.unwrap());
        assert_eq!(controller.view(), SessionView::FileBrowser);
        assert!(controller.session.store_client().is_ok());
    }

    #[test]
    fn debug_never_reveals_the_secret() {
        let credentials = CredentialSet::new("http://store.local", "AKIAEXAMPLE", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn secret_round_trips_until_dropped() {
        let credentials = CredentialSet::new("http://store.local", "AKIAEXAMPLE", "hunter2");
        assert_eq!(credentials.secret_access_key(), "hunter2");
    }
}
