/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use s3_contents_provider::auth::{AuthExchange, AuthStatus, AuthTransport};
use s3_contents_provider::error::Error;
use s3_contents_provider::{Client, Config, CredentialSet, SessionController};

pub const BUCKET: &str = "test-bucket";

/// Auth transport that accepts every request without touching the network.
#[derive(Debug, Default)]
pub struct AcceptingTransport;

#[async_trait]
impl AuthTransport for AcceptingTransport {
    async fn fetch_status(&self) -> Result<AuthStatus, Error> {
        Ok(AuthStatus {
            authenticated: false,
        })
    }

    async fn submit(&self, _credentials: &CredentialSet) -> Result<AuthExchange, Error> {
        Ok(AuthExchange {
            success: true,
            message: None,
        })
    }

    async fn revoke(&self) -> Result<AuthExchange, Error> {
        Ok(AuthExchange {
            success: true,
            message: None,
        })
    }
}

pub fn controller_with_store(store: aws_sdk_s3::Client) -> SessionController {
    let config = Config::builder()
        .bucket(BUCKET)
        .auth_endpoint("http://auth.local/services/storage")
        .store_client(store)
        .build();
    SessionController::with_transport(config, Arc::new(AcceptingTransport))
}

/// A contents client whose session has already been established against
/// the given (mocked) store client.
pub async fn authenticated_client(store: aws_sdk_s3::Client) -> Client {
    let controller = controller_with_store(store);
    controller
        .submit_credentials(CredentialSet::new(
            "http://store.local:9000",
            "AKIAEXAMPLE",
            "secret",
        ))
        .await
        .expect("scripted transport accepts");
    controller.contents()
}

/// A contents client whose session never authenticated.
pub fn unauthenticated_client(store: aws_sdk_s3::Client) -> Client {
    controller_with_store(store).contents()
}
