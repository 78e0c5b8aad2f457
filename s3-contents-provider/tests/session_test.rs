/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

mod common;

use std::error::Error as _;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::types::Object;
use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};
use s3_contents_provider::auth::{AuthExchange, AuthStatus, AuthTransport};
use s3_contents_provider::error::{Error, ErrorKind};
use s3_contents_provider::{Config, CredentialSet, SessionController, SessionView};

use common::{controller_with_store, BUCKET};

/// Auth transport that rejects every submit with a raw store message.
#[derive(Debug)]
struct RejectingTransport {
    message: &'static str,
}

#[async_trait]
impl AuthTransport for RejectingTransport {
    async fn fetch_status(&self) -> Result<AuthStatus, Error> {
        Ok(AuthStatus {
            authenticated: false,
        })
    }

    async fn submit(&self, _credentials: &CredentialSet) -> Result<AuthExchange, Error> {
        Ok(AuthExchange {
            success: false,
            message: Some(self.message.to_owned()),
        })
    }

    async fn revoke(&self) -> Result<AuthExchange, Error> {
        Ok(AuthExchange {
            success: true,
            message: None,
        })
    }
}

fn empty_store() -> aws_sdk_s3::Client {
    let rules: [&aws_smithy_mocks_experimental::Rule; 0] = [];
    mock_client!(aws_sdk_s3, RuleMode::MatchAny, &rules)
}

/// The credential form stays mounted until a submit succeeds, after which
/// the file browser mounts and an initial listing can be issued.
#[tokio::test]
async fn credential_form_until_successful_submit() {
    let list_rule = mock!(aws_sdk_s3::Client::list_objects_v2).then_output(|| {
        ListObjectsV2Output::builder()
            .contents(Object::builder().key("hello.txt").size(5).build())
            .build()
    });
    let store = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&list_rule]);
    let controller = controller_with_store(store);

    assert!(!controller.check_authenticated().await.unwrap());
    assert_eq!(controller.view(), SessionView::CredentialForm);

    // adapter is gated while the form is up
    let err = controller.contents().list().send().await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotAuthenticated);

    controller
        .submit_credentials(CredentialSet::new(
            "http://store.local:9000",
            "AKIAEXAMPLE",
            "secret",
        ))
        .await
        .unwrap();
    assert_eq!(controller.view(), SessionView::FileBrowser);

    let listing = controller.contents().list().send().await.unwrap();
    assert_eq!(listing.entries().len(), 1);
    assert_eq!(listing.entries()[0].path(), "hello.txt");
}

/// Submitting a wrong secret surfaces the corrected message, never the raw
/// store error, and leaves the session unauthenticated.
#[tokio::test]
async fn wrong_secret_reports_signature_mismatch() {
    let config = Config::builder()
        .bucket(BUCKET)
        .auth_endpoint("http://auth.local/services/storage")
        .store_client(empty_store())
        .build();
    let controller = SessionController::with_transport(
        config,
        Arc::new(RejectingTransport {
            message: "An error occurred (SignatureDoesNotMatch) when calling the \
                      ListBuckets operation: The request signature we calculated does \
                      not match the signature you provided.",
        }),
    );

    let err = controller
        .submit_credentials(CredentialSet::new(
            "http://store.local",
            "AKIAEXAMPLE",
            "wrong",
        ))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::SignatureMismatch);
    let surfaced = err.source().unwrap().to_string();
    assert_eq!(surfaced, "The secret access key you entered was invalid");
    assert!(!surfaced.contains("ListBuckets"));
    assert_eq!(controller.view(), SessionView::CredentialForm);
}

/// Deleting credentials swaps back to the credential form and re-gates the
/// adapter; the controller can then cycle through authentication again.
#[tokio::test]
async fn delete_credentials_cycles_back_to_the_form() {
    let controller = controller_with_store(empty_store());
    controller
        .submit_credentials(CredentialSet::new(
            "http://store.local:9000",
            "AKIAEXAMPLE",
            "secret",
        ))
        .await
        .unwrap();
    assert_eq!(controller.view(), SessionView::FileBrowser);

    controller.delete_credentials().await.unwrap();
    assert_eq!(controller.view(), SessionView::CredentialForm);

    let err = controller.contents().list().send().await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotAuthenticated);

    // no terminal state; a fresh submit authenticates again
    controller
        .submit_credentials(CredentialSet::new(
            "http://store.local:9000",
            "AKIAEXAMPLE",
            "secret",
        ))
        .await
        .unwrap();
    assert_eq!(controller.view(), SessionView::FileBrowser);
}
