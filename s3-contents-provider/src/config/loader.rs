/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Store client assembly.
//!
//! Builds the signed aws-sdk-s3 client the contents provider issues key
//! operations through. Signing itself is delegated to the SDK; this module
//! only wires the submitted credential set (or the default provider chain)
//! into client construction.

use aws_config::BehaviorVersion;
use aws_config::Region;

use crate::config::Config;
use crate::session::CredentialSet;

/// Build a store client signed with an explicitly submitted credential set.
///
/// Custom endpoints get path-style addressing, which MinIO and most other
/// S3-compatible stores require.
pub(crate) async fn store_client(config: &Config, credentials: &CredentialSet) -> aws_sdk_s3::Client {
    let identity = aws_sdk_s3::config::Credentials::new(
        credentials.access_key_id(),
        credentials.secret_access_key(),
        None,
        None,
        "s3-contents-provider",
    );

    let mut shared = aws_config::defaults(BehaviorVersion::latest())
        .credentials_provider(identity)
        .endpoint_url(credentials.endpoint_url());
    if let Some(region) = config.region() {
        shared = shared.region(Region::new(region.to_owned()));
    }
    let shared = shared.load().await;

    let store_config = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(store_config)
}

/// Build a store client from the default provider chain.
///
/// Used when the auth service reports an already-established session
/// (credentials persisted out of process, or role-based access).
pub(crate) async fn ambient_store_client(config: &Config) -> aws_sdk_s3::Client {
    let mut shared = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = config.region() {
        shared = shared.region(Region::new(region.to_owned()));
    }
    let shared = shared.load().await;
    aws_sdk_s3::Client::new(&shared)
}
