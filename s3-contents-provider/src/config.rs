/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

pub(crate) mod loader;

/// Default timeout for auth-endpoint requests.
const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`SessionController`](crate::session::SessionController)
/// and the contents [`Client`](crate::client::Client) it hands out.
#[derive(Debug, Clone)]
pub struct Config {
    bucket: String,
    region: Option<String>,
    auth_endpoint: String,
    auth_timeout: Duration,
    store_client: Option<aws_sdk_s3::Client>,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The bucket presented as the file-tree root.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The region used when constructing the store client, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Base URL of the credential service.
    pub fn auth_endpoint(&self) -> &str {
        &self.auth_endpoint
    }

    /// Timeout applied to auth-endpoint requests.
    pub fn auth_timeout(&self) -> Duration {
        self.auth_timeout
    }

    /// An explicit store client override, when one was set.
    pub(crate) fn store_client_override(&self) -> Option<&aws_sdk_s3::Client> {
        self.store_client.as_ref()
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    bucket: Option<String>,
    region: Option<String>,
    auth_endpoint: Option<String>,
    auth_timeout: Option<Duration>,
    store_client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Set the bucket presented as the file-tree root. Required.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Set the region used when constructing the store client.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the base URL of the credential service. Required.
    ///
    /// The auth routes (`GET`/`POST`/`DELETE`) live under a fixed service
    /// path below this URL.
    pub fn auth_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.auth_endpoint = Some(endpoint.into());
        self
    }

    /// Set the timeout applied to auth-endpoint requests.
    ///
    /// Default is 30 seconds.
    pub fn auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = Some(timeout);
        self
    }

    /// Set an explicit S3 client to use instead of constructing one from
    /// submitted credentials.
    ///
    /// Intended for tests and for hosts that manage their own signed client.
    pub fn store_client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.store_client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`](crate::config::Config)
    pub fn build(self) -> Config {
        Config {
            bucket: self.bucket.expect("bucket set"),
            region: self.region,
            auth_endpoint: self.auth_endpoint.expect("auth endpoint set"),
            auth_timeout: self.auth_timeout.unwrap_or(DEFAULT_AUTH_TIMEOUT),
            store_client: self.store_client,
        }
    }
}
