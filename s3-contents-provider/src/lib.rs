/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Credential-gated S3 contents provider.
//!
//! Adapts one credentialed session against an S3-compatible object store
//! into a hierarchical file-tree view. A [`SessionController`] gates access
//! behind a credential-challenge flow; once authenticated, the contents
//! [`Client`] translates path operations (list, read, write, rename,
//! delete) into object-store key operations.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> Result<(), s3_contents_provider::error::Error> {
//! use s3_contents_provider::{Config, CredentialSet, SessionController, SessionView};
//!
//! let config = Config::builder()
//!     .bucket("lake-storage")
//!     .auth_endpoint("http://localhost:8888/services/storage")
//!     .build();
//! let controller = SessionController::new(config)?;
//!
//! if !controller.check_authenticated().await? {
//!     let credentials = CredentialSet::new(
//!         "http://store.local:9000",
//!         "AKIAEXAMPLE",
//!         "secret",
//!     );
//!     controller.submit_credentials(credentials).await?;
//! }
//! assert_eq!(controller.view(), SessionView::FileBrowser);
//!
//! let listing = controller.contents().list().path("reports").send().await?;
//! for entry in listing.entries() {
//!     println!("{} ({:?})", entry.path(), entry.kind());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

/// Error types emitted by `s3-contents-provider`
pub mod error;

/// Common types used by `s3-contents-provider`
pub mod types;

/// Client configuration
pub mod config;

/// Auth-endpoint wire protocol and transport
pub mod auth;

/// Session state controller
pub mod session;

/// Contents provider client
pub mod client;

/// Contents provider operations
pub mod operation;

pub(crate) mod paths;

pub use client::Client;
pub use config::Config;
pub use session::{CredentialSet, SessionController, SessionView};
