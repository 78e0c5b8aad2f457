/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::operation::checkpoint::CheckpointFluentBuilder;
use crate::operation::delete::DeleteFluentBuilder;
use crate::operation::get::GetFluentBuilder;
use crate::operation::list::ListFluentBuilder;
use crate::operation::new_directory::NewDirectoryFluentBuilder;
use crate::operation::rename::RenameFluentBuilder;
use crate::operation::save::SaveFluentBuilder;
use crate::session::SessionHandle;

/// Contents provider client for one browsing panel.
///
/// Translates hierarchical filesystem-style requests into object-store key
/// operations against the session's bucket. Every operation requires an
/// authenticated session and fails with `NotAuthenticated` otherwise.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations: configuration plus the
/// shared session state holding the signed store client.
#[derive(Debug)]
pub(crate) struct Handle {
    config: Config,
    session: Arc<SessionHandle>,
}

impl Handle {
    pub(crate) fn new(config: Config, session: Arc<SessionHandle>) -> Self {
        Self { config, session }
    }

    /// The signed store client, or `NotAuthenticated`.
    pub(crate) fn store(&self) -> Result<aws_sdk_s3::Client, Error> {
        self.session.store_client()
    }

    pub(crate) fn bucket(&self) -> &str {
        self.config.bucket()
    }
}

impl Client {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self { handle }
    }

    /// List the immediate children of a path.
    ///
    /// Paginates internally until all keys under the prefix are retrieved;
    /// keys sharing a sub-prefix collapse into a single directory entry.
    /// Entries are returned directories-before-files, then
    /// lexicographically by name.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: s3_contents_provider::Client) -> Result<(), s3_contents_provider::error::Error> {
    /// let listing = client.list().path("reports/2024").send().await?;
    /// for entry in listing.entries() {
    ///     println!("{}", entry.name());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn list(&self) -> ListFluentBuilder {
        ListFluentBuilder::new(self.handle.clone())
    }

    /// Read the object at a path, content included.
    pub fn get(&self) -> GetFluentBuilder {
        GetFluentBuilder::new(self.handle.clone())
    }

    /// Write content as a new object version at a path.
    pub fn save(&self) -> SaveFluentBuilder {
        SaveFluentBuilder::new(self.handle.clone())
    }

    /// Delete the object at a path, or everything under a directory prefix.
    pub fn delete(&self) -> DeleteFluentBuilder {
        DeleteFluentBuilder::new(self.handle.clone())
    }

    /// Rename an object or a directory prefix (copy, then delete).
    pub fn rename(&self) -> RenameFluentBuilder {
        RenameFluentBuilder::new(self.handle.clone())
    }

    /// Create a zero-length marker object making an empty directory
    /// visible to subsequent listings.
    pub fn new_directory(&self) -> NewDirectoryFluentBuilder {
        NewDirectoryFluentBuilder::new(self.handle.clone())
    }

    /// Record the current object version as a restorable checkpoint.
    ///
    /// Reports `Unsupported` when the bucket is not versioned.
    pub fn checkpoint(&self) -> CheckpointFluentBuilder {
        CheckpointFluentBuilder::new(self.handle.clone())
    }
}
