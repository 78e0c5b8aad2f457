/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::paths;
use crate::types::FsEntry;

/// Operation struct for creating an empty directory.
///
/// Writes a zero-length marker object at the directory prefix, making an
/// otherwise key-less prefix visible to subsequent listings.
#[derive(Clone, Default, Debug)]
pub(crate) struct NewDirectory;

impl NewDirectory {
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: NewDirectoryInput,
    ) -> Result<NewDirectoryOutput, Error> {
        let store = handle.store()?;
        let marker = paths::dir_prefix(&input.path);
        if marker.is_empty() {
            return Err(error::not_found(&input.path));
        }
        tracing::debug!(marker = %marker, "creating directory marker");

        store
            .put_object()
            .bucket(handle.bucket())
            .key(&marker)
            .body(ByteStream::from_static(&[]))
            .send()
            .await
            .map_err(error::transport)?;

        Ok(NewDirectoryOutput {
            entry: FsEntry::directory(paths::object_key(&input.path).to_owned()),
        })
    }
}

/// Input type for creating an empty directory.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct NewDirectoryInput {
    /// The directory path to create.
    pub path: String,
}

/// Output type for creating an empty directory.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct NewDirectoryOutput {
    entry: FsEntry,
}

impl NewDirectoryOutput {
    /// The created directory entry.
    pub fn entry(&self) -> &FsEntry {
        &self.entry
    }
}

/// Fluent builder constructing a [`NewDirectoryInput`] and sending it.
#[derive(Debug, Clone)]
pub struct NewDirectoryFluentBuilder {
    handle: Arc<Handle>,
    input: NewDirectoryInput,
}

impl NewDirectoryFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            input: NewDirectoryInput::default(),
        }
    }

    /// The directory path to create.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.input.path = path.into();
        self
    }

    /// Initiate the create.
    pub async fn send(self) -> Result<NewDirectoryOutput, Error> {
        NewDirectory::orchestrate(self.handle, self.input).await
    }
}
