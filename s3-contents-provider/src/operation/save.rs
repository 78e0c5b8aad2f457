/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::paths;
use crate::types::FsEntry;

/// Operation struct for writing content at a path.
#[derive(Clone, Default, Debug)]
pub(crate) struct Save;

impl Save {
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: SaveInput,
    ) -> Result<SaveOutput, Error> {
        let store = handle.store()?;
        let key = paths::object_key(&input.path);
        if key.is_empty() {
            return Err(error::not_found(&input.path));
        }
        let content = input.content;
        tracing::debug!(key = %key, size = content.len(), "writing object");

        // object stores are overwrite-consistent; no conditional write
        store
            .put_object()
            .bucket(handle.bucket())
            .key(key)
            .body(ByteStream::from(content.clone()))
            .send()
            .await
            .map_err(error::transport)?;

        let entry =
            FsEntry::file(key, Some(content.len() as u64), None).with_content(content);
        Ok(SaveOutput { entry })
    }
}

/// Input type for writing content at a path.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct SaveInput {
    /// The file path to write.
    pub path: String,

    /// The content to write.
    pub content: Bytes,
}

/// Output type for writing content at a path.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct SaveOutput {
    entry: FsEntry,
}

impl SaveOutput {
    /// The written file entry.
    pub fn entry(&self) -> &FsEntry {
        &self.entry
    }
}

/// Fluent builder constructing a [`SaveInput`] and sending it.
#[derive(Debug, Clone)]
pub struct SaveFluentBuilder {
    handle: Arc<Handle>,
    input: SaveInput,
}

impl SaveFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            input: SaveInput::default(),
        }
    }

    /// The file path to write.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.input.path = path.into();
        self
    }

    /// The content to write.
    pub fn content(mut self, content: impl Into<Bytes>) -> Self {
        self.input.content = content.into();
        self
    }

    /// Initiate the write.
    pub async fn send(self) -> Result<SaveOutput, Error> {
        Save::orchestrate(self.handle, self.input).await
    }
}
