/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::paths;
use crate::types::FsEntry;

/// Operation struct for reading the object at a path.
#[derive(Clone, Default, Debug)]
pub(crate) struct Get;

impl Get {
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: GetInput,
    ) -> Result<GetOutput, Error> {
        let store = handle.store()?;
        let key = paths::object_key(&input.path);
        if key.is_empty() {
            return Err(error::not_found(&input.path));
        }
        tracing::debug!(key = %key, "reading object");

        let output = store
            .get_object()
            .bucket(handle.bucket())
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let no_such_key = err
                    .as_service_error()
                    .map(|svc| svc.is_no_such_key())
                    .unwrap_or(false)
                    || err
                        .raw_response()
                        .map(|raw| raw.status().as_u16() == 404)
                        .unwrap_or(false);
                if no_such_key {
                    error::not_found(&input.path)
                } else {
                    error::transport(err)
                }
            })?;

        let last_modified = output.last_modified;
        let body = output
            .body
            .collect()
            .await
            .map_err(error::transport)?
            .into_bytes();

        let entry = FsEntry::file(key, Some(body.len() as u64), last_modified).with_content(body);
        Ok(GetOutput { entry })
    }
}

/// Input type for reading the object at a path.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct GetInput {
    /// The file path to read.
    pub path: String,
}

/// Output type for reading the object at a path.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct GetOutput {
    entry: FsEntry,
}

impl GetOutput {
    /// The file entry, content included.
    pub fn entry(&self) -> &FsEntry {
        &self.entry
    }

    /// Consume the output and take the entry.
    pub fn into_entry(self) -> FsEntry {
        self.entry
    }
}

/// Fluent builder constructing a [`GetInput`] and sending it.
#[derive(Debug, Clone)]
pub struct GetFluentBuilder {
    handle: Arc<Handle>,
    input: GetInput,
}

impl GetFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            input: GetInput::default(),
        }
    }

    /// The file path to read.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.input.path = path.into();
        self
    }

    /// Initiate the read.
    pub async fn send(self) -> Result<GetOutput, Error> {
        Get::orchestrate(self.handle, self.input).await
    }
}
