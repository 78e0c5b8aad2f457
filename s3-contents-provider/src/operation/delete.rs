/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::types::{Delete, ObjectIdentifier};

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::DELETE_BATCH_SIZE;
use crate::paths;

/// Operation struct for deleting the object or directory at a path.
#[derive(Clone, Default, Debug)]
pub(crate) struct DeleteOp;

impl DeleteOp {
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: DeleteInput,
    ) -> Result<DeleteOutput, Error> {
        let store = handle.store()?;
        let key = paths::object_key(&input.path);
        if key.is_empty() {
            return Err(error::not_found(&input.path));
        }

        if object_exists(&store, handle.bucket(), key).await? {
            tracing::debug!(key = %key, "deleting object");
            store
                .delete_object()
                .bucket(handle.bucket())
                .key(key)
                .send()
                .await
                .map_err(error::transport)?;
            return Ok(DeleteOutput { deleted: 1 });
        }

        // not an object; resolve as a directory prefix and delete everything
        // under it, the marker included
        let prefix = paths::dir_prefix(&input.path);
        let keys = collect_keys(&store, handle.bucket(), &prefix).await?;
        if keys.is_empty() {
            return Err(error::not_found(&input.path));
        }

        tracing::debug!(prefix = %prefix, count = keys.len(), "deleting directory");
        let deleted = keys.len();
        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            let objects = batch
                .iter()
                .map(|key| {
                    ObjectIdentifier::builder()
                        .key(key)
                        .build()
                        .map_err(error::transport)
                })
                .collect::<Result<Vec<_>, Error>>()?;
            let delete = Delete::builder()
                .set_objects(Some(objects))
                .quiet(true)
                .build()
                .map_err(error::transport)?;
            store
                .delete_objects()
                .bucket(handle.bucket())
                .delete(delete)
                .send()
                .await
                .map_err(error::transport)?;
        }

        Ok(DeleteOutput { deleted })
    }
}

/// Whether an object exists at `key`.
pub(crate) async fn object_exists(
    store: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<bool, Error> {
    match store.head_object().bucket(bucket).key(key).send().await {
        Ok(_) => Ok(true),
        Err(err) => {
            let not_found = err
                .as_service_error()
                .map(|svc| svc.is_not_found())
                .unwrap_or(false)
                || err
                    .raw_response()
                    .map(|raw| raw.status().as_u16() == 404)
                    .unwrap_or(false);
            if not_found {
                Ok(false)
            } else {
                Err(error::transport(err))
            }
        }
    }
}

/// Collect every key under `prefix`, paginating until exhausted.
pub(crate) async fn collect_keys(
    store: &aws_sdk_s3::Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, Error> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;
    loop {
        let mut request = store.list_objects_v2().bucket(bucket).prefix(prefix);
        if let Some(token) = &continuation_token {
            request = request.continuation_token(token);
        }
        let output = request.send().await.map_err(error::transport)?;
        keys.extend(
            output
                .contents
                .unwrap_or_default()
                .into_iter()
                .filter_map(|object| object.key),
        );
        let truncated =
            output.is_truncated.unwrap_or(false) && output.next_continuation_token.is_some();
        if truncated {
            continuation_token = output.next_continuation_token;
        } else {
            break;
        }
    }
    Ok(keys)
}

/// Input type for deleting the object or directory at a path.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct DeleteInput {
    /// The path to delete.
    pub path: String,
}

/// Output type for deleting the object or directory at a path.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct DeleteOutput {
    deleted: usize,
}

impl DeleteOutput {
    /// Number of keys removed from the store.
    pub fn deleted(&self) -> usize {
        self.deleted
    }
}

/// Fluent builder constructing a [`DeleteInput`] and sending it.
#[derive(Debug, Clone)]
pub struct DeleteFluentBuilder {
    handle: Arc<Handle>,
    input: DeleteInput,
}

impl DeleteFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            input: DeleteInput::default(),
        }
    }

    /// The path to delete.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.input.path = path.into();
        self
    }

    /// Initiate the delete.
    pub async fn send(self) -> Result<DeleteOutput, Error> {
        DeleteOp::orchestrate(self.handle, self.input).await
    }
}
