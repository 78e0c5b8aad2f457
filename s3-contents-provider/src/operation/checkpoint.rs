/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::types::BucketVersioningStatus;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::paths;
use crate::types::Checkpoint;

/// Operation struct for recording a restorable checkpoint.
///
/// Only available when the bucket has object versioning enabled; reports
/// `Unsupported` otherwise.
#[derive(Clone, Default, Debug)]
pub(crate) struct CheckpointOp;

impl CheckpointOp {
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: CheckpointInput,
    ) -> Result<CheckpointOutput, Error> {
        let store = handle.store()?;
        let key = paths::object_key(&input.path);
        if key.is_empty() {
            return Err(error::not_found(&input.path));
        }

        let versioning = store
            .get_bucket_versioning()
            .bucket(handle.bucket())
            .send()
            .await
            .map_err(error::transport)?;
        if versioning.status != Some(BucketVersioningStatus::Enabled) {
            return Err(error::unsupported("object versioning"));
        }

        let head = store
            .head_object()
            .bucket(handle.bucket())
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let not_found = err
                    .as_service_error()
                    .map(|svc| svc.is_not_found())
                    .unwrap_or(false);
                if not_found {
                    error::not_found(&input.path)
                } else {
                    error::transport(err)
                }
            })?;

        let version_id = head
            .version_id
            .ok_or_else(|| error::unsupported("object versioning"))?;
        tracing::debug!(key = %key, version_id = %version_id, "recorded checkpoint");

        Ok(CheckpointOutput {
            checkpoint: Checkpoint::new(key, version_id),
        })
    }
}

/// Input type for recording a checkpoint.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct CheckpointInput {
    /// The file path to checkpoint.
    pub path: String,
}

/// Output type for recording a checkpoint.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct CheckpointOutput {
    checkpoint: Checkpoint,
}

impl CheckpointOutput {
    /// The recorded checkpoint.
    pub fn checkpoint(&self) -> &Checkpoint {
        &self.checkpoint
    }
}

/// Fluent builder constructing a [`CheckpointInput`] and sending it.
#[derive(Debug, Clone)]
pub struct CheckpointFluentBuilder {
    handle: Arc<Handle>,
    input: CheckpointInput,
}

impl CheckpointFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            input: CheckpointInput::default(),
        }
    }

    /// The file path to checkpoint.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.input.path = path.into();
        self
    }

    /// Initiate the checkpoint.
    pub async fn send(self) -> Result<CheckpointOutput, Error> {
        CheckpointOp::orchestrate(self.handle, self.input).await
    }
}
