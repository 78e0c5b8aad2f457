/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::types::{Delete, ObjectIdentifier};

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::delete::{collect_keys, object_exists};
use crate::operation::DELETE_BATCH_SIZE;
use crate::paths;
use crate::types::{FsEntry, RenameWarning};

/// Operation struct for renaming an object or a directory prefix.
///
/// The store has no native rename; this is copy-to-new-key followed by
/// delete-of-old-key. A failed copy leaves the source intact and fails the
/// operation; a failed cleanup delete after a successful copy still reports
/// success, with the orphaned source surfaced as a residual-object warning.
#[derive(Clone, Default, Debug)]
pub(crate) struct Rename;

impl Rename {
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: RenameInput,
    ) -> Result<RenameOutput, Error> {
        let store = handle.store()?;
        let old_key = paths::object_key(&input.old_path);
        let new_key = paths::object_key(&input.new_path);
        if old_key.is_empty() {
            return Err(error::not_found(&input.old_path));
        }
        if new_key.is_empty() {
            return Err(error::rename_failed("destination path is empty"));
        }

        if object_exists(&store, handle.bucket(), old_key).await? {
            return rename_object(&handle, &store, old_key, new_key).await;
        }
        rename_directory(&handle, &store, &input).await
    }
}

async fn rename_object(
    handle: &Handle,
    store: &aws_sdk_s3::Client,
    old_key: &str,
    new_key: &str,
) -> Result<RenameOutput, Error> {
    tracing::debug!(from = %old_key, to = %new_key, "renaming object");
    copy_key(store, handle.bucket(), old_key, new_key).await?;

    let stale = vec![old_key.to_owned()];
    let warning = delete_stale(store, handle.bucket(), &stale)
        .await
        .err()
        .map(|err| residual(old_key, err));

    Ok(RenameOutput {
        entry: FsEntry::file(new_key, None, None),
        warning,
    })
}

async fn rename_directory(
    handle: &Handle,
    store: &aws_sdk_s3::Client,
    input: &RenameInput,
) -> Result<RenameOutput, Error> {
    let old_prefix = paths::dir_prefix(&input.old_path);
    let new_prefix = paths::dir_prefix(&input.new_path);
    let keys = collect_keys(store, handle.bucket(), &old_prefix).await?;
    if keys.is_empty() {
        return Err(error::not_found(&input.old_path));
    }

    tracing::debug!(from = %old_prefix, to = %new_prefix, count = keys.len(), "renaming directory");
    for key in &keys {
        let suffix = key.strip_prefix(&old_prefix).unwrap_or(key);
        let target = format!("{new_prefix}{suffix}");
        copy_key(store, handle.bucket(), key, &target).await?;
    }

    let warning = delete_stale(store, handle.bucket(), &keys)
        .await
        .err()
        .map(|err| residual(&old_prefix, err));

    Ok(RenameOutput {
        entry: FsEntry::directory(paths::object_key(&input.new_path).to_owned()),
        warning,
    })
}

async fn copy_key(
    store: &aws_sdk_s3::Client,
    bucket: &str,
    from: &str,
    to: &str,
) -> Result<(), Error> {
    store
        .copy_object()
        .bucket(bucket)
        .copy_source(format!("{bucket}/{from}"))
        .key(to)
        .send()
        .await
        .map_err(error::rename_failed)?;
    Ok(())
}

async fn delete_stale(
    store: &aws_sdk_s3::Client,
    bucket: &str,
    keys: &[String],
) -> Result<(), Error> {
    if let [key] = keys {
        store
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(error::transport)?;
        return Ok(());
    }
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
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(error::transport)?;
    }
    Ok(())
}

fn residual(stale: &str, err: Error) -> RenameWarning {
    tracing::warn!(
        key = %stale,
        error = %err,
        "rename copy succeeded but cleanup delete failed; stale source must be cleaned up separately"
    );
    RenameWarning::ResidualObject {
        key: stale.to_owned(),
    }
}

/// Input type for renaming an object or directory.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct RenameInput {
    /// The current path.
    pub old_path: String,

    /// The destination path.
    pub new_path: String,
}

/// Output type for renaming an object or directory.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct RenameOutput {
    entry: FsEntry,
    warning: Option<RenameWarning>,
}

impl RenameOutput {
    /// The entry at its new path.
    pub fn entry(&self) -> &FsEntry {
        &self.entry
    }

    /// Non-fatal residual-object warning, when the cleanup delete failed.
    pub fn warning(&self) -> Option<&RenameWarning> {
        self.warning.as_ref()
    }
}

/// Fluent builder constructing a [`RenameInput`] and sending it.
#[derive(Debug, Clone)]
pub struct RenameFluentBuilder {
    handle: Arc<Handle>,
    input: RenameInput,
}

impl RenameFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            input: RenameInput::default(),
        }
    }

    /// The current path.
    pub fn old_path(mut self, path: impl Into<String>) -> Self {
        self.input.old_path = path.into();
        self
    }

    /// The destination path.
    pub fn new_path(mut self, path: impl Into<String>) -> Self {
        self.input.new_path = path.into();
        self
    }

    /// Initiate the rename.
    pub async fn send(self) -> Result<RenameOutput, Error> {
        Rename::orchestrate(self.handle, self.input).await
    }
}
