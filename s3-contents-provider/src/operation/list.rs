/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::DEFAULT_DELIMITER;
use crate::paths;
use crate::types::FsEntry;

/// Operation struct for listing the immediate children of a path.
#[derive(Clone, Default, Debug)]
pub(crate) struct List;

impl List {
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: ListInput,
    ) -> Result<ListOutput, Error> {
        let store = handle.store()?;
        let prefix = paths::dir_prefix(&input.path);
        tracing::debug!(path = %input.path, prefix = %prefix, "listing children");

        let mut files = Vec::new();
        let mut common_prefixes = BTreeSet::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = store
                .list_objects_v2()
                .bucket(handle.bucket())
                .delimiter(DEFAULT_DELIMITER);
            if !prefix.is_empty() {
                request = request.prefix(&prefix);
            }
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let output = request.send().await.map_err(error::transport)?;

            for object in output.contents.unwrap_or_default() {
                let Some(key) = object.key else { continue };
                // the listed directory's own marker object, and any other
                // zero-length marker, is not a child entry
                if key == prefix || key.ends_with(DEFAULT_DELIMITER) {
                    continue;
                }
                files.push(FsEntry::file(
                    key,
                    object.size.map(|size| size as u64),
                    object.last_modified,
                ));
            }
            for common in output.common_prefixes.unwrap_or_default() {
                if let Some(sub_prefix) = common.prefix {
                    common_prefixes.insert(sub_prefix);
                }
            }

            let truncated = output.is_truncated.unwrap_or(false)
                && output.next_continuation_token.is_some();
            if truncated {
                continuation_token = output.next_continuation_token;
            } else {
                break;
            }
        }

        let mut entries: Vec<FsEntry> = common_prefixes
            .into_iter()
            .map(|sub_prefix| {
                FsEntry::directory(sub_prefix.trim_end_matches(DEFAULT_DELIMITER).to_owned())
            })
            .collect();
        entries.extend(files);
        sort_entries(&mut entries);

        Ok(ListOutput { entries })
    }
}

/// Directories before files, then lexicographically by name.
pub(crate) fn sort_entries(entries: &mut [FsEntry]) {
    entries.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name().cmp(b.name()),
    });
}

/// Input type for listing the children of a path.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct ListInput {
    /// The directory path to list. Empty for the tree root.
    pub path: String,
}

/// Output type for listing the children of a path.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct ListOutput {
    entries: Vec<FsEntry>,
}

impl ListOutput {
    /// The child entries, directories before files.
    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    /// Consume the output and take the entries.
    pub fn into_entries(self) -> Vec<FsEntry> {
        self.entries
    }
}

/// Fluent builder constructing a [`ListInput`] and sending it.
#[derive(Debug, Clone)]
pub struct ListFluentBuilder {
    handle: Arc<Handle>,
    input: ListInput,
}

impl ListFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            input: ListInput::default(),
        }
    }

    /// The directory path to list. Defaults to the tree root.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.input.path = path.into();
        self
    }

    /// Initiate the listing.
    pub async fn send(self) -> Result<ListOutput, Error> {
        List::orchestrate(self.handle, self.input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_names(entries: &[FsEntry]) -> Vec<(&str, bool)> {
        entries.iter().map(|e| (e.path(), e.is_dir())).collect()
    }

    #[test]
    fn orders_directories_before_files() {
        let mut entries = vec![
            FsEntry::file("z.txt", Some(1), None),
            FsEntry::directory("b"),
            FsEntry::file("a.txt", Some(1), None),
            FsEntry::directory("y"),
        ];
        sort_entries(&mut entries);
        assert_eq!(
            entry_names(&entries),
            vec![("b", true), ("y", true), ("a.txt", false), ("z.txt", false)]
        );
    }

    #[test]
    fn orders_nested_entries_by_name() {
        let mut entries = vec![
            FsEntry::file("reports/2024/b.csv", Some(1), None),
            FsEntry::file("reports/2024/a.csv", Some(1), None),
            FsEntry::directory("reports/2024/archive"),
        ];
        sort_entries(&mut entries);
        assert_eq!(
            entry_names(&entries),
            vec![
                ("reports/2024/archive", true),
                ("reports/2024/a.csv", false),
                ("reports/2024/b.csv", false)
            ]
        );
    }
}
