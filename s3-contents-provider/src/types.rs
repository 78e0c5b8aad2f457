/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::DateTime;
use bytes::Bytes;

use crate::paths;

/// Whether a filesystem entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// An object in the store.
    File,

    /// A common key prefix, presented as a directory. Directories are
    /// computed from keys sharing a prefix; they are not stored, except
    /// where a zero-length marker object backs an otherwise-empty prefix.
    Directory,
}

/// The translated filesystem view of an object-store key.
///
/// Entries are materialized on each list/get call and are not cached
/// across calls.
#[derive(Debug, Clone)]
pub struct FsEntry {
    path: String,
    kind: EntryKind,
    size: Option<u64>,
    last_modified: Option<DateTime>,
    content: Option<Bytes>,
}

impl FsEntry {
    pub(crate) fn file(path: impl Into<String>, size: Option<u64>, last_modified: Option<DateTime>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size,
            last_modified,
            content: None,
        }
    }

    pub(crate) fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            size: None,
            last_modified: None,
            content: None,
        }
    }

    pub(crate) fn with_content(mut self, content: Bytes) -> Self {
        self.content = Some(content);
        self
    }

    /// Slash-separated path of this entry, relative to the tree root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The final path segment.
    pub fn name(&self) -> &str {
        paths::entry_name(&self.path)
    }

    /// Whether this entry is a file or a directory.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// True when this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Object size in bytes, when known.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Last-modified timestamp reported by the store, when known.
    pub fn last_modified(&self) -> Option<&DateTime> {
        self.last_modified.as_ref()
    }

    /// Object content. Present only on file-read results.
    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }
}

/// A restorable checkpoint recorded from a versioned store.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    path: String,
    version_id: String,
}

impl Checkpoint {
    pub(crate) fn new(path: impl Into<String>, version_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version_id: version_id.into(),
        }
    }

    /// Path the checkpoint was recorded for.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The store's version id for the object at checkpoint time.
    pub fn version_id(&self) -> &str {
        &self.version_id
    }
}

/// Non-fatal warning attached to an otherwise successful rename.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum RenameWarning {
    /// The copy step succeeded but the cleanup delete failed, orphaning the
    /// stale source key. The key must be cleaned up separately.
    ResidualObject {
        /// Key of the orphaned source object.
        key: String,
    },
}
