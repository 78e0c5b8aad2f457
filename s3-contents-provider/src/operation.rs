/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Types for the list operation
pub mod list;

/// Types for the get operation
pub mod get;

/// Types for the save operation
pub mod save;

/// Types for the delete operation
pub mod delete;

/// Types for the rename operation
pub mod rename;

/// Types for the new-directory operation
pub mod new_directory;

/// Types for the checkpoint operation
pub mod checkpoint;

/// The hierarchy delimiter reused as the path separator.
pub(crate) const DEFAULT_DELIMITER: &str = "/";

/// Maximum number of keys per batch-delete request.
pub(crate) const DELETE_BATCH_SIZE: usize = 1000;
