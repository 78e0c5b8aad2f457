/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Path to object-key mapping.
//!
//! A filesystem path is the object key with no leading delimiter; the
//! store's hierarchy delimiter is reused as the path separator, so
//! translation is a direct string identity with delimiter-prefix
//! stripping. The root path maps to an empty-prefix listing.

use crate::operation::DEFAULT_DELIMITER;

/// Resolve a path to its object key.
pub(crate) fn object_key(path: &str) -> &str {
    path.trim_start_matches(DEFAULT_DELIMITER)
        .trim_end_matches(DEFAULT_DELIMITER)
}

/// Resolve a path to the key prefix covering its children.
///
/// Root resolves to the empty prefix; any other path resolves to the key
/// followed by the delimiter (also the key of the directory's marker
/// object, when one exists).
pub(crate) fn dir_prefix(path: &str) -> String {
    let key = object_key(path);
    if key.is_empty() {
        String::new()
    } else {
        format!("{key}{DEFAULT_DELIMITER}")
    }
}

/// Parent path of `path` ("" for top-level entries).
pub(crate) fn parent(path: &str) -> &str {
    let key = object_key(path);
    match key.rfind(DEFAULT_DELIMITER) {
        Some(idx) => &key[..idx],
        None => "",
    }
}

/// The final path segment of a key or prefix.
pub(crate) fn entry_name(key: &str) -> &str {
    let trimmed = key.trim_end_matches(DEFAULT_DELIMITER);
    match trimmed.rfind(DEFAULT_DELIMITER) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_paths_to_keys() {
        assert_eq!(object_key(""), "");
        assert_eq!(object_key("/"), "");
        assert_eq!(object_key("a.txt"), "a.txt");
        assert_eq!(object_key("/a.txt"), "a.txt");
        assert_eq!(object_key("b/c.txt"), "b/c.txt");
        assert_eq!(object_key("b/"), "b");
    }

    #[test]
    fn root_is_the_empty_prefix() {
        assert_eq!(dir_prefix(""), "");
        assert_eq!(dir_prefix("/"), "");
    }

    #[test]
    fn dir_prefix_ends_with_delimiter() {
        assert_eq!(dir_prefix("b"), "b/");
        assert_eq!(dir_prefix("b/"), "b/");
        assert_eq!(dir_prefix("a/b/c"), "a/b/c/");
    }

    #[test]
    fn parent_of_nested_paths() {
        assert_eq!(parent("a.txt"), "");
        assert_eq!(parent("b/c.txt"), "b");
        assert_eq!(parent("a/b/c/"), "a/b");
    }

    #[test]
    fn entry_names() {
        assert_eq!(entry_name("a.txt"), "a.txt");
        assert_eq!(entry_name("b/c.txt"), "c.txt");
        assert_eq!(entry_name("b/"), "b");
        assert_eq!(entry_name("a/b/sub/"), "sub");
    }
}
