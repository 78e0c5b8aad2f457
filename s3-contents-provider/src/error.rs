/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of contents provider errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Network or connectivity failure reaching the store or the auth endpoint,
    /// including non-success responses with no more specific classification.
    Transport,

    /// The store rejected the access key id.
    InvalidCredentials,

    /// The store rejected the secret key / request signature.
    SignatureMismatch,

    /// A contents operation was attempted before the session reached the
    /// authenticated state.
    NotAuthenticated,

    /// No object exists at the resolved key.
    NotFound,

    /// The copy step of a rename did not complete; the source object is intact.
    RenameFailed,

    /// The capability is not available on this store.
    Unsupported,
}

impl Error {
    /// Creates a new [`Error`] from a known kind of error as well as an arbitrary error source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::InvalidCredentials => write!(f, "invalid access key id"),
            ErrorKind::SignatureMismatch => write!(f, "signature mismatch"),
            ErrorKind::NotAuthenticated => write!(f, "not authenticated"),
            ErrorKind::NotFound => write!(f, "resource not found"),
            ErrorKind::RenameFailed => write!(f, "rename failed"),
            ErrorKind::Unsupported => write!(f, "capability not supported"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

pub(crate) fn transport<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Transport, err)
}

pub(crate) fn not_authenticated() -> Error {
    Error::new(
        ErrorKind::NotAuthenticated,
        "session has not been authenticated against the store",
    )
}

pub(crate) fn not_found(path: &str) -> Error {
    Error::new(ErrorKind::NotFound, format!("no object at '{path}'"))
}

pub(crate) fn rename_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::RenameFailed, err)
}

pub(crate) fn unsupported(capability: &str) -> Error {
    Error::new(
        ErrorKind::Unsupported,
        format!("{capability} is not available on this store"),
    )
}

/// Corrected message surfaced when the store rejects the access key id.
pub(crate) const INVALID_ACCESS_KEY_MESSAGE: &str = "The access key ID you entered was invalid.";

/// Corrected message surfaced when the store rejects the secret key.
pub(crate) const SIGNATURE_MISMATCH_MESSAGE: &str = "The secret access key you entered was invalid";

/// Classify a failed credential exchange from the raw store error text.
///
/// The raw store error string is never surfaced to the caller; known
/// rejection codes are mapped to corrected, human-readable messages.
pub(crate) fn classify_exchange_failure(message: Option<String>) -> Error {
    let raw = message.unwrap_or_default();
    if raw.contains("InvalidAccessKeyId") {
        Error::new(ErrorKind::InvalidCredentials, INVALID_ACCESS_KEY_MESSAGE)
    } else if raw.contains("SignatureDoesNotMatch") {
        Error::new(ErrorKind::SignatureMismatch, SIGNATURE_MISMATCH_MESSAGE)
    } else {
        Error::new(
            ErrorKind::Transport,
            "the store rejected the submitted credentials",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn classifies_invalid_access_key() {
        let err = classify_exchange_failure(Some(
            "An error occurred (InvalidAccessKeyId) when calling the ListBuckets operation".into(),
        ));
        assert_eq!(err.kind(), &ErrorKind::InvalidCredentials);
        assert_eq!(err.source().unwrap().to_string(), INVALID_ACCESS_KEY_MESSAGE);
    }

    #[test]
    fn classifies_signature_mismatch() {
        let err = classify_exchange_failure(Some(
            "An error occurred (SignatureDoesNotMatch) when calling the ListBuckets operation"
                .into(),
        ));
        assert_eq!(err.kind(), &ErrorKind::SignatureMismatch);
        assert_eq!(
            err.source().unwrap().to_string(),
            SIGNATURE_MISMATCH_MESSAGE
        );
    }

    #[test]
    fn unclassified_rejection_is_transport() {
        let err = classify_exchange_failure(None);
        assert_eq!(err.kind(), &ErrorKind::Transport);
    }

    #[test]
    fn raw_store_text_never_surfaces() {
        let raw = "SignatureDoesNotMatch: The request signature we calculated does not match";
        let err = classify_exchange_failure(Some(raw.into()));
        assert!(!err.source().unwrap().to_string().contains("calculated"));
    }
}
