//! Operation descriptors.
//!
//! Every request type implements [`Operation`], which names the remote
//! operation, its result type and the exact set of service error kinds the
//! operation is declared to produce. The dispatcher uses the declared set to
//! filter service faults: a kind outside it is reported as an unexpected
//! response instead of being passed through.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{error::ErrorKind, validate::Validate};

/// A named remote operation, implemented by its request type.
pub trait Operation: Serialize + Validate + Send + Sync {
    /// Wire name of the operation, e.g. `CreateVocabulary`.
    const NAME: &'static str;

    /// Service error kinds this operation may report.
    const ERRORS: &'static [ErrorKind];

    /// Result returned on success.
    type Output: DeserializeOwned + Send;

    /// Whether the operation declares the given kind.
    #[must_use]
    fn declares(kind: ErrorKind) -> bool {
        Self::ERRORS.contains(&kind)
    }
}

/// Result of operations that return nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoOutput {}

/// Declared error sets shared by groups of operations.
pub(crate) mod declared {
    use crate::error::ErrorKind::{
        self, BadRequest, Conflict, InternalFailure, LimitExceeded, NotFound,
    };

    /// Create and start operations.
    pub(crate) const CREATE: &[ErrorKind] = &[BadRequest, LimitExceeded, InternalFailure, Conflict];

    /// Get, describe and delete-by-name operations.
    pub(crate) const LOOKUP: &[ErrorKind] = &[NotFound, LimitExceeded, InternalFailure, BadRequest];

    /// List operations, and deletes that do not report missing resources.
    pub(crate) const LIST: &[ErrorKind] = &[BadRequest, LimitExceeded, InternalFailure];

    /// Updates that can collide with concurrent changes, and tag mutations.
    pub(crate) const UPDATE: &[ErrorKind] = &[
        BadRequest,
        LimitExceeded,
        InternalFailure,
        NotFound,
        Conflict,
    ];
}

/// Implements [`Operation`] for a request type.
macro_rules! operation {
    ($request:ty => $output:ty, $name:literal, $errors:expr) => {
        impl $crate::operation::Operation for $request {
            const NAME: &'static str = $name;
            const ERRORS: &'static [$crate::error::ErrorKind] = $errors;
            type Output = $output;
        }
    };
}

pub(crate) use operation;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DeleteTranscriptionJobRequest, DeleteVocabularyRequest, GetVocabularyRequest,
        TagResourceRequest, UpdateVocabularyFilterRequest,
    };

    #[test]
    fn test_declared_sets() {
        assert!(DeleteVocabularyRequest::declares(ErrorKind::NotFound));
        assert!(!DeleteVocabularyRequest::declares(ErrorKind::Conflict));
        assert!(!DeleteTranscriptionJobRequest::declares(ErrorKind::NotFound));
        assert!(GetVocabularyRequest::declares(ErrorKind::NotFound));
        assert!(!UpdateVocabularyFilterRequest::declares(ErrorKind::Conflict));
        assert!(TagResourceRequest::declares(ErrorKind::Conflict));
    }

    #[test]
    fn test_local_kinds_never_declared() {
        assert!(!GetVocabularyRequest::declares(ErrorKind::Transport));
        assert!(!GetVocabularyRequest::declares(ErrorKind::UnexpectedResponse));
    }

    #[test]
    fn test_no_output_accepts_empty_object() {
        let out: NoOutput = serde_json::from_str("{}").unwrap();
        assert_eq!(out, NoOutput {});
        let out: NoOutput = serde_json::from_str(r#"{"Extra": 1}"#).unwrap();
        assert_eq!(out, NoOutput {});
    }
}
