use std::io;
use std::sync::Arc;

use thiserror::Error;

use super::file_operations::FileOperationError;
use crate::core::ScoreMode;
use crate::DocId;

/// Misuse of the iterator/scorer protocol by the caller.
///
/// These are programming errors. They fail the current query execution
/// immediately and are never corrected behind the caller's back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("score() called while positioned on {doc}, which is not a match")]
    ScoreOffMatch { doc: DocId },

    #[error("score() called but the score mode {0:?} does not compute scores")]
    ScoresNotNeeded(ScoreMode),

    #[error("advance({target}) must move past the current position {current}")]
    AdvanceNotForward { current: DocId, target: DocId },

    #[error("next_doc() called after the iterator was exhausted")]
    NextAfterExhausted,

    #[error("set_min_competitive_score() is not allowed under exhaustive score mode {0:?}")]
    ThresholdUnderExhaustiveMode(ScoreMode),

    #[error("set_min_competitive_score() is not allowed when score mode {0:?} computes no scores")]
    ThresholdWithoutScores(ScoreMode),

    #[error("min competitive score must not be NaN")]
    NanThreshold,
}

#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The iterator/scorer contract was broken by the caller.
    #[error("Contract violation: {0}")]
    ContractViolation(#[from] ContractViolation),
    /// Failure reported by the index layer while reading postings.
    #[error("An IO error occurred: '{0}'")]
    IoError(Arc<io::Error>),
    /// Invalid argument was passed by the user.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),
    /// An internal error occurred. This is are internal states that should not be reached.
    #[error("Internal error: '{0}'")]
    InternalError(String),
    /// An Error occurred in one of the segment worker threads.
    #[error("An error occurred in a thread: '{0}'")]
    ErrorInThread(String),
    /// System error. (e.g.: We failed spawning a new thread).
    #[error("System error.'{0}'")]
    SystemError(String),

    #[error("'{0}'")]
    FileOperationError(Arc<FileOperationError>),
}

impl SearchError {
    /// Returns the contract violation carried by this error, if any.
    pub fn as_contract_violation(&self) -> Option<&ContractViolation> {
        match self {
            SearchError::ContractViolation(violation) => Some(violation),
            _ => None,
        }
    }
}

impl From<io::Error> for SearchError {
    fn from(io_err: io::Error) -> SearchError {
        SearchError::IoError(Arc::new(io_err))
    }
}

impl From<rayon::ThreadPoolBuildError> for SearchError {
    fn from(error: rayon::ThreadPoolBuildError) -> SearchError {
        SearchError::SystemError(error.to_string())
    }
}

impl From<FileOperationError> for SearchError {
    fn from(error: FileOperationError) -> SearchError {
        SearchError::FileOperationError(Arc::new(error))
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(serde_error: serde_json::Error) -> SearchError {
        SearchError::InvalidArgument(serde_error.to_string())
    }
}
