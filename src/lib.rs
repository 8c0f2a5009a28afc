//! Query execution core: score modes, doc-id iterators, scorers with dynamic
//! pruning, and the lazy weight/scorer-supplier factory that ties a query to
//! the segments it runs against.

#[macro_use]
mod macros;

pub mod collector;
pub mod common;
pub mod config;
pub mod core;
pub mod index;
pub mod logger;
pub mod query;
pub mod reader;

pub use crate::common::constants::{NOT_STARTED, NO_MORE_DOCS};
pub use crate::common::errors::{ContractViolation, SearchError};
pub use crate::common::types::{DocId, Score};
pub use crate::core::{
    BulkScorer, DocIdIterator, DocIdSetIterator, Query, ScoreMode, Scorer, ScorerSupplier, Weight,
};
pub use crate::index::{SegmentBuilder, SegmentReader};
pub use crate::reader::IndexSearcher;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, SearchError>;
