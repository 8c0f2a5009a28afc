use super::types::DocId;

/// Position of an iterator before its first advance.
pub const NOT_STARTED: DocId = -1;

/// Position of an iterator once every match has been consumed.
pub const NO_MORE_DOCS: DocId = DocId::MAX;

/// Passed as `lead_cost` when the cost of the iteration driver is irrelevant.
pub const UNBOUNDED_LEAD_COST: u64 = u64::MAX;

/// File name used when a [`SearcherConfig`](crate::config::SearcherConfig) is persisted.
pub const SEARCHER_CONFIG_FILE: &str = "searcher_config.json";

/// Default density (`cost / max_doc`) above which a doc-id set is materialized as a bitset.
pub const DEFAULT_DENSE_RATIO: f64 = 1.0 / 32.0;
