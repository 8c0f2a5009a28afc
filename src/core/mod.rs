mod bulk_scorer;
pub mod doc_id;
pub mod posting_list;
mod score_mode;
pub mod scorer;
pub mod weight;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bulk_scorer::BulkScorer;
pub use doc_id::{DocIdIterator, DocIdSetIterator};
pub use score_mode::ScoreMode;
pub use scorer::Scorer;
pub use weight::{Query, ScorerSupplier, Weight};
