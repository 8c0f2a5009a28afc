//! Consumers of scored matches.
//!
//! A [`Collector`] declares the [`ScoreMode`] of the search and creates one
//! [`LeafCollector`] per segment. Segments may be collected on different
//! threads; each per-segment result is harvested separately and returned in
//! segment order.

mod count;
mod docs;
mod top_k;

pub use count::CountCollector;
pub use docs::DocsCollector;
pub use top_k::{ScoredDoc, TopK, TopScoreCollector};

use crate::core::ScoreMode;
use crate::index::SegmentReader;
use crate::{DocId, Result, Score};

/// Receives the matches of one segment in increasing doc order.
pub trait LeafCollector {
    /// `score` is `Some` exactly when the search's score mode computes scores.
    fn collect(&mut self, doc: DocId, score: Option<Score>) -> Result<()>;

    /// Lowest score a further hit needs to be of interest, once known.
    fn min_competitive_score(&self) -> Option<Score> {
        None
    }

    /// `true` once no further hit of this segment is wanted.
    fn is_terminated(&self) -> bool {
        false
    }
}

pub trait Collector: Sync {
    type Child: LeafCollector;
    type Fruit: Send;

    fn score_mode(&self) -> ScoreMode;

    fn for_segment(&self, segment: &SegmentReader) -> Result<Self::Child>;

    fn harvest(&self, child: Self::Child) -> Result<Self::Fruit>;
}
