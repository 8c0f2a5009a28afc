//! The query → weight → scorer supplier → scorer factory chain.
//!
//! A [`Query`] is compiled once per search into a [`Weight`], which is
//! immutable and shared by every segment worker. For each segment the weight
//! hands out a [`ScorerSupplier`]: a cheap handle that reports the cost of
//! the scorer it would build, so that a parent can decide which clause leads
//! before anything expensive is materialized.

use std::fmt;

use crate::common::constants::UNBOUNDED_LEAD_COST;
use crate::core::{BulkScorer, ScoreMode, Scorer};
use crate::index::SegmentReader;
use crate::reader::IndexSearcher;
use crate::Result;

/// A search request, independent of any segment.
pub trait Query: fmt::Debug + Send + Sync {
    /// Compiles the query for one search.
    ///
    /// `boost` multiplies every score the resulting scorers produce.
    /// Composite queries compile their children through
    /// [`IndexSearcher::create_weight`].
    fn create_weight(&self, searcher: &IndexSearcher, score_mode: ScoreMode, boost: f32) -> Result<Box<dyn Weight>>;
}

/// Compiled, segment-independent form of a [`Query`].
pub trait Weight: fmt::Debug + Send + Sync {
    fn score_mode(&self) -> ScoreMode;

    /// Returns `Ok(None)` when no document of `segment` can match.
    fn scorer_supplier<'a>(&'a self, segment: &'a SegmentReader)
        -> Result<Option<Box<dyn ScorerSupplier<'a> + 'a>>>;

    /// Builds a scorer without any lead-cost hint.
    fn scorer<'a>(&'a self, segment: &'a SegmentReader) -> Result<Option<Box<dyn Scorer + 'a>>> {
        match self.scorer_supplier(segment)? {
            Some(supplier) => Ok(Some(supplier.get(UNBOUNDED_LEAD_COST)?)),
            None => Ok(None),
        }
    }

    /// Scorer driver used by top-level collection.
    fn bulk_scorer<'a>(&'a self, segment: &'a SegmentReader) -> Result<Option<BulkScorer<'a>>> {
        Ok(self.scorer(segment)?.map(BulkScorer::new))
    }

    /// Whether results for `segment` may be cached and reused. Must be
    /// `false` if this weight or any descendant depends on mutable
    /// per-segment state.
    fn is_cacheable(&self, segment: &SegmentReader) -> bool;

    /// Number of matches in `segment` when it is cheaper to compute than to
    /// iterate, `None` otherwise.
    fn count(&self, _segment: &SegmentReader) -> Result<Option<u64>> {
        Ok(None)
    }
}

/// Deferred scorer construction for one weight and one segment.
pub trait ScorerSupplier<'a> {
    /// Estimate of the number of matches of the scorer `get` would build.
    /// Answering must not build the scorer.
    fn cost(&self) -> u64;

    /// Builds the scorer. `lead_cost` is the cost of the clause that will
    /// drive iteration: the scorer will be advanced about that many times,
    /// so it may pick a representation that is cheap for that access
    /// pattern. Pass [`UNBOUNDED_LEAD_COST`] when the scorer drives itself.
    fn get(self: Box<Self>, lead_cost: u64) -> Result<Box<dyn Scorer + 'a>>;
}
