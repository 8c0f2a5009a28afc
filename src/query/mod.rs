//! Query implementations compiled into weights by an
//! [`IndexSearcher`](crate::IndexSearcher).

mod boolean;
mod constant_score;
mod match_all;
mod term;
mod term_set;

#[cfg(test)]
pub(crate) mod test_queries;

pub use boolean::{BooleanQuery, Occur};
pub use constant_score::ConstantScoreQuery;
pub use match_all::MatchAllDocsQuery;
pub use term::TermQuery;
pub use term_set::TermSetQuery;

use crate::core::scorer::ConstantScoreScorer;
use crate::core::{DocIdIterator, DocIdSetIterator, ScoreMode, Scorer, ScorerSupplier, Weight};
use crate::{Result, Score};

/// Supplies a constant-score scorer over a doc-id set that is already known.
pub(crate) struct DocSetScorerSupplier<'a> {
    weight: &'a dyn Weight,
    score: Score,
    score_mode: ScoreMode,
    iterator: DocIdSetIterator,
}

impl<'a> DocSetScorerSupplier<'a> {
    pub(crate) fn new(weight: &'a dyn Weight, score: Score, score_mode: ScoreMode, iterator: DocIdSetIterator) -> Self {
        Self { weight, score, score_mode, iterator }
    }
}

impl<'a> ScorerSupplier<'a> for DocSetScorerSupplier<'a> {
    fn cost(&self) -> u64 {
        self.iterator.cost()
    }

    fn get(self: Box<Self>, _lead_cost: u64) -> Result<Box<dyn Scorer + 'a>> {
        Ok(Box::new(ConstantScoreScorer::new(self.weight, self.score, self.score_mode, self.iterator)))
    }
}
