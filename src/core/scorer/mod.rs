//! Scorers: doc-id iterators that also produce a score for the current
//! match and can skip documents that cannot beat a competitive threshold.

mod conjunction;
mod constant_score;
mod disjunction;
mod req_excl;
mod req_opt;
mod term_scorer;

use log::warn;

pub use conjunction::{ConjunctionClause, ConjunctionScorer};
pub use constant_score::ConstantScoreScorer;
pub use disjunction::DisjunctionSumScorer;
pub use req_excl::ReqExclScorer;
pub use req_opt::ReqOptSumScorer;
pub use term_scorer::TermScorer;

use crate::core::{DocIdIterator, ScoreMode, Weight};
use crate::{ContractViolation, DocId, Result, Score, NOT_STARTED, NO_MORE_DOCS};

/// A [`DocIdIterator`] that can score the document it is positioned on.
pub trait Scorer: DocIdIterator {
    /// Score of the current match. Only valid while positioned on a match
    /// and when the scorer's [`ScoreMode`] computes scores.
    fn score(&mut self) -> Result<Score>;

    /// Upper bound of any score this scorer returns in its segment.
    fn max_score(&self) -> Score;

    /// Promises that documents scoring below `min_score` are of no interest.
    ///
    /// The scorer may skip them from the next `next_doc`/`advance` on. The
    /// threshold never decreases: a lower value than the current one is
    /// ignored. Rejected under exhaustive score modes and when scores are
    /// not computed.
    fn set_min_competitive_score(&mut self, min_score: Score) -> Result<()>;

    fn score_mode(&self) -> ScoreMode;

    /// The weight this scorer was created from.
    fn weight(&self) -> &dyn Weight;
}

impl<'a> DocIdIterator for Box<dyn Scorer + 'a> {
    fn doc_id(&self) -> DocId {
        self.as_ref().doc_id()
    }

    fn next_doc(&mut self) -> Result<DocId> {
        self.as_mut().next_doc()
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        self.as_mut().advance(target)
    }

    fn cost(&self) -> u64 {
        self.as_ref().cost()
    }
}

impl<'a> Scorer for Box<dyn Scorer + 'a> {
    fn score(&mut self) -> Result<Score> {
        self.as_mut().score()
    }

    fn max_score(&self) -> Score {
        self.as_ref().max_score()
    }

    fn set_min_competitive_score(&mut self, min_score: Score) -> Result<()> {
        self.as_mut().set_min_competitive_score(min_score)
    }

    fn score_mode(&self) -> ScoreMode {
        self.as_ref().score_mode()
    }

    fn weight(&self) -> &dyn Weight {
        self.as_ref().weight()
    }
}

/// Monotone min-competitive-score bookkeeping shared by every scorer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompetitiveThreshold {
    score_mode: ScoreMode,
    min_score: Option<Score>,
}

impl CompetitiveThreshold {
    pub(crate) fn new(score_mode: ScoreMode) -> Self {
        Self { score_mode, min_score: None }
    }

    pub(crate) fn get(&self) -> Option<Score> {
        self.min_score
    }

    /// Validates and records `min_score`.
    ///
    /// Returns `Ok(true)` when the threshold moved up and `Ok(false)` when
    /// the call changed nothing.
    pub(crate) fn raise(&mut self, min_score: Score) -> Result<bool> {
        if self.score_mode.is_exhaustive() {
            return Err(ContractViolation::ThresholdUnderExhaustiveMode(self.score_mode).into());
        }
        if !self.score_mode.needs_scores() {
            return Err(ContractViolation::ThresholdWithoutScores(self.score_mode).into());
        }
        if min_score.is_nan() {
            return Err(ContractViolation::NanThreshold.into());
        }
        match self.min_score {
            Some(current) if min_score <= current => {
                if min_score < current {
                    warn!("Ignoring min competitive score {} lower than the current {}.", min_score, current);
                }
                Ok(false)
            }
            _ => {
                self.min_score = Some(min_score);
                Ok(true)
            }
        }
    }

    /// Whether a document with `score` may still be emitted.
    pub(crate) fn is_competitive(&self, score: Score) -> bool {
        self.min_score.map_or(true, |min_score| score >= min_score)
    }
}

/// Checks a `score()` call: scores must be computed and the scorer must sit on a match.
pub(crate) fn check_score(score_mode: ScoreMode, doc: DocId) -> Result<()> {
    if !score_mode.needs_scores() {
        return Err(ContractViolation::ScoresNotNeeded(score_mode).into());
    }
    if doc == NOT_STARTED || doc == NO_MORE_DOCS {
        return Err(ContractViolation::ScoreOffMatch { doc }.into());
    }
    Ok(())
}

/// Upper bound of a float sum of non-negative `f32` scores whose exact
/// maxima are `max_scores`, covering accumulated rounding error.
pub(crate) fn max_score_sum<I: IntoIterator<Item = Score>>(max_scores: I) -> f64 {
    let (sum, count) = max_scores
        .into_iter()
        .fold((0.0f64, 0usize), |(sum, count), max_score| (sum + max_score as f64, count + 1));
    sum * (1.0 + (count as f64 + 1.0) * f32::EPSILON as f64)
}

/// Threshold one summand must reach for the sum to reach `min_score`, when
/// the other summands add at most `others_max`.
///
/// Rounded down so that no competitive document is ever skipped. `None`
/// means the summand alone cannot be constrained.
pub(crate) fn clause_threshold(min_score: Score, others_max: f64) -> Option<Score> {
    let remaining = (min_score as f64 - others_max) * (1.0 - 2.0 * f32::EPSILON as f64);
    if remaining > 0.0 {
        Some(remaining as Score)
    } else {
        None
    }
}
