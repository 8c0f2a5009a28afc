use log::debug;

use super::{check_score, CompetitiveThreshold, Scorer};
use crate::core::doc_id::{check_advance, check_next};
use crate::core::{DocIdIterator, ScoreMode, Weight};
use crate::{DocId, Result, Score, NOT_STARTED, NO_MORE_DOCS};

/// Gives every document of `iterator` the same score.
///
/// Once the competitive threshold exceeds that score no remaining document
/// can compete, and the scorer jumps to `NO_MORE_DOCS` on the next move.
pub struct ConstantScoreScorer<'a, I> {
    weight: &'a dyn Weight,
    score: Score,
    score_mode: ScoreMode,
    iterator: I,
    doc: DocId,
    threshold: CompetitiveThreshold,
    exhausted_by_threshold: bool,
}

impl<'a, I: DocIdIterator> ConstantScoreScorer<'a, I> {
    pub fn new(weight: &'a dyn Weight, score: Score, score_mode: ScoreMode, iterator: I) -> Self {
        Self {
            weight,
            score,
            score_mode,
            iterator,
            doc: NOT_STARTED,
            threshold: CompetitiveThreshold::new(score_mode),
            exhausted_by_threshold: false,
        }
    }
}

impl<'a, I: DocIdIterator> DocIdIterator for ConstantScoreScorer<'a, I> {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        self.doc = if self.exhausted_by_threshold { NO_MORE_DOCS } else { self.iterator.next_doc()? };
        Ok(self.doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.doc, target)? {
            return Ok(NO_MORE_DOCS);
        }
        self.doc = if self.exhausted_by_threshold { NO_MORE_DOCS } else { self.iterator.advance(target)? };
        Ok(self.doc)
    }

    fn cost(&self) -> u64 {
        if self.exhausted_by_threshold {
            0
        } else {
            self.iterator.cost()
        }
    }
}

impl<'a, I: DocIdIterator> Scorer for ConstantScoreScorer<'a, I> {
    fn score(&mut self) -> Result<Score> {
        check_score(self.score_mode, self.doc)?;
        Ok(self.score)
    }

    fn max_score(&self) -> Score {
        self.score
    }

    fn set_min_competitive_score(&mut self, min_score: Score) -> Result<()> {
        if self.threshold.raise(min_score)? && !self.threshold.is_competitive(self.score) {
            debug!("Constant score {} fell below min competitive score {}, terminating.", self.score, min_score);
            self.exhausted_by_threshold = true;
        }
        Ok(())
    }

    fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    fn weight(&self) -> &dyn Weight {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::{collect_docs, StubWeight};
    use crate::core::DocIdSetIterator;
    use crate::ContractViolation;

    fn scorer(weight: &StubWeight, boost: Score, score_mode: ScoreMode, docs: Vec<DocId>) -> ConstantScoreScorer<'_, DocIdSetIterator> {
        ConstantScoreScorer::new(weight, boost, score_mode, DocIdSetIterator::sorted(docs).unwrap())
    }

    #[test]
    fn test_threshold_equal_to_boost_keeps_matches() {
        let weight = StubWeight::default();
        let mut scorer = scorer(&weight, 1.0, ScoreMode::TopScores, vec![0]);
        scorer.set_min_competitive_score(1.0).unwrap();
        assert_eq!(scorer.next_doc().unwrap(), 0);
        assert_eq!(scorer.score().unwrap(), 1.0);
        assert_eq!(scorer.next_doc().unwrap(), NO_MORE_DOCS);
    }

    #[test]
    fn test_threshold_above_boost_terminates() {
        let weight = StubWeight::default();
        let mut scorer = scorer(&weight, 1.0, ScoreMode::TopScores, vec![0]);
        scorer.set_min_competitive_score(2.0).unwrap();
        assert_eq!(scorer.next_doc().unwrap(), NO_MORE_DOCS);
        assert_eq!(scorer.doc_id(), NO_MORE_DOCS);
    }

    #[test]
    fn test_all_docs_under_threshold() {
        let weight = StubWeight::default();
        for max_doc in [1, 7, 1000] {
            let mut kept = ConstantScoreScorer::new(&weight, 1.5, ScoreMode::TopScores, DocIdSetIterator::all(max_doc).unwrap());
            kept.set_min_competitive_score(1.5).unwrap();
            assert_eq!(collect_docs(&mut kept).unwrap(), (0..max_doc).collect::<Vec<_>>());

            let mut pruned = ConstantScoreScorer::new(&weight, 1.5, ScoreMode::TopDocsWithScores, DocIdSetIterator::all(max_doc).unwrap());
            pruned.set_min_competitive_score(1.6).unwrap();
            assert_eq!(pruned.advance(0).unwrap(), NO_MORE_DOCS);
        }
    }

    #[test]
    fn test_threshold_raised_mid_iteration() {
        let weight = StubWeight::default();
        let mut scorer = scorer(&weight, 3.0, ScoreMode::TopScores, vec![1, 5, 9]);
        assert_eq!(scorer.next_doc().unwrap(), 1);
        scorer.set_min_competitive_score(3.0).unwrap();
        assert_eq!(scorer.next_doc().unwrap(), 5);
        scorer.set_min_competitive_score(3.5).unwrap();
        // the current position is unaffected until the next move
        assert_eq!(scorer.doc_id(), 5);
        assert_eq!(scorer.advance(6).unwrap(), NO_MORE_DOCS);
    }

    #[test]
    fn test_exhaustive_mode_visits_everything() {
        let weight = StubWeight::default();
        let mut scorer = scorer(&weight, 1.0, ScoreMode::Complete, vec![0, 1, 2]);
        let err = scorer.set_min_competitive_score(2.0).unwrap_err();
        assert_eq!(
            err.as_contract_violation(),
            Some(&ContractViolation::ThresholdUnderExhaustiveMode(ScoreMode::Complete))
        );
        assert_eq!(collect_docs(&mut scorer).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_score_off_match_is_rejected() {
        let weight = StubWeight::default();
        let mut scorer = scorer(&weight, 1.0, ScoreMode::Complete, vec![4]);
        assert!(scorer.score().is_err());
        scorer.next_doc().unwrap();
        assert_eq!(scorer.score().unwrap(), 1.0);
        scorer.next_doc().unwrap();
        assert!(matches!(
            scorer.score().unwrap_err().as_contract_violation(),
            Some(ContractViolation::ScoreOffMatch { doc: NO_MORE_DOCS })
        ));
    }

    #[test]
    fn test_scores_not_needed() {
        let weight = StubWeight::default();
        let mut scorer = scorer(&weight, 1.0, ScoreMode::CompleteNoScores, vec![4]);
        scorer.next_doc().unwrap();
        assert!(scorer.score().is_err());
        assert!(scorer.set_min_competitive_score(0.5).is_err());
    }
}
