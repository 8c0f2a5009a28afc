use log::debug;

use super::{check_score, clause_threshold, max_score_sum, CompetitiveThreshold, Scorer};
use crate::core::doc_id::{check_advance, check_next};
use crate::core::{DocIdIterator, ScoreMode, Weight};
use crate::{DocId, Result, Score, NOT_STARTED, NO_MORE_DOCS};

/// Matches of `required`, scored as the required score plus the optional
/// score when `optional` matches too.
///
/// Once the threshold exceeds what `required` can reach on its own, only
/// documents matching both sides can compete and `optional` is treated as a
/// second required clause.
pub struct ReqOptSumScorer<'a> {
    weight: &'a dyn Weight,
    required: Box<dyn Scorer + 'a>,
    optional: Box<dyn Scorer + 'a>,
    required_max_score: Score,
    optional_max_score: Score,
    doc: DocId,
    current_score: Option<Score>,
    threshold: CompetitiveThreshold,
    optional_is_required: bool,
    exhausted_by_threshold: bool,
}

impl<'a> ReqOptSumScorer<'a> {
    pub fn new(weight: &'a dyn Weight, required: Box<dyn Scorer + 'a>, optional: Box<dyn Scorer + 'a>) -> Self {
        let threshold = CompetitiveThreshold::new(required.score_mode());
        let required_max_score = required.max_score();
        let optional_max_score = optional.max_score();
        Self {
            weight,
            required,
            optional,
            required_max_score,
            optional_max_score,
            doc: NOT_STARTED,
            current_score: None,
            threshold,
            optional_is_required: false,
            exhausted_by_threshold: false,
        }
    }

    fn sum_scores(&mut self, doc: DocId) -> Result<Score> {
        let mut score = self.required.score()?;
        if self.optional.doc_id() == doc {
            score += self.optional.score()?;
        }
        Ok(score)
    }

    /// Moves forward from the required clause's position `doc` to the next
    /// document that may be emitted.
    fn settle(&mut self, mut doc: DocId) -> Result<DocId> {
        self.current_score = None;
        while doc != NO_MORE_DOCS {
            let mut optional_doc = self.optional.doc_id();
            if optional_doc < doc {
                optional_doc = self.optional.advance(doc)?;
            }
            if self.optional_is_required && optional_doc != doc {
                doc = if optional_doc == NO_MORE_DOCS { NO_MORE_DOCS } else { self.required.advance(optional_doc)? };
                continue;
            }
            if let Some(min_score) = self.threshold.get() {
                let score = self.sum_scores(doc)?;
                if score < min_score {
                    doc = self.required.next_doc()?;
                    continue;
                }
                self.current_score = Some(score);
            }
            break;
        }
        self.doc = doc;
        Ok(doc)
    }
}

impl<'a> DocIdIterator for ReqOptSumScorer<'a> {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        if self.exhausted_by_threshold {
            self.doc = NO_MORE_DOCS;
            return Ok(NO_MORE_DOCS);
        }
        let doc = self.required.next_doc()?;
        self.settle(doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.doc, target)? {
            return Ok(NO_MORE_DOCS);
        }
        if self.exhausted_by_threshold {
            self.doc = NO_MORE_DOCS;
            return Ok(NO_MORE_DOCS);
        }
        let doc = self.required.advance(target)?;
        self.settle(doc)
    }

    fn cost(&self) -> u64 {
        self.required.cost()
    }
}

impl<'a> Scorer for ReqOptSumScorer<'a> {
    fn score(&mut self) -> Result<Score> {
        check_score(self.score_mode(), self.doc)?;
        if let Some(score) = self.current_score {
            return Ok(score);
        }
        let score = self.sum_scores(self.doc)?;
        self.current_score = Some(score);
        Ok(score)
    }

    fn max_score(&self) -> Score {
        max_score_sum([self.required_max_score, self.optional_max_score]) as Score
    }

    fn set_min_competitive_score(&mut self, min_score: Score) -> Result<()> {
        if !self.threshold.raise(min_score)? {
            return Ok(());
        }
        let min_score_f64 = min_score as f64;
        if max_score_sum([self.required_max_score, self.optional_max_score]) < min_score_f64 {
            debug!("Required and optional clauses cannot reach min competitive score {}, terminating.", min_score);
            self.exhausted_by_threshold = true;
            return Ok(());
        }
        if !self.optional_is_required && max_score_sum([self.required_max_score]) < min_score_f64 {
            debug!("Optional clause became required at min competitive score {}.", min_score);
            self.optional_is_required = true;
        }
        if let Some(required_min_score) = clause_threshold(min_score, max_score_sum([self.optional_max_score])) {
            self.required.set_min_competitive_score(required_min_score)?;
        }
        if self.optional.score_mode().allows_pruning() {
            if let Some(optional_min_score) = clause_threshold(min_score, max_score_sum([self.required_max_score])) {
                self.optional.set_min_competitive_score(optional_min_score)?;
            }
        }
        Ok(())
    }

    fn score_mode(&self) -> ScoreMode {
        self.required.score_mode()
    }

    fn weight(&self) -> &dyn Weight {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::core::test_utils::{scored_docs, term_scorer, StubWeight};

    fn req_opt<'a>(
        weight: &'a StubWeight,
        required: &[(DocId, f32)],
        optional: &[(DocId, f32)],
        score_mode: ScoreMode,
    ) -> ReqOptSumScorer<'a> {
        ReqOptSumScorer::new(weight, term_scorer(weight, required, score_mode), term_scorer(weight, optional, score_mode))
    }

    #[test]
    fn test_optional_adds_to_required_matches_only() {
        let weight = StubWeight::default();
        let mut scorer = req_opt(&weight, &[(1, 1.0), (3, 1.0), (5, 1.0)], &[(0, 4.0), (3, 2.0), (4, 2.0)], ScoreMode::Complete);
        assert_eq!(scored_docs(&mut scorer).unwrap(), vec![(1, 1.0), (3, 3.0), (5, 1.0)]);
        assert_eq!(scorer.cost(), 3);
    }

    #[test]
    fn test_optional_becomes_required_above_required_max() {
        let weight = StubWeight::default();
        let mut scorer = req_opt(
            &weight,
            &[(1, 1.0), (2, 1.0), (3, 1.0), (6, 1.0), (9, 1.0)],
            &[(3, 0.5), (9, 2.0), (10, 5.0)],
            ScoreMode::TopScores,
        );
        scorer.set_min_competitive_score(1.2).unwrap();
        assert_eq!(scored_docs(&mut scorer).unwrap(), vec![(3, 1.5), (9, 3.0)]);
    }

    #[test]
    fn test_unreachable_threshold_terminates() {
        let weight = StubWeight::default();
        let mut scorer = req_opt(&weight, &[(1, 1.0), (2, 1.0)], &[(2, 1.0)], ScoreMode::TopScores);
        assert_eq!(scorer.next_doc().unwrap(), 1);
        scorer.set_min_competitive_score(3.0).unwrap();
        assert_eq!(scorer.next_doc().unwrap(), NO_MORE_DOCS);
    }

    #[test]
    fn test_pruned_results_equal_filtered_exhaustive_results() {
        let mut rng = rand::thread_rng();
        let weight = StubWeight::default();
        for _ in 0..40 {
            let mut random_elements = |density: f64| -> Vec<(DocId, f32)> {
                (0..300).filter_map(|doc| rng.gen_bool(density).then(|| (doc, rng.gen_range(0.0..3.0)))).collect()
            };
            let required = random_elements(0.5);
            let optional = random_elements(0.3);
            let min_score = rng.gen_range(0.0..6.0);
            let mut full = req_opt(&weight, &required, &optional, ScoreMode::Complete);
            let expected: Vec<_> =
                scored_docs(&mut full).unwrap().into_iter().filter(|&(_, score)| score >= min_score).collect();
            let mut pruned = req_opt(&weight, &required, &optional, ScoreMode::TopScores);
            pruned.set_min_competitive_score(min_score).unwrap();
            assert_eq!(scored_docs(&mut pruned).unwrap(), expected, "min_score {min_score}");
        }
    }
}
