use log::debug;

use super::{check_score, clause_threshold, max_score_sum, CompetitiveThreshold, Scorer};
use crate::core::doc_id::{check_advance, check_next};
use crate::core::{DocIdIterator, ScoreMode, Weight};
use crate::{DocId, Result, Score, SearchError, NOT_STARTED, NO_MORE_DOCS};

/// A required clause of a conjunction.
pub struct ConjunctionClause<'a> {
    pub scorer: Box<dyn Scorer + 'a>,
    /// Filter clauses take part in matching but not in the score.
    pub scoring: bool,
}

/// Intersection of its clauses, scored as the sum of the scoring clauses.
///
/// Iteration is leap-frog driven by the cheapest clause: the lead proposes a
/// candidate, every other clause is advanced to it, and whenever one
/// overshoots the lead catches up to that clause.
pub struct ConjunctionScorer<'a> {
    weight: &'a dyn Weight,
    score_mode: ScoreMode,
    /// Sorted by ascending cost; `clauses[0]` leads.
    clauses: Vec<ConjunctionClause<'a>>,
    doc: DocId,
    current_score: Option<Score>,
    threshold: CompetitiveThreshold,
    exhausted_by_threshold: bool,
}

impl<'a> ConjunctionScorer<'a> {
    /// Fails with `InvalidArgument` when `clauses` is empty.
    pub fn new(weight: &'a dyn Weight, score_mode: ScoreMode, mut clauses: Vec<ConjunctionClause<'a>>) -> Result<Self> {
        if clauses.is_empty() {
            return Err(SearchError::InvalidArgument("a conjunction needs at least one clause".to_string()));
        }
        clauses.sort_by_key(|clause| clause.scorer.cost());
        Ok(Self {
            weight,
            score_mode,
            clauses,
            doc: NOT_STARTED,
            current_score: None,
            threshold: CompetitiveThreshold::new(score_mode),
            exhausted_by_threshold: false,
        })
    }

    fn scoring_max_scores(&self) -> impl Iterator<Item = Score> + '_ {
        self.clauses.iter().filter(|clause| clause.scoring).map(|clause| clause.scorer.max_score())
    }

    fn sum_scores(&mut self) -> Result<Score> {
        let mut score = 0.0;
        for clause in self.clauses.iter_mut().filter(|clause| clause.scoring) {
            score += clause.scorer.score()?;
        }
        Ok(score)
    }

    /// Aligns every clause starting from the lead's position `doc`.
    fn align(&mut self, mut doc: DocId) -> Result<DocId> {
        self.current_score = None;
        'candidates: loop {
            if doc == NO_MORE_DOCS {
                break;
            }
            for idx in 1..self.clauses.len() {
                let other = &mut self.clauses[idx].scorer;
                let mut other_doc = other.doc_id();
                if other_doc < doc {
                    other_doc = other.advance(doc)?;
                }
                if other_doc > doc {
                    doc = if other_doc == NO_MORE_DOCS { NO_MORE_DOCS } else { self.clauses[0].scorer.advance(other_doc)? };
                    continue 'candidates;
                }
            }
            if let Some(min_score) = self.threshold.get() {
                let score = self.sum_scores()?;
                if score < min_score {
                    doc = self.clauses[0].scorer.next_doc()?;
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

impl<'a> DocIdIterator for ConjunctionScorer<'a> {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        if self.exhausted_by_threshold {
            self.doc = NO_MORE_DOCS;
            return Ok(NO_MORE_DOCS);
        }
        let doc = self.clauses[0].scorer.next_doc()?;
        self.align(doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.doc, target)? {
            return Ok(NO_MORE_DOCS);
        }
        if self.exhausted_by_threshold {
            self.doc = NO_MORE_DOCS;
            return Ok(NO_MORE_DOCS);
        }
        let doc = self.clauses[0].scorer.advance(target)?;
        self.align(doc)
    }

    fn cost(&self) -> u64 {
        self.clauses[0].scorer.cost()
    }
}

impl<'a> Scorer for ConjunctionScorer<'a> {
    fn score(&mut self) -> Result<Score> {
        check_score(self.score_mode, self.doc)?;
        if let Some(score) = self.current_score {
            return Ok(score);
        }
        let score = self.sum_scores()?;
        self.current_score = Some(score);
        Ok(score)
    }

    fn max_score(&self) -> Score {
        max_score_sum(self.scoring_max_scores()) as Score
    }

    fn set_min_competitive_score(&mut self, min_score: Score) -> Result<()> {
        if !self.threshold.raise(min_score)? {
            return Ok(());
        }
        if max_score_sum(self.scoring_max_scores()) < min_score as f64 {
            debug!("Conjunction cannot reach min competitive score {}, terminating.", min_score);
            self.exhausted_by_threshold = true;
            return Ok(());
        }
        let max_scores: Vec<Option<Score>> =
            self.clauses.iter().map(|clause| clause.scoring.then(|| clause.scorer.max_score())).collect();
        for (idx, clause) in self.clauses.iter_mut().enumerate() {
            if !clause.scoring || !clause.scorer.score_mode().allows_pruning() {
                continue;
            }
            let others = max_scores.iter().enumerate().filter(|&(other, _)| other != idx).filter_map(|(_, max_score)| *max_score);
            if let Some(clause_min_score) = clause_threshold(min_score, max_score_sum(others)) {
                clause.scorer.set_min_competitive_score(clause_min_score)?;
            }
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
