use log::debug;
use smallvec::SmallVec;

use super::{check_score, clause_threshold, max_score_sum, CompetitiveThreshold, Scorer};
use crate::core::doc_id::{check_advance, check_next};
use crate::core::{DocIdIterator, ScoreMode, Weight};
use crate::{DocId, Result, Score, NOT_STARTED, NO_MORE_DOCS};

/// Union of its clauses, scored as the sum of the clauses on the current doc.
///
/// Under a competitive threshold this follows MaxScore: clauses are ordered
/// by their max score, and the longest prefix whose summed maxima stay
/// below the threshold is non-essential. A document matching only
/// non-essential clauses cannot compete, so only essential clauses propose
/// candidates; non-essential ones are advanced on demand to complete the
/// score.
pub struct DisjunctionSumScorer<'a> {
    weight: &'a dyn Weight,
    score_mode: ScoreMode,
    clauses: Vec<Box<dyn Scorer + 'a>>,
    /// Clause indices sorted by ascending max score.
    order: SmallVec<[usize; 8]>,
    /// `order[..first_essential]` are non-essential.
    first_essential: usize,
    doc: DocId,
    /// Score of `doc` when it was already computed while filtering.
    current_score: Option<Score>,
    threshold: CompetitiveThreshold,
    cost: u64,
}

impl<'a> DisjunctionSumScorer<'a> {
    pub fn new(weight: &'a dyn Weight, score_mode: ScoreMode, clauses: Vec<Box<dyn Scorer + 'a>>) -> Self {
        let mut order: SmallVec<[usize; 8]> = (0..clauses.len()).collect();
        if score_mode.needs_scores() {
            order.sort_by(|&a, &b| clauses[a].max_score().total_cmp(&clauses[b].max_score()));
        }
        let cost = clauses.iter().map(|clause| clause.cost()).fold(0, u64::saturating_add);
        Self {
            weight,
            score_mode,
            clauses,
            order,
            first_essential: 0,
            doc: NOT_STARTED,
            current_score: None,
            threshold: CompetitiveThreshold::new(score_mode),
            cost,
        }
    }

    /// Sum of the scores of the clauses positioned on `doc`.
    fn sum_scores(&mut self, doc: DocId) -> Result<Score> {
        let mut score = 0.0;
        for clause in self.clauses.iter_mut() {
            if clause.doc_id() == doc {
                score += clause.score()?;
            }
        }
        Ok(score)
    }

    /// Moves to the first competitive document `>= target`.
    fn move_to(&mut self, mut target: DocId) -> Result<DocId> {
        self.current_score = None;
        loop {
            let mut candidate = NO_MORE_DOCS;
            for &idx in &self.order[self.first_essential..] {
                let clause = &mut self.clauses[idx];
                let mut doc = clause.doc_id();
                if doc < target {
                    doc = clause.advance(target)?;
                }
                candidate = candidate.min(doc);
            }
            if candidate == NO_MORE_DOCS {
                self.doc = NO_MORE_DOCS;
                return Ok(NO_MORE_DOCS);
            }
            let min_score = match self.threshold.get() {
                Some(min_score) => min_score,
                None => {
                    self.doc = candidate;
                    return Ok(candidate);
                }
            };
            for &idx in &self.order[..self.first_essential] {
                let clause = &mut self.clauses[idx];
                if clause.doc_id() < candidate {
                    clause.advance(candidate)?;
                }
            }
            let score = self.sum_scores(candidate)?;
            if score >= min_score {
                self.doc = candidate;
                self.current_score = Some(score);
                return Ok(candidate);
            }
            target = candidate + 1;
        }
    }

    /// Recomputes the essential partition and pushes per-clause thresholds down.
    fn update_pruning(&mut self, min_score: Score) -> Result<()> {
        let mut first_essential = 0;
        let mut prefix: SmallVec<[Score; 8]> = SmallVec::new();
        for &idx in &self.order {
            prefix.push(self.clauses[idx].max_score());
            if max_score_sum(prefix.iter().copied()) < min_score as f64 {
                first_essential = prefix.len();
            } else {
                break;
            }
        }
        if first_essential != self.first_essential {
            debug!(
                "{} of {} disjunction clauses became non-essential at min competitive score {}.",
                first_essential,
                self.clauses.len(),
                min_score
            );
            self.first_essential = first_essential;
        }

        let max_scores: SmallVec<[Score; 8]> = self.clauses.iter().map(|clause| clause.max_score()).collect();
        for (idx, clause) in self.clauses.iter_mut().enumerate() {
            if !clause.score_mode().allows_pruning() {
                continue;
            }
            let others = max_scores.iter().enumerate().filter(|&(other, _)| other != idx).map(|(_, &max_score)| max_score);
            if let Some(clause_min_score) = clause_threshold(min_score, max_score_sum(others)) {
                clause.set_min_competitive_score(clause_min_score)?;
            }
        }
        Ok(())
    }
}

impl<'a> DocIdIterator for DisjunctionSumScorer<'a> {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        self.move_to(self.doc + 1)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.doc, target)? {
            return Ok(NO_MORE_DOCS);
        }
        self.move_to(target)
    }

    fn cost(&self) -> u64 {
        self.cost
    }
}

impl<'a> Scorer for DisjunctionSumScorer<'a> {
    fn score(&mut self) -> Result<Score> {
        check_score(self.score_mode, self.doc)?;
        if let Some(score) = self.current_score {
            return Ok(score);
        }
        let score = self.sum_scores(self.doc)?;
        self.current_score = Some(score);
        Ok(score)
    }

    fn max_score(&self) -> Score {
        max_score_sum(self.clauses.iter().map(|clause| clause.max_score())) as Score
    }

    fn set_min_competitive_score(&mut self, min_score: Score) -> Result<()> {
        if self.threshold.raise(min_score)? {
            self.update_pruning(min_score)?;
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
