use super::{check_score, CompetitiveThreshold, Scorer};
use crate::common::TermWeight;
use crate::core::doc_id::{check_advance, check_next};
use crate::core::posting_list::PostingListIterator;
use crate::core::{DocIdIterator, ScoreMode, Weight};
use crate::{DocId, Result, Score, NO_MORE_DOCS};

/// Scores each posting as `posting weight * term_weight`.
///
/// Under a competitive threshold, postings scoring below it are skipped, and
/// the scorer stops as soon as `max_next_weight` shows that no later posting
/// can reach it.
pub struct TermScorer<'a> {
    weight: &'a dyn Weight,
    postings: PostingListIterator,
    term_weight: TermWeight,
    score_mode: ScoreMode,
    threshold: CompetitiveThreshold,
}

impl<'a> TermScorer<'a> {
    pub fn new(weight: &'a dyn Weight, postings: PostingListIterator, term_weight: TermWeight, score_mode: ScoreMode) -> Self {
        Self { weight, postings, term_weight, score_mode, threshold: CompetitiveThreshold::new(score_mode) }
    }

    /// Skips forward from `doc` until a competitive posting is found.
    fn settle(&mut self, mut doc: DocId) -> Result<DocId> {
        let min_score = match self.threshold.get() {
            Some(min_score) => min_score,
            None => return Ok(doc),
        };
        while doc != NO_MORE_DOCS {
            let (weight, max_remaining_weight) = match self.postings.current() {
                Some(element) => (element.weight, element.max_remaining_weight()),
                None => break,
            };
            if max_remaining_weight * self.term_weight < min_score {
                return Ok(self.postings.skip_to_end());
            }
            if weight * self.term_weight >= min_score {
                return Ok(doc);
            }
            doc = self.postings.next_doc()?;
        }
        Ok(doc)
    }
}

impl<'a> DocIdIterator for TermScorer<'a> {
    fn doc_id(&self) -> DocId {
        self.postings.doc_id()
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.postings.doc_id())?;
        let doc = self.postings.next_doc()?;
        self.settle(doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.postings.doc_id(), target)? {
            return Ok(NO_MORE_DOCS);
        }
        let doc = self.postings.advance(target)?;
        self.settle(doc)
    }

    fn cost(&self) -> u64 {
        self.postings.cost()
    }
}

impl<'a> Scorer for TermScorer<'a> {
    fn score(&mut self) -> Result<Score> {
        check_score(self.score_mode, self.postings.doc_id())?;
        Ok(self.postings.current().map(|e| e.weight * self.term_weight).unwrap_or_default())
    }

    fn max_score(&self) -> Score {
        self.postings.max_weight() * self.term_weight
    }

    fn set_min_competitive_score(&mut self, min_score: Score) -> Result<()> {
        self.threshold.raise(min_score)?;
        Ok(())
    }

    fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    fn weight(&self) -> &dyn Weight {
        self.weight
    }
}
