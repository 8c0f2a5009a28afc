use super::{check_score, CompetitiveThreshold, Scorer};
use crate::core::doc_id::{check_advance, check_next};
use crate::core::{DocIdIterator, ScoreMode, Weight};
use crate::{DocId, Result, Score, NO_MORE_DOCS};

/// Matches of `required` that are not matches of `excluded`.
///
/// Scores come from `required` alone, so the competitive threshold is passed
/// through to it unchanged.
pub struct ReqExclScorer<'a> {
    weight: &'a dyn Weight,
    required: Box<dyn Scorer + 'a>,
    excluded: Box<dyn Scorer + 'a>,
    threshold: CompetitiveThreshold,
}

impl<'a> ReqExclScorer<'a> {
    pub fn new(weight: &'a dyn Weight, required: Box<dyn Scorer + 'a>, excluded: Box<dyn Scorer + 'a>) -> Self {
        let threshold = CompetitiveThreshold::new(required.score_mode());
        Self { weight, required, excluded, threshold }
    }

    fn skip_excluded(&mut self, mut doc: DocId) -> Result<DocId> {
        while doc != NO_MORE_DOCS {
            let mut excluded_doc = self.excluded.doc_id();
            if excluded_doc < doc {
                excluded_doc = self.excluded.advance(doc)?;
            }
            if excluded_doc != doc {
                break;
            }
            doc = self.required.next_doc()?;
        }
        Ok(doc)
    }
}

impl<'a> DocIdIterator for ReqExclScorer<'a> {
    fn doc_id(&self) -> DocId {
        self.required.doc_id()
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.required.doc_id())?;
        let doc = self.required.next_doc()?;
        self.skip_excluded(doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.required.doc_id(), target)? {
            return Ok(NO_MORE_DOCS);
        }
        let doc = self.required.advance(target)?;
        self.skip_excluded(doc)
    }

    fn cost(&self) -> u64 {
        self.required.cost()
    }
}

impl<'a> Scorer for ReqExclScorer<'a> {
    fn score(&mut self) -> Result<Score> {
        check_score(self.score_mode(), self.required.doc_id())?;
        self.required.score()
    }

    fn max_score(&self) -> Score {
        self.required.max_score()
    }

    fn set_min_competitive_score(&mut self, min_score: Score) -> Result<()> {
        if self.threshold.raise(min_score)? {
            self.required.set_min_competitive_score(min_score)?;
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
