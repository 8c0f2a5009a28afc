use crate::common::TermWeight;
use crate::core::posting_list::PostingListIterator;
use crate::core::scorer::TermScorer;
use crate::core::{DocIdIterator, Query, ScoreMode, Scorer, ScorerSupplier, Weight};
use crate::index::SegmentReader;
use crate::reader::IndexSearcher;
use crate::{Result, SearchError};

/// Documents containing `term`, scored as `posting weight * query weight * boost`.
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    term: String,
    weight: TermWeight,
}

impl TermQuery {
    pub fn new<S: Into<String>>(term: S) -> Self {
        Self { term: term.into(), weight: 1.0 }
    }

    /// Query-side weight of the term.
    pub fn with_weight(mut self, weight: TermWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

impl Query for TermQuery {
    fn create_weight(&self, _searcher: &IndexSearcher, score_mode: ScoreMode, boost: f32) -> Result<Box<dyn Weight>> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(SearchError::InvalidArgument(format!(
                "term weight must be finite and non-negative, got {} for '{}'",
                self.weight, self.term
            )));
        }
        Ok(Box::new(TermQueryWeight { term: self.term.clone(), term_weight: self.weight * boost, score_mode }))
    }
}

#[derive(Debug)]
struct TermQueryWeight {
    term: String,
    term_weight: TermWeight,
    score_mode: ScoreMode,
}

impl Weight for TermQueryWeight {
    fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    fn scorer_supplier<'a>(&'a self, segment: &'a SegmentReader) -> Result<Option<Box<dyn ScorerSupplier<'a> + 'a>>> {
        Ok(segment
            .postings(&self.term)
            .map(|postings| Box::new(TermScorerSupplier { weight: self, postings }) as Box<dyn ScorerSupplier<'a> + 'a>))
    }

    fn is_cacheable(&self, _segment: &SegmentReader) -> bool {
        true
    }

    fn count(&self, segment: &SegmentReader) -> Result<Option<u64>> {
        Ok(Some(segment.doc_freq(&self.term)))
    }
}

struct TermScorerSupplier<'a> {
    weight: &'a TermQueryWeight,
    postings: PostingListIterator,
}

impl<'a> ScorerSupplier<'a> for TermScorerSupplier<'a> {
    fn cost(&self) -> u64 {
        self.postings.cost()
    }

    fn get(self: Box<Self>, _lead_cost: u64) -> Result<Box<dyn Scorer + 'a>> {
        let weight = self.weight;
        Ok(Box::new(TermScorer::new(weight, self.postings, weight.term_weight, weight.score_mode)))
    }
}
