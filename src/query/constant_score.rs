use crate::core::scorer::ConstantScoreScorer;
use crate::core::{Query, ScoreMode, Scorer, ScorerSupplier, Weight};
use crate::index::SegmentReader;
use crate::reader::IndexSearcher;
use crate::{Result, Score};

/// Matches what the wrapped query matches, scoring every hit with the boost.
///
/// The wrapped query is compiled without scores.
#[derive(Debug)]
pub struct ConstantScoreQuery {
    query: Box<dyn Query>,
}

impl ConstantScoreQuery {
    pub fn new(query: Box<dyn Query>) -> Self {
        Self { query }
    }
}

impl Query for ConstantScoreQuery {
    fn create_weight(&self, searcher: &IndexSearcher, score_mode: ScoreMode, boost: f32) -> Result<Box<dyn Weight>> {
        let inner = searcher.create_weight(self.query.as_ref(), score_mode.without_scores(), 1.0)?;
        Ok(Box::new(ConstantScoreWeight { inner, score: boost, score_mode }))
    }
}

#[derive(Debug)]
struct ConstantScoreWeight {
    inner: Box<dyn Weight>,
    score: Score,
    score_mode: ScoreMode,
}

impl Weight for ConstantScoreWeight {
    fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    fn scorer_supplier<'a>(&'a self, segment: &'a SegmentReader) -> Result<Option<Box<dyn ScorerSupplier<'a> + 'a>>> {
        Ok(self
            .inner
            .scorer_supplier(segment)?
            .map(|inner| Box::new(ConstantScoreSupplier { weight: self, inner }) as Box<dyn ScorerSupplier<'a> + 'a>))
    }

    fn is_cacheable(&self, segment: &SegmentReader) -> bool {
        self.inner.is_cacheable(segment)
    }

    fn count(&self, segment: &SegmentReader) -> Result<Option<u64>> {
        self.inner.count(segment)
    }
}

struct ConstantScoreSupplier<'a> {
    weight: &'a ConstantScoreWeight,
    inner: Box<dyn ScorerSupplier<'a> + 'a>,
}

impl<'a> ScorerSupplier<'a> for ConstantScoreSupplier<'a> {
    fn cost(&self) -> u64 {
        self.inner.cost()
    }

    fn get(self: Box<Self>, lead_cost: u64) -> Result<Box<dyn Scorer + 'a>> {
        let weight = self.weight;
        let inner = self.inner.get(lead_cost)?;
        Ok(Box::new(ConstantScoreScorer::new(weight, weight.score, weight.score_mode, inner)))
    }
}
