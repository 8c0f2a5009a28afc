//! Fixtures shared by query and searcher tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SearcherConfig;
use crate::core::{DocIdIterator, Query, ScoreMode, Scorer, ScorerSupplier, Weight};
use crate::index::{SegmentBuilder, SegmentReader};
use crate::reader::IndexSearcher;
use crate::{DocId, Result, Score};

pub(crate) type DocSpec<'s> = (DocId, &'s [(&'s str, f32)]);

pub(crate) fn build_segment(segment_ord: u32, docs: &[DocSpec<'_>]) -> SegmentReader {
    let mut builder = SegmentBuilder::new(segment_ord);
    for &(doc, terms) in docs {
        builder.add(doc, terms.iter().copied()).unwrap();
    }
    builder.build()
}

/// Sequential searcher over one segment per entry of `segments`.
pub(crate) fn searcher_with_segments(segments: &[&[DocSpec<'_>]]) -> IndexSearcher {
    let readers = segments.iter().enumerate().map(|(ord, docs)| build_segment(ord as u32, docs)).collect();
    IndexSearcher::with_config(readers, SearcherConfig::builder().parallel_segments(false).build()).unwrap()
}

pub(crate) const VOCABULARY: [&str; 5] = ["a", "b", "c", "d", "e"];

pub(crate) type RandomDoc = (DocId, Vec<(&'static str, f32)>);

/// Docs `0..max_doc`, each holding a random subset of [`VOCABULARY`] with
/// per-term densities that differ, so clause costs differ too.
pub(crate) fn random_docs<R: Rng>(rng: &mut R, max_doc: DocId) -> Vec<RandomDoc> {
    let densities: Vec<f64> = VOCABULARY.iter().map(|_| rng.gen_range(0.05..0.7)).collect();
    let mut docs = Vec::with_capacity(max_doc as usize);
    for doc in 0..max_doc {
        let mut terms = vec![];
        for (&term, &density) in VOCABULARY.iter().zip(densities.iter()) {
            if rng.gen_bool(density) {
                terms.push((term, rng.gen_range(0.0..4.0)));
            }
        }
        docs.push((doc, terms));
    }
    docs
}

pub(crate) fn random_segment(segment_ord: u32, docs: &[RandomDoc], max_doc: DocId) -> SegmentReader {
    let mut builder = SegmentBuilder::new(segment_ord).with_max_doc(max_doc).unwrap();
    for (doc, terms) in docs {
        builder.add(*doc, terms.iter().copied()).unwrap();
    }
    builder.build()
}

/// Wraps a query so that every cost it reports is replaced by an arbitrary
/// value. Results must not depend on costs.
#[derive(Debug)]
pub(crate) struct CostPerturbedQuery {
    inner: Box<dyn Query>,
    seed: u64,
}

impl CostPerturbedQuery {
    pub(crate) fn new(inner: Box<dyn Query>, seed: u64) -> Self {
        Self { inner, seed }
    }
}

impl Query for CostPerturbedQuery {
    fn create_weight(&self, searcher: &IndexSearcher, score_mode: ScoreMode, boost: f32) -> Result<Box<dyn Weight>> {
        let inner = searcher.create_weight(self.inner.as_ref(), score_mode, boost)?;
        Ok(Box::new(CostPerturbedWeight { inner, seed: self.seed }))
    }
}

#[derive(Debug)]
struct CostPerturbedWeight {
    inner: Box<dyn Weight>,
    seed: u64,
}

impl Weight for CostPerturbedWeight {
    fn score_mode(&self) -> ScoreMode {
        self.inner.score_mode()
    }

    fn scorer_supplier<'a>(&'a self, segment: &'a SegmentReader) -> Result<Option<Box<dyn ScorerSupplier<'a> + 'a>>> {
        Ok(self.inner.scorer_supplier(segment)?.map(|inner| {
            let mut rng = StdRng::seed_from_u64(self.seed ^ inner.cost().wrapping_mul(0x9E37_79B9_7F4A_7C15));
            let cost = rng.gen_range(0..=inner.cost().saturating_mul(4).saturating_add(10));
            Box::new(PerturbedSupplier { inner, cost }) as Box<dyn ScorerSupplier<'a> + 'a>
        }))
    }

    fn is_cacheable(&self, segment: &SegmentReader) -> bool {
        self.inner.is_cacheable(segment)
    }
}

struct PerturbedSupplier<'a> {
    inner: Box<dyn ScorerSupplier<'a> + 'a>,
    cost: u64,
}

impl<'a> ScorerSupplier<'a> for PerturbedSupplier<'a> {
    fn cost(&self) -> u64 {
        self.cost
    }

    fn get(self: Box<Self>, lead_cost: u64) -> Result<Box<dyn Scorer + 'a>> {
        let cost = self.cost;
        Ok(Box::new(PerturbedScorer { inner: self.inner.get(lead_cost)?, cost }))
    }
}

struct PerturbedScorer<'a> {
    inner: Box<dyn Scorer + 'a>,
    cost: u64,
}

impl<'a> DocIdIterator for PerturbedScorer<'a> {
    fn doc_id(&self) -> DocId {
        self.inner.doc_id()
    }

    fn next_doc(&mut self) -> Result<DocId> {
        self.inner.next_doc()
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        self.inner.advance(target)
    }

    fn cost(&self) -> u64 {
        self.cost
    }
}

impl<'a> Scorer for PerturbedScorer<'a> {
    fn score(&mut self) -> Result<Score> {
        self.inner.score()
    }

    fn max_score(&self) -> Score {
        self.inner.max_score()
    }

    fn set_min_competitive_score(&mut self, min_score: Score) -> Result<()> {
        self.inner.set_min_competitive_score(min_score)
    }

    fn score_mode(&self) -> ScoreMode {
        self.inner.score_mode()
    }

    fn weight(&self) -> &dyn Weight {
        self.inner.weight()
    }
}
