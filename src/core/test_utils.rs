use std::io;
use std::sync::{Arc, Once};

use rand::Rng;

use crate::core::doc_id::{BitSet, BitSetIterator, DocIdIterator, DocIdSetIterator, SortedDocsIterator};
use crate::core::posting_list::{PostingList, PostingListBuilder, PostingListIterator};
use crate::core::scorer::{Scorer, TermScorer};
use crate::core::{ScoreMode, ScorerSupplier, Weight};
use crate::index::SegmentReader;
use crate::{ContractViolation, DocId, Result, Score, SearchError, NOT_STARTED, NO_MORE_DOCS};

static LOGGER: Once = Once::new();

pub(crate) fn init_test_logger() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Iterator representations that can be built from an arbitrary doc list.
pub(crate) trait TestDocIds: DocIdIterator + Sized {
    fn from_docs(docs: &[DocId], max_doc: DocId) -> Self;
}

impl TestDocIds for SortedDocsIterator {
    fn from_docs(docs: &[DocId], _max_doc: DocId) -> Self {
        SortedDocsIterator::new(docs.to_vec()).unwrap()
    }
}

impl TestDocIds for BitSetIterator {
    fn from_docs(docs: &[DocId], max_doc: DocId) -> Self {
        BitSetIterator::new(Arc::new(BitSet::from_docs(docs, max_doc).unwrap()))
    }
}

impl TestDocIds for DocIdSetIterator {
    fn from_docs(docs: &[DocId], max_doc: DocId) -> Self {
        if docs.len() as DocId == max_doc {
            DocIdSetIterator::all(max_doc).unwrap()
        } else {
            DocIdSetIterator::sorted(docs.to_vec()).unwrap()
        }
    }
}

impl TestDocIds for PostingListIterator {
    fn from_docs(docs: &[DocId], _max_doc: DocId) -> Self {
        let mut builder = PostingListBuilder::new();
        for &doc in docs {
            builder.add(doc, 1.0).unwrap();
        }
        PostingListIterator::new(Arc::new(builder.build()))
    }
}

/// Drains an iterator with `next_doc`.
pub(crate) fn collect_docs<I: DocIdIterator + ?Sized>(iterator: &mut I) -> Result<Vec<DocId>> {
    let mut docs = vec![];
    loop {
        let doc = iterator.next_doc()?;
        if doc == NO_MORE_DOCS {
            return Ok(docs);
        }
        docs.push(doc);
    }
}

/// Random strictly increasing docs in `0..max_doc`, each kept with probability `density`.
pub(crate) fn random_sorted_docs<R: Rng>(rng: &mut R, max_doc: DocId, density: f64) -> Vec<DocId> {
    (0..max_doc).filter(|_| rng.gen_bool(density)).collect()
}

/// Scores every doc as its stored posting weight.
pub(crate) fn build_posting(elements: &[(DocId, f32)]) -> Arc<PostingList> {
    let mut builder = PostingListBuilder::new();
    for &(doc, weight) in elements {
        builder.add(doc, weight).unwrap();
    }
    Arc::new(builder.build())
}

/// Drains a scorer, pairing every match with its score.
pub(crate) fn scored_docs<S: Scorer + ?Sized>(scorer: &mut S) -> Result<Vec<(DocId, Score)>> {
    let mut docs = vec![];
    loop {
        let doc = scorer.next_doc()?;
        if doc == NO_MORE_DOCS {
            return Ok(docs);
        }
        docs.push((doc, scorer.score()?));
    }
}

/// Weight that only exists so scorers have something to point back to.
#[derive(Debug, Default)]
pub(crate) struct StubWeight;

impl Weight for StubWeight {
    fn score_mode(&self) -> ScoreMode {
        ScoreMode::Complete
    }

    fn scorer_supplier<'a>(&'a self, _segment: &'a SegmentReader) -> Result<Option<Box<dyn ScorerSupplier<'a> + 'a>>> {
        Ok(None)
    }

    fn is_cacheable(&self, _segment: &SegmentReader) -> bool {
        true
    }
}

/// Boxed term scorer over an ad-hoc posting list.
pub(crate) fn term_scorer<'a>(
    weight: &'a StubWeight,
    elements: &[(DocId, f32)],
    score_mode: ScoreMode,
) -> Box<dyn Scorer + 'a> {
    Box::new(TermScorer::new(weight, PostingListIterator::new(build_posting(elements)), 1.0, score_mode))
}

/// Scorer that fails with an I/O error once it is asked to move past `fail_after`.
pub(crate) struct FailingScorer<'a> {
    weight: &'a StubWeight,
    fail_after: DocId,
    doc: DocId,
    cost: Option<u64>,
}

impl<'a> FailingScorer<'a> {
    pub(crate) fn new(weight: &'a StubWeight, fail_after: DocId) -> Self {
        Self { weight, fail_after, doc: NOT_STARTED, cost: None }
    }

    /// Overrides the reported cost.
    pub(crate) fn with_cost(mut self, cost: u64) -> Self {
        self.cost = Some(cost);
        self
    }

    fn move_to(&mut self, target: DocId) -> Result<DocId> {
        if target > self.fail_after {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "posting block truncated").into());
        }
        self.doc = target;
        Ok(target)
    }
}

impl<'a> DocIdIterator for FailingScorer<'a> {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        if self.doc == NO_MORE_DOCS {
            return Err(ContractViolation::NextAfterExhausted.into());
        }
        self.move_to(self.doc + 1)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        self.move_to(target)
    }

    fn cost(&self) -> u64 {
        self.cost.unwrap_or(self.fail_after as u64 + 1)
    }
}

impl<'a> Scorer for FailingScorer<'a> {
    fn score(&mut self) -> Result<Score> {
        Ok(1.0)
    }

    fn max_score(&self) -> Score {
        1.0
    }

    fn set_min_competitive_score(&mut self, _min_score: Score) -> Result<()> {
        Ok(())
    }

    fn score_mode(&self) -> ScoreMode {
        ScoreMode::Complete
    }

    fn weight(&self) -> &dyn Weight {
        self.weight
    }
}

pub(crate) fn is_io_error(error: &SearchError) -> bool {
    matches!(error, SearchError::IoError(_))
}
