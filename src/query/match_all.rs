use super::DocSetScorerSupplier;
use crate::core::{DocIdSetIterator, Query, ScoreMode, ScorerSupplier, Weight};
use crate::index::SegmentReader;
use crate::reader::IndexSearcher;
use crate::{Result, Score};

/// Matches every document with a constant score equal to the boost.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAllDocsQuery;

impl Query for MatchAllDocsQuery {
    fn create_weight(&self, _searcher: &IndexSearcher, score_mode: ScoreMode, boost: f32) -> Result<Box<dyn Weight>> {
        Ok(Box::new(MatchAllWeight { score_mode, score: boost }))
    }
}

#[derive(Debug)]
struct MatchAllWeight {
    score_mode: ScoreMode,
    score: Score,
}

impl Weight for MatchAllWeight {
    fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    fn scorer_supplier<'a>(&'a self, segment: &'a SegmentReader) -> Result<Option<Box<dyn ScorerSupplier<'a> + 'a>>> {
        if segment.max_doc() == 0 {
            return Ok(None);
        }
        let iterator = DocIdSetIterator::all(segment.max_doc())?;
        Ok(Some(Box::new(DocSetScorerSupplier::new(self, self.score, self.score_mode, iterator))))
    }

    fn is_cacheable(&self, _segment: &SegmentReader) -> bool {
        true
    }

    fn count(&self, segment: &SegmentReader) -> Result<Option<u64>> {
        Ok(Some(segment.max_doc() as u64))
    }
}
