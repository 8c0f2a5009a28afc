use super::{Collector, LeafCollector};
use crate::core::ScoreMode;
use crate::index::SegmentReader;
use crate::{DocId, Result, Score};

/// Keeps every match with its score, under a caller-chosen exhaustive mode.
#[derive(Debug, Clone, Copy)]
pub struct DocsCollector {
    score_mode: ScoreMode,
}

impl DocsCollector {
    /// `score_mode` must be exhaustive, otherwise matches could be skipped.
    pub fn new(score_mode: ScoreMode) -> Result<Self> {
        if !score_mode.is_exhaustive() {
            return Err(crate::SearchError::InvalidArgument(format!(
                "DocsCollector needs an exhaustive score mode, got {score_mode:?}"
            )));
        }
        Ok(Self { score_mode })
    }

    pub fn with_scores() -> Self {
        Self { score_mode: ScoreMode::Complete }
    }
}

#[derive(Debug, Default)]
pub struct SegmentDocsCollector {
    hits: Vec<(DocId, Option<Score>)>,
}

impl LeafCollector for SegmentDocsCollector {
    fn collect(&mut self, doc: DocId, score: Option<Score>) -> Result<()> {
        self.hits.push((doc, score));
        Ok(())
    }
}

impl Collector for DocsCollector {
    type Child = SegmentDocsCollector;
    type Fruit = Vec<(DocId, Option<Score>)>;

    fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    fn for_segment(&self, _segment: &SegmentReader) -> Result<SegmentDocsCollector> {
        Ok(SegmentDocsCollector::default())
    }

    fn harvest(&self, child: SegmentDocsCollector) -> Result<Self::Fruit> {
        Ok(child.hits)
    }
}
