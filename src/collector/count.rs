use super::{Collector, LeafCollector};
use crate::core::ScoreMode;
use crate::index::SegmentReader;
use crate::{DocId, Result, Score};

/// Counts every match. Runs under [`ScoreMode::CompleteNoScores`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CountCollector;

#[derive(Debug, Default)]
pub struct SegmentCountCollector {
    count: u64,
}

impl LeafCollector for SegmentCountCollector {
    fn collect(&mut self, _doc: DocId, _score: Option<Score>) -> Result<()> {
        self.count += 1;
        Ok(())
    }
}

impl Collector for CountCollector {
    type Child = SegmentCountCollector;
    type Fruit = u64;

    fn score_mode(&self) -> ScoreMode {
        ScoreMode::CompleteNoScores
    }

    fn for_segment(&self, _segment: &SegmentReader) -> Result<SegmentCountCollector> {
        Ok(SegmentCountCollector::default())
    }

    fn harvest(&self, child: SegmentCountCollector) -> Result<u64> {
        Ok(child.count)
    }
}
