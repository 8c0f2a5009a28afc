use log::trace;

use crate::collector::LeafCollector;
use crate::core::{DocIdIterator, Scorer};
use crate::{DocId, Result, Score, NO_MORE_DOCS};

/// Drives a [`Scorer`] over a doc range and feeds a [`LeafCollector`].
///
/// The collector's min competitive score is forwarded to the scorer after
/// every collected hit, but only when the scorer's mode permits pruning:
/// exhaustive searches never see a threshold.
pub struct BulkScorer<'a> {
    scorer: Box<dyn Scorer + 'a>,
    pushed_min_score: Option<Score>,
}

impl<'a> BulkScorer<'a> {
    pub fn new(scorer: Box<dyn Scorer + 'a>) -> Self {
        Self { scorer, pushed_min_score: None }
    }

    pub fn cost(&self) -> u64 {
        self.scorer.cost()
    }

    fn push_min_competitive_score<C: LeafCollector + ?Sized>(&mut self, collector: &C) -> Result<()> {
        if !self.scorer.score_mode().allows_pruning() {
            return Ok(());
        }
        if let Some(min_score) = collector.min_competitive_score() {
            if self.pushed_min_score.map_or(true, |pushed| min_score > pushed) {
                trace!("Raising min competitive score to {}.", min_score);
                self.scorer.set_min_competitive_score(min_score)?;
                self.pushed_min_score = Some(min_score);
            }
        }
        Ok(())
    }

    /// Collects the matches in `[min, max)` and returns the first match at or
    /// after `max`, or [`NO_MORE_DOCS`].
    pub fn score<C: LeafCollector + ?Sized>(&mut self, collector: &mut C, min: DocId, max: DocId) -> Result<DocId> {
        self.push_min_competitive_score(collector)?;
        let mut doc = self.scorer.doc_id();
        if doc < min {
            doc = self.scorer.advance(min)?;
        }
        let needs_scores = self.scorer.score_mode().needs_scores();
        while doc < max {
            if collector.is_terminated() {
                return Ok(doc);
            }
            let score = if needs_scores { Some(self.scorer.score()?) } else { None };
            collector.collect(doc, score)?;
            self.push_min_competitive_score(collector)?;
            doc = self.scorer.next_doc()?;
        }
        Ok(doc)
    }

    /// Collects every match of the segment.
    pub fn score_all<C: LeafCollector + ?Sized>(&mut self, collector: &mut C) -> Result<()> {
        self.score(collector, 0, NO_MORE_DOCS)?;
        Ok(())
    }
}
