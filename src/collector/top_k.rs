use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::{Collector, LeafCollector};
use crate::core::ScoreMode;
use crate::index::SegmentReader;
use crate::{DocId, Result, Score, SearchError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoc {
    pub doc: DocId,
    pub score: Score,
}

impl Eq for ScoredDoc {}

/// Higher scores rank first, ties go to the lower doc id.
impl Ord for ScoredDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.score).cmp(&OrderedFloat(other.score)).then_with(|| other.doc.cmp(&self.doc))
    }
}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounded min-heap keeping the `k` best [`ScoredDoc`]s.
#[derive(Debug, Clone)]
pub struct TopK {
    k: usize,
    heap: BinaryHeap<Reverse<ScoredDoc>>,
}

impl TopK {
    pub fn new(k: usize) -> Self {
        Self { k, heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1 << 16)) }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Returns `true` if `scored` entered the top k.
    pub fn push(&mut self, scored: ScoredDoc) -> bool {
        if self.k == 0 {
            return false;
        }
        if !self.is_full() {
            self.heap.push(Reverse(scored));
            return true;
        }
        match self.heap.peek() {
            Some(Reverse(worst)) if scored > *worst => {
                self.heap.pop();
                self.heap.push(Reverse(scored));
                true
            }
            _ => false,
        }
    }

    /// Score of the k-th best entry once k entries were seen.
    pub fn threshold(&self) -> Option<Score> {
        if self.k > 0 && self.is_full() {
            self.heap.peek().map(|Reverse(worst)| worst.score)
        } else {
            None
        }
    }

    pub fn combine(&mut self, other: &TopK) {
        for Reverse(scored) in other.heap.iter() {
            self.push(*scored);
        }
    }

    /// Best first.
    pub fn into_sorted_vec(self) -> Vec<ScoredDoc> {
        self.heap.into_sorted_vec().into_iter().map(|Reverse(scored)| scored).collect()
    }
}

/// Collects the `k` best-scoring matches of each segment under
/// [`ScoreMode::TopScores`], letting scorers skip hits that cannot enter.
#[derive(Debug, Clone, Copy)]
pub struct TopScoreCollector {
    k: usize,
}

impl TopScoreCollector {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

#[derive(Debug)]
pub struct SegmentTopScoreCollector {
    top_k: TopK,
}

impl LeafCollector for SegmentTopScoreCollector {
    fn collect(&mut self, doc: DocId, score: Option<Score>) -> Result<()> {
        let score = score.ok_or_else(|| SearchError::InternalError(format!("doc {doc} collected without a score")))?;
        self.top_k.push(ScoredDoc { doc, score });
        Ok(())
    }

    fn min_competitive_score(&self) -> Option<Score> {
        self.top_k.threshold()
    }

    fn is_terminated(&self) -> bool {
        self.top_k.k == 0
    }
}

impl Collector for TopScoreCollector {
    type Child = SegmentTopScoreCollector;
    type Fruit = Vec<ScoredDoc>;

    fn score_mode(&self) -> ScoreMode {
        ScoreMode::TopScores
    }

    fn for_segment(&self, _segment: &SegmentReader) -> Result<SegmentTopScoreCollector> {
        Ok(SegmentTopScoreCollector { top_k: TopK::new(self.k) })
    }

    fn harvest(&self, child: SegmentTopScoreCollector) -> Result<Vec<ScoredDoc>> {
        Ok(child.top_k.into_sorted_vec())
    }
}
