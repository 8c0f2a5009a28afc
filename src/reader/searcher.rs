use std::fmt;

use log::debug;
use measure_time::debug_time;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::collector::{Collector, CountCollector};
use crate::common::constants::UNBOUNDED_LEAD_COST;
use crate::config::SearcherConfig;
use crate::core::{BulkScorer, Query, ScoreMode, Weight};
use crate::index::SegmentReader;
use crate::{Result, SearchError};

/// Runs queries over a fixed list of segments.
///
/// One weight is compiled per search and shared by every segment task; each
/// task builds its own scorers and leaf collector. With
/// `parallel_segments` enabled the tasks run on a dedicated rayon pool.
pub struct IndexSearcher {
    segment_readers: Vec<SegmentReader>,
    config: SearcherConfig,
    pool: Option<ThreadPool>,
}

impl IndexSearcher {
    pub fn new(segment_readers: Vec<SegmentReader>) -> Result<Self> {
        Self::with_config(segment_readers, SearcherConfig::default())
    }

    pub fn with_config(segment_readers: Vec<SegmentReader>, config: SearcherConfig) -> Result<Self> {
        config.validate()?;
        let pool = if config.parallel_segments && segment_readers.len() > 1 {
            let num_threads = config.effective_num_threads().min(segment_readers.len());
            let pool = ThreadPoolBuilder::new()
                .thread_name(|i| format!("search_seg_{i}"))
                .num_threads(num_threads)
                .build()?;
            debug!("Created segment search pool with {} threads.", num_threads);
            Some(pool)
        } else {
            None
        };
        Ok(Self { segment_readers, config, pool })
    }

    pub fn config(&self) -> &SearcherConfig {
        &self.config
    }

    pub fn segment_readers(&self) -> &[SegmentReader] {
        &self.segment_readers
    }

    pub fn segment_reader(&self, segment_ord: u32) -> Option<&SegmentReader> {
        self.segment_readers.get(segment_ord as usize)
    }

    /// Sum of `max_doc` over all segments.
    pub fn max_doc(&self) -> u64 {
        self.segment_readers.iter().map(|segment| segment.max_doc() as u64).sum()
    }

    /// Compiles `query`. Composite queries call this for their children.
    pub fn create_weight(&self, query: &dyn Query, score_mode: ScoreMode, boost: f32) -> Result<Box<dyn Weight>> {
        if !boost.is_finite() || boost < 0.0 {
            return Err(SearchError::InvalidArgument(format!("boost must be finite and non-negative, got {boost}")));
        }
        query.create_weight(self, score_mode, boost)
    }

    /// Runs `query` and returns one fruit per segment, in segment order.
    pub fn search<C: Collector>(&self, query: &dyn Query, collector: &C) -> Result<Vec<C::Fruit>> {
        let weight = self.create_weight(query, collector.score_mode(), 1.0)?;
        self.search_with_weight(weight.as_ref(), collector)
    }

    pub fn search_with_weight<C: Collector>(&self, weight: &dyn Weight, collector: &C) -> Result<Vec<C::Fruit>> {
        debug_time!("search over {} segments", self.segment_readers.len());
        match &self.pool {
            Some(pool) => pool.install(|| {
                self.segment_readers
                    .par_iter()
                    .map(|segment| self.search_segment(weight, segment, collector))
                    .collect::<Result<Vec<_>>>()
            }),
            None => self
                .segment_readers
                .iter()
                .map(|segment| self.search_segment(weight, segment, collector))
                .collect(),
        }
    }

    fn search_segment<C: Collector>(&self, weight: &dyn Weight, segment: &SegmentReader, collector: &C) -> Result<C::Fruit> {
        let mut leaf = collector.for_segment(segment)?;
        if let Some(supplier) = weight.scorer_supplier(segment)? {
            debug!("Segment {} scorer cost estimate {}.", segment.segment_ord(), supplier.cost());
            let scorer = supplier.get(UNBOUNDED_LEAD_COST)?;
            BulkScorer::new(scorer).score_all(&mut leaf)?;
        }
        collector.harvest(leaf)
    }

    /// Number of documents matching `query`, using per-segment counts when
    /// the weight can provide them without iterating.
    pub fn count(&self, query: &dyn Query) -> Result<u64> {
        let weight = self.create_weight(query, ScoreMode::CompleteNoScores, 1.0)?;
        let mut total = 0;
        for segment in &self.segment_readers {
            total += match weight.count(segment)? {
                Some(count) => count,
                None => self.search_segment(weight.as_ref(), segment, &CountCollector)?,
            };
        }
        Ok(total)
    }

    /// Whether every segment's results for `query` may be cached.
    pub fn is_cacheable(&self, query: &dyn Query) -> Result<bool> {
        let weight = self.create_weight(query, ScoreMode::CompleteNoScores, 1.0)?;
        Ok(self.segment_readers.iter().all(|segment| weight.is_cacheable(segment)))
    }

    pub(crate) fn dense_ratio(&self) -> f64 {
        self.config.dense_ratio
    }
}

impl fmt::Debug for IndexSearcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segment_ords = self.segment_readers.iter().map(SegmentReader::segment_ord).collect::<Vec<_>>();
        write!(f, "IndexSearcher({segment_ords:?})")
    }
}
