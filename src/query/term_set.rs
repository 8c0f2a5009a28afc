use std::collections::BTreeSet;
use std::sync::Arc;

use itertools::Itertools;
use log::trace;

use crate::core::doc_id::{BitSet, SortedDocsIterator};
use crate::core::posting_list::{PostingList, PostingListIterator};
use crate::core::scorer::ConstantScoreScorer;
use crate::core::{DocIdSetIterator, Query, ScoreMode, Scorer, ScorerSupplier, Weight};
use crate::index::SegmentReader;
use crate::reader::IndexSearcher;
use crate::{DocId, Result, Score};

/// Documents containing any of `terms`, all scored with the boost.
///
/// With more than one term the union is materialized when the scorer is
/// built: as a bitset when it is dense and will be iterated substantially,
/// as a sorted doc array otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct TermSetQuery {
    terms: BTreeSet<String>,
}

impl TermSetQuery {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(terms: I) -> Self {
        Self { terms: terms.into_iter().map(Into::into).collect() }
    }
}

impl Query for TermSetQuery {
    fn create_weight(&self, searcher: &IndexSearcher, score_mode: ScoreMode, boost: f32) -> Result<Box<dyn Weight>> {
        Ok(Box::new(TermSetWeight {
            terms: self.terms.iter().cloned().collect(),
            score: boost,
            score_mode,
            dense_ratio: searcher.dense_ratio(),
        }))
    }
}

#[derive(Debug)]
struct TermSetWeight {
    terms: Vec<String>,
    score: Score,
    score_mode: ScoreMode,
    dense_ratio: f64,
}

impl TermSetWeight {
    fn postings(&self, segment: &SegmentReader) -> Vec<Arc<PostingList>> {
        self.terms.iter().filter_map(|term| segment.posting_list(term)).collect()
    }
}

impl Weight for TermSetWeight {
    fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    fn scorer_supplier<'a>(&'a self, segment: &'a SegmentReader) -> Result<Option<Box<dyn ScorerSupplier<'a> + 'a>>> {
        let postings = self.postings(segment);
        if postings.is_empty() {
            return Ok(None);
        }
        let cost = postings.iter().map(|posting| posting.len() as u64).sum();
        Ok(Some(Box::new(TermSetScorerSupplier { weight: self, postings, max_doc: segment.max_doc(), cost })))
    }

    fn is_cacheable(&self, _segment: &SegmentReader) -> bool {
        true
    }

    fn count(&self, segment: &SegmentReader) -> Result<Option<u64>> {
        let postings = self.postings(segment);
        match postings.len() {
            0 => Ok(Some(0)),
            1 => Ok(Some(postings[0].len() as u64)),
            _ => Ok(None),
        }
    }
}

struct TermSetScorerSupplier<'a> {
    weight: &'a TermSetWeight,
    postings: Vec<Arc<PostingList>>,
    max_doc: DocId,
    cost: u64,
}

impl<'a> TermSetScorerSupplier<'a> {
    /// Dense sets that will be iterated for a large share of their size are
    /// cheaper as bitsets; sparse sets or short lead iterations favor a sorted array.
    fn use_bitset(&self, lead_cost: u64) -> bool {
        self.cost as f64 >= self.max_doc as f64 * self.weight.dense_ratio && lead_cost >= self.cost / 8
    }
}

impl<'a> ScorerSupplier<'a> for TermSetScorerSupplier<'a> {
    fn cost(&self) -> u64 {
        self.cost
    }

    fn get(mut self: Box<Self>, lead_cost: u64) -> Result<Box<dyn Scorer + 'a>> {
        let weight = self.weight;
        if self.postings.len() == 1 {
            if let Some(posting) = self.postings.pop() {
                let iterator = PostingListIterator::new(posting);
                return Ok(Box::new(ConstantScoreScorer::new(weight, weight.score, weight.score_mode, iterator)));
            }
        }
        let iterator: DocIdSetIterator = if self.use_bitset(lead_cost) {
            trace!("Materializing {} postings (cost {}) as a bitset over {} docs.", self.postings.len(), self.cost, self.max_doc);
            let mut bits = BitSet::with_max_doc(self.max_doc)?;
            for posting in &self.postings {
                for doc in posting.docs() {
                    bits.insert(doc)?;
                }
            }
            DocIdSetIterator::bitset(bits)
        } else {
            trace!("Materializing {} postings (cost {}) as a sorted array, lead cost {}.", self.postings.len(), self.cost, lead_cost);
            let docs: Vec<DocId> = self.postings.iter().map(|posting| posting.docs()).kmerge().dedup().collect();
            SortedDocsIterator::from_sorted_unchecked(docs.into()).into()
        };
        Ok(Box::new(ConstantScoreScorer::new(weight, weight.score, weight.score_mode, iterator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::DocsCollector;
    use crate::config::SearcherConfig;
    use crate::core::DocIdIterator;
    use crate::query::test_queries::{build_segment, searcher_with_segments, DocSpec};

    #[test]
    fn test_union_with_constant_score() {
        let searcher = searcher_with_segments(&[&[
            (0, &[("a", 1.0)]),
            (1, &[("b", 5.0)]),
            (2, &[("a", 1.0), ("b", 1.0)]),
            (3, &[("c", 1.0)]),
        ]]);
        let weight = searcher.create_weight(&TermSetQuery::new(["a", "b", "z"]), ScoreMode::Complete, 0.5).unwrap();
        let hits = searcher.search_with_weight(weight.as_ref(), &DocsCollector::with_scores()).unwrap();
        assert_eq!(hits, vec![vec![(0, Some(0.5)), (1, Some(0.5)), (2, Some(0.5))]]);
    }

    #[test]
    fn test_representation_does_not_change_matches() {
        let a: &[(&str, f32)] = &[("a", 1.0)];
        let b: &[(&str, f32)] = &[("b", 1.0)];
        let docs: Vec<DocSpec<'_>> = (0..64).map(|doc| (doc, if doc % 3 == 0 { a } else { b })).collect();
        let segment = build_segment(0, &docs);
        let searcher = crate::IndexSearcher::with_config(vec![segment], SearcherConfig::default()).unwrap();
        let weight = searcher.create_weight(&TermSetQuery::new(["a", "b"]), ScoreMode::CompleteNoScores, 1.0).unwrap();
        let segment = &searcher.segment_readers()[0];

        for lead_cost in [1, 1000] {
            let supplier = weight.scorer_supplier(segment).unwrap().unwrap();
            assert_eq!(supplier.cost(), 64);
            let mut scorer = supplier.get(lead_cost).unwrap();
            let mut docs = vec![];
            while scorer.next_doc().unwrap() != crate::NO_MORE_DOCS {
                docs.push(scorer.doc_id());
            }
            assert_eq!(docs, (0..64).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_representation_choice() {
        let searcher = searcher_with_segments(&[&[(0, &[("a", 1.0)]), (1, &[("b", 1.0)]), (1000, &[("c", 1.0)])]]);
        let weight = TermSetWeight { terms: vec!["a".into(), "b".into()], score: 1.0, score_mode: ScoreMode::Complete, dense_ratio: 0.5 };
        let segment = &searcher.segment_readers()[0];
        let postings = weight.postings(segment);
        let supplier = TermSetScorerSupplier { weight: &weight, postings, max_doc: 32, cost: 16 };
        assert!(supplier.use_bitset(2));
        assert!(!supplier.use_bitset(1));
        let sparse = TermSetScorerSupplier { max_doc: segment.max_doc(), ..supplier };
        assert!(!sparse.use_bitset(crate::common::constants::UNBOUNDED_LEAD_COST));
    }

    #[test]
    fn test_count() {
        let searcher = searcher_with_segments(&[&[(0, &[("a", 1.0)]), (1, &[("a", 1.0), ("b", 1.0)])]]);
        let segment = &searcher.segment_readers()[0];
        let single = searcher.create_weight(&TermSetQuery::new(["a"]), ScoreMode::CompleteNoScores, 1.0).unwrap();
        assert_eq!(single.count(segment).unwrap(), Some(2));
        let multi = searcher.create_weight(&TermSetQuery::new(["a", "b"]), ScoreMode::CompleteNoScores, 1.0).unwrap();
        assert_eq!(multi.count(segment).unwrap(), None);
        assert_eq!(searcher.count(&TermSetQuery::new(["a", "b"])).unwrap(), 2);
    }
}
