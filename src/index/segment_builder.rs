use std::sync::Arc;

use fnv::FnvHashMap;
use log::debug;

use super::SegmentReader;
use crate::common::TermWeight;
use crate::core::posting_list::{check_weight, PostingListBuilder};
use crate::{DocId, Result, SearchError, NO_MORE_DOCS};

/// Accumulates `(doc, term, weight)` postings for one segment.
#[derive(Debug, Default)]
pub struct SegmentBuilder {
    segment_ord: u32,
    max_doc: DocId,
    builders: FnvHashMap<String, PostingListBuilder>,
}

impl SegmentBuilder {
    pub fn new(segment_ord: u32) -> Self {
        Self { segment_ord, ..Default::default() }
    }

    /// Reserves doc ids `0..max_doc` even if the tail holds no postings.
    pub fn with_max_doc(mut self, max_doc: DocId) -> Result<Self> {
        if !(0..NO_MORE_DOCS).contains(&max_doc) {
            return Err(SearchError::InvalidArgument(format!("max_doc {max_doc} is out of range")));
        }
        self.max_doc = self.max_doc.max(max_doc);
        Ok(self)
    }

    /// Indexes `doc` with the given terms. Adding a term twice for the same
    /// doc keeps the last weight.
    ///
    /// Every weight is checked before any posting is written, so a failed
    /// add leaves the builder untouched.
    pub fn add<S, I>(&mut self, doc: DocId, terms: I) -> Result<()>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, TermWeight)>,
    {
        if !(0..NO_MORE_DOCS - 1).contains(&doc) {
            return Err(SearchError::InvalidArgument(format!("doc id {doc} is out of range")));
        }
        let terms: Vec<(String, TermWeight)> = terms.into_iter().map(|(term, weight)| (term.into(), weight)).collect();
        for &(_, weight) in &terms {
            check_weight(doc, weight)?;
        }
        for (term, weight) in terms {
            self.builders.entry(term).or_default().add(doc, weight)?;
        }
        self.max_doc = self.max_doc.max(doc + 1);
        Ok(())
    }

    pub fn build(self) -> SegmentReader {
        debug!("Building segment {} with {} terms and max_doc {}.", self.segment_ord, self.builders.len(), self.max_doc);
        let postings = self
            .builders
            .into_iter()
            .filter(|(_, builder)| !builder.is_empty())
            .map(|(term, builder)| (term, Arc::new(builder.build())))
            .collect();
        SegmentReader::new(self.segment_ord, self.max_doc, postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_segment() {
        let mut builder = SegmentBuilder::new(3);
        builder.add(0, doc_terms!("rust" => 1.0, "search" => 2.0)).unwrap();
        builder.add(4, doc_terms!("rust" => 0.5)).unwrap();
        builder.add(2, doc_terms!("rust" => 3.0, "rust" => 4.0)).unwrap();
        let segment = builder.build();

        assert_eq!(segment.segment_ord(), 3);
        assert_eq!(segment.max_doc(), 5);
        assert_eq!(segment.num_terms(), 2);
        assert_eq!(segment.doc_freq("rust"), 3);
        assert_eq!(segment.doc_freq("missing"), 0);
        let rust = segment.posting_list("rust").unwrap();
        assert_eq!(rust.docs().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(rust.get(1).unwrap().weight, 4.0);
        assert!(segment.postings("missing").is_none());
    }

    #[test]
    fn test_max_doc_reservation_and_validation() {
        let segment = SegmentBuilder::new(0).with_max_doc(10).unwrap().build();
        assert_eq!(segment.max_doc(), 10);
        assert!(SegmentBuilder::new(0).with_max_doc(-1).is_err());

        let mut builder = SegmentBuilder::new(0);
        assert!(builder.add(-1, doc_terms!("a" => 1.0)).is_err());
        assert!(builder.add(0, doc_terms!("a" => -1.0)).is_err());
    }

    #[test]
    fn test_failed_add_leaves_no_postings() {
        let mut builder = SegmentBuilder::new(0);
        for doc in 0..4 {
            builder.add(doc, doc_terms!("a" => 1.0)).unwrap();
        }
        assert!(builder.add(5, doc_terms!("b" => 1.0, "c" => -1.0)).is_err());
        assert!(builder.add(6, doc_terms!("a" => 2.0, "b" => f32::NAN)).is_err());
        let segment = builder.build();

        assert_eq!(segment.max_doc(), 4);
        assert_eq!(segment.doc_freq("a"), 4);
        assert!(segment.postings("b").is_none());
        assert!(segment.postings("c").is_none());
        let a = segment.posting_list("a").unwrap();
        assert!(a.docs().all(|doc| doc < segment.max_doc()));
    }
}
