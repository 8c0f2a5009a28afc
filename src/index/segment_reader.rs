use std::fmt;
use std::sync::Arc;

use fnv::FnvHashMap;

use crate::core::posting_list::{PostingList, PostingListIterator};
use crate::DocId;

/// Read-only view of one segment. Cheap to clone and safe to share across
/// segment worker threads.
#[derive(Clone)]
pub struct SegmentReader {
    segment_ord: u32,
    max_doc: DocId,
    postings: Arc<FnvHashMap<String, Arc<PostingList>>>,
}

impl SegmentReader {
    pub(crate) fn new(segment_ord: u32, max_doc: DocId, postings: FnvHashMap<String, Arc<PostingList>>) -> Self {
        Self { segment_ord, max_doc, postings: Arc::new(postings) }
    }

    /// Position of this segment in its searcher.
    pub fn segment_ord(&self) -> u32 {
        self.segment_ord
    }

    /// Doc ids of this segment lie in `0..max_doc`.
    pub fn max_doc(&self) -> DocId {
        self.max_doc
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn posting_list(&self, term: &str) -> Option<Arc<PostingList>> {
        self.postings.get(term).cloned()
    }

    pub fn postings(&self, term: &str) -> Option<PostingListIterator> {
        self.posting_list(term).map(PostingListIterator::new)
    }

    /// Number of documents containing `term`.
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.postings.get(term).map(|posting| posting.len() as u64).unwrap_or(0)
    }
}

impl fmt::Debug for SegmentReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentReader")
            .field("segment_ord", &self.segment_ord())
            .field("max_doc", &self.max_doc())
            .field("num_terms", &self.num_terms())
            .finish()
    }
}
