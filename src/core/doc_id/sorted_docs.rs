use std::sync::Arc;

use super::{check_advance, check_next, DocIdIterator};
use crate::{DocId, Result, SearchError, NOT_STARTED, NO_MORE_DOCS};

/// Doc-id set backed by a sorted array; `advance` binary-searches the
/// remaining tail.
#[derive(Debug, Clone)]
pub struct SortedDocsIterator {
    docs: Arc<[DocId]>,
    // index of the next unread entry
    cursor: usize,
    doc: DocId,
}

impl SortedDocsIterator {
    pub fn new(docs: Vec<DocId>) -> Result<Self> {
        if let Some(pair) = docs.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(SearchError::InvalidArgument(format!(
                "doc ids must be strictly increasing, found {} before {}",
                pair[0], pair[1]
            )));
        }
        if let (Some(&first), Some(&last)) = (docs.first(), docs.last()) {
            if first < 0 || last >= NO_MORE_DOCS {
                return Err(SearchError::InvalidArgument(format!("doc ids out of range: {first}..={last}")));
            }
        }
        Ok(Self::from_sorted_unchecked(docs.into()))
    }

    /// Shares an already validated array.
    pub(crate) fn from_sorted_unchecked(docs: Arc<[DocId]>) -> Self {
        Self { docs, cursor: 0, doc: NOT_STARTED }
    }

    fn position_at(&mut self, cursor: usize) -> DocId {
        self.cursor = cursor;
        self.doc = match self.docs.get(cursor) {
            Some(&doc) => {
                self.cursor += 1;
                doc
            }
            None => NO_MORE_DOCS,
        };
        self.doc
    }
}

impl DocIdIterator for SortedDocsIterator {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        Ok(self.position_at(self.cursor))
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.doc, target)? {
            return Ok(NO_MORE_DOCS);
        }
        let offset = match self.docs[self.cursor..].binary_search(&target) {
            Ok(found) => found,
            Err(insert) => insert,
        };
        Ok(self.position_at(self.cursor + offset))
    }

    fn cost(&self) -> u64 {
        (self.docs.len() - self.cursor) as u64
    }
}
