use std::sync::Arc;

use super::{PostingElement, PostingList};
use crate::common::TermWeight;
use crate::core::doc_id::{check_advance, check_next, DocIdIterator};
use crate::{DocId, Result, NOT_STARTED, NO_MORE_DOCS};

/// Cursor over a shared [`PostingList`].
///
/// `cursor` is the index of the current element once iteration started.
#[derive(Debug, Clone)]
pub struct PostingListIterator {
    posting: Arc<PostingList>,
    cursor: usize,
    doc: DocId,
}

impl PostingListIterator {
    pub fn new(posting: Arc<PostingList>) -> Self {
        Self { posting, cursor: 0, doc: NOT_STARTED }
    }

    /// Element under the cursor; `None` before the first advance and after exhaustion.
    pub fn current(&self) -> Option<&PostingElement> {
        if self.doc == NOT_STARTED || self.doc == NO_MORE_DOCS {
            return None;
        }
        self.posting.get(self.cursor)
    }

    /// Element the next `next_doc()` call would land on.
    pub fn peek_next(&self) -> Option<&PostingElement> {
        match self.doc {
            NOT_STARTED => self.posting.get(0),
            NO_MORE_DOCS => None,
            _ => self.posting.get(self.cursor + 1),
        }
    }

    /// Moves the cursor onto element `idx` (or past the end).
    fn position_at(&mut self, idx: usize) -> DocId {
        self.cursor = idx;
        self.doc = self.posting.get(idx).map(|e| e.doc).unwrap_or(NO_MORE_DOCS);
        self.doc
    }

    /// Jumps to the end of the list without visiting the remaining elements.
    pub fn skip_to_end(&mut self) -> DocId {
        self.position_at(self.posting.len())
    }

    /// Number of elements not yet visited, the current one included.
    pub fn remains(&self) -> usize {
        match self.doc {
            NOT_STARTED => self.posting.len(),
            NO_MORE_DOCS => 0,
            _ => self.posting.len() - self.cursor,
        }
    }

    /// Upper bound of every weight from the current element onwards.
    pub fn max_remaining_weight(&self) -> TermWeight {
        match self.doc {
            NOT_STARTED => self.posting.max_weight(),
            NO_MORE_DOCS => 0.0,
            _ => self.posting.get(self.cursor).map(|e| e.max_remaining_weight()).unwrap_or(0.0),
        }
    }

    pub fn max_weight(&self) -> TermWeight {
        self.posting.max_weight()
    }
}

impl DocIdIterator for PostingListIterator {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        let next = if self.doc == NOT_STARTED { 0 } else { self.cursor + 1 };
        Ok(self.position_at(next))
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.doc, target)? {
            return Ok(NO_MORE_DOCS);
        }
        let start = if self.doc == NOT_STARTED { 0 } else { self.cursor + 1 };
        let elements = &self.posting.elements()[start..];
        let offset = match elements.binary_search_by(|e| e.doc.cmp(&target)) {
            Ok(found) => found,
            Err(insert) => insert,
        };
        Ok(self.position_at(start + offset))
    }

    fn cost(&self) -> u64 {
        self.posting.len() as u64
    }
}
