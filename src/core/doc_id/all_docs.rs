use super::{check_advance, check_next, DocIdIterator};
use crate::{DocId, Result, SearchError, NOT_STARTED, NO_MORE_DOCS};

/// Matches every document `0..max_doc`.
#[derive(Debug, Clone)]
pub struct AllDocsIterator {
    doc: DocId,
    max_doc: DocId,
}

impl AllDocsIterator {
    pub fn new(max_doc: DocId) -> Result<Self> {
        if !(0..NO_MORE_DOCS).contains(&max_doc) {
            return Err(SearchError::InvalidArgument(format!("max_doc must be in 0..{NO_MORE_DOCS}, got {max_doc}")));
        }
        Ok(Self { doc: NOT_STARTED, max_doc })
    }
}

impl DocIdIterator for AllDocsIterator {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        let target = self.doc + 1;
        self.doc = if target < self.max_doc { target } else { NO_MORE_DOCS };
        Ok(self.doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.doc, target)? {
            return Ok(NO_MORE_DOCS);
        }
        self.doc = if target < self.max_doc { target } else { NO_MORE_DOCS };
        Ok(self.doc)
    }

    fn cost(&self) -> u64 {
        self.max_doc as u64
    }
}

/// Matches documents `min_doc..max_doc`.
#[derive(Debug, Clone)]
pub struct RangeDocsIterator {
    doc: DocId,
    min_doc: DocId,
    max_doc: DocId,
}

impl RangeDocsIterator {
    pub fn new(min_doc: DocId, max_doc: DocId) -> Result<Self> {
        if min_doc < 0 || max_doc >= NO_MORE_DOCS || min_doc > max_doc {
            return Err(SearchError::InvalidArgument(format!("invalid doc range {min_doc}..{max_doc}")));
        }
        Ok(Self { doc: NOT_STARTED, min_doc, max_doc })
    }
}

impl DocIdIterator for RangeDocsIterator {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        let target = self.doc + 1;
        self.advance(target)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.doc, target)? {
            return Ok(NO_MORE_DOCS);
        }
        let target = target.max(self.min_doc);
        self.doc = if target < self.max_doc { target } else { NO_MORE_DOCS };
        Ok(self.doc)
    }

    fn cost(&self) -> u64 {
        (self.max_doc - self.min_doc) as u64
    }
}

/// Matches nothing.
#[derive(Debug, Clone)]
pub struct EmptyIterator {
    doc: DocId,
}

impl Default for EmptyIterator {
    fn default() -> Self {
        Self { doc: NOT_STARTED }
    }
}

impl DocIdIterator for EmptyIterator {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        self.doc = NO_MORE_DOCS;
        Ok(self.doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        check_advance(self.doc, target)?;
        self.doc = NO_MORE_DOCS;
        Ok(self.doc)
    }

    fn cost(&self) -> u64 {
        0
    }
}
