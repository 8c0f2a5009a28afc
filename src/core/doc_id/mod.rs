//! Ascending, forward-only cursors over the matching documents of one segment.

mod all_docs;
mod bitset;
mod sorted_docs;

use enum_dispatch::enum_dispatch;

pub use all_docs::{AllDocsIterator, EmptyIterator, RangeDocsIterator};
pub use bitset::{BitSet, BitSetIterator};
pub use sorted_docs::SortedDocsIterator;

use crate::{ContractViolation, DocId, Result, NO_MORE_DOCS};

/// Cursor over a strictly increasing sequence of doc ids, terminated by
/// [`NO_MORE_DOCS`].
///
/// A fresh iterator is positioned on [`NOT_STARTED`](crate::NOT_STARTED).
/// Once `NO_MORE_DOCS` has been returned, `doc_id()` keeps returning it,
/// `advance(NO_MORE_DOCS)` is a no-op and `next_doc()` is a contract
/// violation.
#[enum_dispatch]
pub trait DocIdIterator {
    /// Current position. Two reads without an advance in between are equal.
    fn doc_id(&self) -> DocId;

    /// Moves to the next match strictly after the current position.
    fn next_doc(&mut self) -> Result<DocId>;

    /// Moves to the first match `>= target`. `target` must be greater than
    /// the current position.
    fn advance(&mut self, target: DocId) -> Result<DocId>;

    /// Upper-bound estimate of the remaining matches. Only used for planning.
    fn cost(&self) -> u64;
}

/// Closed set of doc-id set representations produced by the index layer
/// and by doc-set materializing suppliers.
#[enum_dispatch(DocIdIterator)]
#[derive(Debug, Clone)]
pub enum DocIdSetIterator {
    All(AllDocsIterator),
    Range(RangeDocsIterator),
    Empty(EmptyIterator),
    Sorted(SortedDocsIterator),
    BitSet(BitSetIterator),
}

impl DocIdSetIterator {
    /// Every document of a segment, `0..max_doc`.
    pub fn all(max_doc: DocId) -> Result<DocIdSetIterator> {
        Ok(AllDocsIterator::new(max_doc)?.into())
    }

    /// Documents `min_doc..max_doc`.
    pub fn range(min_doc: DocId, max_doc: DocId) -> Result<DocIdSetIterator> {
        Ok(RangeDocsIterator::new(min_doc, max_doc)?.into())
    }

    pub fn empty() -> DocIdSetIterator {
        EmptyIterator::default().into()
    }

    /// Sparse representation; `advance` is a binary search.
    pub fn sorted(docs: Vec<DocId>) -> Result<DocIdSetIterator> {
        Ok(SortedDocsIterator::new(docs)?.into())
    }

    /// Dense representation; `advance` scans bitset words.
    pub fn bitset(bits: BitSet) -> DocIdSetIterator {
        BitSetIterator::new(bits.into()).into()
    }
}

/// Checks a `next_doc()` call against the current position.
pub(crate) fn check_next(current: DocId) -> Result<()> {
    if current == NO_MORE_DOCS {
        return Err(ContractViolation::NextAfterExhausted.into());
    }
    Ok(())
}

/// Checks an `advance(target)` call against the current position.
///
/// Returns `Ok(true)` when the iterator is already exhausted and the call
/// asks for `NO_MORE_DOCS`, in which case the callee just returns it.
pub(crate) fn check_advance(current: DocId, target: DocId) -> Result<bool> {
    if current == NO_MORE_DOCS && target == NO_MORE_DOCS {
        return Ok(true);
    }
    if target <= current {
        return Err(ContractViolation::AdvanceNotForward { current, target }.into());
    }
    Ok(false)
}

/// `advance` expressed as repeated `next_doc` calls.
///
/// Implementations without a skip structure use this, and tests use it to
/// cross-check real `advance` implementations.
pub fn slow_advance<I: DocIdIterator + ?Sized>(iterator: &mut I, target: DocId) -> Result<DocId> {
    let current = iterator.doc_id();
    if check_advance(current, target)? {
        return Ok(NO_MORE_DOCS);
    }
    let mut doc = current;
    while doc < target {
        doc = iterator.next_doc()?;
    }
    Ok(doc)
}


#[cfg(test)]
mod dispatch_tests {
    use super::*;
    use crate::core::test_utils::collect_docs;

    #[test]
    fn test_all_and_range() {
        let mut all = DocIdSetIterator::all(4).unwrap();
        assert_eq!(all.cost(), 4);
        assert_eq!(collect_docs(&mut all).unwrap(), vec![0, 1, 2, 3]);

        let mut range = DocIdSetIterator::range(3, 6).unwrap();
        assert_eq!(range.advance(1).unwrap(), 3);
        assert_eq!(range.advance(5).unwrap(), 5);
        assert_eq!(range.next_doc().unwrap(), NO_MORE_DOCS);

        assert!(DocIdSetIterator::range(6, 3).is_err());
        assert!(DocIdSetIterator::all(-1).is_err());
    }

    #[test]
    fn test_empty() {
        let mut empty = DocIdSetIterator::empty();
        assert_eq!(empty.cost(), 0);
        assert_eq!(empty.next_doc().unwrap(), NO_MORE_DOCS);
    }

    #[test]
    fn test_sorted_rejects_unsorted_input() {
        assert!(DocIdSetIterator::sorted(vec![1, 1]).is_err());
        assert!(DocIdSetIterator::sorted(vec![3, 2]).is_err());
        assert!(DocIdSetIterator::sorted(vec![-1, 2]).is_err());
        assert!(DocIdSetIterator::sorted(vec![0, NO_MORE_DOCS]).is_err());
    }
}
