use crate::common::TermWeight;
use crate::DocId;

/// `max_next_weight` of the last element of a posting list.
pub const DEFAULT_MAX_NEXT_WEIGHT: TermWeight = TermWeight::NEG_INFINITY;

/// One `(doc, weight)` entry of a posting list.
///
/// `max_next_weight` is the largest weight of any element after this one,
/// so `weight.max(max_next_weight)` bounds every remaining contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostingElement {
    pub doc: DocId,
    pub weight: TermWeight,
    pub max_next_weight: TermWeight,
}

impl PostingElement {
    pub fn new(doc: DocId, weight: TermWeight) -> Self {
        Self { doc, weight, max_next_weight: DEFAULT_MAX_NEXT_WEIGHT }
    }

    /// Upper bound of the weight of this element and of every later one.
    pub fn max_remaining_weight(&self) -> TermWeight {
        self.weight.max(self.max_next_weight)
    }
}

/// Docs containing one term, sorted by doc id, with propagated
/// `max_next_weight`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingList {
    pub(super) elements: Vec<PostingElement>,
}

impl std::fmt::Display for PostingList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Posting[{}]{:?}", self.len(), self.elements)
    }
}

impl PostingList {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[PostingElement] {
        &self.elements
    }

    pub fn get(&self, idx: usize) -> Option<&PostingElement> {
        self.elements.get(idx)
    }

    /// Largest weight in the whole list, `0.0` when empty.
    pub fn max_weight(&self) -> TermWeight {
        self.elements.first().map(|e| e.max_remaining_weight()).unwrap_or(0.0)
    }

    pub fn docs(&self) -> impl Iterator<Item = DocId> + '_ {
        self.elements.iter().map(|e| e.doc)
    }
}
