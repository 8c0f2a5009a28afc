use log::debug;

use super::posting_list::{PostingElement, PostingList, DEFAULT_MAX_NEXT_WEIGHT};
use crate::common::TermWeight;
use crate::{DocId, Result, SearchError, NO_MORE_DOCS};

#[derive(Debug, Default)]
pub struct PostingListBuilder {
    posting: PostingList,
}

/// Posting weights must be finite and non-negative.
pub(crate) fn check_weight(doc: DocId, weight: TermWeight) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(SearchError::InvalidArgument(format!(
            "posting weight must be finite and non-negative, got {weight} for doc {doc}"
        )));
    }
    Ok(())
}

impl PostingListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `(doc, weight)`; a second add for the same doc replaces its weight.
    ///
    /// Returns `true` for an insert and `false` for an update.
    pub fn add(&mut self, doc: DocId, weight: TermWeight) -> Result<bool> {
        if !(0..NO_MORE_DOCS).contains(&doc) {
            return Err(SearchError::InvalidArgument(format!("doc id {doc} is out of range")));
        }
        check_weight(doc, weight)?;
        Ok(self.upsert(PostingElement::new(doc, weight)))
    }

    fn upsert(&mut self, element: PostingElement) -> bool {
        let elements = &mut self.posting.elements;
        // sequential insert
        match elements.last_mut() {
            None => {
                elements.push(element);
                return true;
            }
            Some(last) if last.doc < element.doc => {
                elements.push(element);
                return true;
            }
            Some(last) if last.doc == element.doc => {
                last.weight = element.weight;
                return false;
            }
            Some(_) => {}
        }

        debug!("Inserting doc {} before the tail of a posting list, falling back to binary search.", element.doc);
        match elements.binary_search_by_key(&element.doc, |e| e.doc) {
            Ok(found_idx) => {
                elements[found_idx].weight = element.weight;
                false
            }
            Err(insert_idx) => {
                elements.insert(insert_idx, element);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.posting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posting.is_empty()
    }

    /// Freezes the list, filling `max_next_weight` from right to left.
    pub fn build(mut self) -> PostingList {
        let mut max_next_weight = DEFAULT_MAX_NEXT_WEIGHT;
        for element in self.posting.elements.iter_mut().rev() {
            element.max_next_weight = max_next_weight;
            max_next_weight = max_next_weight.max(element.weight);
        }
        self.posting
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_out_of_order_adds_are_sorted() {
        let mut builder = PostingListBuilder::new();
        assert!(builder.add(5, 1.0).unwrap());
        assert!(builder.add(1, 2.0).unwrap());
        assert!(builder.add(3, 3.0).unwrap());
        assert!(!builder.add(1, 4.0).unwrap());
        let posting = builder.build();
        assert_eq!(posting.docs().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(posting.get(0).unwrap().weight, 4.0);
    }

    #[test]
    fn test_rejects_invalid_weights_and_docs() {
        let mut builder = PostingListBuilder::new();
        assert!(builder.add(0, -1.0).is_err());
        assert!(builder.add(0, f32::NAN).is_err());
        assert!(builder.add(0, f32::INFINITY).is_err());
        assert!(builder.add(-3, 1.0).is_err());
        assert!(builder.add(NO_MORE_DOCS, 1.0).is_err());
        assert!(builder.is_empty());
    }

    #[test]
    fn test_max_next_weight_propagation() {
        let mut builder = PostingListBuilder::new();
        for (doc, weight) in [(0, 1.0), (1, 5.0), (2, 2.0), (3, 3.0)] {
            builder.add(doc, weight).unwrap();
        }
        let posting = builder.build();
        let max_next: Vec<f32> = posting.elements().iter().map(|e| e.max_next_weight).collect();
        assert_eq!(max_next, vec![5.0, 3.0, 3.0, DEFAULT_MAX_NEXT_WEIGHT]);
        assert_eq!(posting.max_weight(), 5.0);
    }

    #[test]
    fn test_max_next_weight_matches_suffix_maximum() {
        let mut rng = rand::thread_rng();
        let mut builder = PostingListBuilder::new();
        for doc in 0..500 {
            if rng.gen_bool(0.3) {
                builder.add(doc, rng.gen_range(0.0..10.0)).unwrap();
            }
        }
        let posting = builder.build();
        let elements = posting.elements();
        for (i, element) in elements.iter().enumerate() {
            let expected = elements[i + 1..].iter().map(|e| e.weight).fold(DEFAULT_MAX_NEXT_WEIGHT, f32::max);
            assert_eq!(element.max_next_weight, expected);
        }
    }
}
