use std::sync::Arc;

use super::{check_advance, check_next, DocIdIterator};
use crate::{DocId, Result, SearchError, NOT_STARTED, NO_MORE_DOCS};

/// Fixed-size bitset over the documents `0..num_bits` of a segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
    num_bits: DocId,
    cardinality: u64,
}

impl BitSet {
    pub fn with_max_doc(max_doc: DocId) -> Result<Self> {
        if !(0..NO_MORE_DOCS).contains(&max_doc) {
            return Err(SearchError::InvalidArgument(format!("max_doc must be in 0..{NO_MORE_DOCS}, got {max_doc}")));
        }
        let num_words = (max_doc as usize + 63) / 64;
        Ok(Self { words: vec![0u64; num_words], num_bits: max_doc, cardinality: 0 })
    }

    pub fn num_bits(&self) -> DocId {
        self.num_bits
    }

    pub fn cardinality(&self) -> u64 {
        self.cardinality
    }

    pub fn contains(&self, doc: DocId) -> bool {
        if doc < 0 || doc >= self.num_bits {
            return false;
        }
        let word = self.words[doc as usize / 64];
        (word & (1 << (doc as usize % 64))) != 0
    }

    pub fn insert(&mut self, doc: DocId) -> Result<()> {
        if doc < 0 || doc >= self.num_bits {
            return Err(SearchError::InvalidArgument(format!("doc {doc} is outside of 0..{}", self.num_bits)));
        }
        let word = &mut self.words[doc as usize / 64];
        let mask = 1u64 << (doc as usize % 64);
        if *word & mask == 0 {
            *word |= mask;
            self.cardinality += 1;
        }
        Ok(())
    }

    /// First set bit `>= from`, or [`NO_MORE_DOCS`].
    pub fn next_set_bit(&self, from: DocId) -> DocId {
        if from >= self.num_bits {
            return NO_MORE_DOCS;
        }
        let from = from.max(0) as usize;
        let mut word_idx = from / 64;
        // drop the bits below `from` in the first word
        let mut word = self.words[word_idx] & (u64::MAX << (from % 64));
        loop {
            if word != 0 {
                return (word_idx * 64 + word.trailing_zeros() as usize) as DocId;
            }
            word_idx += 1;
            match self.words.get(word_idx) {
                Some(&next) => word = next,
                None => return NO_MORE_DOCS,
            }
        }
    }
}

impl BitSet {
    pub fn from_docs(docs: &[DocId], max_doc: DocId) -> Result<Self> {
        let mut bits = BitSet::with_max_doc(max_doc)?;
        for &doc in docs {
            bits.insert(doc)?;
        }
        Ok(bits)
    }

    pub fn to_docs(&self) -> Vec<DocId> {
        let mut docs = Vec::with_capacity(self.cardinality as usize);
        for (i, &word) in self.words.iter().enumerate() {
            let mut word = word;
            while word != 0 {
                docs.push((i * 64 + word.trailing_zeros() as usize) as DocId);
                word &= word - 1;
            }
        }
        docs
    }
}

/// Doc-id set backed by a [`BitSet`]; `advance` scans words from the target.
#[derive(Debug, Clone)]
pub struct BitSetIterator {
    bits: Arc<BitSet>,
    doc: DocId,
}

impl BitSetIterator {
    pub fn new(bits: Arc<BitSet>) -> Self {
        Self { bits, doc: NOT_STARTED }
    }
}

impl DocIdIterator for BitSetIterator {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocId> {
        check_next(self.doc)?;
        self.doc = self.bits.next_set_bit(self.doc + 1);
        Ok(self.doc)
    }

    fn advance(&mut self, target: DocId) -> Result<DocId> {
        if check_advance(self.doc, target)? {
            return Ok(NO_MORE_DOCS);
        }
        self.doc = self.bits.next_set_bit(target);
        Ok(self.doc)
    }

    fn cost(&self) -> u64 {
        self.bits.cardinality()
    }
}
