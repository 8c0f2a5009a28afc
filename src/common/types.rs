/// Ordinal of a document inside one segment.
///
/// Real documents are `0..max_doc`; the negative range and `i32::MAX` are
/// reserved for the iterator sentinels in [`constants`](super::constants).
pub type DocId = i32;

/// Relevance score produced by a [`Scorer`](crate::Scorer).
pub type Score = f32;

/// Term weight stored in a posting list.
pub type TermWeight = f32;
