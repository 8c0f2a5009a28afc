//! In-memory segments: the postings a query runs against.

mod segment_builder;
mod segment_reader;

pub use segment_builder::SegmentBuilder;
pub use segment_reader::SegmentReader;
