mod posting_list;
mod posting_list_builder;
mod posting_list_iterator;

pub use posting_list::{PostingElement, PostingList, DEFAULT_MAX_NEXT_WEIGHT};
pub(crate) use posting_list_builder::check_weight;
pub use posting_list_builder::PostingListBuilder;
pub use posting_list_iterator::PostingListIterator;
