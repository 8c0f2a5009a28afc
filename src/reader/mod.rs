mod searcher;

pub use searcher::IndexSearcher;
