mod searcher_config;

pub use searcher_config::SearcherConfig;
