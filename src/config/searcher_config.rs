use std::path::Path;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::constants::{DEFAULT_DENSE_RATIO, SEARCHER_CONFIG_FILE};
use crate::common::file_operations::{atomic_save_json, read_json, FileOperationError};
use crate::{Result, SearchError};

fn default_parallel_segments() -> bool {
    true
}

fn default_dense_ratio() -> f64 {
    DEFAULT_DENSE_RATIO
}

/// Execution settings of an [`IndexSearcher`](crate::IndexSearcher).
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy, TypedBuilder)]
#[serde(rename_all = "snake_case")]
pub struct SearcherConfig {
    /// Size of the segment worker pool, `0` means one thread per logical CPU.
    #[serde(default)]
    #[builder(default = 0)]
    pub num_threads: usize,

    /// Search segments concurrently on the worker pool.
    #[serde(default = "default_parallel_segments")]
    #[builder(default = true)]
    pub parallel_segments: bool,

    /// Doc-id sets whose density (`cost / max_doc`) reaches this ratio are
    /// materialized as bitsets instead of sorted arrays.
    #[serde(default = "default_dense_ratio")]
    #[builder(default = DEFAULT_DENSE_RATIO)]
    pub dense_ratio: f64,
}

impl Default for SearcherConfig {
    fn default() -> Self {
        SearcherConfig::builder().build()
    }
}

impl SearcherConfig {
    /// Worker threads actually spawned.
    pub fn effective_num_threads(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dense_ratio > 0.0 && self.dense_ratio <= 1.0) {
            return Err(SearchError::InvalidArgument(format!(
                "dense_ratio must be in (0, 1], got {}",
                self.dense_ratio
            )));
        }
        Ok(())
    }

    pub fn load(config_dir: &Path) -> std::result::Result<Self, FileOperationError> {
        let file_path = config_dir.join(SEARCHER_CONFIG_FILE);
        read_json(&file_path)
    }

    pub fn save(&self, config_dir: &Path) -> std::result::Result<(), FileOperationError> {
        let file_path = config_dir.join(SEARCHER_CONFIG_FILE);
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir)?;
        }
        atomic_save_json(&file_path, self)
    }
}
