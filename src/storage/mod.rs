//! Fixture loading.
//!
//! The record store is seeded once from JSONL files in the data directory:
//! - `players.jsonl` player-season records
//! - `matches.jsonl` match fixtures with shot maps
//! - `predictions.jsonl` static match forecasts

mod jsonl;
mod store;

pub use jsonl::*;
pub use store::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while seeding the store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at {path:?} line {line}: {source}")]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },
}

/// Configuration for fixture paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path_for(&self, entity: EntityType) -> PathBuf {
        self.data_dir.join(entity.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(
            config.path_for(EntityType::Player),
            PathBuf::from("/data/players.jsonl")
        );
        assert_eq!(
            config.path_for(EntityType::Match),
            PathBuf::from("/data/matches.jsonl")
        );
        assert_eq!(
            config.path_for(EntityType::Prediction),
            PathBuf::from("/data/predictions.jsonl")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
