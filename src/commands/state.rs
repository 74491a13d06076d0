use std::sync::Arc;

use log::info;

use crate::libs::catalog::VideoCatalog;
use crate::libs::config::Config;
use crate::libs::error::AnyResult;
use crate::libs::favorites::FavoritesStore;
use crate::libs::source::{BundledSource, JsonFileSource, VideoSource};
use crate::libs::storage::{FileStorage, KeyValueStorage};

/// Everything a command needs, built once per run
#[derive(Clone)]
pub struct AppState {
    pub catalog: VideoCatalog,
    pub favorites: FavoritesStore,
    pub trending_limit: usize,
}

impl AppState {
    pub fn new(catalog: VideoCatalog, favorites: FavoritesStore, trending_limit: usize) -> Self {
        AppState {
            catalog,
            favorites,
            trending_limit,
        }
    }

    /// Wire the dataset source and the favorites storage described by the config
    pub fn setup(config: &Config) -> AnyResult<AppState> {
        let source: Arc<dyn VideoSource> = match &config.dataset_path {
            Some(path) => {
                info!("Reading videos from {:?}", path);
                Arc::new(JsonFileSource::new(path.clone()))
            }
            None => Arc::new(BundledSource),
        };

        let storage: Arc<dyn KeyValueStorage> =
            Arc::new(FileStorage::new(config.resolved_storage_path()?));

        Ok(AppState::new(
            VideoCatalog::from_config(source, config),
            FavoritesStore::new(storage),
            config.trending_limit,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn setup_uses_configured_paths() {
        let dir = tempdir().expect("failed to create temp dir");
        let dataset = dir.path().join("videos.json");
        std::fs::write(&dataset, r#"{"videos": []}"#).unwrap();

        let config = Config {
            dataset_path: Some(dataset),
            storage_path: Some(dir.path().join("storage.json")),
            ..Config::default()
        };
        let state = AppState::setup(&config).unwrap();

        assert!(state.catalog.list_all().await.unwrap().is_empty());

        state.favorites.add("a");
        assert!(dir.path().join("storage.json").exists());
    }
}
