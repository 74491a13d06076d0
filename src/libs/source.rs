use std::path::PathBuf;

use async_trait::async_trait;
use itertools::Itertools;
use log::error;

use crate::libs::error::{AnyResult, PetflixError};
use crate::libs::video::{Video, VideoCollection};

const BUNDLED_DATASET: &str = include_str!("../../data/videos.json");

/**
 * Provider of the full, read-only video collection. Sources may be slow
 * (disk, network), hence async.
 */
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn load(&self) -> AnyResult<Vec<Video>>;
}

/// Dataset compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

#[async_trait]
impl VideoSource for BundledSource {
    async fn load(&self) -> AnyResult<Vec<Video>> {
        parse_collection(BUNDLED_DATASET)
    }
}

/// Dataset read from a JSON document on disk, on every load
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: PathBuf) -> Self {
        JsonFileSource { path }
    }
}

#[async_trait]
impl VideoSource for JsonFileSource {
    async fn load(&self) -> AnyResult<Vec<Video>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            error!("Could not read dataset {:?}: {}", self.path, err);
            PetflixError::DataUnavailable(format!("{}: {}", self.path.display(), err))
        })?;

        parse_collection(&content)
    }
}

/// Dataset held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    videos: Vec<Video>,
}

impl MemorySource {
    pub fn new(videos: Vec<Video>) -> Self {
        MemorySource { videos }
    }
}

#[async_trait]
impl VideoSource for MemorySource {
    async fn load(&self) -> AnyResult<Vec<Video>> {
        check_unique_ids(&self.videos)?;
        Ok(self.videos.clone())
    }
}

/**
 * Decode a `{ "videos": [...] }` document. Anything malformed is reported as
 * `DataUnavailable`.
 */
pub fn parse_collection(json: &str) -> AnyResult<Vec<Video>> {
    let collection: VideoCollection = serde_json::from_str(json)
        .map_err(|err| PetflixError::DataUnavailable(format!("malformed dataset: {}", err)))?;

    check_unique_ids(&collection.videos)?;

    Ok(collection.videos)
}

fn check_unique_ids(videos: &[Video]) -> AnyResult<()> {
    let duplicates: Vec<&str> = videos
        .iter()
        .map(|video| video.id.as_str())
        .duplicates()
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(PetflixError::DataUnavailable(format!(
            "duplicate video ids: {}",
            duplicates.join(", ")
        )))
    }
}
