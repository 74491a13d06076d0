use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::libs::config::Config;
use crate::libs::constants::{CATEGORY_ALL, DEFAULT_SLOW_CATEGORY, DEFAULT_SLOW_CATEGORY_DELAY_MS};
use crate::libs::error::AnyResult;
use crate::libs::source::VideoSource;
use crate::libs::utils::TimeLogger;
use crate::libs::video::Video;

/**
 * Read-only queries over the video collection. The source is loaded again on
 * every call, nothing is cached.
 */
#[derive(Clone)]
pub struct VideoCatalog {
    source: Arc<dyn VideoSource>,
    slow_category: String,
    slow_category_delay: Duration,
}

impl VideoCatalog {
    pub fn new(source: Arc<dyn VideoSource>) -> Self {
        VideoCatalog {
            source,
            slow_category: DEFAULT_SLOW_CATEGORY.to_string(),
            slow_category_delay: Duration::from_millis(DEFAULT_SLOW_CATEGORY_DELAY_MS),
        }
    }

    pub fn from_config(source: Arc<dyn VideoSource>, config: &Config) -> Self {
        Self::new(source).with_slow_category(config.slow_category.clone(), config.slow_category_delay())
    }

    /// Category answered late by `filter_by_category_with_delay`, and how late
    pub fn with_slow_category(mut self, category: String, delay: Duration) -> Self {
        self.slow_category = category;
        self.slow_category_delay = delay;
        self
    }

    async fn load(&self) -> AnyResult<Vec<Video>> {
        let timer = TimeLogger::new("Retrieved and decoded videos".into());
        let videos = self.source.load().await?;
        timer.complete();
        Ok(videos)
    }

    /// Get all the videos, in dataset order
    pub async fn list_all(&self) -> AnyResult<Vec<Video>> {
        self.load().await
    }

    /// Get the videos flagged for the landing view
    pub async fn list_featured(&self) -> AnyResult<Vec<Video>> {
        let videos = self.load().await?;
        Ok(videos.into_iter().filter(|video| video.featured).collect())
    }

    /// Get the videos of a category (exact, case-sensitive match), or all of them for "all"
    pub async fn filter_by_category(&self, category: &str) -> AnyResult<Vec<Video>> {
        let videos = self.load().await?;
        Ok(retain_category(videos, category))
    }

    /// Same as `filter_by_category`, but the slow category only answers after a delay
    pub async fn filter_by_category_with_delay(&self, category: &str) -> AnyResult<Vec<Video>> {
        let videos = self.load().await?;

        if category != CATEGORY_ALL && category == self.slow_category {
            info!(
                "Delaying {:?} results by {:.2?}",
                category, self.slow_category_delay
            );
            tokio::time::sleep(self.slow_category_delay).await;
        }

        Ok(retain_category(videos, category))
    }

    /// Case-insensitive search over titles, descriptions and channels
    pub async fn search(&self, query: &str) -> AnyResult<Vec<Video>> {
        let videos = self.load().await?;
        let needle = query.to_lowercase();

        let results: Vec<Video> = videos
            .into_iter()
            .filter(|video| video.matches_query(&needle))
            .collect();

        debug!("Search {:?} matched {} video(s)", query, results.len());
        Ok(results)
    }

    /// Get a single video by ID
    pub async fn get_video(&self, id: &str) -> AnyResult<Option<Video>> {
        let videos = self.load().await?;
        Ok(videos.into_iter().find(|video| video.id == id))
    }

    /// Most viewed videos first, dataset order for ties
    pub async fn trending(&self, limit: usize) -> AnyResult<Vec<Video>> {
        let mut videos = self.load().await?;
        // sort_by_key is stable, so ties keep their dataset order
        videos.sort_by_key(|video| std::cmp::Reverse(video.view_count()));
        videos.truncate(limit);
        Ok(videos)
    }

    /// Resolve favorited IDs against the catalog. IDs without a matching video
    /// are dropped silently.
    pub async fn favorite_videos(&self, ids: &[String]) -> AnyResult<Vec<Video>> {
        let videos = self.load().await?;
        Ok(videos
            .into_iter()
            .filter(|video| ids.contains(&video.id))
            .collect())
    }
}

fn retain_category(videos: Vec<Video>, category: &str) -> Vec<Video> {
    if category == CATEGORY_ALL {
        return videos;
    }

    videos
        .into_iter()
        .filter(|video| video.category == category)
        .collect()
}
