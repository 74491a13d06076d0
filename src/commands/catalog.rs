use log::error;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::libs::error::{AnyResult, PetflixError};
use crate::libs::favorites::FavoritesStore;
use crate::libs::video::{Category, Video};

use super::state::AppState;

/// A video as displayed, decorated with its favorite status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoEntry {
    #[serde(flatten)]
    pub video: Video,
    pub favorited: bool,
}

/// Sections of the landing view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeView {
    pub featured: Vec<VideoEntry>,
    pub trending: Vec<VideoEntry>,
    pub reptiles: Vec<VideoEntry>,
    pub sloths: Vec<VideoEntry>,
}

pub(super) fn decorate(favorites: &FavoritesStore, videos: Vec<Video>) -> Vec<VideoEntry> {
    let favorite_ids = favorites.list();
    videos
        .into_iter()
        .map(|video| VideoEntry {
            favorited: favorite_ids.contains(&video.id),
            video,
        })
        .collect()
}

/// Missing data renders as an empty section, any other error goes up
pub(super) fn degraded(result: AnyResult<Vec<Video>>, section: &str) -> AnyResult<Vec<Video>> {
    match result {
        Err(PetflixError::DataUnavailable(reason)) => {
            error!("Could not load {}: {}", section, reason);
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Landing view. The slow category loads alongside the other sections and
/// never holds them back.
pub async fn home(state: &AppState) -> AnyResult<HomeView> {
    let catalog = &state.catalog;

    let (landing, sloths) = futures::join!(
        async {
            futures::try_join!(
                catalog.list_featured(),
                catalog.trending(state.trending_limit),
                catalog.filter_by_category(Category::Reptiles.as_ref()),
            )
        },
        catalog.filter_by_category_with_delay(Category::Sloths.as_ref()),
    );

    let (featured, trending, reptiles) = match landing {
        Ok(sections) => sections,
        Err(PetflixError::DataUnavailable(reason)) => {
            error!("Could not load the landing view: {}", reason);
            Default::default()
        }
        Err(err) => return Err(err),
    };
    let sloths = degraded(sloths, "sloth videos")?;

    Ok(HomeView {
        featured: decorate(&state.favorites, featured),
        trending: decorate(&state.favorites, trending),
        reptiles: decorate(&state.favorites, reptiles),
        sloths: decorate(&state.favorites, sloths),
    })
}

pub async fn list(state: &AppState) -> AnyResult<Vec<VideoEntry>> {
    let videos = degraded(state.catalog.list_all().await, "videos")?;
    Ok(decorate(&state.favorites, videos))
}

pub async fn featured(state: &AppState) -> AnyResult<Vec<VideoEntry>> {
    let videos = degraded(state.catalog.list_featured().await, "featured videos")?;
    Ok(decorate(&state.favorites, videos))
}

pub async fn trending(state: &AppState, limit: Option<usize>) -> AnyResult<Vec<VideoEntry>> {
    let limit = limit.unwrap_or(state.trending_limit);
    let videos = degraded(state.catalog.trending(limit).await, "trending videos")?;
    Ok(decorate(&state.favorites, videos))
}

pub async fn category(state: &AppState, name: &str, slow: bool) -> AnyResult<Vec<VideoEntry>> {
    let result = if slow {
        state.catalog.filter_by_category_with_delay(name).await
    } else {
        state.catalog.filter_by_category(name).await
    };
    let videos = degraded(result, name)?;
    Ok(decorate(&state.favorites, videos))
}

pub async fn search(state: &AppState, query: &str) -> AnyResult<Vec<VideoEntry>> {
    let videos = degraded(state.catalog.search(query).await, "search results")?;
    Ok(decorate(&state.favorites, videos))
}

/// Detail page of a single video
pub async fn show(state: &AppState, id: &str) -> AnyResult<VideoEntry> {
    let video = state
        .catalog
        .get_video(id)
        .await?
        .ok_or_else(|| PetflixError::VideoNotFound(id.to_string()))?;

    Ok(VideoEntry {
        favorited: state.favorites.contains(&video.id),
        video,
    })
}

pub fn categories() -> Vec<String> {
    Category::iter().map(|category| category.to_string()).collect()
}
