use serde::Serialize;

use crate::libs::error::AnyResult;

use super::catalog::{decorate, degraded, VideoEntry};
use super::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteStatus {
    pub id: String,
    pub favorited: bool,
}

/// Favorited videos, in catalog order. Favorites pointing to videos that no
/// longer exist are left out.
pub async fn list(state: &AppState) -> AnyResult<Vec<VideoEntry>> {
    let ids = state.favorites.list();
    let videos = degraded(state.catalog.favorite_videos(&ids).await, "favorite videos")?;
    Ok(decorate(&state.favorites, videos))
}

pub fn add(state: &AppState, id: &str) -> FavoriteStatus {
    state.favorites.add(id);
    status(state, id)
}

pub fn remove(state: &AppState, id: &str) -> FavoriteStatus {
    state.favorites.remove(id);
    status(state, id)
}

pub fn toggle(state: &AppState, id: &str) -> FavoriteStatus {
    FavoriteStatus {
        id: id.to_string(),
        favorited: state.favorites.toggle(id),
    }
}

fn status(state: &AppState, id: &str) -> FavoriteStatus {
    FavoriteStatus {
        id: id.to_string(),
        favorited: state.favorites.contains(id),
    }
}
