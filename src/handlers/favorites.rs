//! Bookmark handlers. Paths carry the target id first and the user id second.

use crate::error::AppError;
use crate::extractors::PathIds;
use crate::response::message;
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn add_planet(
    State(state): State<AppState>,
    PathIds((planet_id, user_id)): PathIds<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    CatalogService::add_favorite_planet(state.catalog.as_ref(), planet_id, user_id).await?;
    Ok(message("Planet bookmarked"))
}

pub async fn add_person(
    State(state): State<AppState>,
    PathIds((people_id, user_id)): PathIds<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    CatalogService::add_favorite_person(state.catalog.as_ref(), people_id, user_id).await?;
    Ok(message("Person bookmarked"))
}

pub async fn remove_planet(
    State(state): State<AppState>,
    PathIds((planet_id, user_id)): PathIds<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let planet = CatalogService::remove_favorite_planet(state.catalog.as_ref(), planet_id, user_id).await?;
    Ok(message(format!("Planet {} removed from watch list", planet.name)))
}

pub async fn remove_person(
    State(state): State<AppState>,
    PathIds((people_id, user_id)): PathIds<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let person = CatalogService::remove_favorite_person(state.catalog.as_ref(), people_id, user_id).await?;
    Ok(message(format!("Person {} removed from watch list", person.name)))
}
