//! Planet handlers.

use crate::error::AppError;
use crate::extractors::{JsonObject, PathIds};
use crate::response::{created, success};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let planets = state.catalog.list_planets().await?;
    Ok(success("Planets obtained", planets))
}

/// One planet with its `inhabitants`.
pub async fn read(
    State(state): State<AppState>,
    PathIds(id): PathIds<i32>,
) -> Result<impl IntoResponse, AppError> {
    let detail = CatalogService::planet_detail(state.catalog.as_ref(), id).await?;
    Ok(success("Planet obtained", detail))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let planet = CatalogService::create_planet(state.catalog.as_ref(), &body).await?;
    Ok(created("Planet created", planet))
}
