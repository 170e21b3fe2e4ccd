//! `/user` handlers: list, register, favorites lookup.

use crate::error::AppError;
use crate::extractors::{JsonObject, PathIds};
use crate::response::{created, success};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.catalog.list_users().await?;
    Ok(success("Obtained Users!", users))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let user = CatalogService::create_user(state.catalog.as_ref(), &body).await?;
    Ok(created("User created", user))
}

pub async fn favorites(
    State(state): State<AppState>,
    PathIds(user_id): PathIds<i32>,
) -> Result<impl IntoResponse, AppError> {
    let favorites = CatalogService::favorites(state.catalog.as_ref(), user_id).await?;
    Ok(success("ok", favorites))
}
