//! Character handlers.

use crate::error::AppError;
use crate::extractors::{JsonObject, PathIds};
use crate::response::{created, success};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let people = state.catalog.list_people().await?;
    Ok(success("Characters obtained", people))
}

pub async fn read(
    State(state): State<AppState>,
    PathIds(id): PathIds<i32>,
) -> Result<impl IntoResponse, AppError> {
    let person = state
        .catalog
        .person(id)
        .await?
        .ok_or(AppError::CharacterNotFound)?;
    Ok(success("Character obtained", person))
}

pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let person = CatalogService::create_person(state.catalog.as_ref(), &body).await?;
    Ok(created("Person created", person))
}
