//! HTTP handlers for users, planets, characters and favorites.

pub mod favorites;
pub mod people;
pub mod planets;
pub mod users;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}
