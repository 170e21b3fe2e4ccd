//! Path parameters that must parse, or the route does not exist.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Typed path captures. Segments that are not valid UTF-8, or do not deserialize into `T`
/// (non-numeric or out-of-range ids), are answered with [`AppError::RouteNotFound`].
pub struct PathIds<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathIds<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathIds(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "path did not match");
                Err(AppError::RouteNotFound)
            }
        }
    }
}
