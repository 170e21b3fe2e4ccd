//! Typed errors and HTTP mapping.

use crate::response::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

/// Entity named in lookups that failed and in favorite messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    User,
    Planet,
    Person,
}

impl Kind {
    /// Lower-case noun used inside sentences ("The planet ...").
    pub fn noun(self) -> &'static str {
        match self {
            Kind::User => "user",
            Kind::Planet => "planet",
            Kind::Person => "person",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::User => "User",
            Kind::Planet => "Planet",
            Kind::Person => "Person",
        })
    }
}

/// Every failure a request can end in. The `Display` text is the `msg` sent to the client,
/// except for `Config` and `Db` which are logged and answered with a generic message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Fields cannot be empty.")]
    MissingBody,
    #[error("The {0} field is required.")]
    MissingField(&'static str),
    #[error("The {field} field must be {expected}.")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("This {0} is taken; please choose another.")]
    DuplicateValue(&'static str),
    #[error("{0} Not Found")]
    NotFound(Kind),
    #[error("Character not found.")]
    CharacterNotFound,
    #[error("Planet not found.")]
    PlanetNotFound,
    #[error("You don't have favorite items")]
    NoFavorites,
    #[error("The {} {name} is already added to favorites", .kind.noun())]
    AlreadyFavorite { kind: Kind, name: String },
    #[error("The {} is not in favorites", .0.noun())]
    NotInFavorites(Kind),
    #[error("Not Found")]
    RouteNotFound,
    #[error("Request body is too large.")]
    PayloadTooLarge,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingBody
            | AppError::MissingField(_)
            | AppError::InvalidField { .. }
            | AppError::DuplicateValue(_)
            | AppError::AlreadyFavorite { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_)
            | AppError::CharacterNotFound
            | AppError::PlanetNotFound
            | AppError::NoFavorites
            | AppError::NotInFavorites(_)
            | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(Envelope::<()>::message(msg))).into_response()
    }
}
