//! Standard response envelope helpers: every body is `{msg, data?}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn message(msg: impl Into<String>) -> Self {
        Envelope {
            msg: msg.into(),
            data: None,
        }
    }
}

pub fn success<T: Serialize>(msg: impl Into<String>, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            msg: msg.into(),
            data: Some(data),
        }),
    )
}

pub fn created<T: Serialize>(msg: impl Into<String>, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::CREATED,
        Json(Envelope {
            msg: msg.into(),
            data: Some(data),
        }),
    )
}

/// 200 with a message and no `data` key.
pub fn message(msg: impl Into<String>) -> (StatusCode, Json<Envelope<()>>) {
    (StatusCode::OK, Json(Envelope::message(msg)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_only_envelope_omits_data() {
        let body = serde_json::to_value(Envelope::<()>::message("Planet bookmarked")).unwrap();
        assert_eq!(body, serde_json::json!({ "msg": "Planet bookmarked" }));
    }

    #[test]
    fn data_envelope() {
        let (status, Json(body)) = created("User created", serde_json::json!({ "id": 1 }));
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "msg": "User created", "data": { "id": 1 } })
        );
    }
}
