//! Lenient JSON body: anything that is not a non-empty JSON object is treated as "no body".

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde_json::{Map, Value};

/// Non-empty JSON object from the request body. The `Content-Type` header is not required.
/// Missing, unparseable, non-object or empty bodies are rejected with [`AppError::MissingBody`];
/// bodies over the configured limit with [`AppError::PayloadTooLarge`].
#[derive(Clone, Debug)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::MissingBody
            }
        })?;
        parse_object(&bytes).map(JsonObject)
    }
}

fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(AppError::MissingBody),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_empty_objects_only() {
        assert!(parse_object(br#"{"name":"Hoth"}"#).is_ok());
        let bodies: [&[u8]; 6] = [b"", b"{}", b"[1,2]", b"null", b"not json", b"\"text\""];
        for body in bodies {
            assert!(matches!(parse_object(body), Err(AppError::MissingBody)));
        }
    }
}
