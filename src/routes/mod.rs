//! Routers and the assembled application service.

mod catalog;
mod common;

pub use catalog::catalog_routes;
pub use common::common_routes;

use crate::handlers::not_found;
use crate::state::AppState;
use crate::telemetry::RequestUuid;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::HeaderName,
    Router,
};
use tower::{Layer, ServiceBuilder};
use tower_http::{
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Default cap on request bodies, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Full application: catalog and common routes, JSON 404 fallback, request ids, tracing,
/// body limit, and trailing-slash normalization.
pub fn app(state: AppState, body_limit: usize) -> NormalizePath<Router> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(catalog_routes(state))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), RequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("");
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        path = %req.uri().path(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(DefaultBodyLimit::max(body_limit)),
        );
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
