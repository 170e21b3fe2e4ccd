//! Catalog routes.

use crate::handlers::{favorites, people, planets, users};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/user", get(users::list).post(users::create))
        .route("/user/:id/favorites", get(users::favorites))
        .route("/peoples", get(people::list))
        .route("/peoples/:id", get(people::read))
        .route("/people", post(people::create))
        .route("/planets", get(planets::list))
        .route("/planets/:id", get(planets::read))
        .route("/planet", post(planets::create))
        .route(
            "/favorite/planet/:planet_id/:user_id",
            post(favorites::add_planet).delete(favorites::remove_planet),
        )
        .route(
            "/favorite/person/:people_id/:user_id",
            post(favorites::add_person).delete(favorites::remove_person),
        )
        .with_state(state)
}
