use super::{People, Planet, User};
use serde::Serialize;

/// Join row: `user_id` bookmarked `planet_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FavoritePlanet {
    pub id: i32,
    pub user_id: i32,
    pub planet_id: i32,
}

/// Join row: `user_id` bookmarked `people_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FavoritePerson {
    pub id: i32,
    pub user_id: i32,
    pub people_id: i32,
}

/// Body of `GET /user/{id}/favorites`.
#[derive(Clone, Debug, Serialize)]
pub struct Favorites {
    pub user: User,
    pub favorite_planets: Vec<Planet>,
    pub favorite_persons: Vec<People>,
}
