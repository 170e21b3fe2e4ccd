use serde::Serialize;
use sqlx::FromRow;

/// A character. `planet_id` is the optional home planet.
#[derive(Clone, Debug, PartialEq, Eq, FromRow, Serialize)]
pub struct People {
    pub id: i32,
    pub name: String,
    pub specie: String,
    pub gender: String,
    pub height: i64,
    pub weight: i64,
    pub age: i64,
    pub planet_id: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPeople {
    pub name: String,
    pub specie: String,
    pub gender: String,
    pub height: i64,
    pub weight: i64,
    pub age: i64,
    pub planet_id: Option<i32>,
}
