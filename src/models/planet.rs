use super::People;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Eq, FromRow, Serialize)]
pub struct Planet {
    pub id: i32,
    pub name: String,
    pub population: i64,
    pub diameter: i64,
    pub climated: String,
    pub terrain: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPlanet {
    pub name: String,
    pub population: i64,
    pub diameter: i64,
    pub climated: String,
    pub terrain: String,
}

/// A planet together with the characters whose home planet it is.
#[derive(Clone, Debug, Serialize)]
pub struct PlanetDetail {
    #[serde(flatten)]
    pub planet: Planet,
    pub inhabitants: Vec<People>,
}
