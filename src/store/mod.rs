//! Storage seam for the catalog: one trait, a PostgreSQL implementation and an in-memory one.
//!
//! Relationships (a planet's inhabitants, a user's favorites) are explicit queries by
//! foreign key. Uniqueness of emails, names and favorite pairs is enforced by the store
//! itself; inserts that would break it fail with [`AppError::DuplicateValue`] or, for
//! favorites, report `false`.

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;
pub use schema::{ensure_database_exists, ensure_schema};

use crate::error::AppError;
use crate::models::{NewPeople, NewPlanet, NewUser, People, Planet, User};
use async_trait::async_trait;

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Cheap round trip used by the readiness check.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn user(&self, id: i32) -> Result<Option<User>, AppError>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    /// Fails with `DuplicateValue("email")` when the email is already registered.
    async fn insert_user(&self, new: &NewUser) -> Result<User, AppError>;

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError>;
    async fn planet(&self, id: i32) -> Result<Option<Planet>, AppError>;
    async fn planet_by_name(&self, name: &str) -> Result<Option<Planet>, AppError>;
    /// Fails with `DuplicateValue("name")` when the name is taken.
    async fn insert_planet(&self, new: &NewPlanet) -> Result<Planet, AppError>;

    async fn list_people(&self) -> Result<Vec<People>, AppError>;
    async fn person(&self, id: i32) -> Result<Option<People>, AppError>;
    async fn person_by_name(&self, name: &str) -> Result<Option<People>, AppError>;
    /// Characters whose home planet is `planet_id`.
    async fn people_by_planet(&self, planet_id: i32) -> Result<Vec<People>, AppError>;
    /// Fails with `DuplicateValue("name")` when the name is taken.
    async fn insert_person(&self, new: &NewPeople) -> Result<People, AppError>;

    /// Planets bookmarked by `user_id`, in bookmark order.
    async fn favorite_planets_of(&self, user_id: i32) -> Result<Vec<Planet>, AppError>;
    /// Characters bookmarked by `user_id`, in bookmark order.
    async fn favorite_persons_of(&self, user_id: i32) -> Result<Vec<People>, AppError>;
    async fn has_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError>;
    async fn has_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError>;
    /// Returns `false` when the pair was already bookmarked.
    async fn add_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError>;
    /// Returns `false` when the pair was already bookmarked.
    async fn add_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError>;
    /// Returns `false` when there was nothing to remove.
    async fn remove_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError>;
    /// Returns `false` when there was nothing to remove.
    async fn remove_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError>;
}
