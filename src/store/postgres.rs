//! Catalog queries against PostgreSQL. Every write runs in its own transaction.

use super::Catalog;
use crate::error::AppError;
use crate::models::{NewPeople, NewPlanet, NewUser, People, Planet, User};
use async_trait::async_trait;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, name, email, password, is_active";
const PLANET_COLUMNS: &str = "id, name, population, diameter, climated, terrain";
const PEOPLE_COLUMNS: &str = "id, name, specie, gender, height, weight, age, planet_id";

#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        PgCatalog { pool }
    }
}

/// Turn a unique violation into the same error the pre-insert check would have produced.
fn unique_as_duplicate(field: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateValue(field),
        _ => AppError::Db(e),
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn user(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_user(&self, new: &NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (name, email, password, is_active) VALUES ($1, $2, $3, TRUE) RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.password)
            .fetch_one(&mut *tx)
            .await
            .map_err(unique_as_duplicate("email"))?;
        tx.commit().await?;
        Ok(user)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        let sql = format!("SELECT {} FROM planets ORDER BY id", PLANET_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Planet>(&sql).fetch_all(&self.pool).await?)
    }

    async fn planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
        let sql = format!("SELECT {} FROM planets WHERE id = $1", PLANET_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Planet>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn planet_by_name(&self, name: &str) -> Result<Option<Planet>, AppError> {
        let sql = format!("SELECT {} FROM planets WHERE name = $1", PLANET_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Planet>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_planet(&self, new: &NewPlanet) -> Result<Planet, AppError> {
        let sql = format!(
            "INSERT INTO planets (name, population, diameter, climated, terrain) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            PLANET_COLUMNS
        );
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let planet = sqlx::query_as::<_, Planet>(&sql)
            .bind(&new.name)
            .bind(new.population)
            .bind(new.diameter)
            .bind(&new.climated)
            .bind(&new.terrain)
            .fetch_one(&mut *tx)
            .await
            .map_err(unique_as_duplicate("name"))?;
        tx.commit().await?;
        Ok(planet)
    }

    async fn list_people(&self) -> Result<Vec<People>, AppError> {
        let sql = format!("SELECT {} FROM peoples ORDER BY id", PEOPLE_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, People>(&sql).fetch_all(&self.pool).await?)
    }

    async fn person(&self, id: i32) -> Result<Option<People>, AppError> {
        let sql = format!("SELECT {} FROM peoples WHERE id = $1", PEOPLE_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, People>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn person_by_name(&self, name: &str) -> Result<Option<People>, AppError> {
        let sql = format!("SELECT {} FROM peoples WHERE name = $1", PEOPLE_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, People>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn people_by_planet(&self, planet_id: i32) -> Result<Vec<People>, AppError> {
        let sql = format!(
            "SELECT {} FROM peoples WHERE planet_id = $1 ORDER BY id",
            PEOPLE_COLUMNS
        );
        tracing::debug!(sql = %sql, planet_id, "query");
        Ok(sqlx::query_as::<_, People>(&sql)
            .bind(planet_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn insert_person(&self, new: &NewPeople) -> Result<People, AppError> {
        let sql = format!(
            "INSERT INTO peoples (name, specie, gender, height, weight, age, planet_id) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            PEOPLE_COLUMNS
        );
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let person = sqlx::query_as::<_, People>(&sql)
            .bind(&new.name)
            .bind(&new.specie)
            .bind(&new.gender)
            .bind(new.height)
            .bind(new.weight)
            .bind(new.age)
            .bind(new.planet_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(unique_as_duplicate("name"))?;
        tx.commit().await?;
        Ok(person)
    }

    async fn favorite_planets_of(&self, user_id: i32) -> Result<Vec<Planet>, AppError> {
        let sql = "SELECT p.id, p.name, p.population, p.diameter, p.climated, p.terrain \
                   FROM favorite_planets f JOIN planets p ON p.id = f.planet_id \
                   WHERE f.user_id = $1 ORDER BY f.id";
        tracing::debug!(sql = %sql, user_id, "query");
        Ok(sqlx::query_as::<_, Planet>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn favorite_persons_of(&self, user_id: i32) -> Result<Vec<People>, AppError> {
        let sql = "SELECT p.id, p.name, p.specie, p.gender, p.height, p.weight, p.age, p.planet_id \
                   FROM favorite_persons f JOIN peoples p ON p.id = f.people_id \
                   WHERE f.user_id = $1 ORDER BY f.id";
        tracing::debug!(sql = %sql, user_id, "query");
        Ok(sqlx::query_as::<_, People>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn has_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError> {
        let found: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM favorite_planets WHERE user_id = $1 AND planet_id = $2)",
        )
        .bind(user_id)
        .bind(planet_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found.0)
    }

    async fn has_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError> {
        let found: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM favorite_persons WHERE user_id = $1 AND people_id = $2)",
        )
        .bind(user_id)
        .bind(people_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found.0)
    }

    async fn add_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let done = sqlx::query(
            "INSERT INTO favorite_planets (user_id, planet_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, planet_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(planet_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(done.rows_affected() == 1)
    }

    async fn add_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let done = sqlx::query(
            "INSERT INTO favorite_persons (user_id, people_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, people_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(people_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(done.rows_affected() == 1)
    }

    async fn remove_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let done = sqlx::query("DELETE FROM favorite_planets WHERE user_id = $1 AND planet_id = $2")
            .bind(user_id)
            .bind(planet_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(done.rows_affected() > 0)
    }

    async fn remove_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let done = sqlx::query("DELETE FROM favorite_persons WHERE user_id = $1 AND people_id = $2")
            .bind(user_id)
            .bind(people_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(done.rows_affected() > 0)
    }
}
