//! Catalog table DDL and database bootstrap. Statements are idempotent and run at start-up.

use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// DDL in dependency order: base tables first, then tables holding foreign keys to them.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS planets (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        population BIGINT NOT NULL,
        diameter BIGINT NOT NULL,
        climated TEXT NOT NULL,
        terrain TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS peoples (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        specie TEXT NOT NULL,
        gender TEXT NOT NULL,
        height BIGINT NOT NULL,
        weight BIGINT NOT NULL,
        age BIGINT NOT NULL,
        planet_id INTEGER REFERENCES planets (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS peoples_planet_id_idx ON peoples (planet_id)",
    r#"
    CREATE TABLE IF NOT EXISTS favorite_planets (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users (id),
        planet_id INTEGER NOT NULL REFERENCES planets (id),
        UNIQUE (user_id, planet_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_persons (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users (id),
        people_id INTEGER NOT NULL REFERENCES peoples (id),
        UNIQUE (user_id, people_id)
    )
    "#,
];

/// Create the five catalog tables (and the inhabitants index) if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(statements = SCHEMA.len(), "catalog schema ensured");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Split a connection URL into (URL of the `postgres` maintenance database, target database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| ConfigError::DatabaseUrl("missing scheme".into()))?
        + 3;
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://app:pw@db:5432/catalog").unwrap();
        assert_eq!(admin, "postgres://app:pw@db:5432/postgres");
        assert_eq!(name, "catalog");
    }

    #[test]
    fn keeps_query_string_on_admin_url() {
        let (admin, name) =
            parse_db_name_from_url("postgresql://localhost/catalog?sslmode=disable").unwrap();
        assert_eq!(admin, "postgresql://localhost/postgres?sslmode=disable");
        assert_eq!(name, "catalog");
    }

    #[test]
    fn rejects_url_without_path() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
        assert!(parse_db_name_from_url("localhost/catalog").is_err());
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("star\"wars"), "\"star\"\"wars\"");
    }
}
