//! Postgres access for the boundary schema.

pub mod areas;
pub mod polygons;
pub mod refs;

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Connect to the boundary database and bring its schema up to date.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .context("Failed to connect to the boundary database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Connected to the boundary database");
    Ok(pool)
}

/// Spins up a throwaway database so each test run starts from an empty
/// schema. Needs a reachable Postgres in DATABASE_URL.
#[cfg(test)]
pub(crate) async fn test_pool() -> PgPool {
    use sqlx::postgres::PgConnectOptions;
    use sqlx::{ConnectOptions, Executor};
    use std::str::FromStr;

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for db tests");
    let options = PgConnectOptions::from_str(&url).expect("DATABASE_URL is not a Postgres URL");

    let db_name = format!(
        "bornes_test_{}",
        chrono::Utc::now().timestamp_micros()
    );
    let mut connection = options
        .clone()
        .connect()
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{db_name}";"#).as_str())
        .await
        .expect("Failed to create test database");

    let pool = PgPool::connect_with(options.database(&db_name))
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to migrate test database");
    pool
}

/// Inserts the generation and reference rows an import is scoped by.
#[cfg(test)]
pub(crate) async fn seed_refs(pool: &PgPool) -> (crate::import::ImportRefs, i32) {
    use sqlx::Row;

    let generation_id: i32 = sqlx::query(
        "INSERT INTO generations (active, description) VALUES (TRUE, 'test') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("Failed to insert generation")
    .get("id");

    let country_id: i32 =
        sqlx::query("INSERT INTO countries (code, name) VALUES ('FR', 'France') RETURNING id")
            .fetch_one(pool)
            .await
            .expect("Failed to insert country")
            .get("id");

    let area_type = refs::get_or_create_area_type(pool, "FRCIR", "test type")
        .await
        .unwrap();
    let code_type = refs::get_or_create_code_type(pool, "ref-cir", "test code type")
        .await
        .unwrap();

    (
        crate::import::ImportRefs {
            country_id,
            area_type_id: area_type.id,
            code_type_id: code_type.id,
        },
        generation_id,
    )
}
