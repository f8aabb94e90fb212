//! Lookups for the fixed reference rows (country, area type, code type,
//! generation) an import is scoped by.

use anyhow::Result;
use sqlx::PgPool;

use crate::error::ImportError;
use crate::models::{AreaType, CodeType, Country, Generation};

/// Fetch the generation the import targets, failing if it does not exist.
pub async fn generation(pool: &PgPool, id: i32) -> Result<Generation> {
    sqlx::query_as::<_, Generation>(
        "SELECT id, active, created, description FROM generations WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ImportError::UnknownGeneration(id).into())
}

pub async fn country(pool: &PgPool, code: &'static str) -> Result<Country> {
    sqlx::query_as::<_, Country>("SELECT id, code, name FROM countries WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            ImportError::MissingReference {
                kind: "country",
                code,
            }
            .into()
        })
}

pub async fn area_type(pool: &PgPool, code: &'static str) -> Result<AreaType> {
    sqlx::query_as::<_, AreaType>("SELECT id, code, description FROM area_types WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            ImportError::MissingReference {
                kind: "area type",
                code,
            }
            .into()
        })
}

pub async fn code_type(pool: &PgPool, code: &'static str) -> Result<CodeType> {
    sqlx::query_as::<_, CodeType>("SELECT id, code, description FROM code_types WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            ImportError::MissingReference {
                kind: "code type",
                code,
            }
            .into()
        })
}

/// Create the area type on first use; the description only applies then.
pub async fn get_or_create_area_type(
    pool: &PgPool,
    code: &str,
    description: &str,
) -> Result<AreaType> {
    sqlx::query(
        "INSERT INTO area_types (code, description) VALUES ($1, $2)
         ON CONFLICT (code) DO NOTHING",
    )
    .bind(code)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(sqlx::query_as::<_, AreaType>(
        "SELECT id, code, description FROM area_types WHERE code = $1",
    )
    .bind(code)
    .fetch_one(pool)
    .await?)
}

/// Create the code type on first use; the description only applies then.
pub async fn get_or_create_code_type(
    pool: &PgPool,
    code: &str,
    description: &str,
) -> Result<CodeType> {
    sqlx::query(
        "INSERT INTO code_types (code, description) VALUES ($1, $2)
         ON CONFLICT (code) DO NOTHING",
    )
    .bind(code)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(sqlx::query_as::<_, CodeType>(
        "SELECT id, code, description FROM code_types WHERE code = $1",
    )
    .bind(code)
    .fetch_one(pool)
    .await?)
}
