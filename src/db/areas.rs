//! Area upsert scoped by country, type, generation range, and code.

use anyhow::Result;
use sqlx::{Postgres, Transaction};

use crate::import::{AreaSpec, ImportRefs};
use crate::models::Area;

const FIND_SQL: &str = "\
SELECT a.id, a.name, a.country_id, a.type_id, a.generation_low_id, a.generation_high_id
FROM areas a
JOIN codes c ON c.area_id = a.id
WHERE a.country_id = $1
  AND a.type_id = $2
  AND a.generation_low_id <= $3
  AND a.generation_high_id >= $3
  AND c.type_id = $4
  AND c.code = $5";

/// Find the area matching the import scope, or create one spanning exactly
/// the supplied generation. Returns the area and whether it was created.
pub async fn get_or_create(
    tx: &mut Transaction<'_, Postgres>,
    refs: ImportRefs,
    generation_id: i32,
    spec: &AreaSpec,
) -> Result<(Area, bool)> {
    if let Some(area) = sqlx::query_as::<_, Area>(FIND_SQL)
        .bind(refs.country_id)
        .bind(refs.area_type_id)
        .bind(generation_id)
        .bind(refs.code_type_id)
        .bind(&spec.code)
        .fetch_optional(&mut **tx)
        .await?
    {
        return Ok((area, false));
    }

    let area = sqlx::query_as::<_, Area>(
        "INSERT INTO areas (name, country_id, type_id, generation_low_id, generation_high_id)
         VALUES ($1, $2, $3, $4, $4)
         RETURNING id, name, country_id, type_id, generation_low_id, generation_high_id",
    )
    .bind(&spec.name)
    .bind(refs.country_id)
    .bind(refs.area_type_id)
    .bind(generation_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok((area, true))
}

/// Attach the import's code to a newly created area, keyed on
/// (area, code type). An existing row of that type has its value replaced.
pub async fn attach_code(
    tx: &mut Transaction<'_, Postgres>,
    area_id: i32,
    code_type_id: i32,
    code: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO codes (area_id, type_id, code) VALUES ($1, $2, $3)
         ON CONFLICT (area_id, type_id) DO UPDATE SET code = EXCLUDED.code",
    )
    .bind(area_id)
    .bind(code_type_id)
    .bind(code)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
