//! Boundary persistence.

use anyhow::Result;
use geo_types::MultiPolygon;
use sqlx::{Postgres, Transaction};
use wkt::ToWkt;

/// Replace whatever polygons an area currently has with the given
/// boundary. Each member polygon becomes one geometry row, stored as WKT.
pub async fn save_polygons(
    tx: &mut Transaction<'_, Postgres>,
    area_id: i32,
    boundary: &MultiPolygon<f64>,
) -> Result<()> {
    sqlx::query("DELETE FROM geometries WHERE area_id = $1")
        .bind(area_id)
        .execute(&mut **tx)
        .await?;

    for polygon in &boundary.0 {
        sqlx::query("INSERT INTO geometries (area_id, polygon) VALUES ($1, $2)")
            .bind(area_id)
            .bind(polygon.wkt_string())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
