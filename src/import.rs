//! The shared import pipeline: group features by the area they belong to,
//! union each group's polygons, and upsert one area per group inside a
//! single transaction.

use geo::BooleanOps;
use geo_types::MultiPolygon;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use indicatif::{ProgressBar, ProgressStyle};
use sqlx::PgPool;
use tracing::info;

use crate::db;
use crate::sources::BoundaryFeature;

/// What a group of features becomes in the database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AreaSpec {
    /// Code value stored against the importer's code type.
    pub code: String,
    /// Human-readable area name.
    pub name: String,
}

/// Resolved ids of the reference rows every import is scoped by.
#[derive(Debug, Clone, Copy)]
pub struct ImportRefs {
    pub country_id: i32,
    pub area_type_id: i32,
    pub code_type_id: i32,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
}

/// Group features by the area they belong to, preserving first-seen order.
///
/// Polygons are unioned into the group's boundary as they arrive, so every
/// returned group carries a non-empty boundary.
pub fn group_features<F>(
    features: Vec<BoundaryFeature>,
    mut key_fn: F,
) -> anyhow::Result<Vec<(AreaSpec, MultiPolygon<f64>)>>
where
    F: FnMut(&BoundaryFeature) -> anyhow::Result<AreaSpec>,
{
    let mut order = Vec::new();
    let mut boundaries: HashMap<AreaSpec, MultiPolygon<f64>> = HashMap::new();
    for feature in features {
        let spec = key_fn(&feature)?;
        match boundaries.entry(spec) {
            Entry::Occupied(mut entry) => {
                let merged = entry.get().union(&feature.geometry);
                entry.insert(merged);
            }
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(feature.geometry);
            }
        }
    }

    Ok(order
        .into_iter()
        .filter_map(|spec| {
            let boundary = boundaries.remove(&spec)?;
            Some((spec, boundary))
        })
        .collect())
}

/// Run the upsert loop for every group inside one transaction.
///
/// Without `commit` the transaction is rolled back at the end, leaving the
/// database untouched.
pub async fn run_import(
    pool: &PgPool,
    refs: ImportRefs,
    generation_id: i32,
    groups: Vec<(AreaSpec, MultiPolygon<f64>)>,
    commit: bool,
) -> anyhow::Result<ImportSummary> {
    let mut tx = pool.begin().await?;
    let mut summary = ImportSummary::default();

    let pb = ProgressBar::new(groups.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    for (spec, boundary) in groups {
        let (area, created) = db::areas::get_or_create(&mut tx, refs, generation_id, &spec).await?;
        if created {
            db::areas::attach_code(&mut tx, area.id, refs.code_type_id, &spec.code).await?;
            summary.created += 1;
        } else {
            summary.updated += 1;
        }
        db::polygons::save_polygons(&mut tx, area.id, &boundary).await?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    if commit {
        tx.commit().await?;
        info!(
            "Committed {} new and {} updated areas",
            summary.created, summary.updated
        );
    } else {
        tx.rollback().await?;
        info!(
            "Dry run: would create {} and update {} areas (pass --commit to apply)",
            summary.created, summary.updated
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;
    use geo_types::polygon;
    use hashbrown::HashMap;
    use sqlx::Row;

    fn square(x0: f64, y0: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + 1.0, y: y0),
            (x: x0 + 1.0, y: y0 + 1.0),
            (x: x0, y: y0 + 1.0),
            (x: x0, y: y0),
        ]])
    }

    fn feature(index: usize, key: &str, value: &str, geometry: MultiPolygon<f64>) -> BoundaryFeature {
        let mut attributes = HashMap::new();
        attributes.insert(key.to_string(), value.to_string());
        BoundaryFeature {
            index,
            attributes,
            geometry,
        }
    }

    fn by_ref(feature: &BoundaryFeature) -> anyhow::Result<AreaSpec> {
        let reference = feature.attribute("REF")?;
        Ok(AreaSpec {
            code: reference.to_string(),
            name: reference.to_string(),
        })
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let features = vec![
            feature(0, "REF", "75-2", square(0.0, 0.0)),
            feature(1, "REF", "75-1", square(5.0, 0.0)),
            feature(2, "REF", "75-2", square(9.0, 0.0)),
        ];
        let groups = group_features(features, by_ref).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0.code, "75-2");
        assert_eq!(groups[0].1 .0.len(), 2);
        assert_eq!(groups[1].0.code, "75-1");
        assert_eq!(groups[1].1 .0.len(), 1);
    }

    #[test]
    fn adjacent_polygons_in_a_group_merge_into_one() {
        let features = vec![
            feature(0, "REF", "75-1", square(0.0, 0.0)),
            feature(1, "REF", "75-1", square(1.0, 0.0)),
        ];
        let groups = group_features(features, by_ref).unwrap();

        assert_eq!(groups.len(), 1);
        let boundary = &groups[0].1;
        assert_eq!(boundary.0.len(), 1);
        assert!((boundary.unsigned_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn key_errors_abort_grouping() {
        let features = vec![
            feature(0, "REF", "75-1", square(0.0, 0.0)),
            feature(1, "other", "x", square(3.0, 0.0)),
        ];
        let err = group_features(features, by_ref).unwrap_err();
        assert!(err.to_string().contains("feature 1"));
    }

    async fn count(pool: &sqlx::PgPool, table: &str) -> i64 {
        sqlx::query(&format!("SELECT COUNT(*) AS n FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
            .get("n")
    }

    #[tokio::test]
    #[ignore = "needs a local Postgres in DATABASE_URL"]
    async fn dry_run_rolls_back_every_row() {
        let pool = db::test_pool().await;
        let (refs, generation_id) = db::seed_refs(&pool).await;
        let groups = vec![(
            AreaSpec {
                code: "75-1".to_string(),
                name: "75-1".to_string(),
            },
            square(0.0, 0.0),
        )];

        let summary = run_import(&pool, refs, generation_id, groups, false)
            .await
            .unwrap();
        assert_eq!(summary.created, 1);

        assert_eq!(count(&pool, "areas").await, 0);
        assert_eq!(count(&pool, "codes").await, 0);
        assert_eq!(count(&pool, "geometries").await, 0);
    }

    #[tokio::test]
    #[ignore = "needs a local Postgres in DATABASE_URL"]
    async fn commit_persists_the_imported_area() {
        let pool = db::test_pool().await;
        let (refs, generation_id) = db::seed_refs(&pool).await;
        let groups = vec![(
            AreaSpec {
                code: "75-1".to_string(),
                name: "75-1".to_string(),
            },
            square(0.0, 0.0),
        )];

        let summary = run_import(&pool, refs, generation_id, groups.clone(), true)
            .await
            .unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(count(&pool, "areas").await, 1);
        assert_eq!(count(&pool, "codes").await, 1);
        assert_eq!(count(&pool, "geometries").await, 1);

        // A second committed run updates the same area instead of adding one.
        let summary = run_import(&pool, refs, generation_id, groups, true)
            .await
            .unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(count(&pool, "areas").await, 1);
        assert_eq!(count(&pool, "codes").await, 1);
    }
}
