//! GeoJSON feature reading for the circonscriptions import.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geojson::GeoJson;
use hashbrown::HashMap;
use tracing::info;

use crate::error::ImportError;
use crate::geometry::to_multi_polygon;
use crate::sources::BoundaryFeature;

/// Read every feature of a GeoJSON file.
///
/// Property values may be JSON strings or numbers; both are kept as
/// strings so numeric reference codes compare like their string
/// counterparts.
pub fn read_features(path: &Path) -> Result<Vec<BoundaryFeature>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let geojson: GeoJson = raw
        .parse()
        .with_context(|| format!("Failed to parse {} as GeoJSON", path.display()))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(feature) => geojson::FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        },
        GeoJson::Geometry(_) => anyhow::bail!(
            "{} is a bare geometry, not a feature collection",
            path.display()
        ),
    };

    let mut features = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let geometry = feature
            .geometry
            .ok_or_else(|| anyhow::anyhow!("feature {index} has no geometry"))?;
        let geometry = geo_types::Geometry::<f64>::try_from(geometry.value)
            .with_context(|| format!("feature {index} has a malformed geometry"))?;
        let geometry = to_multi_polygon(index, geometry)?;

        let mut attributes = HashMap::new();
        if let Some(properties) = feature.properties {
            for (key, value) in properties {
                if let Some(text) = stringify(&value) {
                    attributes.insert(key, text);
                }
            }
        }

        features.push(BoundaryFeature {
            index,
            attributes,
            geometry,
        });
    }

    if features.is_empty() {
        return Err(ImportError::EmptyInput.into());
    }

    info!("Read {} features from {}", features.len(), path.display());
    Ok(features)
}

fn stringify(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
