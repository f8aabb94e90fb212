//! Shapefile feature reading for the departments import.

use std::path::Path;

use anyhow::{Context, Result};
use hashbrown::HashMap;
use shapefile::dbase::FieldValue;
use shapefile::Shape;
use tracing::info;

use crate::error::ImportError;
use crate::sources::BoundaryFeature;

/// Read every shape and its attribute record from a shapefile.
pub fn read_features(path: &Path) -> Result<Vec<BoundaryFeature>> {
    let mut reader = shapefile::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut features = Vec::new();
    for (index, pair) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) =
            pair.with_context(|| format!("Failed to read shape {index}"))?;

        let geometry = match shape {
            Shape::Polygon(polygon) => geo_types::MultiPolygon::<f64>::try_from(polygon)
                .with_context(|| format!("shape {index} has a malformed polygon"))?,
            other => {
                return Err(ImportError::UnsupportedGeometry {
                    index,
                    kind: format!("{:?}", other.shapetype()),
                }
                .into())
            }
        };

        let mut attributes = HashMap::new();
        for (name, value) in record.into_iter() {
            if let Some(text) = field_to_string(value) {
                attributes.insert(name, text);
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

    info!("Read {} shapes from {}", features.len(), path.display());
    Ok(features)
}

/// Character fields arrive padded with trailing spaces; numeric fields may
/// hold integral codes. Everything else has no use as a grouping key.
fn field_to_string(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Character(text) => text.map(|t| t.trim().to_string()),
        FieldValue::Numeric(number) => number.map(|n| n.to_string()),
        FieldValue::Integer(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefile::dbase::TableWriterBuilder;
    use shapefile::{Point, PolygonRing, Writer};

    fn department_shape(offset: f64) -> shapefile::Polygon {
        // Outer rings are clockwise in shapefiles.
        shapefile::Polygon::new(PolygonRing::Outer(vec![
            Point::new(offset, 0.0),
            Point::new(offset, 1.0),
            Point::new(offset + 1.0, 1.0),
            Point::new(offset + 1.0, 0.0),
            Point::new(offset, 0.0),
        ]))
    }

    fn record(code: &str) -> shapefile::dbase::Record {
        let mut record = shapefile::dbase::Record::default();
        record.insert(
            "code_insee".to_string(),
            FieldValue::Character(Some(code.to_string())),
        );
        record
    }

    #[test]
    fn round_trips_shapes_and_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("departements.shp");

        let table = TableWriterBuilder::new()
            .add_character_field("code_insee".try_into().unwrap(), 10);
        let mut writer = Writer::from_path(&path, table).unwrap();
        writer
            .write_shape_and_record(&department_shape(0.0), &record("2A"))
            .unwrap();
        writer
            .write_shape_and_record(&department_shape(5.0), &record("04"))
            .unwrap();
        drop(writer);

        let features = read_features(&path).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].attribute("code_insee").unwrap(), "2A");
        assert_eq!(features[0].geometry.0.len(), 1);
        // Padded codes survive until normalisation strips the zero.
        assert_eq!(features[1].attribute("code_insee").unwrap(), "04");
    }

    #[test]
    fn character_fields_are_trimmed() {
        let value = FieldValue::Character(Some("2A ".to_string()));
        assert_eq!(field_to_string(value), Some("2A".to_string()));
    }

    #[test]
    fn integral_numeric_fields_lose_their_fraction() {
        assert_eq!(
            field_to_string(FieldValue::Numeric(Some(31.0))),
            Some("31".to_string())
        );
        assert_eq!(field_to_string(FieldValue::Integer(971)), Some("971".to_string()));
    }

    #[test]
    fn empty_fields_are_skipped() {
        assert_eq!(field_to_string(FieldValue::Character(None)), None);
        assert_eq!(field_to_string(FieldValue::Numeric(None)), None);
    }
}
