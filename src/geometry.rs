//! Geometry coercion for input features.

use geo_types::{Geometry, MultiPolygon};

use crate::error::ImportError;

/// Convert a feature geometry into a `MultiPolygon`, rejecting anything
/// that is not areal.
pub fn to_multi_polygon(
    index: usize,
    geometry: Geometry<f64>,
) -> Result<MultiPolygon<f64>, ImportError> {
    match geometry {
        Geometry::Polygon(polygon) => Ok(MultiPolygon(vec![polygon])),
        Geometry::MultiPolygon(multi) => Ok(multi),
        other => Err(ImportError::UnsupportedGeometry {
            index,
            kind: kind_name(&other).to_string(),
        }),
    }
}

fn kind_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
