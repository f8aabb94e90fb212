//! Feature readers for the supported boundary formats.

pub mod geojson;
pub mod shapefile;

use geo_types::MultiPolygon;
use hashbrown::HashMap;

use crate::error::ImportError;

/// A single input feature: its attribute table and its areal geometry.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    /// Position in the source file, for error messages.
    pub index: usize,
    pub attributes: HashMap<String, String>,
    pub geometry: MultiPolygon<f64>,
}

impl BoundaryFeature {
    /// Look up a required attribute by field name.
    pub fn attribute(&self, name: &'static str) -> Result<&str, ImportError> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .ok_or(ImportError::MissingAttribute {
                index: self.index,
                name,
            })
    }
}
