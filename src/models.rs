//! Rows of the boundary schema the importers read and write.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A dataset generation. Areas are valid for a contiguous range of these.
#[derive(Debug, Clone, FromRow)]
pub struct Generation {
    pub id: i32,
    pub active: bool,
    pub created: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Country {
    pub id: i32,
    pub code: String,
    pub name: String,
}

/// A kind of area, e.g. `FRCIR` for circonscriptions législatives.
#[derive(Debug, Clone, FromRow)]
pub struct AreaType {
    pub id: i32,
    pub code: String,
    pub description: String,
}

/// A kind of code, e.g. `ref-cir` for official constituency references.
#[derive(Debug, Clone, FromRow)]
pub struct CodeType {
    pub id: i32,
    pub code: String,
    pub description: String,
}

/// A named boundary, scoped to a country, a type, and a generation range.
#[derive(Debug, Clone, FromRow)]
pub struct Area {
    pub id: i32,
    pub name: String,
    pub country_id: i32,
    pub type_id: i32,
    pub generation_low_id: i32,
    pub generation_high_id: i32,
}
