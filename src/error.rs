use thiserror::Error;

/// Errors raised while turning input features into database rows.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("feature {index} has no `{name}` attribute")]
    MissingAttribute { index: usize, name: &'static str },

    #[error("feature {index} has unsupported geometry type `{kind}`")]
    UnsupportedGeometry { index: usize, kind: String },

    #[error("department `{0}` is not in the European constituency table")]
    UnknownDepartment(String),

    #[error("input contains no features")]
    EmptyInput,

    #[error("generation {0} does not exist")]
    UnknownGeneration(i32),

    #[error("no {kind} row with code `{code}`; create it before importing")]
    MissingReference { kind: &'static str, code: &'static str },
}
