#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog input: {0}")]
    InvalidInput(String),
    #[error("failed to read catalog file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Parse(serde_json::Error),
    #[error("duplicate condition id in {origin} catalog: {id}")]
    DuplicateConditionId { origin: &'static str, id: String },
    #[error("duplicate condition name in {origin} catalog: {name}")]
    DuplicateConditionName { origin: &'static str, name: String },
    #[error("duplicate symptom name: {name}")]
    DuplicateSymptomName { name: String },
    #[error("alias {alias:?} of symptom {symptom:?} shadows another symptom's canonical name")]
    AliasShadowsSymptom { symptom: String, alias: String },
    #[error("condition {id} has unrecognised urgency {value:?}")]
    UnknownUrgency { id: String, value: String },
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
