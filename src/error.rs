use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("source dataset unavailable: {0}")]
    SourceUnavailable(String),

    #[error("schema mismatch in stage `{stage}`: {detail}")]
    SchemaMismatch { stage: &'static str, detail: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Fatal schema error tagged with the stage that detected it.
    pub fn schema(stage: &'static str, detail: impl Into<String>) -> Self {
        PipelineError::SchemaMismatch {
            stage,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
