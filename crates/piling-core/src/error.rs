use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PilingError {
    #[error("could not read file: {0}")]
    ParseError(String),

    #[error("unsupported LOK container: {0}. Please export the design as LandXML (.xml) and upload that instead.")]
    UnsupportedContainerFormat(String),

    #[error("unsupported design format '{extension}'. Please upload {accepted}")]
    UnsupportedFormat { extension: String, accepted: String },

    #[error("failed to load extraction profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid extraction profile: {0}")]
    ProfileInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PilingError {
    /// True for errors caused by the uploaded file's content rather than
    /// by configuration or the environment.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, PilingError::ParseError(_))
    }
}
