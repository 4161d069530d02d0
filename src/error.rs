//! Error types and the serializable error payload.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Everything that can go wrong while extracting or normalizing tokens.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The image file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image exists but could not be opened or decoded.
    #[error("Cannot open image: {source}")]
    ImageDecode {
        #[source]
        source: image::ImageError,
    },

    /// Nothing left to cluster after dropping pure black and white.
    #[error("No usable pixels: the image only contains pure black or pure white")]
    EmptySamples,

    /// Fewer samples than requested clusters.
    #[error("Only {found} pixels available for {requested} colors")]
    InsufficientSamples { found: usize, requested: usize },

    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    #[error("Invalid color: {value:?}")]
    InvalidColor { value: String },

    /// No chromatic cluster to build a primary scale from.
    #[error("No chromatic colors found")]
    NoChromaticColors,

    /// The clustering routine produced no usable solution.
    #[error("Clustering failed: {message}")]
    Clustering { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TokenError {
    pub fn invalid_parameter(parameter: impl Into<String>,
                             value: impl ToString) -> Self {
        Self::InvalidParameter { parameter: parameter.into(),
                                 value: value.to_string() }
    }

    /// Whether the error comes from the caller's input (as opposed to
    /// an internal failure).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TokenError::Clustering { .. })
    }

    /// How the caller may fix the problem, if anything obvious applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        use TokenError::*;
        match self {
            FileNotFound { .. } => Some("Check the file path is correct"),
            Io { .. } => {
                Some("Ensure the path is a readable UTF-8 file, not a directory")
            }
            ImageDecode { .. } => {
                Some("Ensure file is a valid image format (PNG, JPG, etc.)")
            }
            EmptySamples => {
                Some("Use an image with colored content, not only a black or white background")
            }
            InsufficientSamples { .. } => {
                Some("Request fewer colors or raise the sample fraction")
            }
            InvalidParameter { .. } => {
                Some("Colors must be at least 1 and the sample fraction in (0, 1]")
            }
            InvalidColor { .. } => {
                Some("Use hexadecimal (#rrggbb) or rgb(r, g, b) notation")
            }
            NoChromaticColors => {
                Some("Provide at least one non-gray color or rely on the default palette")
            }
            Clustering { .. } => {
                Some("Retry with fewer colors or a lower sample fraction")
            }
            Config(_) => Some("Check the configuration file and DESIGN_TOKENS_* variables"),
            Json(_) => Some("Ensure the input is a JSON object"),
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload { error: self.to_string(),
                       suggestion: self.suggestion().map(String::from) }
    }
}

/// `{error, suggestion}` as printed by the tools on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&TokenError> for ErrorPayload {
    fn from(e: &TokenError) -> Self { e.to_payload() }
}

/// Either a result or an error payload, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response<T> {
    Err(ErrorPayload),
    Ok(T),
}

impl<T> Response<T> {
    pub fn is_ok(&self) -> bool { matches!(self, Response::Ok(_)) }
}

impl<T> From<Result<T>> for Response<T> {
    fn from(r: Result<T>) -> Self {
        match r {
            Ok(v) => Response::Ok(v),
            Err(e) => Response::Err(e.to_payload()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_has_error_and_suggestion() {
        let e = TokenError::FileNotFound { path: "missing.png".into() };
        let json = serde_json::to_value(e.to_payload()).unwrap();
        assert_eq!(json["error"], "File not found: missing.png");
        assert_eq!(json["suggestion"], "Check the file path is correct");
    }

    #[test]
    fn response_is_exclusive() {
        let ok: Response<u32> = Ok(3).into();
        assert_eq!(serde_json::to_string(&ok).unwrap(), "3");
        let err: Response<u32> = Err(TokenError::EmptySamples).into();
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("error").is_some());
        assert!(!err.is_ok());
    }

    #[test]
    fn recoverable() {
        assert!(TokenError::EmptySamples.is_recoverable());
        assert!(!TokenError::Clustering { message: "nan".into() }
                .is_recoverable());
    }
}
