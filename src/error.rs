//! Error types for mapscope

use thiserror::Error;

/// Errors that can occur while extracting features from a beatmap
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{map}: malformed {section} line `{line}`: {message}")]
    Parse {
        map: String,
        section: String,
        line: String,
        message: String,
    },

    #[error("{map}: bad difficulty value for {key}: `{value}`")]
    BadDifficultyValue {
        map: String,
        key: String,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    /// Identifier of the map this error is scoped to, if any.
    pub fn map_id(&self) -> Option<&str> {
        match self {
            ExtractError::Parse { map, .. } => Some(map),
            ExtractError::BadDifficultyValue { map, .. } => Some(map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_map_and_line() {
        let err = ExtractError::Parse {
            map: "12345_0.osu".to_string(),
            section: "HitObjects".to_string(),
            line: "64,abc,100,1".to_string(),
            message: "invalid digit found in string".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("12345_0.osu"));
        assert!(rendered.contains("64,abc,100,1"));
        assert_eq!(err.map_id(), Some("12345_0.osu"));
    }

    #[test]
    fn test_io_error_has_no_map_scope() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ExtractError::Io(io_err);
        assert!(err.map_id().is_none());
    }
}
