use thiserror::Error;

/// Failures of a single request against the cocktail API.
///
/// The set is closed: every transport, status or JSON problem collapses into
/// one of these, and none of them is fatal. The `Display` text is what a
/// front end shows next to its retry action.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiError {
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Invalid Data Received")]
    InvalidData,

    #[error("Decoding Error from Data")]
    DecodingError,
}

#[derive(Error, Debug)]
pub enum ShakeItError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl From<std::io::Error> for ShakeItError {
    fn from(error: std::io::Error) -> Self {
        ShakeItError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for ShakeItError {
    fn from(error: reqwest::Error) -> Self {
        ShakeItError::Reqwest(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_errors_convert() {
        let error = reqwest::Client::new().get("not a url").build().unwrap_err();
        let error: ShakeItError = error.into();
        assert!(matches!(error, ShakeItError::Reqwest(_)));
        assert!(error.to_string().starts_with("Reqwest error:"));
    }

    #[test]
    fn test_api_error_messages() {
        assert_eq!(ApiError::InvalidUrl.to_string(), "Invalid URL");
        assert_eq!(ApiError::InvalidData.to_string(), "Invalid Data Received");
        let error: ShakeItError = ApiError::DecodingError.into();
        assert_eq!(error.to_string(), "API error: Decoding Error from Data");
    }
}
