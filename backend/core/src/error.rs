use thiserror::Error;

/// Top-level error type for the Pagecast service.
#[derive(Debug, Error)]
pub enum PagecastError {
    /// The caller sent something unusable (missing file, blank text).
    #[error("{0}")]
    InvalidInput(String),

    #[error("Error extracting text: {0}")]
    Extraction(String),

    #[error("text formatting failed: {0}")]
    Formatting(String),

    #[error("No audio generated")]
    NoAudio,

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PagecastError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether the failure was caused by the caller rather than a collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_error_carries_cause() {
        let err = PagecastError::Extraction("quota exceeded".into());
        assert_eq!(err.to_string(), "Error extracting text: quota exceeded");
        assert!(!err.is_client_error());
    }

    #[test]
    fn invalid_input_is_client_error() {
        let err = PagecastError::invalid_input("No text provided");
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "No text provided");
    }

    #[test]
    fn anyhow_converts_to_other() {
        let err: PagecastError = anyhow::anyhow!("socket closed").into();
        assert_eq!(err.to_string(), "socket closed");
    }
}
