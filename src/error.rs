pub type ChromabrewResult<T> = Result<T, ChromabrewError>;

#[derive(thiserror::Error, Debug)]
pub enum ChromabrewError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("round error: {0}")]
    Round(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChromabrewError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn round(msg: impl Into<String>) -> Self {
        Self::Round(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ChromabrewError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ChromabrewError::round("x")
                .to_string()
                .contains("round error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ChromabrewError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
