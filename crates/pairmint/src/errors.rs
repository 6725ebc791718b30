//! # Error Types

/// Errors from pairmint operations.
#[derive(Debug, thiserror::Error)]
pub enum PairmintError {
    /// Vocab size is below the minimum (256, the u8 space).
    #[error("vocab size ({size}) must be >= 256")]
    VocabSizeTooSmall {
        /// The vocab size that was too small.
        size: usize,
    },

    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Encode/decode was invoked before training.
    #[error("tokenizer has not been trained")]
    NotTrained,

    /// A second train call on an already-trained instance.
    #[error("tokenizer has already been trained")]
    AlreadyTrained,

    /// Decode was given a token id with no vocabulary expansion.
    #[error("unknown token id: {token}")]
    UnknownToken {
        /// The offending token id.
        token: u64,
    },

    /// Token value out of range for the target type.
    #[error("token out of range")]
    TokenOutOfRange,

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error (base64, integer, etc.)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for pairmint operations.
pub type Result<T> = core::result::Result<T, PairmintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PairmintError::VocabSizeTooSmall { size: 100 }.to_string(),
            "vocab size (100) must be >= 256"
        );
        assert_eq!(
            PairmintError::NotTrained.to_string(),
            "tokenizer has not been trained"
        );
        assert_eq!(
            PairmintError::UnknownToken { token: 512 }.to_string(),
            "unknown token id: 512"
        );
    }
}
