//! Error types for scale/bias chunk operations.

use thiserror::Error;

/// Errors that can occur while building or reading a chunk.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChunkError {
    /// An exact integer was requested from a slot holding the missing sentinel.
    #[error("value at index {index} is missing")]
    MissingValue {
        /// The logical index that was read.
        index: usize,
    },

    /// The buffer does not hold a 16-byte header followed by whole 4-byte slots.
    #[error("invalid chunk layout: {len} bytes is not a header plus whole 4-byte slots")]
    InvalidLayout {
        /// The length of the rejected buffer.
        len: usize,
    },

    /// The scale is zero, NaN or infinite.
    #[error("invalid scale: {0} (must be finite and non-zero)")]
    InvalidScale(f64),

    /// A value cannot be stored without loss under the chunk's scale and bias.
    #[error("value {value} at index {index} is not representable")]
    Unrepresentable {
        /// The logical index of the rejected value.
        index: usize,
        /// The rejected value.
        value: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ChunkError::MissingValue { index: 3 }.to_string(),
            "value at index 3 is missing"
        );
        assert!(ChunkError::InvalidLayout { len: 17 }
            .to_string()
            .contains("17 bytes"));
        assert!(ChunkError::InvalidScale(0.0).to_string().contains("invalid scale"));
        assert!(ChunkError::Unrepresentable { index: 1, value: 10 }
            .to_string()
            .contains("value 10 at index 1"));
    }
}
