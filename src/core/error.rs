// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for robomcap.
//!
//! Provides error types for:
//! - Writer lifecycle violations
//! - Unknown schema and channel references
//! - Record encoding and decoding
//! - Output sink failures

use std::fmt;

/// Errors that can occur while writing containers or encoding records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Operation called outside the state in which it is legal
    InvalidState {
        /// Operation that was attempted
        operation: String,
        /// State the writer was in
        state: String,
    },

    /// Channel registration referenced a schema that was never registered
    UnknownSchema {
        /// Schema ID that was not found
        schema_id: u16,
    },

    /// Message referenced a channel that was never registered
    UnknownChannel {
        /// Channel ID that was not found
        channel_id: u16,
    },

    /// Identifier counter ran out of 16-bit IDs
    IdExhausted {
        /// Kind of identifier ("schema" or "channel")
        kind: String,
    },

    /// Parse error in configuration or data
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Buffer too short for requested read
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Encoding error
    EncodeError {
        /// Codec context (e.g., "CDR", "MCAP")
        codec: String,
        /// Error message
        message: String,
    },

    /// The underlying byte sink rejected a write
    Io {
        /// Error message
        message: String,
    },
}

impl CodecError {
    /// Create an invalid state error.
    pub fn invalid_state(operation: impl Into<String>, state: impl fmt::Display) -> Self {
        CodecError::InvalidState {
            operation: operation.into(),
            state: state.to_string(),
        }
    }

    /// Create an unknown schema error.
    pub fn unknown_schema(schema_id: u16) -> Self {
        CodecError::UnknownSchema { schema_id }
    }

    /// Create an unknown channel error.
    pub fn unknown_channel(channel_id: u16) -> Self {
        CodecError::UnknownChannel { channel_id }
    }

    /// Create an ID exhaustion error.
    pub fn id_exhausted(kind: impl Into<String>) -> Self {
        CodecError::IdExhausted { kind: kind.into() }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: u64) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::InvalidState { operation, state } => {
                vec![("operation", operation.clone()), ("state", state.clone())]
            }
            CodecError::UnknownSchema { schema_id } => {
                vec![("schema_id", schema_id.to_string())]
            }
            CodecError::UnknownChannel { channel_id } => {
                vec![("channel_id", channel_id.to_string())]
            }
            CodecError::IdExhausted { kind } => vec![("kind", kind.clone())],
            CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::EncodeError { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            CodecError::Io { message } => vec![("message", message.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidState { operation, state } => {
                write!(f, "Invalid state: cannot {operation} while writer is {state}")
            }
            CodecError::UnknownSchema { schema_id } => {
                write!(f, "Unknown schema id {schema_id}")
            }
            CodecError::UnknownChannel { channel_id } => {
                write!(f, "Unknown channel id {channel_id}")
            }
            CodecError::IdExhausted { kind } => {
                write!(f, "No {kind} ids left (16-bit id space exhausted)")
            }
            CodecError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            CodecError::EncodeError { codec, message } => {
                write!(f, "{codec} encode error: {message}")
            }
            CodecError::Io { message } => write!(f, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for robomcap operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_error() {
        let err = CodecError::invalid_state("add a message", "finished");
        assert!(matches!(err, CodecError::InvalidState { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid state: cannot add a message while writer is finished"
        );
    }

    #[test]
    fn test_unknown_schema_error() {
        let err = CodecError::unknown_schema(7);
        assert_eq!(err, CodecError::UnknownSchema { schema_id: 7 });
        assert_eq!(err.to_string(), "Unknown schema id 7");
    }

    #[test]
    fn test_unknown_channel_error() {
        let err = CodecError::unknown_channel(3);
        assert_eq!(err, CodecError::UnknownChannel { channel_id: 3 });
        assert_eq!(err.to_string(), "Unknown channel id 3");
    }

    #[test]
    fn test_encode_error() {
        let err = CodecError::encode("CDR", "encoding failed");
        assert!(matches!(err, CodecError::EncodeError { .. }));
        assert_eq!(err.to_string(), "CDR encode error: encoding failed");
    }

    #[test]
    fn test_buffer_too_short_error() {
        let err = CodecError::buffer_too_short(8, 2, 24);
        assert_eq!(
            err.to_string(),
            "Buffer too short: requested 8 bytes at position 24, but only 2 bytes available"
        );
    }

    #[test]
    fn test_log_fields_invalid_state() {
        let err = CodecError::invalid_state("finish", "not started");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("operation", "finish".to_string()));
        assert_eq!(fields[1], ("state", "not started".to_string()));
    }

    #[test]
    fn test_log_fields_unknown_channel() {
        let fields = CodecError::unknown_channel(9).log_fields();
        assert_eq!(fields, vec![("channel_id", "9".to_string())]);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full");
        let codec_err: CodecError = io_err.into();
        assert!(matches!(codec_err, CodecError::Io { .. }));
        assert_eq!(codec_err.to_string(), "I/O error: disk full");
    }
}
