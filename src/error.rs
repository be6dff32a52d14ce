//! Error types for the member descriptor codec
//!
//! Separates failures of the underlying byte sink/source from payloads
//! that arrived intact but cannot be understood by this node.

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Main error type for encoding and decoding
#[derive(Error, Debug)]
pub enum CodecError {
    /// I/O errors from the sink or source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source ran out of bytes in the middle of a read
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// String payload is not valid UTF-8
    #[error("Invalid UTF-8 string payload")]
    InvalidUtf8,

    /// Boolean byte other than 0 or 1
    #[error("Invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    /// Negative length prefix
    #[error("Negative length prefix: {0}")]
    NegativeLength(i32),

    /// Malformed embedded address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Role id not present in the role catalog
    #[error("Unknown member role id: {0}")]
    UnknownRole(i32),

    /// Attribute value could not be encoded or decoded
    #[error("Object codec error: {0}")]
    Object(String),

    /// Decoded length larger than the configured limit
    #[error("{what} length {len} exceeds limit {limit}")]
    LimitExceeded {
        what: &'static str,
        len: usize,
        limit: usize,
    },

    /// Length too large for the wire's i32 prefix
    #[error("Length {0} does not fit in a 32-bit length prefix")]
    LengthOverflow(usize),

    /// Bytes left over after a complete descriptor
    #[error("{0} trailing bytes after descriptor")]
    TrailingBytes(usize),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CodecError {
    /// True when the byte sink or source itself failed.
    pub fn is_io(&self) -> bool {
        matches!(self, CodecError::Io(_))
    }

    /// True when bytes arrived but describe something this node cannot
    /// accept: malformed framing, an unknown role or an oversized field.
    pub fn is_corrupt(&self) -> bool {
        !self.is_io() && !matches!(self, CodecError::LengthOverflow(_) | CodecError::Config(_))
    }
}

impl From<bincode::Error> for CodecError {
    fn from(err: bincode::Error) -> Self {
        CodecError::Object(err.to_string())
    }
}

impl From<toml::de::Error> for CodecError {
    fn from(err: toml::de::Error) -> Self {
        CodecError::Config(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for CodecError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        CodecError::InvalidUtf8
    }
}
