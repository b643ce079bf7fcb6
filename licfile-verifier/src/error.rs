//! Error types for license-file verification.

use thiserror::Error;

/// Result type for license-file operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

/// Reasons a license file or verifier setup was rejected.
///
/// Per-file variants never reach callers of [`crate::LicenseVerifier::verify`];
/// they are folded into [`Invalid`] and only show up in diagnostics.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Framing does not match the container layout (short read).
    #[error("malformed license container: {0}")]
    Format(String),

    /// The container declares a format revision this build cannot read.
    #[error("unsupported license format version {0}")]
    UnsupportedVersion(u8),

    /// Payload is not a complete raw-deflate stream.
    #[error("license payload decompression failed: {0}")]
    Decompression(String),

    /// RSA signature does not match the document digest.
    #[error("license signature mismatch")]
    SignatureMismatch,

    /// Trusted public key is malformed.
    #[error("invalid trusted key: {0}")]
    Key(String),

    /// Verifier configuration is unreadable or malformed.
    #[error("invalid verifier configuration: {0}")]
    Config(String),

    /// Recovered document is not valid UTF-8.
    #[error("license document is not valid UTF-8: {0}")]
    DocumentEncoding(#[from] std::str::Utf8Error),

    /// Recovered document is not well-formed XML.
    #[error("license document is not well-formed XML: {0}")]
    DocumentParse(#[from] roxmltree::Error),

    /// The byte source failed for a reason other than running out of data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LicenseError {
    /// Short, stable name of the variant, used as a structured log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Format(_) => "format",
            Self::UnsupportedVersion(_) => "unsupported_version",
            Self::Decompression(_) => "decompression",
            Self::SignatureMismatch => "signature_mismatch",
            Self::Key(_) => "key",
            Self::Config(_) => "config",
            Self::DocumentEncoding(_) => "document_encoding",
            Self::DocumentParse(_) => "document_parse",
            Self::Io(_) => "io",
        }
    }
}

/// The single outcome a caller sees for any rejected license file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("license file is not valid")]
pub struct Invalid;
