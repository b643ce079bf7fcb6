//! The license document recovered from a verified file.

use crate::error::LicenseResult;
use crate::signature::{document_digest, DIGEST_LEN};

/// Decompressed license document whose signature has been checked.
///
/// Only [`crate::LicenseVerifier`] can produce one, so holding a
/// `LicenseDocument` means the bytes are authentic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseDocument {
    bytes: Vec<u8>,
}

impl LicenseDocument {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the document bytes exactly as signed.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the document, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Document length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the signed document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Views the document as UTF-8 text for a downstream markup parser.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LicenseError::DocumentEncoding`] if the bytes are not
    /// valid UTF-8. This says nothing about authenticity.
    pub fn as_utf8(&self) -> LicenseResult<&str> {
        Ok(std::str::from_utf8(&self.bytes)?)
    }

    /// Parses the document as XML markup.
    ///
    /// The returned tree borrows from this document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LicenseError::DocumentEncoding`] for non-UTF-8 bytes
    /// and [`crate::LicenseError::DocumentParse`] for malformed markup. Both
    /// concern content only; the signature has already been accepted.
    pub fn parse_xml(&self) -> LicenseResult<roxmltree::Document<'_>> {
        Ok(roxmltree::Document::parse(self.as_utf8()?)?)
    }

    /// SHA-256 of the document, i.e. the digest the signature covers.
    #[must_use]
    pub fn sha256(&self) -> [u8; DIGEST_LEN] {
        document_digest(&self.bytes)
    }
}
