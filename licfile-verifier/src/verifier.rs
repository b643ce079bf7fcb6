//! Top-level license-file verification.
//!
//! Gates run in a fixed order, each one final:
//!
//! 1. parse the container frame
//! 2. reject any format version other than [`FORMAT_VERSION`]
//! 3. inflate the payload
//! 4. check the RSA signature over the inflated bytes
//!
//! Callers only ever see [`Invalid`] for a rejected file. The reason is
//! logged through `tracing` and is otherwise unobservable.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::VerifierConfig;
use crate::container::{read_container, FORMAT_VERSION};
use crate::document::LicenseDocument;
use crate::error::{Invalid, LicenseError, LicenseResult};
use crate::inflate::{inflate_payload, DEFAULT_MAX_DOCUMENT_BYTES};
use crate::key::TrustedKey;
use crate::signature::check_signature;

/// Verifies license files against one trusted issuer key.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone)]
pub struct LicenseVerifier {
    key: TrustedKey,
    max_document_bytes: usize,
}

impl LicenseVerifier {
    /// Creates a verifier for `key` with the default document size limit.
    #[must_use]
    pub fn new(key: TrustedKey) -> Self {
        Self {
            key,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Creates a verifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Key`] if the configured key is malformed. No
    /// verifier exists in that case, so no file can be checked against it.
    pub fn from_config(config: &VerifierConfig) -> LicenseResult<Self> {
        let key = config.public_key.load()?;
        Ok(Self::new(key).with_max_document_bytes(config.max_document_bytes))
    }

    /// Overrides the largest decompressed document accepted.
    #[must_use]
    pub fn with_max_document_bytes(mut self, limit: usize) -> Self {
        self.max_document_bytes = limit;
        self
    }

    /// Returns the trusted key.
    #[must_use]
    pub fn key(&self) -> &TrustedKey {
        &self.key
    }

    /// Returns the document size limit.
    #[must_use]
    pub fn max_document_bytes(&self) -> usize {
        self.max_document_bytes
    }

    /// Verifies a license file read from `source`.
    ///
    /// Returns the recovered document only if every gate passes. Malformed
    /// input never panics; it yields [`Invalid`].
    pub fn verify<R: Read>(&self, source: R) -> Result<LicenseDocument, Invalid> {
        match self.inspect(source) {
            Ok(document) => {
                debug!(len = document.len(), "license file verified");
                Ok(document)
            }
            Err(LicenseError::Io(e)) => {
                warn!(error = %e, "license source failed during verification");
                Err(Invalid)
            }
            Err(e) => {
                debug!(kind = e.kind(), error = %e, "license file rejected");
                Err(Invalid)
            }
        }
    }

    /// Verifies an in-memory license file.
    pub fn verify_bytes(&self, bytes: &[u8]) -> Result<LicenseDocument, Invalid> {
        self.verify(bytes)
    }

    /// Opens and verifies the license file at `path`.
    ///
    /// The file handle is released before this returns, on every path.
    pub fn verify_file(&self, path: impl AsRef<Path>) -> Result<LicenseDocument, Invalid> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to open license file");
                return Err(Invalid);
            }
        };
        self.verify(BufReader::new(file))
    }

    /// Returns true if `source` holds a valid license file.
    #[must_use]
    pub fn is_valid<R: Read>(&self, source: R) -> bool {
        self.verify(source).is_ok()
    }

    pub(crate) fn inspect<R: Read>(&self, source: R) -> LicenseResult<LicenseDocument> {
        let container = read_container(source)?;

        // Other revisions have unknown semantics; never look past the header.
        if container.version != FORMAT_VERSION {
            return Err(LicenseError::UnsupportedVersion(container.version));
        }

        let bytes = inflate_payload(container.payload, self.max_document_bytes)?;
        check_signature(&self.key, &bytes, &container.signature)?;

        Ok(LicenseDocument::new(bytes))
    }
}
