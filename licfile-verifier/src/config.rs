//! Verifier configuration, loaded from JSON.
//!
//! ```json
//! {
//!   "public_key": { "xml": "<RSAKeyValue><Modulus>…</Modulus><Exponent>AQAB</Exponent></RSAKeyValue>" },
//!   "max_document_bytes": 1048576
//! }
//! ```

use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{LicenseError, LicenseResult};
use crate::inflate::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::key::TrustedKey;

/// Where the trusted key comes from, and in which encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// .NET `<RSAKeyValue>` blob.
    Xml(String),
    /// PKCS#1 or SPKI PEM.
    Pem(String),
    /// PKCS#1 or SPKI DER, base64-encoded.
    DerBase64(String),
}

impl KeySource {
    /// Decodes the key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Key`] if the key material is malformed.
    pub fn load(&self) -> LicenseResult<TrustedKey> {
        match self {
            Self::Xml(xml) => TrustedKey::from_xml(xml),
            Self::Pem(pem) => TrustedKey::from_pem(pem),
            Self::DerBase64(b64) => {
                let der = BASE64
                    .decode(b64.trim())
                    .map_err(|e| LicenseError::Key(format!("invalid DER base64: {e}")))?;
                TrustedKey::from_der(&der)
            }
        }
    }
}

/// Settings for a [`crate::LicenseVerifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// The issuer's public key.
    pub public_key: KeySource,
    /// Largest decompressed document accepted.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

fn default_max_document_bytes() -> usize {
    DEFAULT_MAX_DOCUMENT_BYTES
}

impl VerifierConfig {
    /// Creates a config with the default document limit.
    #[must_use]
    pub fn new(public_key: KeySource) -> Self {
        Self {
            public_key,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Parses a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if the JSON is malformed or lacks a
    /// `public_key`.
    pub fn from_json_str(json: &str) -> LicenseResult<Self> {
        serde_json::from_str(json).map_err(|e| LicenseError::Config(e.to_string()))
    }

    /// Reads and parses a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Config`] if the file cannot be read or its
    /// contents do not parse.
    pub fn from_path(path: impl AsRef<Path>) -> LicenseResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LicenseError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }
}
