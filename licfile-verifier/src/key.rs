//! The issuer's RSA public key, as trusted by a verifier.
//!
//! Issuers hand out their key as a .NET `<RSAKeyValue>` blob; PEM and DER
//! encodings of the same modulus and exponent are accepted interchangeably.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};

use crate::error::{LicenseError, LicenseResult};

/// Smallest modulus accepted for a trusted key.
pub const MIN_MODULUS_BITS: usize = 1024;

/// An immutable RSA public key used to check license signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedKey(RsaPublicKey);

impl TrustedKey {
    /// Builds a key from big-endian modulus and exponent bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Key`] if the components do not form a usable
    /// RSA public key.
    pub fn from_components(modulus: &[u8], exponent: &[u8]) -> LicenseResult<Self> {
        let n = BigUint::from_bytes_be(modulus);
        let e = BigUint::from_bytes_be(exponent);
        let key = RsaPublicKey::new(n, e)
            .map_err(|e| LicenseError::Key(format!("bad RSA components: {e}")))?;
        Self::from_rsa(key)
    }

    /// Parses a .NET `<RSAKeyValue>` XML blob.
    ///
    /// Only the `Modulus` and `Exponent` elements are read; any private
    /// components present in the blob are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Key`] if the XML is malformed, the root is not
    /// `RSAKeyValue`, or either component is missing or not base64.
    pub fn from_xml(xml: &str) -> LicenseResult<Self> {
        let doc = roxmltree::Document::parse(xml.trim())
            .map_err(|e| LicenseError::Key(format!("malformed key XML: {e}")))?;
        let root = doc.root_element();
        if !root.has_tag_name("RSAKeyValue") {
            return Err(LicenseError::Key(format!(
                "expected <RSAKeyValue>, found <{}>",
                root.tag_name().name()
            )));
        }

        let modulus = xml_component(root, "Modulus")?;
        let exponent = xml_component(root, "Exponent")?;
        Self::from_components(&modulus, &exponent)
    }

    /// Parses a PEM key, either PKCS#1 `RSA PUBLIC KEY` or SPKI `PUBLIC KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Key`] if neither encoding decodes.
    pub fn from_pem(pem: &str) -> LicenseResult<Self> {
        let pem = pem.trim();
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map_err(|e| LicenseError::Key(format!("bad RSA public key PEM: {e}")))
            .and_then(Self::from_rsa)
    }

    /// Parses a DER key, either SPKI or PKCS#1.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Key`] if neither encoding decodes.
    pub fn from_der(der: &[u8]) -> LicenseResult<Self> {
        RsaPublicKey::from_public_key_der(der)
            .or_else(|_| RsaPublicKey::from_pkcs1_der(der))
            .map_err(|e| LicenseError::Key(format!("bad RSA public key DER: {e}")))
            .and_then(Self::from_rsa)
    }

    /// Wraps an already-decoded key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Key`] if the modulus is shorter than
    /// [`MIN_MODULUS_BITS`].
    pub fn from_rsa(key: RsaPublicKey) -> LicenseResult<Self> {
        let bits = key.n().bits();
        if bits < MIN_MODULUS_BITS {
            return Err(LicenseError::Key(format!(
                "modulus is {bits} bits, need at least {MIN_MODULUS_BITS}"
            )));
        }
        Ok(Self(key))
    }

    /// Big-endian modulus bytes.
    #[must_use]
    pub fn modulus(&self) -> Vec<u8> {
        self.0.n().to_bytes_be()
    }

    /// Big-endian public exponent bytes.
    #[must_use]
    pub fn exponent(&self) -> Vec<u8> {
        self.0.e().to_bytes_be()
    }

    /// Modulus length in bytes, which is also the expected signature length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }
}

fn xml_component(root: roxmltree::Node<'_, '_>, name: &str) -> LicenseResult<Vec<u8>> {
    let element = root
        .children()
        .find(|n| n.has_tag_name(name))
        .ok_or_else(|| LicenseError::Key(format!("missing <{name}> element")))?;

    // .NET wraps long base64 values across lines.
    let b64: String = element
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .flat_map(str::chars)
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = BASE64
        .decode(b64)
        .map_err(|e| LicenseError::Key(format!("invalid base64 in <{name}>: {e}")))?;
    if bytes.is_empty() {
        return Err(LicenseError::Key(format!("empty <{name}> element")));
    }
    Ok(bytes)
}
