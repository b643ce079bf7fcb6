//! RSA-SHA256 (PKCS#1 v1.5) check over the decompressed document.
//!
//! The digest covers the document bytes exactly as inflated, trailing
//! whitespace and encoding artifacts included.

use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};

use crate::error::{LicenseError, LicenseResult};
use crate::key::TrustedKey;

/// SHA-256 digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Computes the digest a license signature is made over.
#[must_use]
pub fn document_digest(document: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(document).into()
}

/// Checks `signature` against the digest of `document`.
///
/// # Errors
///
/// Returns [`LicenseError::SignatureMismatch`] for any failure, including
/// signatures of the wrong length.
pub fn check_signature(
    key: &TrustedKey,
    document: &[u8],
    signature: &[u8],
) -> LicenseResult<()> {
    let digest = document_digest(document);
    key.as_rsa()
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .map_err(|_| LicenseError::SignatureMismatch)
}

/// Boolean form of [`check_signature`].
#[must_use]
pub fn verify_signature(key: &TrustedKey, document: &[u8], signature: &[u8]) -> bool {
    check_signature(key, document, signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rsa::traits::PublicKeyParts;
    use rsa::RsaPrivateKey;
    use std::sync::OnceLock;

    fn private_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| {
            let mut rng = StdRng::seed_from_u64(11);
            RsaPrivateKey::new(&mut rng, 1024).unwrap()
        })
    }

    fn trusted() -> TrustedKey {
        TrustedKey::from_rsa(private_key().to_public_key()).unwrap()
    }

    fn signed(document: &[u8]) -> Vec<u8> {
        private_key()
            .sign(Pkcs1v15Sign::new::<Sha256>(), &document_digest(document))
            .unwrap()
    }

    #[test]
    fn genuine_signature_verifies() {
        assert!(verify_signature(&trusted(), b"hello world", &signed(b"hello world")));
    }

    #[test]
    fn other_document_fails() {
        assert!(!verify_signature(&trusted(), b"hello world!", &signed(b"hello world")));
    }

    #[test]
    fn wrong_length_signatures_fail() {
        let sig = signed(b"hello world");
        assert!(!verify_signature(&trusted(), b"hello world", &[]));
        assert!(!verify_signature(&trusted(), b"hello world", &sig[1..]));

        let mut long = sig.clone();
        long.push(0);
        assert!(!verify_signature(&trusted(), b"hello world", &long));
    }

    #[test]
    fn all_zero_signature_fails() {
        let zeros = vec![0u8; trusted().size()];
        assert!(!verify_signature(&trusted(), b"hello world", &zeros));
    }

    #[test]
    fn signature_not_below_modulus_fails() {
        let key = trusted();
        let modulus = private_key().n().to_bytes_be();
        assert_eq!(modulus.len(), key.size());
        assert!(!verify_signature(&key, b"hello world", &modulus));
        assert!(!verify_signature(&key, b"hello world", &vec![0xff; key.size()]));
    }

    #[test]
    fn mismatch_is_reported_as_signature_error() {
        let err = check_signature(&trusted(), b"hello world", &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, LicenseError::SignatureMismatch));
    }
}
