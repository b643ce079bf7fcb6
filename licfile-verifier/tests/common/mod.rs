//! Shared test helpers: a throwaway issuer for building license files.

#![allow(dead_code)]

use std::io::Write;
use std::sync::OnceLock;

use flate2::write::DeflateEncoder;
use flate2::Compression;
use licfile_verifier::{LicenseVerifier, TrustedKey};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};

/// A realistic license document, trailing newline included.
pub const SAMPLE_DOCUMENT: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
<License>\n  <Product>Acme Designer</Product>\n  <Licensee>Example Corp</Licensee>\n  \
<Expires>2027-12-31</Expires>\n</License>\n";

fn seeded_key(seed: u64) -> RsaPrivateKey {
    let mut rng = StdRng::seed_from_u64(seed);
    RsaPrivateKey::new(&mut rng, 1024).unwrap()
}

/// The issuer key the tests trust.
pub fn issuer_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| seeded_key(1))
}

/// A second, untrusted issuer key.
pub fn rogue_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| seeded_key(2))
}

/// Public half of `key`, as a trusted key.
pub fn trusted(key: &RsaPrivateKey) -> TrustedKey {
    TrustedKey::from_rsa(key.to_public_key()).unwrap()
}

/// A verifier trusting [`issuer_key`].
pub fn verifier() -> LicenseVerifier {
    init_tracing();
    LicenseVerifier::new(trusted(issuer_key()))
}

/// Raw-deflate compresses `data`.
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

/// RSA-SHA256 PKCS#1 v1.5 signature over the uncompressed document.
pub fn sign(key: &RsaPrivateKey, document: &[u8]) -> Vec<u8> {
    let digest = Sha256::digest(document);
    key.sign(Pkcs1v15Sign::new::<Sha256>(), &digest).unwrap()
}

/// Lays out a container from its parts.
pub fn frame(version: u8, signature: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(5 + signature.len() + payload.len());
    out.push(version);
    out.extend_from_slice(&(signature.len() as u32).to_le_bytes());
    out.extend_from_slice(signature);
    out.extend_from_slice(payload);
    out
}

/// A complete version-0 license file signed by `key`.
pub fn make_license(key: &RsaPrivateKey, document: &[u8]) -> Vec<u8> {
    frame(0, &sign(key, document), &deflate(document))
}

/// Routes `tracing` output to the test harness; honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
