//! Offline verification of signed license files.
//!
//! A license file is a small binary container: a format version, an RSA
//! signature, and a raw-deflate compressed license document. The issuer
//! signs the SHA-256 digest of the *uncompressed* document with RSA PKCS#1
//! v1.5; this crate reverses the packaging and checks that signature against
//! a trusted public key before handing the document out.
//!
//! # Design Principles
//!
//! - **Uniform rejection**: every malformed, tampered, or foreign file
//!   yields the same [`Invalid`] value. The specific reason only reaches
//!   `tracing` diagnostics.
//! - **No partial trust**: a [`LicenseDocument`] is only returned once the
//!   signature has been checked.
//! - **Injected key**: the trusted key is supplied at construction, so tests
//!   and deployments can each bring their own.
//!
//! # Example
//!
//! ```no_run
//! use licfile_verifier::{LicenseVerifier, TrustedKey};
//!
//! let key = TrustedKey::from_pem(&std::fs::read_to_string("issuer.pub.pem")?)?;
//! let verifier = LicenseVerifier::new(key);
//!
//! match verifier.verify_file("product.lic") {
//!     Ok(document) => {
//!         let xml = document.parse_xml()?;
//!         println!("licensed to {:?}", xml.root_element().tag_name().name());
//!     }
//!     Err(_) => eprintln!("license is not valid"),
//! }
//! # Ok::<(), licfile_verifier::LicenseError>(())
//! ```

mod config;
mod container;
mod document;
mod error;
mod inflate;
mod key;
mod signature;
mod verifier;

pub use config::{KeySource, VerifierConfig};
pub use container::{FORMAT_VERSION, HEADER_LEN};
pub use document::LicenseDocument;
pub use error::{Invalid, LicenseError, LicenseResult};
pub use inflate::DEFAULT_MAX_DOCUMENT_BYTES;
pub use key::{TrustedKey, MIN_MODULUS_BITS};
pub use signature::{document_digest, verify_signature, DIGEST_LEN};
pub use verifier::LicenseVerifier;

pub use roxmltree;
