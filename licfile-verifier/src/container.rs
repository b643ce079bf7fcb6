//! Binary framing of a license file.
//!
//! Version 0 layout:
//!
//! ```text
//! offset 0        : 1 byte  - format version
//! offset 1..4     : 4 bytes - signature length N, little-endian u32
//! offset 5..5+N   : N bytes - RSA signature
//! offset 5+N..    : rest    - raw-deflate compressed document
//! ```
//!
//! The parser only splits the frame. Checking the version is left to the
//! verifier so a bad version and a bad frame stay distinguishable.

use std::io::{self, Read};

use crate::error::{LicenseError, LicenseResult};

/// The only container revision this crate understands.
pub const FORMAT_VERSION: u8 = 0;

/// Size of the fixed header preceding the signature (version + length).
pub const HEADER_LEN: usize = 5;

/// A split license file: header fields plus the still-unread payload.
#[derive(Debug)]
pub struct LicenseContainer<R> {
    /// Declared format version.
    pub version: u8,
    /// Opaque signature bytes.
    pub signature: Vec<u8>,
    /// Remaining source, positioned at the first compressed byte.
    pub payload: R,
}

/// Reads the header and signature from `source`, leaving the payload unread.
///
/// # Errors
///
/// Returns [`LicenseError::Format`] if the source ends before the header or
/// the declared signature is complete, and [`LicenseError::Io`] for any other
/// read failure.
pub fn read_container<R: Read>(mut source: R) -> LicenseResult<LicenseContainer<R>> {
    let mut version = [0u8; 1];
    read_field(&mut source, &mut version, "format version")?;

    let mut raw_len = [0u8; 4];
    read_field(&mut source, &mut raw_len, "signature length")?;
    let signature_len = u32::from_le_bytes(raw_len);

    // Bounded by what the source actually holds, never by the declared length.
    let mut signature = Vec::new();
    (&mut source)
        .take(u64::from(signature_len))
        .read_to_end(&mut signature)?;
    if signature.len() != signature_len as usize {
        return Err(LicenseError::Format(format!(
            "signature truncated: declared {signature_len} bytes, found {}",
            signature.len()
        )));
    }

    Ok(LicenseContainer {
        version: version[0],
        signature,
        payload: source,
    })
}

fn read_field<R: Read>(source: &mut R, buf: &mut [u8], field: &str) -> LicenseResult<()> {
    source.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => LicenseError::Format(format!("missing {field}")),
        _ => LicenseError::Io(e),
    })
}
