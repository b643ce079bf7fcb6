//! Raw-deflate decompression of the license payload.

use std::io::{self, BufRead, BufReader, Read};

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{LicenseError, LicenseResult};

/// Default ceiling on the decompressed document size (16 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

const CHUNK: usize = 8 * 1024;

/// Inflates a raw-deflate stream (no zlib or gzip header) to completion.
///
/// The whole source must be a single complete DEFLATE stream: truncation,
/// corrupt blocks, bytes after the final block, and output beyond `limit`
/// are all rejected. No partial output is ever returned.
///
/// # Errors
///
/// Returns [`LicenseError::Decompression`] for any of the above and
/// [`LicenseError::Io`] if the source itself fails.
pub fn inflate_payload<R: Read>(source: R, limit: usize) -> LicenseResult<Vec<u8>> {
    let mut input = BufReader::with_capacity(CHUNK, source);
    let mut inflater = Decompress::new(false);
    let mut out = Vec::with_capacity(CHUNK);

    loop {
        if out.len() == out.capacity() {
            out.reserve(CHUNK);
        }

        let buf = match input.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        let eof = buf.is_empty();
        let flush = if eof {
            FlushDecompress::Finish
        } else {
            FlushDecompress::None
        };

        let (in_before, out_before) = (inflater.total_in(), inflater.total_out());
        let status = inflater
            .decompress_vec(buf, &mut out, flush)
            .map_err(|e| LicenseError::Decompression(e.to_string()))?;
        let consumed = (inflater.total_in() - in_before) as usize;
        input.consume(consumed);

        if out.len() > limit {
            return Err(LicenseError::Decompression(format!(
                "document exceeds {limit} bytes"
            )));
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let stalled = consumed == 0 && inflater.total_out() == out_before;
                if stalled && eof {
                    return Err(LicenseError::Decompression(
                        "stream ends before the final block".to_string(),
                    ));
                }
                if stalled {
                    return Err(LicenseError::Decompression(
                        "decoder stopped making progress".to_string(),
                    ));
                }
            }
        }
    }

    let mut probe = [0u8; 1];
    let trailing = loop {
        match input.read(&mut probe) {
            Ok(n) => break n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    };
    if trailing != 0 {
        return Err(LicenseError::Decompression(
            "unexpected data after end of stream".to_string(),
        ));
    }

    Ok(out)
}
