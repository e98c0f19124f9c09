use super::{CHUNK_BYTES, HEADER_BYTES, ReconstructError, ShareHeader, WORD_BYTES};
use crate::field::FieldElement;
use crate::shamir;
use tracing::debug;

/// Reconstructs the original input from at least `threshold` share buffers.
///
/// All buffers must carry headers that agree on length, padded length and
/// threshold; each buffer contributes its own x-coordinate. Interpolation
/// runs over the first `threshold` buffers in input order.
pub fn reconstruct(shares: &[Vec<u8>]) -> Result<Vec<u8>, ReconstructError> {
    if shares.is_empty() {
        return Err(ReconstructError::MalformedShare(
            "no share buffers supplied".to_string(),
        ));
    }

    let headers = shares
        .iter()
        .map(|buffer| ShareHeader::decode(buffer))
        .collect::<Result<Vec<ShareHeader>, ReconstructError>>()?;

    let reference = &headers[0];
    for (i, header) in headers.iter().enumerate().skip(1) {
        if header.length != reference.length
            || header.padded_len != reference.padded_len
            || header.threshold != reference.threshold
        {
            return Err(ReconstructError::MalformedShare(format!(
                "share {i} header disagrees with share 0, shares come from different splits"
            )));
        }
    }

    let threshold = reference.threshold as usize;
    if shares.len() < threshold {
        return Err(ReconstructError::InsufficientShares {
            supplied: shares.len(),
            threshold: reference.threshold,
        });
    }

    let chunk_count = reference.chunk_count();
    let expected_len = chunk_count
        .checked_mul(WORD_BYTES)
        .and_then(|body| body.checked_add(HEADER_BYTES))
        .ok_or_else(|| {
            ReconstructError::MalformedShare(format!(
                "declared padded length {} overflows the share size",
                reference.padded_len
            ))
        })?;
    for (i, buffer) in shares.iter().enumerate() {
        if buffer.len() != expected_len {
            return Err(ReconstructError::MalformedShare(format!(
                "share {i} is {} bytes, header declares {expected_len}",
                buffer.len()
            )));
        }
    }

    let points: Vec<FieldElement> = headers[..threshold]
        .iter()
        .map(|header| FieldElement::from(header.index))
        .collect();
    let bodies: Vec<&[u8]> = shares[..threshold]
        .iter()
        .map(|buffer| &buffer[HEADER_BYTES..])
        .collect();

    let mut output = Vec::with_capacity(chunk_count * CHUNK_BYTES);
    for chunk in 0..chunk_count {
        let offset = chunk * WORD_BYTES;
        let mut values = Vec::with_capacity(threshold);
        for body in &bodies {
            let word: &[u8; WORD_BYTES] =
                body[offset..offset + WORD_BYTES].try_into().map_err(|_| {
                    ReconstructError::MalformedShare(format!(
                        "share body ends before chunk {chunk}"
                    ))
                })?;
            values.push(FieldElement::from_bytes(word)?);
        }

        let secret = shamir::interpolate_at_zero(&points, &values)?;
        let bytes = secret.to_bytes();
        // A chunk secret fits in 16 bytes by construction; anything wider
        // means the supplied shares do not belong to one split.
        if bytes[CHUNK_BYTES..].iter().any(|&b| b != 0) {
            return Err(ReconstructError::MalformedShare(format!(
                "chunk {chunk} reconstructed to a value wider than {CHUNK_BYTES} bytes"
            )));
        }
        output.extend_from_slice(&bytes[..CHUNK_BYTES]);
    }

    output.truncate(reference.length as usize);
    debug!(
        length = reference.length,
        chunks = chunk_count,
        supplied = shares.len(),
        threshold,
        "reconstructed input from shares"
    );
    Ok(output)
}
