use super::{CHUNK_BYTES, HEADER_BYTES, ShareHeader, SplitError, WORD_BYTES};
use crate::field::FieldElement;
use crate::shamir::Polynomial;
use rand::CryptoRng;
use tracing::debug;

/// Splits `data` into `n` share buffers such that any `t` of them
/// reconstruct it.
///
/// The input is zero-padded to a multiple of 16 bytes and each 16-byte chunk
/// is shared through a fresh random polynomial with the chunk as its constant
/// term, evaluated at x = 1..=n. Each returned buffer carries the 32-byte
/// header followed by one 32-byte evaluation per chunk.
pub fn construct(
    data: &[u8],
    n: u64,
    t: u64,
    rng: &mut impl CryptoRng,
) -> Result<Vec<Vec<u8>>, SplitError> {
    if n < 1 || t < 1 || t > n {
        return Err(SplitError::InvalidParameters { n, t });
    }

    let length = data.len() as u64;
    let mut padded = data.to_vec();
    let remainder = padded.len() % CHUNK_BYTES;
    if remainder != 0 {
        padded.resize(padded.len() + CHUNK_BYTES - remainder, 0);
    }
    let padded_len = padded.len() as u64;
    let chunk_count = padded.len() / CHUNK_BYTES;

    let share_len = HEADER_BYTES + chunk_count * WORD_BYTES;
    let mut shares: Vec<Vec<u8>> = (0..n)
        .map(|i| {
            let header = ShareHeader {
                length,
                padded_len,
                index: i + 1,
                threshold: t,
            };
            let mut buffer = Vec::with_capacity(share_len);
            buffer.extend_from_slice(&header.encode());
            buffer
        })
        .collect();

    for chunk in padded.chunks_exact(CHUNK_BYTES) {
        let secret = FieldElement::from_chunk(chunk);
        let polynomial = Polynomial::generate(t, secret, rng);
        for (j, share) in shares.iter_mut().enumerate() {
            let evaluation = polynomial.evaluate(j as u64 + 1);
            share.extend_from_slice(&evaluation.to_bytes());
        }
    }

    debug!(
        length,
        padded_len,
        chunks = chunk_count,
        shares = n,
        threshold = t,
        "split input into shares"
    );
    Ok(shares)
}
