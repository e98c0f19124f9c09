use crate::field::FieldError;
use thiserror::Error;

mod decoder;
mod encoder;

pub use decoder::reconstruct;
pub use encoder::construct;

/// Input is processed in 16-byte chunks, each shared independently.
pub const CHUNK_BYTES: usize = 16;
/// Each chunk contributes one 32-byte field element to every share.
pub const WORD_BYTES: usize = crate::field::ENCODED_BYTES;
/// Four u64 little-endian header fields.
pub const HEADER_BYTES: usize = 32;

/// The fixed header carried by every share buffer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ShareHeader {
    /// Original input length in bytes.
    pub length: u64,
    /// Input length after zero-padding to a multiple of 16.
    pub padded_len: u64,
    /// This share's x-coordinate, 1-based. Never 0: x = 0 is the secret.
    pub index: u64,
    /// Number of shares required for reconstruction.
    pub threshold: u64,
}

impl ShareHeader {
    pub fn encode(&self) -> [u8; HEADER_BYTES] {
        let mut out = [0_u8; HEADER_BYTES];
        out[0..8].copy_from_slice(&self.length.to_le_bytes());
        out[8..16].copy_from_slice(&self.padded_len.to_le_bytes());
        out[16..24].copy_from_slice(&self.index.to_le_bytes());
        out[24..32].copy_from_slice(&self.threshold.to_le_bytes());
        out
    }

    pub fn decode(buffer: &[u8]) -> Result<Self, ReconstructError> {
        if buffer.len() < HEADER_BYTES {
            return Err(ReconstructError::MalformedShare(format!(
                "share buffer is {} bytes, shorter than the {HEADER_BYTES}-byte header",
                buffer.len()
            )));
        }
        let field = |offset: usize| {
            let mut raw = [0_u8; 8];
            raw.copy_from_slice(&buffer[offset..offset + 8]);
            u64::from_le_bytes(raw)
        };
        let header = Self {
            length: field(0),
            padded_len: field(8),
            index: field(16),
            threshold: field(24),
        };
        if header.padded_len % CHUNK_BYTES as u64 != 0 || header.padded_len < header.length {
            return Err(ReconstructError::MalformedShare(format!(
                "padded length {} is not a chunk multiple at or above length {}",
                header.padded_len, header.length
            )));
        }
        if header.index == 0 {
            return Err(ReconstructError::MalformedShare(
                "share index 0 is reserved for the secret".to_string(),
            ));
        }
        if header.threshold == 0 {
            return Err(ReconstructError::MalformedShare(
                "threshold 0 cannot come from a valid split".to_string(),
            ));
        }
        Ok(header)
    }

    pub fn chunk_count(&self) -> usize {
        (self.padded_len / CHUNK_BYTES as u64) as usize
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("invalid parameters: {t} of {n} shares, need 1 <= threshold <= share count")]
    InvalidParameters { n: u64, t: u64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("{supplied} shares supplied but the threshold is {threshold}")]
    InsufficientShares { supplied: usize, threshold: u64 },
    #[error("malformed share: {0}")]
    MalformedShare(String),
    #[error(transparent)]
    Field(#[from] FieldError),
}
