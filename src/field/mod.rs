use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use std::sync::LazyLock;
use thiserror::Error;

/// The field modulus, p = 2^255 - 19.
static MODULUS: LazyLock<BigUint> = LazyLock::new(|| (BigUint::from(1_u8) << 255_usize) - 19_u8);

/// Serialized width of a field element, in bytes.
pub const ENCODED_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("0 has no inverse modulo p")]
    DivisionByZero,
    #[error("encoded value is not below the field modulus")]
    OutOfRangeValue,
}

/// An element of the prime field of order 2^255 - 19.
///
/// Every constructor and operation keeps the inner value in `[0, p)`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FieldElement(BigUint);

impl FieldElement {
    pub fn zero() -> Self {
        Self(BigUint::ZERO)
    }

    pub fn one() -> Self {
        Self(BigUint::from(1_u8))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigUint::ZERO
    }

    /// Draws a uniform element of `[0, p)` by rejection sampling: 32 random
    /// bytes masked down to 255 bits, retried until the candidate is below p.
    pub fn random(rng: &mut impl CryptoRng) -> Self {
        let mut buffer = [0_u8; ENCODED_BYTES];
        loop {
            rng.fill_bytes(&mut buffer);
            buffer[ENCODED_BYTES - 1] &= 0x7f;
            let candidate = BigUint::from_bytes_le(&buffer);
            if candidate < *MODULUS {
                return Self(candidate);
            }
        }
    }

    pub fn add(&self, rhs: &Self) -> Self {
        Self((&self.0 + &rhs.0) % &*MODULUS)
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        if self.0 >= rhs.0 {
            Self(&self.0 - &rhs.0)
        } else {
            Self(&self.0 + &*MODULUS - &rhs.0)
        }
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        Self((&self.0 * &rhs.0) % &*MODULUS)
    }

    /// Square-and-multiply exponentiation, O(log exponent) multiplications.
    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self(self.0.modpow(exponent, &MODULUS))
    }

    /// Multiplicative inverse, a^(p-2) mod p by Fermat's little theorem.
    pub fn inverse(&self) -> Result<Self, FieldError> {
        if self.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        Ok(self.pow(&(&*MODULUS - BigUint::from(2_u8))))
    }

    pub fn div(&self, rhs: &Self) -> Result<Self, FieldError> {
        Ok(self.mul(&rhs.inverse()?))
    }

    /// Serializes to exactly 32 little-endian bytes.
    pub fn to_bytes(&self) -> [u8; ENCODED_BYTES] {
        let mut out = [0_u8; ENCODED_BYTES];
        let raw = self.0.to_bytes_le();
        out[..raw.len()].copy_from_slice(&raw);
        out
    }

    /// Decodes a 32-byte little-endian encoding, rejecting values >= p.
    pub fn from_bytes(bytes: &[u8; ENCODED_BYTES]) -> Result<Self, FieldError> {
        let value = BigUint::from_bytes_le(bytes);
        if value >= *MODULUS {
            return Err(FieldError::OutOfRangeValue);
        }
        Ok(Self(value))
    }

    /// Interprets an input chunk of at most 16 little-endian bytes as a field
    /// element. 128-bit values are always below the 255-bit modulus, so no
    /// reduction is needed and distinct chunks map to distinct elements.
    pub fn from_chunk(chunk: &[u8]) -> Self {
        debug_assert!(chunk.len() <= 16);
        Self(BigUint::from_bytes_le(chunk))
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_add_and_mul_are_commutative_and_associative() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let a = FieldElement::random(&mut rng);
            let b = FieldElement::random(&mut rng);
            let c = FieldElement::random(&mut rng);
            assert_eq!(a.add(&b), b.add(&a));
            assert_eq!(a.mul(&b), b.mul(&a));
            assert_eq!(a.add(&b).add(&c), a.add(&b.add(&c)));
            assert_eq!(a.mul(&b).mul(&c), a.mul(&b.mul(&c)));
        }
    }

    #[test]
    fn test_sub_undoes_add() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            let a = FieldElement::random(&mut rng);
            let b = FieldElement::random(&mut rng);
            assert_eq!(a.add(&b).sub(&b), a);
        }
    }

    #[test]
    fn test_sub_renormalizes_negative_results() {
        let small = FieldElement::from(3);
        let large = FieldElement::from(10);
        let difference = small.sub(&large);
        // 3 - 10 = p - 7
        assert_eq!(difference.add(&FieldElement::from(7)), FieldElement::zero());
    }

    #[test]
    fn test_inverse_multiplies_to_one() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let a = FieldElement::random(&mut rng);
            if a.is_zero() {
                continue;
            }
            assert_eq!(a.mul(&a.inverse().unwrap()), FieldElement::one());
        }
    }

    #[test]
    fn test_inverse_of_zero_is_rejected() {
        assert_eq!(
            FieldElement::zero().inverse(),
            Err(FieldError::DivisionByZero)
        );
        let a = FieldElement::from(42);
        assert_eq!(a.div(&FieldElement::zero()), Err(FieldError::DivisionByZero));
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let a = FieldElement::random(&mut rng);
            assert_eq!(FieldElement::from_bytes(&a.to_bytes()).unwrap(), a);
        }
    }

    #[test]
    fn test_from_bytes_rejects_values_at_or_above_modulus() {
        // p itself, little-endian: 2^255 - 19 = 0x7fff...ffed
        let mut encoded_modulus = [0xff_u8; ENCODED_BYTES];
        encoded_modulus[0] = 0xed;
        encoded_modulus[ENCODED_BYTES - 1] = 0x7f;
        assert_eq!(
            FieldElement::from_bytes(&encoded_modulus),
            Err(FieldError::OutOfRangeValue)
        );

        let all_ones = [0xff_u8; ENCODED_BYTES];
        assert_eq!(
            FieldElement::from_bytes(&all_ones),
            Err(FieldError::OutOfRangeValue)
        );

        // p - 1 is the largest valid encoding
        let mut largest = encoded_modulus;
        largest[0] = 0xec;
        let decoded = FieldElement::from_bytes(&largest).unwrap();
        assert_eq!(decoded.add(&FieldElement::one()), FieldElement::zero());
    }

    #[test]
    fn test_from_chunk_needs_no_reduction() {
        let chunk = [0xff_u8; 16];
        let element = FieldElement::from_chunk(&chunk);
        let bytes = element.to_bytes();
        assert_eq!(&bytes[..16], &chunk);
        assert!(bytes[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_random_stays_below_modulus() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let a = FieldElement::random(&mut rng);
            // to_bytes + from_bytes only succeeds for values below p
            assert!(FieldElement::from_bytes(&a.to_bytes()).is_ok());
        }
    }
}
