use crate::field::{FieldElement, FieldError};
use rand::CryptoRng;

/// A polynomial over the prime field, used once per 16-byte input chunk.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Polynomial {
    /// Coefficients in ascending order, i.e. [1, 2, 3] -> 1 + 2x + 3x^2.
    /// `coefficients[0]` is the shared secret.
    coefficients: Vec<FieldElement>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<FieldElement>) -> Self {
        Self { coefficients }
    }

    /// Builds a degree-(threshold - 1) polynomial whose constant term is the
    /// secret. The remaining coefficients are drawn uniformly from `[0, p)`;
    /// the caller supplies the randomness source so coefficient generation is
    /// cryptographically secure and testable with a seeded generator.
    pub fn generate(threshold: u64, secret: FieldElement, rng: &mut impl CryptoRng) -> Self {
        let mut coefficients = Vec::with_capacity(threshold as usize);
        coefficients.push(secret);
        for _ in 1..threshold {
            coefficients.push(FieldElement::random(rng));
        }
        Self { coefficients }
    }

    /// Evaluates the polynomial at `point` with an accumulating power of x.
    /// Evaluation at 0 returns exactly the constant term.
    pub fn evaluate(&self, point: u64) -> FieldElement {
        let x = FieldElement::from(point);
        let mut power_of_x = FieldElement::one();
        let mut result = FieldElement::zero();
        for c in &self.coefficients {
            result = result.add(&power_of_x.mul(c));
            power_of_x = power_of_x.mul(&x);
        }
        result
    }
}

/// Lagrange interpolation at x = 0 over the supplied (x, y) pairs:
/// secret = Σᵢ yᵢ · Πⱼ≠ᵢ (0 - xⱼ) / (xᵢ - xⱼ).
///
/// Two pairs sharing an x-coordinate make a denominator zero, which surfaces
/// as `FieldError::DivisionByZero` instead of a silently wrong answer.
pub fn interpolate_at_zero(
    points: &[FieldElement],
    values: &[FieldElement],
) -> Result<FieldElement, FieldError> {
    debug_assert_eq!(points.len(), values.len());
    let zero = FieldElement::zero();
    let mut result = FieldElement::zero();
    for (i, (x_i, y_i)) in points.iter().zip(values).enumerate() {
        let mut basis = FieldElement::one();
        for (j, x_j) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            basis = basis.mul(&zero.sub(x_j).div(&x_i.sub(x_j))?);
        }
        result = result.add(&basis.mul(y_i));
    }
    Ok(result)
}
