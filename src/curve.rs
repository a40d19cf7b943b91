use num_bigint::{BigInt, BigUint};
use num_traits::One;
use thiserror::Error;

use std::fmt;

use crate::field::{FieldElement, FieldError};
use crate::point::{Point, PointError};
use crate::primality;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("curve modulus must be a positive prime")]
    InvalidModulus,
    #[error("curve discriminant 4a^3 + 27b^2 is zero")]
    SingularCurve,
    #[error("point coordinates do not satisfy the curve equation")]
    PointNotOnCurve,
    #[error("field error: {0}")]
    Field(#[from] FieldError),
}

/// A short Weierstrass curve `y^2 = x^3 + ax + b` over the prime field
/// `F_p`, with parameters supplied at runtime. Construction validates that
/// `p` is prime and that the curve is nonsingular; points are only minted
/// through [`Curve::point`] and [`Curve::infinity`], so every finite point
/// in circulation satisfies the curve equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    a: FieldElement,
    b: FieldElement,
    prime: BigUint,
}

impl Curve {
    pub fn new(
        a: impl Into<BigInt>,
        b: impl Into<BigInt>,
        prime: impl Into<BigUint>,
    ) -> Result<Self, CurveError> {
        let prime = prime.into();
        if !primality::is_prime(&prime) {
            return Err(CurveError::InvalidModulus);
        }
        let a = FieldElement::new(a, prime.clone())?;
        let b = FieldElement::new(b, prime.clone())?;

        // 4a^3 + 27b^2 must not vanish mod p
        let a_squared = (&a * &a)?;
        let a_cubed = (&a_squared * &a)?;
        let a_term = (&a_cubed * &FieldElement::small(4, &prime))?;
        let b_squared = (&b * &b)?;
        let b_term = (&b_squared * &FieldElement::small(27, &prime))?;
        let discriminant = (&a_term + &b_term)?;
        if discriminant.is_zero() {
            return Err(CurveError::SingularCurve);
        }

        Ok(Self { a, b, prime })
    }

    /// Mints the finite point `(x, y)`, reducing the coordinates mod `p` and
    /// checking the curve equation.
    pub fn point(&self, x: impl Into<BigInt>, y: impl Into<BigInt>) -> Result<Point, CurveError> {
        let x = FieldElement::new(x, self.prime.clone())?;
        let y = FieldElement::new(y, self.prime.clone())?;
        Point::try_finite(x, y, self.clone())
    }

    /// The identity element of the group.
    pub fn infinity(&self) -> Point {
        Point::infinity(self.clone())
    }

    /// Order of `point` in the group: the smallest `n >= 1` with
    /// `n * point` equal to infinity. Runs in `O(n)` point additions, so
    /// this is only practical for small curves.
    pub fn point_order(&self, point: &Point) -> Result<BigUint, PointError> {
        if point.curve() != self {
            return Err(PointError::CurveMismatch);
        }
        // Repeated addition of a point cycles back to infinity after exactly
        // its order, which Lagrange bounds by the group size.
        let mut current = point.clone();
        let mut order = BigUint::one();
        while !current.is_infinity() {
            current = (&current + point)?;
            order += 1u32;
        }
        Ok(order)
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    pub fn modulus(&self) -> &BigUint {
        &self.prime
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Curve(a={}, b={}, p={})",
            self.a.value(),
            self.b.value(),
            self.prime
        )
    }
}
