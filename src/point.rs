use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use thiserror::Error;

use std::fmt;
use std::ops::{Add, Mul, Neg};

use crate::curve::{Curve, CurveError};
use crate::field::{FieldElement, FieldError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointError {
    #[error("cannot combine points that lie on different curves")]
    CurveMismatch,
    #[error("field error: {0}")]
    Field(#[from] FieldError),
}

/// A point of the elliptic-curve group: either a finite `(x, y)` pair
/// satisfying the curve equation, or the point at infinity (the group
/// identity). Every point carries the curve it was minted on; group
/// operations require both operands to reference the same curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    curve: Curve,
    coordinates: Option<(FieldElement, FieldElement)>,
}

impl Point {
    pub(crate) fn infinity(curve: Curve) -> Self {
        Self {
            curve,
            coordinates: None,
        }
    }

    pub(crate) fn try_finite(
        x: FieldElement,
        y: FieldElement,
        curve: Curve,
    ) -> Result<Self, CurveError> {
        let y_squared = (&y * &y)?;
        let x_squared = (&x * &x)?;
        let x_cubed = (&x_squared * &x)?;
        let ax = (curve.a() * &x)?;
        let partial = (&x_cubed + &ax)?;
        let rhs = (&partial + curve.b())?;
        if y_squared != rhs {
            return Err(CurveError::PointNotOnCurve);
        }
        Ok(Self {
            curve,
            coordinates: Some((x, y)),
        })
    }

    pub fn is_infinity(&self) -> bool {
        self.coordinates.is_none()
    }

    /// x coordinate as an integer, or `None` for the point at infinity.
    pub fn x(&self) -> Option<&BigUint> {
        self.coordinates.as_ref().map(|(x, _)| x.value())
    }

    /// y coordinate as an integer, or `None` for the point at infinity.
    pub fn y(&self) -> Option<&BigUint> {
        self.coordinates.as_ref().map(|(_, y)| y.value())
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Chord-tangent addition. The case split covers the two identity
    /// cases, the vertical chord (inverse operands), the vertical tangent
    /// (doubling a point with `y = 0`) and the two slope formulas.
    pub fn geometric_add(&self, rhs: &Self) -> Result<Self, PointError> {
        if self.curve != rhs.curve {
            return Err(PointError::CurveMismatch);
        }

        let (x1, y1) = match &self.coordinates {
            Some(coordinates) => coordinates,
            None => return Ok(rhs.clone()),
        };
        let (x2, y2) = match &rhs.coordinates {
            Some(coordinates) => coordinates,
            None => return Ok(self.clone()),
        };

        // P + (-P) = infinity; also covers doubling a point with y = 0
        if x1 == x2 && *y1 == -y2 {
            return Ok(Self::infinity(self.curve.clone()));
        }

        let slope = if x1 == x2 && y1 == y2 {
            // tangent: (3x^2 + a) / 2y
            let x_squared = (x1 * x1)?;
            let three = FieldElement::small(3, self.curve.modulus());
            let two = FieldElement::small(2, self.curve.modulus());
            let numerator = (&(&three * &x_squared)? + self.curve.a())?;
            let denominator = (&two * y1)?;
            (&numerator / &denominator)?
        } else {
            // chord: (y2 - y1) / (x2 - x1)
            let numerator = (y2 - y1)?;
            let denominator = (x2 - x1)?;
            (&numerator / &denominator)?
        };

        // x3 = s^2 - x1 - x2, y3 = s(x1 - x3) - y1
        let slope_squared = (&slope * &slope)?;
        let x3 = (&(&slope_squared - x1)? - x2)?;
        let y3 = (&(&slope * &(x1 - &x3)?)? - y1)?;

        Ok(Self {
            curve: self.curve.clone(),
            coordinates: Some((x3, y3)),
        })
    }

    pub fn double(&self) -> Result<Self, PointError> {
        self.geometric_add(self)
    }

    /// Double-and-add, LSB first: `O(log k)` point operations. A negative
    /// scalar multiplies the negated point.
    pub fn scalar_mul(&self, scalar: &BigInt) -> Result<Self, PointError> {
        if scalar.is_negative() {
            return (-self).scalar_mul(&-scalar);
        }
        let mut coefficient = scalar.magnitude().clone();
        let mut current = self.clone();
        let mut result = Self::infinity(self.curve.clone());
        while !coefficient.is_zero() {
            if coefficient.bit(0) {
                result = result.geometric_add(&current)?;
            }
            current = current.double()?;
            coefficient >>= 1u32;
        }
        Ok(result)
    }
}

impl<'a, 'b> Add<&'b Point> for &'a Point {
    type Output = Result<Point, PointError>;
    fn add(self, rhs: &'b Point) -> Self::Output {
        self.geometric_add(rhs)
    }
}

impl Add for Point {
    type Output = Result<Point, PointError>;
    fn add(self, rhs: Self) -> Self::Output {
        self.geometric_add(&rhs)
    }
}

impl Neg for &Point {
    type Output = Point;
    fn neg(self) -> Self::Output {
        Point {
            curve: self.curve.clone(),
            coordinates: self
                .coordinates
                .as_ref()
                .map(|(x, y)| (x.clone(), -y)),
        }
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<'a, 'b> Mul<&'b BigInt> for &'a Point {
    type Output = Result<Point, PointError>;
    fn mul(self, scalar: &'b BigInt) -> Self::Output {
        self.scalar_mul(scalar)
    }
}

impl Mul<i64> for &Point {
    type Output = Result<Point, PointError>;
    fn mul(self, scalar: i64) -> Self::Output {
        self.scalar_mul(&BigInt::from(scalar))
    }
}

impl Mul<i64> for Point {
    type Output = Result<Point, PointError>;
    fn mul(self, scalar: i64) -> Self::Output {
        self.scalar_mul(&BigInt::from(scalar))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.coordinates {
            Some((x, y)) => write!(f, "Point({}, {})", x.value(), y.value()),
            None => write!(f, "Point(infinity)"),
        }
    }
}
