use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use thiserror::Error;

use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field modulus must be a positive integer")]
    InvalidModulus,
    #[error("cannot combine elements of different prime fields")]
    ModulusMismatch,
    #[error("the zero element has no multiplicative inverse")]
    NotInvertible,
}

/// An integer in `[0, p)` together with its modulus. Arithmetic between two
/// elements requires equal moduli and always re-reduces into `[0, p)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement {
    value: BigUint,
    modulus: BigUint,
}

impl FieldElement {
    /// Creates an element from a signed integer, normalizing it into `[0, p)`.
    pub fn new(value: impl Into<BigInt>, modulus: impl Into<BigUint>) -> Result<Self, FieldError> {
        let modulus = modulus.into();
        if modulus.is_zero() {
            return Err(FieldError::InvalidModulus);
        }
        Ok(Self::reduced_signed(value.into(), &modulus))
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Modular exponentiation by square-and-multiply. A negative exponent is
    /// interpreted as a power of the inverse and fails on the zero element.
    pub fn pow(&self, exponent: &BigInt) -> Result<Self, FieldError> {
        let base = if exponent.is_negative() {
            self.inverse()?
        } else {
            self.clone()
        };
        Ok(Self {
            value: base.value.modpow(exponent.magnitude(), &base.modulus),
            modulus: base.modulus,
        })
    }

    /// Multiplicative inverse via the extended Euclidean algorithm.
    pub fn inverse(&self) -> Result<Self, FieldError> {
        if self.value.is_zero() {
            return Err(FieldError::NotInvertible);
        }
        let value = BigInt::from(self.value.clone());
        let modulus = BigInt::from(self.modulus.clone());
        let extended = value.extended_gcd(&modulus);
        if !extended.gcd.is_one() {
            return Err(FieldError::NotInvertible);
        }
        Ok(Self::reduced_signed(extended.x, &self.modulus))
    }

    pub(crate) fn small(value: u32, modulus: &BigUint) -> Self {
        Self::reduced(BigUint::from(value), modulus)
    }

    pub(crate) fn reduced(value: BigUint, modulus: &BigUint) -> Self {
        Self {
            value: value % modulus,
            modulus: modulus.clone(),
        }
    }

    fn reduced_signed(value: BigInt, modulus: &BigUint) -> Self {
        let value = value.mod_floor(&BigInt::from(modulus.clone()));
        // mod_floor by a positive modulus lands in [0, p), so the sign is Plus
        Self {
            value: value.magnitude().clone(),
            modulus: modulus.clone(),
        }
    }

    fn check_same_field(&self, other: &Self) -> Result<(), FieldError> {
        if self.modulus != other.modulus {
            return Err(FieldError::ModulusMismatch);
        }
        Ok(())
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = Result<FieldElement, FieldError>;
    fn add(self, rhs: &'b FieldElement) -> Self::Output {
        self.check_same_field(rhs)?;
        Ok(FieldElement::reduced(&self.value + &rhs.value, &self.modulus))
    }
}

impl Add for FieldElement {
    type Output = Result<FieldElement, FieldError>;
    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = Result<FieldElement, FieldError>;
    fn sub(self, rhs: &'b FieldElement) -> Self::Output {
        self.check_same_field(rhs)?;
        // rhs.value < modulus, so the sum never underflows
        Ok(FieldElement::reduced(
            &self.value + &self.modulus - &rhs.value,
            &self.modulus,
        ))
    }
}

impl Sub for FieldElement {
    type Output = Result<FieldElement, FieldError>;
    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = Result<FieldElement, FieldError>;
    fn mul(self, rhs: &'b FieldElement) -> Self::Output {
        self.check_same_field(rhs)?;
        Ok(FieldElement::reduced(&self.value * &rhs.value, &self.modulus))
    }
}

impl Mul for FieldElement {
    type Output = Result<FieldElement, FieldError>;
    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl<'a, 'b> Div<&'b FieldElement> for &'a FieldElement {
    type Output = Result<FieldElement, FieldError>;
    fn div(self, rhs: &'b FieldElement) -> Self::Output {
        self.check_same_field(rhs)?;
        let inverse = rhs.inverse()?;
        self * &inverse
    }
}

impl Div for FieldElement {
    type Output = Result<FieldElement, FieldError>;
    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        FieldElement::reduced(&self.modulus - &self.value, &self.modulus)
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        -&self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fe(value: i64, modulus: u32) -> FieldElement {
        FieldElement::new(value, modulus).unwrap()
    }

    fn hex(digits: &str) -> BigUint {
        BigUint::parse_bytes(digits.as_bytes(), 16).unwrap()
    }

    const SECP256K1_PRIME: &str =
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";

    #[test]
    fn creation_normalizes() {
        let element = fe(7, 13);
        assert_eq!(element.value(), &BigUint::from(7u32));
        assert_eq!(element.modulus(), &BigUint::from(13u32));

        assert_eq!(fe(-1, 13), fe(12, 13));
        assert_eq!(fe(26, 13), fe(0, 13));
        assert_eq!(fe(-27, 13), fe(12, 13));
    }

    #[test]
    fn zero_modulus_is_rejected() {
        assert_eq!(
            FieldElement::new(1, 0u32).unwrap_err(),
            FieldError::InvalidModulus
        );
    }

    #[test]
    fn addition() {
        assert_eq!((fe(7, 13) + fe(12, 13)).unwrap(), fe(6, 13));
    }

    #[test]
    fn subtraction() {
        assert_eq!((fe(7, 13) - fe(12, 13)).unwrap(), fe(8, 13));
        assert_eq!((fe(12, 13) - fe(7, 13)).unwrap(), fe(5, 13));
    }

    #[test]
    fn multiplication() {
        assert_eq!((fe(3, 13) * fe(12, 13)).unwrap(), fe(10, 13));
    }

    #[test]
    fn division() {
        // 2^-1 = 7 mod 13, so 3 / 2 = 21 = 8
        assert_eq!((fe(3, 13) / fe(2, 13)).unwrap(), fe(8, 13));
        assert_eq!(
            (fe(3, 13) / fe(0, 13)).unwrap_err(),
            FieldError::NotInvertible
        );
    }

    #[test]
    fn negation() {
        assert_eq!(-fe(5, 13), fe(8, 13));
        assert_eq!(-fe(0, 13), fe(0, 13));
    }

    #[test]
    fn mismatched_moduli_are_rejected() {
        let a = fe(1, 13);
        let b = fe(1, 17);
        assert_eq!((&a + &b).unwrap_err(), FieldError::ModulusMismatch);
        assert_eq!((&a - &b).unwrap_err(), FieldError::ModulusMismatch);
        assert_eq!((&a * &b).unwrap_err(), FieldError::ModulusMismatch);
        assert_eq!((&a / &b).unwrap_err(), FieldError::ModulusMismatch);
    }

    #[test]
    fn exponentiation() {
        assert_eq!(fe(3, 13).pow(&BigInt::from(3)).unwrap(), fe(1, 13));
        assert_eq!(fe(5, 13).pow(&BigInt::from(0)).unwrap(), fe(1, 13));
        // negative exponents are powers of the inverse: 2^-2 = 7^2 = 10 mod 13
        assert_eq!(fe(2, 13).pow(&BigInt::from(-2)).unwrap(), fe(10, 13));
        assert_eq!(
            fe(0, 13).pow(&BigInt::from(-1)).unwrap_err(),
            FieldError::NotInvertible
        );
    }

    #[test]
    fn inverse_round_trip() {
        for value in 1..13 {
            let element = fe(value, 13);
            let inverse = element.inverse().unwrap();
            assert_eq!((element * inverse).unwrap(), fe(1, 13));
        }
        assert_eq!(fe(0, 13).inverse().unwrap_err(), FieldError::NotInvertible);
    }

    #[test]
    fn operations_with_large_modulus() {
        let modulus = hex(SECP256K1_PRIME);
        let gx = hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
        let gy = hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");
        let a = FieldElement::new(BigInt::from(gx), modulus.clone()).unwrap();
        let b = FieldElement::new(BigInt::from(gy), modulus.clone()).unwrap();

        let sum = (&a + &b).unwrap();
        assert_eq!(
            sum.value(),
            &hex("c1f940f620808011b3455e91dc9813afffb3b123d4537cf2f63a51eb1208ec50")
        );
        let product = (&a * &b).unwrap();
        assert_eq!(
            product.value(),
            &hex("fd3dc529c6eb60fb9d166034cf3c1a5a72324aa9dfd3428a56d7e1ce0179fd9b")
        );

        let inverse = a.inverse().unwrap();
        assert_eq!(
            inverse.value(),
            &hex("237afdf1d2938d86870aaeb8ad77626a67b8e794abfb076be61d003687ca9ef6")
        );
        assert_eq!((&a * &inverse).unwrap().value(), &BigUint::one());

        let a_min_b = (&a - &b).unwrap();
        let b_min_a = (&b - &a).unwrap();
        assert_eq!(a_min_b, -b_min_a);
    }
}
