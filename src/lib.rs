//! Elliptic-curve group arithmetic over prime fields.
//!
//! Curve parameters `(a, b, p)` are supplied at runtime as
//! arbitrary-precision integers. Construction validates that `p` is prime
//! and that the curve is nonsingular, and every finite point is checked
//! against the curve equation before it is handed out, so the group law
//! only ever sees valid points.
//!
//! ```rust
//! use ecc::Curve;
//!
//! // y^2 = x^3 + 7 over F_223
//! let curve = Curve::new(0, 7, 223u32)?;
//! let p = curve.point(192, 105)?;
//! let q = curve.point(17, 56)?;
//!
//! assert_eq!((&p + &q)?, curve.point(170, 142)?);
//! assert!((&p + &(-&p))?.is_infinity());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]

pub mod curve;
pub mod field;
pub mod point;
mod primality;

pub use curve::{Curve, CurveError};
pub use field::{FieldElement, FieldError};
pub use point::{Point, PointError};
