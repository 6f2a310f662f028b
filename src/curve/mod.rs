//! Component D — the elliptic-curve layer (§4.D).
//!
//! Affine and Jacobian point types over a coordinate field (`Fq` for G1,
//! `Fq²` for G2), windowed-NAF scalar multiplication, random
//! element/generator sampling, and hash-to-point.

pub mod affine;
pub mod group;
pub mod jacobian;
pub mod scalar_mul;

use thiserror::Error;

pub use affine::AffinePoint;
pub use group::CurveGroup;
pub use jacobian::JacobianPoint;

/// Errors arising in the curve layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// Hash-to-point did not find a valid `y` in 2^32 counter-prefixed attempts.
    #[error("hash-to-point exhausted its retry budget")]
    HashToPointExhausted,
    /// An operand that should lie on the curve does not.
    #[error("point is not on the curve")]
    NotOnCurve,
}

/// A field coordinate usable by both G1 (`Fq`) and G2 (`Fq²`): every
/// operation the curve layer needs from its coordinate field, expressed as
/// a trait so `affine`/`jacobian`/`scalar_mul` are written once and
/// instantiated over both groups (§4.D "two representations... over a
/// coordinate field").
pub trait CurveField: Clone + PartialEq {
    fn zero_like(&self) -> Self;
    fn one_like(&self) -> Self;
    fn is_zero(&self) -> bool;
    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn negate(&self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn square(&self) -> Self;
    fn invert(&self) -> Self;
    fn twice(&self) -> Self;
    fn div_by_two(&self) -> Self;
}

impl CurveField for crate::field::Fq {
    fn zero_like(&self) -> Self {
        crate::field::Fq::zero(&self.field)
    }
    fn one_like(&self) -> Self {
        crate::field::Fq::one(&self.field)
    }
    fn is_zero(&self) -> bool {
        crate::field::Fq::is_zero(self)
    }
    fn add(&self, rhs: &Self) -> Self {
        crate::field::Fq::add(self, rhs)
    }
    fn sub(&self, rhs: &Self) -> Self {
        crate::field::Fq::sub(self, rhs)
    }
    fn negate(&self) -> Self {
        crate::field::Fq::negate(self)
    }
    fn mul(&self, rhs: &Self) -> Self {
        crate::field::Fq::mul(self, rhs)
    }
    fn square(&self) -> Self {
        crate::field::Fq::square(self)
    }
    fn invert(&self) -> Self {
        crate::field::Fq::invert(self)
    }
    fn twice(&self) -> Self {
        crate::field::Fq::twice(self)
    }
    fn div_by_two(&self) -> Self {
        crate::field::Fq::div_by_two(self)
    }
}

impl CurveField for crate::field::Fq2 {
    fn zero_like(&self) -> Self {
        crate::field::Fq2::zero(&self.params)
    }
    fn one_like(&self) -> Self {
        crate::field::Fq2::one(&self.params)
    }
    fn is_zero(&self) -> bool {
        crate::field::Fq2::is_zero(self)
    }
    fn add(&self, rhs: &Self) -> Self {
        crate::field::Fq2::add(self, rhs)
    }
    fn sub(&self, rhs: &Self) -> Self {
        crate::field::Fq2::sub(self, rhs)
    }
    fn negate(&self) -> Self {
        crate::field::Fq2::negate(self)
    }
    fn mul(&self, rhs: &Self) -> Self {
        crate::field::Fq2::mul(self, rhs)
    }
    fn square(&self) -> Self {
        crate::field::Fq2::square(self)
    }
    fn invert(&self) -> Self {
        crate::field::Fq2::invert(self)
    }
    fn twice(&self) -> Self {
        self.add(self)
    }
    fn div_by_two(&self) -> Self {
        crate::field::Fq2::new(&self.params, self.a.div_by_two(), self.b.div_by_two())
    }
}

/// The pairing target field, as a curve coordinate field: only needed so
/// the Miller loop (`pairing.rs`) can embed G1/G2 points into `Fq¹²` and
/// reuse `affine.rs`'s generic point arithmetic for the loop's accumulator
/// point `T`, rather than re-deriving elliptic-curve doubling/addition a
/// third time over the tower's top field.
impl CurveField for crate::field::Fq12 {
    fn zero_like(&self) -> Self {
        crate::field::Fq12::zero(&self.params)
    }
    fn one_like(&self) -> Self {
        crate::field::Fq12::one(&self.params)
    }
    fn is_zero(&self) -> bool {
        crate::field::Fq12::is_zero(self)
    }
    fn add(&self, rhs: &Self) -> Self {
        crate::field::Fq12::add(self, rhs)
    }
    fn sub(&self, rhs: &Self) -> Self {
        crate::field::Fq12::sub(self, rhs)
    }
    fn negate(&self) -> Self {
        crate::field::Fq12::negate(self)
    }
    fn mul(&self, rhs: &Self) -> Self {
        crate::field::Fq12::mul(self, rhs)
    }
    fn square(&self) -> Self {
        crate::field::Fq12::square(self)
    }
    fn invert(&self) -> Self {
        crate::field::Fq12::invert(self)
    }
    fn twice(&self) -> Self {
        self.add(self)
    }
    fn div_by_two(&self) -> Self {
        let two = self.one_like().add(&self.one_like());
        self.mul(&two.invert())
    }
}
