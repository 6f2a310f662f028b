//! Component C (part 1) — the quadratic extension `Fq²` (§4.C, §3).
//!
//! An `Fq²` element is a pair `(a, b)` representing `a + b*u` with
//! `u² = β`; `β` is carried by [`Fq2Params`] (typically `-1`).

use std::rc::Rc;

use crate::field::fq::{Fq, FieldError, FieldParams};

/// Shared parameters of the quadratic extension.
pub struct Fq2Params {
    /// The base field `Fq`.
    pub base: Rc<FieldParams>,
    /// `β` such that `u² = β`.
    pub beta: Fq,
}

impl Fq2Params {
    /// Build the extension handle for base field `base` and non-residue `beta`.
    pub fn new(base: &Rc<FieldParams>, beta: Fq) -> Rc<Fq2Params> {
        Rc::new(Fq2Params { base: base.clone(), beta })
    }
}

/// An element `a + b*u` of `Fq²`.
#[derive(Clone)]
pub struct Fq2 {
    pub params: Rc<Fq2Params>,
    pub a: Fq,
    pub b: Fq,
}

impl Fq2 {
    /// Additive identity.
    pub fn zero(params: &Rc<Fq2Params>) -> Fq2 {
        Fq2 {
            params: params.clone(),
            a: Fq::zero(&params.base),
            b: Fq::zero(&params.base),
        }
    }

    /// Multiplicative identity.
    pub fn one(params: &Rc<Fq2Params>) -> Fq2 {
        Fq2 {
            params: params.clone(),
            a: Fq::one(&params.base),
            b: Fq::zero(&params.base),
        }
    }

    /// Build from coordinates.
    pub fn new(params: &Rc<Fq2Params>, a: Fq, b: Fq) -> Fq2 {
        Fq2 { params: params.clone(), a, b }
    }

    /// `true` iff both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }

    /// `self + rhs`.
    pub fn add(&self, rhs: &Fq2) -> Fq2 {
        Fq2 { params: self.params.clone(), a: self.a.add(&rhs.a), b: self.b.add(&rhs.b) }
    }

    /// `self - rhs`.
    pub fn sub(&self, rhs: &Fq2) -> Fq2 {
        Fq2 { params: self.params.clone(), a: self.a.sub(&rhs.a), b: self.b.sub(&rhs.b) }
    }

    /// Additive inverse.
    pub fn negate(&self) -> Fq2 {
        Fq2 { params: self.params.clone(), a: self.a.negate(), b: self.b.negate() }
    }

    /// Conjugate `a - b*u`: the nontrivial `Fq`-automorphism of `Fq²`,
    /// which doubles as the Frobenius endomorphism `x -> x^q`.
    pub fn conjugate(&self) -> Fq2 {
        Fq2 { params: self.params.clone(), a: self.a.clone(), b: self.b.negate() }
    }

    /// `self * rhs` via one Karatsuba trick over `Fq`:
    /// `c0 = a0*b0 + β*a1*b1`, `c1 = (a0+a1)(b0+b1) - a0*b0 - a1*b1`.
    pub fn mul(&self, rhs: &Fq2) -> Fq2 {
        let t0 = self.a.mul(&rhs.a);
        let t1 = self.b.mul(&rhs.b);
        let c0 = t0.add(&self.params.beta.mul(&t1));
        let c1 = self.a.add(&self.b).mul(&rhs.a.add(&rhs.b)).sub(&t0).sub(&t1);
        Fq2 { params: self.params.clone(), a: c0, b: c1 }
    }

    /// `self * self`.
    pub fn square(&self) -> Fq2 {
        self.mul(self)
    }

    /// Multiplicative inverse: `(a - b*u) / (a² - β*b²)`.
    pub fn invert(&self) -> Fq2 {
        let norm = self.a.square().sub(&self.params.beta.mul(&self.b.square()));
        let norm_inv = norm.invert();
        Fq2 { params: self.params.clone(), a: self.a.mul(&norm_inv), b: self.b.negate().mul(&norm_inv) }
    }

    /// `self * (1+u)`: the load-bearing shortcut `(a,b) -> (a-b, a+b)` used
    /// when the enclosing `Fq⁶`'s irreducible is `v³ = ξ = 1+u` (§4.C). This
    /// is a property of the *caller's* choice of `ξ`, not of this field's
    /// own `β`, so it is exposed as a free-standing helper rather than a
    /// method tied to `self.params.beta`.
    pub fn mul_by_xi_one_plus_u(&self) -> Fq2 {
        Fq2 {
            params: self.params.clone(),
            a: self.a.sub(&self.b),
            b: self.a.add(&self.b),
        }
    }

    /// Raise to a non-negative exponent by square-and-multiply, most
    /// significant bit first (the `Fq²`-level twin of [`crate::field::Fq12::pow`],
    /// used to derive the pairing context's `γ` constants from `ξ`).
    pub fn pow(&self, exp: &crate::bigint::Integer) -> Fq2 {
        let mut result = Fq2::one(&self.params);
        let bits = exp.bit_length();
        for i in (0..bits).rev() {
            result = result.square();
            if exp.test_bit(i) {
                result = result.mul(self);
            }
        }
        result
    }

    /// Square root via Michael Scott's method: writing `self = a + b*u`,
    /// find `d = sqrt(a² - β*b²)` (or, on that branch's failure, `a²+β*b²`)
    /// in the base field and derive the `Fq²` root from it.
    pub fn sqrt(&self) -> Result<Fq2, FieldError> {
        if self.b.is_zero() {
            if let Ok(r) = self.a.sqrt() {
                return Ok(Fq2 { params: self.params.clone(), a: r, b: Fq::zero(&self.params.base) });
            }
            let neg_over_beta = self.params.beta.negate().invert();
            let r = self.a.mul(&neg_over_beta).sqrt()?;
            return Ok(Fq2 { params: self.params.clone(), a: Fq::zero(&self.params.base), b: r });
        }
        let beta = &self.params.beta;
        let alpha = self.a.square().sub(&beta.mul(&self.b.square()));
        let d = match alpha.sqrt() {
            Ok(d) => d,
            Err(_) => self.a.square().add(&beta.mul(&self.b.square())).sqrt()?,
        };
        let two_inv = Fq::from_natural(&self.params.base, crate::bigint::Integer::from_u64(2))
            .invert();
        let delta = self.a.add(&d).mul(&two_inv);
        let (x0, x1) = match delta.sqrt() {
            Ok(x0) => {
                let x1 = self.b.mul(&two_inv).mul(&x0.invert());
                (x0, x1)
            }
            Err(_) => {
                let delta2 = self.a.sub(&d).mul(&two_inv);
                let x1 = delta2.sqrt()?;
                let x0 = self.b.mul(&two_inv).mul(&x1.invert());
                (x0, x1)
            }
        };
        Ok(Fq2 { params: self.params.clone(), a: x0, b: x1 })
    }
}

impl PartialEq for Fq2 {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}
impl Eq for Fq2 {}
