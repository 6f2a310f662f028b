//! Component C (part 2) — the sextic extension `Fq⁶` (§4.C).
//!
//! An `Fq⁶` element is a triple `(a, b, c)` of `Fq²` coordinates,
//! representing `a + b*v + c*v²` with `v³ = ξ`.

use std::rc::Rc;

use crate::field::fq2::{Fq2, Fq2Params};

/// Shared parameters of the sextic extension: the underlying `Fq²` handle
/// plus the cubic non-residue `ξ` (stored as the identity `1+u` shortcut is
/// applied directly by [`Fq2::mul_by_xi_one_plus_u`] rather than by a
/// generic stored constant, matching the load-bearing shortcut in §4.C).
pub struct Fq6Params {
    pub base: Rc<Fq2Params>,
}

impl Fq6Params {
    pub fn new(base: &Rc<Fq2Params>) -> Rc<Fq6Params> {
        Rc::new(Fq6Params { base: base.clone() })
    }
}

/// An element `a + b*v + c*v²` of `Fq⁶`.
#[derive(Clone)]
pub struct Fq6 {
    pub params: Rc<Fq6Params>,
    pub a: Fq2,
    pub b: Fq2,
    pub c: Fq2,
}

impl Fq6 {
    pub fn zero(params: &Rc<Fq6Params>) -> Fq6 {
        Fq6 {
            params: params.clone(),
            a: Fq2::zero(&params.base),
            b: Fq2::zero(&params.base),
            c: Fq2::zero(&params.base),
        }
    }

    pub fn one(params: &Rc<Fq6Params>) -> Fq6 {
        Fq6 {
            params: params.clone(),
            a: Fq2::one(&params.base),
            b: Fq2::zero(&params.base),
            c: Fq2::zero(&params.base),
        }
    }

    pub fn new(params: &Rc<Fq6Params>, a: Fq2, b: Fq2, c: Fq2) -> Fq6 {
        Fq6 { params: params.clone(), a, b, c }
    }

    pub fn is_zero(&self) -> bool {
        self.a.is_zero() && self.b.is_zero() && self.c.is_zero()
    }

    pub fn add(&self, rhs: &Fq6) -> Fq6 {
        Fq6 { params: self.params.clone(), a: self.a.add(&rhs.a), b: self.b.add(&rhs.b), c: self.c.add(&rhs.c) }
    }

    pub fn sub(&self, rhs: &Fq6) -> Fq6 {
        Fq6 { params: self.params.clone(), a: self.a.sub(&rhs.a), b: self.b.sub(&rhs.b), c: self.c.sub(&rhs.c) }
    }

    pub fn negate(&self) -> Fq6 {
        Fq6 { params: self.params.clone(), a: self.a.negate(), b: self.b.negate(), c: self.c.negate() }
    }

    /// Multiply `self` by `ξ = 1+u` shifted up one `v`-coordinate:
    /// `v * (a + b*v + c*v²) = c*ξ + a*v + b*v²` (since `v³ = ξ`). This is
    /// the component-level analogue of [`Fq2::mul_by_xi_one_plus_u`].
    pub fn mul_by_v(&self) -> Fq6 {
        Fq6 {
            params: self.params.clone(),
            a: self.c.mul_by_xi_one_plus_u(),
            b: self.a.clone(),
            c: self.b.clone(),
        }
    }

    /// `self * rhs` via the standard BN "CH-SQR" Karatsuba-over-`Fq²`
    /// multiplication (three `Fq²` multiplications, several adds, one
    /// `mulXi` at the `Fq6` level):
    ///
    /// ```text
    /// t0 = a0*b0,  t1 = a1*b1,  t2 = a2*b2
    /// c0 = t0 + ξ*((a1+a2)(b1+b2) - t1 - t2)
    /// c1 = (a0+a1)(b0+b1) - t0 - t1 + ξ*t2
    /// c2 = (a0+a2)(b0+b2) - t0 - t2 + t1
    /// ```
    pub fn mul(&self, rhs: &Fq6) -> Fq6 {
        let t0 = self.a.mul(&rhs.a);
        let t1 = self.b.mul(&rhs.b);
        let t2 = self.c.mul(&rhs.c);

        let c0 = t0.add(
            &self
                .b
                .add(&self.c)
                .mul(&rhs.b.add(&rhs.c))
                .sub(&t1)
                .sub(&t2)
                .mul_by_xi_one_plus_u(),
        );
        let c1 = self
            .a
            .add(&self.b)
            .mul(&rhs.a.add(&rhs.b))
            .sub(&t0)
            .sub(&t1)
            .add(&t2.mul_by_xi_one_plus_u());
        let c2 = self
            .a
            .add(&self.c)
            .mul(&rhs.a.add(&rhs.c))
            .sub(&t0)
            .sub(&t2)
            .add(&t1);

        Fq6 { params: self.params.clone(), a: c0, b: c1, c: c2 }
    }

    pub fn square(&self) -> Fq6 {
        self.mul(self)
    }

    /// Multiplicative inverse, via the standard `Fq⁶` inversion formula
    /// (invert the `Fq²` norm built from the three coordinates).
    pub fn invert(&self) -> Fq6 {
        let Fq6 { a, b, c, .. } = self;
        let t0 = a.square().sub(&b.mul(c).mul_by_xi_one_plus_u());
        let t1 = c.square().mul_by_xi_one_plus_u().sub(&a.mul(b));
        let t2 = b.square().sub(&a.mul(c));
        let norm = a.mul(&t0).add(&c.mul(&t1).mul_by_xi_one_plus_u()).add(&b.mul(&t2).mul_by_xi_one_plus_u());
        let norm_inv = norm.invert();
        Fq6 {
            params: self.params.clone(),
            a: t0.mul(&norm_inv),
            b: t1.mul(&norm_inv),
            c: t2.mul(&norm_inv),
        }
    }
}

impl PartialEq for Fq6 {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b && self.c == other.c
    }
}
impl Eq for Fq6 {}
