//! Jacobian elliptic-curve points (§4.D, §3 "Jacobian point").

use crate::curve::affine::AffinePoint;
use crate::curve::group::CurveGroup;
use crate::curve::CurveField;

/// `(x, y, z)` mapping to affine as `(x/z², y/z³)`; infinite when the flag
/// is set or `z == 0`.
#[derive(Clone)]
pub struct JacobianPoint<F: CurveField> {
    pub x: F,
    pub y: F,
    pub z: F,
    pub infinite: bool,
}

impl<F: CurveField> JacobianPoint<F> {
    /// The point at infinity.
    pub fn identity(sample: &F) -> Self {
        JacobianPoint { x: sample.one_like(), y: sample.one_like(), z: sample.zero_like(), infinite: true }
    }

    /// Convert back to affine, performing the one inversion the Jacobian
    /// representation exists to defer.
    pub fn to_affine(&self) -> AffinePoint<F> {
        if self.infinite || self.z.is_zero() {
            return AffinePoint::identity(&self.x);
        }
        let z_inv = self.z.invert();
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2.mul(&z_inv);
        AffinePoint::new(self.x.mul(&z_inv2), self.y.mul(&z_inv3))
    }

    /// `self.x/z² == rhs.x/z² && self.y/z³ == rhs.y/z³`, evaluated via
    /// cross-multiplication so no inversion (and hence no pool traffic for
    /// an inverse) is needed for the common case of checking equality of
    /// two Jacobian representatives of the same affine point.
    pub fn is_valid_representation_of(&self, rhs: &AffinePoint<F>) -> bool {
        if self.infinite || self.z.is_zero() {
            return rhs.infinite;
        }
        if rhs.infinite {
            return false;
        }
        let z2 = self.z.square();
        let z3 = z2.mul(&self.z);
        self.x == rhs.x.mul(&z2) && self.y == rhs.y.mul(&z3)
    }

    /// Doubling via dbl-2009-l (specialized to `a = 0`, the case for both
    /// G1 and G2 on the BN curves this crate targets; see `CurveGroup::a`).
    pub fn double(&self, group: &CurveGroup<F>) -> JacobianPoint<F> {
        if self.infinite || self.y.is_zero() {
            return JacobianPoint::identity(&self.x);
        }
        debug_assert!(group.a.is_zero(), "dbl-2009-l as implemented assumes a == 0");
        let a = self.x.square(); // A = X1^2
        let b = self.y.square(); // B = Y1^2
        let c = b.square(); // C = B^2
        let d = self.x.add(&b).square().sub(&a).sub(&c).twice(); // D = 2*((X1+B)^2-A-C)
        let e = a.add(&a).add(&a); // E = 3*A
        let f = e.square(); // F = E^2
        let x3 = f.sub(&d.twice());
        let y3 = e.mul(&d.sub(&x3)).sub(&c.twice().twice().twice());
        let z3 = self.y.mul(&self.z).twice();
        JacobianPoint { x: x3, y: y3, z: z3, infinite: false }
    }

    /// Mixed addition, madd-2004-hmv: `self` in Jacobian, `rhs` in affine.
    pub fn add_mixed(&self, rhs: &AffinePoint<F>, group: &CurveGroup<F>) -> JacobianPoint<F> {
        if self.infinite {
            return rhs.to_jacobian();
        }
        if rhs.infinite {
            return self.clone();
        }
        let z1z1 = self.z.square();
        let u2 = rhs.x.mul(&z1z1);
        let s2 = rhs.y.mul(&self.z).mul(&z1z1);
        if self.x == u2 {
            if self.y == s2 {
                return self.double(group);
            }
            return JacobianPoint::identity(&self.x);
        }
        let h = u2.sub(&self.x);
        let hh = h.square();
        let i = hh.twice().twice();
        let j = h.mul(&i);
        let r = s2.sub(&self.y).twice();
        let v = self.x.mul(&i);
        let x3 = r.square().sub(&j).sub(&v.twice());
        let y3 = r.mul(&v.sub(&x3)).sub(&self.y.mul(&j).twice());
        let z3 = self.z.add(&h).square().sub(&z1z1).sub(&hh);
        JacobianPoint { x: x3, y: y3, z: z3, infinite: false }
    }

    /// `-self`.
    pub fn negate(&self) -> JacobianPoint<F> {
        JacobianPoint { x: self.x.clone(), y: self.y.negate(), z: self.z.clone(), infinite: self.infinite }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::Integer;
    use crate::field::{Fq, FieldParams};

    fn group_and_point() -> (CurveGroup<Fq>, AffinePoint<Fq>) {
        let f = FieldParams::new(Integer::from_u64(13));
        let a = Fq::zero(&f);
        let b = Fq::from_natural(&f, Integer::from_u64(3));
        let g = CurveGroup::new(a, b, Integer::from_u64(17), Integer::from_u64(1), true);
        let x = Fq::from_natural(&f, Integer::from_u64(1));
        let y = Fq::from_natural(&f, Integer::from_u64(2));
        (g, AffinePoint::new(x, y))
    }

    #[test]
    fn lift_and_lower_roundtrips() {
        let (_g, p) = group_and_point();
        let j = p.to_jacobian();
        assert!(j.to_affine() == p);
    }

    #[test]
    fn doubling_matches_affine_doubling() {
        let (g, p) = group_and_point();
        let j = p.to_jacobian();
        let doubled_affine = p.double(&g);
        let doubled_jacobian = j.double(&g).to_affine();
        assert!(doubled_affine == doubled_jacobian);
    }

    #[test]
    fn mixed_addition_matches_affine_addition() {
        let (g, p) = group_and_point();
        let doubled = p.double(&g);
        let sum_affine = p.add(&doubled, &g);
        let sum_mixed = p.to_jacobian().add_mixed(&doubled, &g).to_affine();
        assert!(sum_affine == sum_mixed);
    }

    #[test]
    fn is_valid_representation_detects_mismatch() {
        let (_g, p) = group_and_point();
        let j = p.to_jacobian();
        assert!(j.is_valid_representation_of(&p));
        let other_f = p.x.field.clone();
        let other = AffinePoint::new(Fq::from_natural(&other_f, Integer::from_u64(5)), p.y.clone());
        assert!(!j.is_valid_representation_of(&other));
    }
}
