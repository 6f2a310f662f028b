//! The curve-field handle (§3 "Curve field (group G1 or G2)"): coordinate
//! field, Weierstrass coefficients, group order, cofactor, and the
//! generator derived from it.

use rand::RngCore;

use crate::bigint::Integer;
use crate::curve::affine::AffinePoint;
use crate::curve::scalar_mul::ScalarMulMode;
use crate::curve::CurveField;

/// Parameters shared by every point drawn from one curve group (G1 over
/// `Fq`, or G2 over `Fq²`).
pub struct CurveGroup<F: CurveField> {
    /// Short Weierstrass `a` coefficient (zero for both G1 and G2 on the
    /// BN curves this crate targets).
    pub a: F,
    /// Short Weierstrass `b` coefficient (for G2, the sextic twist's `b/ξ`).
    pub b: F,
    /// `a * 3^-1`, precomputed per §3; only load-bearing when `a != 0`.
    pub a_third: F,
    /// The field element `3/2`, precomputed per §3 alongside `a_third`.
    pub three_halves: F,
    /// Prime order of the subgroup this group's points live in.
    pub r: Integer,
    /// Cofactor: `#E(Fq) = cofactor * r` (or the analogous twist count for G2).
    pub cofactor: Integer,
    /// Whether scalar multiplication should run in mixed affine/Jacobian
    /// mode (`true`) or pure affine mode (`false`).
    pub mixed: bool,
}

impl<F: CurveField> CurveGroup<F> {
    /// Build a group handle. `zero`/`one` give the caller a representative
    /// element of `F` to derive the field's own `zero`/`one` via
    /// [`CurveField::zero_like`]/[`CurveField::one_like`].
    pub fn new(a: F, b: F, r: Integer, cofactor: Integer, mixed: bool) -> Self {
        let three = a.one_like().add(&a.one_like()).add(&a.one_like());
        let a_third = if a.is_zero() { a.zero_like() } else { a.mul(&three.invert()) };
        let two_inv = a.one_like().add(&a.one_like()).invert();
        let three_halves = three.mul(&two_inv);
        CurveGroup { a, b, a_third, three_halves, r, cofactor, mixed }
    }

    /// The scalar-multiplication mode this group prescribes.
    pub fn mul_mode(&self) -> ScalarMulMode {
        if self.mixed { ScalarMulMode::Mixed } else { ScalarMulMode::Affine }
    }

    /// `true` iff `(x,y)` satisfies `y² = x³ + a·x + b`.
    pub fn on_curve(&self, x: &F, y: &F) -> bool {
        let lhs = y.square();
        let rhs = x.square().mul(x).add(&self.a.mul(x)).add(&self.b);
        lhs == rhs
    }

    /// Sample a uniformly random point in the prime-order subgroup: draw
    /// `x` until the curve equation has a square root, then clear the
    /// cofactor (§4.D "Random element / generator").
    pub fn random_point(
        &self,
        sample_fq: impl Fn(&mut dyn RngCore) -> F,
        sqrt: impl Fn(&F) -> Option<F>,
        rng: &mut dyn RngCore,
    ) -> AffinePoint<F> {
        loop {
            let x = sample_fq(rng);
            let rhs = x.square().mul(&x).add(&self.a.mul(&x)).add(&self.b);
            if let Some(y) = sqrt(&rhs) {
                let candidate = AffinePoint::new(x, y);
                let cleared = crate::curve::scalar_mul::scalar_mul(&candidate, &self.cofactor, self);
                if !cleared.infinite {
                    return cleared;
                }
            }
        }
    }
}
