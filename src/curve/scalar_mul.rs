//! Windowed-NAF scalar multiplication (§4.D "Scalar multiplication").

use crate::bigint::{self, Integer};
use crate::curve::affine::AffinePoint;
use crate::curve::group::CurveGroup;
use crate::curve::jacobian::JacobianPoint;
use crate::curve::CurveField;

/// Whether the accumulator during scalar multiplication is kept in affine
/// coordinates throughout, or lifted to Jacobian with affine table entries
/// ("mixed mode", §4.D).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScalarMulMode {
    Affine,
    Mixed,
}

/// Precompute `P, 3P, 5P, ..., (2^(w-1)-1)P` by one doubling and `2^(w-2)-1`
/// additions (§4.D: "a single doubling and w/2 additions").
fn build_table<F: CurveField>(p: &AffinePoint<F>, w: u32, group: &CurveGroup<F>) -> Vec<AffinePoint<F>> {
    let count = 1usize << (w.max(2) as usize - 2); // number of odd multiples 1..2^(w-1)-1
    let mut table = Vec::with_capacity(count);
    table.push(p.clone());
    if count > 1 {
        let two_p = p.double(group);
        for i in 1..count {
            let prev = table[i - 1].clone();
            table.push(prev.add(&two_p, group));
        }
    }
    table
}

fn table_entry<F: CurveField>(table: &[AffinePoint<F>], digit: i8) -> AffinePoint<F> {
    let idx = ((digit.unsigned_abs() as usize) - 1) / 2;
    let entry = table[idx].clone();
    if digit < 0 {
        entry.negate()
    } else {
        entry
    }
}

/// `[k]P`, choosing the optimal wNAF window for `k`'s bit length and
/// running in the mode `group.mul_mode()` prescribes. `k == 0` yields
/// infinity, `k == 1` yields `self`, and an infinite input is absorbing.
pub fn scalar_mul<F: CurveField>(p: &AffinePoint<F>, k: &Integer, group: &CurveGroup<F>) -> AffinePoint<F> {
    if p.infinite || k.is_zero() {
        return AffinePoint::identity(&p.x);
    }
    let w = bigint::optimal_wnaf_window(k.bit_length());
    let table = build_table(p, w, group);
    let digits = bigint::wnaf(k, w);

    match group.mul_mode() {
        ScalarMulMode::Affine => {
            let mut acc = AffinePoint::identity(&p.x);
            for &d in digits.iter().rev() {
                acc = acc.double(group);
                if d != 0 {
                    acc = acc.add(&table_entry(&table, d), group);
                }
            }
            acc
        }
        ScalarMulMode::Mixed => {
            let mut acc = JacobianPoint::identity(&p.x);
            for &d in digits.iter().rev() {
                acc = acc.double(group);
                if d != 0 {
                    acc = acc.add_mixed(&table_entry(&table, d), group);
                }
            }
            acc.to_affine()
        }
    }
}
