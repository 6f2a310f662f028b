//! Component B — the prime field `Fq` (§4.B, §3 "Field element (Fq)").
//!
//! A field is a [`FieldParams`] handle (the modulus `q` plus the derived
//! constants §3 lists: the halving constant, the quartering constant, a
//! lazily-chosen non-quadratic-residue cache for square roots, and the
//! additive buffer `Qn = q * 2^bitlen(q)` used to keep double-precision
//! subtraction non-negative) shared by every [`Fq`] element drawn from it.
//! Montgomery representation is a property of the handle, not a distinct
//! permanently-linked sibling type (§9 Design Notes): constructing a
//! Montgomery-mode handle for the same `q` gives you a second, independent
//! `FieldParams`.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::bigint::Integer;
use crate::field::pool::Pool;

/// Errors arising in the prime-field layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// `sqrt` was asked for an element whose Legendre symbol is not `+1`.
    #[error("no square root exists: Legendre symbol != +1")]
    NotAResidue,
}

/// Shared, immutable parameters of a prime field `Fq` (§3).
pub struct FieldParams {
    /// The modulus `q`.
    pub q: Integer,
    /// `bitlen(q)`.
    pub bit_len: u64,
    /// `floor((q+1)/2)`, used by `div_by_two` when `q` is odd.
    pub half: Integer,
    /// `floor((q+1)/4)`, used by `div_by_four` and by the `sqrt` fast path
    /// when `q ≡ 3 (mod 4)`.
    pub quarter: Integer,
    /// `q * 2^bitlen(q)`, an additive buffer keeping double-precision
    /// subtraction non-negative (`subOpt1`).
    pub qn: Integer,
    /// Lazily-chosen quadratic non-residue, cached for repeated `sqrt` calls.
    nqr: RefCell<Option<Integer>>,
    /// Whether elements of this handle live in the Montgomery domain.
    pub montgomery: bool,
    /// Montgomery radix `R = 2^bitlen(q)` (only meaningful if `montgomery`).
    pub r: Integer,
    /// `R^-1 mod q` (only meaningful if `montgomery`).
    pub r_inv: Integer,
    /// Pool of blank single-precision residues.
    pub pool: Pool<Integer>,
    /// Pool of blank double-precision residues.
    pub pool_double: Pool<Integer>,
}

impl FieldParams {
    /// Build a direct-representation (non-Montgomery) field handle for modulus `q`.
    pub fn new(q: Integer) -> Rc<FieldParams> {
        Self::build(q, false)
    }

    /// Build a Montgomery-representation field handle for modulus `q`.
    pub fn new_montgomery(q: Integer) -> Rc<FieldParams> {
        Self::build(q, true)
    }

    fn build(q: Integer, montgomery: bool) -> Rc<FieldParams> {
        let bit_len = q.bit_length();
        let one = Integer::one();
        let two = Integer::from_u64(2);
        let four = Integer::from_u64(4);
        let half = q.add(&one).div_rem(&two).0;
        let quarter = q.add(&one).div_rem(&four).0;
        let qn = q.mul(&Integer::one().shl(bit_len));
        let r = Integer::one().shl(bit_len);
        let r_inv = if montgomery {
            r.mod_inverse(&q).expect("R must be invertible mod an odd q")
        } else {
            Integer::one()
        };
        Rc::new(FieldParams {
            q,
            bit_len,
            half,
            quarter,
            qn,
            nqr: RefCell::new(None),
            montgomery,
            r,
            r_inv,
            pool: Pool::new(64),
            pool_double: Pool::new(32),
        })
    }

    /// Lazily find and cache a quadratic non-residue mod `q`, trying small
    /// odd candidates in order.
    fn non_residue(&self) -> Integer {
        if let Some(n) = self.nqr.borrow().as_ref() {
            return n.clone();
        }
        let mut candidate = Integer::from_u64(2);
        let one = Integer::one();
        loop {
            if candidate.jacobi_symbol(&self.q) == -1 {
                *self.nqr.borrow_mut() = Some(candidate.clone());
                return candidate;
            }
            candidate = candidate.add(&one);
        }
    }

    /// Convert a natural-domain residue into this handle's representation.
    pub fn to_domain(&self, natural: Integer) -> Integer {
        if self.montgomery {
            natural.mul(&self.r).modulo(&self.q)
        } else {
            natural
        }
    }

    /// Convert an element of this handle's representation back to natural domain.
    pub fn from_domain(&self, v: &Integer) -> Integer {
        if self.montgomery {
            v.mul(&self.r_inv).modulo(&self.q)
        } else {
            v.clone()
        }
    }
}

/// An element of `Fq` (single precision: residue in `[0, q)`, or in the
/// Montgomery domain when `field.montgomery` is set).
#[derive(Clone)]
pub struct Fq {
    pub field: Rc<FieldParams>,
    pub v: Integer,
}

/// A double-precision `Fq` element: residue in `[0, q^2)`, deferred
/// reduction (`mulDouble`/`squareDouble` produce these; `.modd()` reduces).
#[derive(Clone)]
pub struct FqDouble {
    pub field: Rc<FieldParams>,
    pub v: Integer,
}

impl Fq {
    /// The additive identity.
    pub fn zero(field: &Rc<FieldParams>) -> Fq {
        Fq { field: field.clone(), v: field.to_domain(Integer::zero()) }
    }

    /// The multiplicative identity.
    pub fn one(field: &Rc<FieldParams>) -> Fq {
        Fq { field: field.clone(), v: field.to_domain(Integer::one()) }
    }

    /// Build directly from a natural-domain value, converting into the
    /// handle's representation.
    pub fn from_natural(field: &Rc<FieldParams>, natural: Integer) -> Fq {
        let reduced = natural.modulo(&field.q);
        Fq { field: field.clone(), v: field.to_domain(reduced) }
    }

    /// The natural-domain value of this element (egress from Montgomery if needed).
    pub fn to_natural(&self) -> Integer {
        self.field.from_domain(&self.v)
    }

    /// `true` iff this element is zero.
    pub fn is_zero(&self) -> bool {
        self.v.is_zero()
    }

    fn raw_mul(&self, a: &Integer, b: &Integer) -> Integer {
        if self.field.montgomery {
            // Simplified Montgomery multiplication: (a*b*Rinv) mod q. A
            // production REDC ladder would avoid the extra reduction; this
            // crate trades that micro-optimization for a direct, auditable
            // formula (no timing claims are made anywhere in this crate).
            a.mul(b).mul(&self.field.r_inv).modulo(&self.field.q)
        } else {
            a.mul(b).modulo(&self.field.q)
        }
    }

    /// `self + rhs`.
    pub fn add(&self, rhs: &Fq) -> Fq {
        Fq { field: self.field.clone(), v: self.v.add(&rhs.v).modulo(&self.field.q) }
    }

    /// `self - rhs`.
    pub fn sub(&self, rhs: &Fq) -> Fq {
        Fq { field: self.field.clone(), v: self.v.sub(&rhs.v).modulo(&self.field.q) }
    }

    /// `self + rhs` without a final reduction (result may lie in `[0, 2q)`).
    pub fn add_no_reduction(&self, rhs: &Fq) -> Fq {
        Fq { field: self.field.clone(), v: self.v.add(&rhs.v) }
    }

    /// `self - rhs` without normalizing away a possible negative result.
    pub fn sub_no_reduction(&self, rhs: &Fq) -> Fq {
        Fq { field: self.field.clone(), v: self.v.sub(&rhs.v) }
    }

    /// `self * rhs`.
    pub fn mul(&self, rhs: &Fq) -> Fq {
        Fq { field: self.field.clone(), v: self.raw_mul(&self.v, &rhs.v) }
    }

    /// `self * self`.
    pub fn square(&self) -> Fq {
        self.mul(self)
    }

    /// Additive inverse.
    pub fn negate(&self) -> Fq {
        if self.v.is_zero() {
            return self.clone();
        }
        Fq { field: self.field.clone(), v: self.field.q.sub(&self.v) }
    }

    /// Multiplicative inverse (via the big-integer facade's extended
    /// Euclidean modular inverse on the natural-domain value).
    pub fn invert(&self) -> Fq {
        let nat = self.to_natural();
        let inv_nat = nat.mod_inverse(&self.field.q).expect("Fq::invert called on zero");
        Fq::from_natural(&self.field, inv_nat)
    }

    /// `2*self`.
    pub fn twice(&self) -> Fq {
        self.add(self)
    }

    /// `self/2`, using `floor((q+1)/2)` when `q` is odd (multiply by the
    /// precomputed halving constant rather than dividing).
    pub fn div_by_two(&self) -> Fq {
        if self.v.test_bit(0) {
            Fq {
                field: self.field.clone(),
                v: self.v.add(&self.field.q).div_rem(&Integer::from_u64(2)).0,
            }
        } else {
            Fq { field: self.field.clone(), v: self.v.div_rem(&Integer::from_u64(2)).0 }
        }
    }

    /// `self/4` (two applications of `div_by_two`).
    pub fn div_by_four(&self) -> Fq {
        self.div_by_two().div_by_two()
    }

    /// `Qn + self - rhs` reduced afterwards to keep the result
    /// non-negative before a tower-level multiplication (`subOpt1`, §4.B).
    pub fn sub_opt1(&self, rhs: &Fq) -> Fq {
        let buffered = self.field.qn.add(&self.v).sub(&rhs.v);
        Fq { field: self.field.clone(), v: buffered.modulo(&self.field.q) }
    }

    /// Square root via Tonelli–Shanks, using the cached non-residue.
    /// Returns `Err(FieldError::NotAResidue)` when the Legendre symbol of
    /// `self` is not `+1`.
    pub fn sqrt(&self) -> Result<Fq, FieldError> {
        let nat = self.to_natural();
        if nat.is_zero() {
            return Ok(Fq::zero(&self.field));
        }
        if nat.jacobi_symbol(&self.field.q) != 1 {
            return Err(FieldError::NotAResidue);
        }
        let q = &self.field.q;
        let three = Integer::from_u64(3);
        let four = Integer::from_u64(4);
        // Fast path q ≡ 3 (mod 4): sqrt = self^((q+1)/4).
        if q.modulo(&four) == three {
            let root = nat.modpow(&self.field.quarter, q);
            return Ok(Fq::from_natural(&self.field, root));
        }
        // General Tonelli–Shanks.
        let one = Integer::one();
        let two = Integer::from_u64(2);
        let q_minus_1 = q.sub(&one);
        let mut s = 0u64;
        let mut qm1 = q_minus_1.clone();
        while qm1.modulo(&two).is_zero() {
            qm1 = qm1.div_rem(&two).0;
            s += 1;
        }
        let qd = qm1; // q - 1 = qd * 2^s, qd odd.
        let z = self.field.non_residue();
        let mut m = s;
        let mut c = z.modpow(&qd, q);
        let mut t = nat.modpow(&qd, q);
        let mut r = nat.modpow(&qd.add(&one).div_rem(&two).0, q);
        while t != one {
            // Find least i, 0 < i < m, such that t^(2^i) == 1.
            let mut i = 0u64;
            let mut t2i = t.clone();
            while t2i != one {
                t2i = t2i.mul(&t2i).modulo(q);
                i += 1;
                if i == m {
                    return Err(FieldError::NotAResidue);
                }
            }
            let mut b = c.clone();
            for _ in 0..(m - i - 1) {
                b = b.mul(&b).modulo(q);
            }
            m = i;
            c = b.mul(&b).modulo(q);
            t = t.mul(&c).modulo(q);
            r = r.mul(&b).modulo(q);
        }
        Ok(Fq::from_natural(&self.field, r))
    }

    /// Produce the double-precision `self * rhs` without a final reduction.
    pub fn mul_double(&self, rhs: &Fq) -> FqDouble {
        FqDouble { field: self.field.clone(), v: self.v.mul(&rhs.v) }
    }

    /// Produce the double-precision `self * self` without a final reduction.
    pub fn square_double(&self) -> FqDouble {
        self.mul_double(self)
    }
}

impl PartialEq for Fq {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v
    }
}
impl Eq for Fq {}

impl FqDouble {
    /// Reduce back to a single-precision `Fq` element.
    pub fn modd(&self) -> Fq {
        Fq { field: self.field.clone(), v: self.v.modulo(&self.field.q) }
    }

    /// `self + rhs` in double precision, no reduction.
    pub fn add(&self, rhs: &FqDouble) -> FqDouble {
        FqDouble { field: self.field.clone(), v: self.v.add(&rhs.v) }
    }

    /// `Qn^2-buffered self - rhs` in double precision (see `Fq::sub_opt1`);
    /// `field.qn` already carries one factor of `q`, so the buffer used
    /// here is `qn * q` to stay clear of the doubled magnitude.
    pub fn sub_opt1(&self, rhs: &FqDouble) -> FqDouble {
        let buffer = self.field.qn.mul(&self.field.q);
        FqDouble { field: self.field.clone(), v: buffer.add(&self.v).sub(&rhs.v) }
    }
}
