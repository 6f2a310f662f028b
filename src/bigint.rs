//! Component A — arbitrary-precision integer facade (§4.A).
//!
//! [`Integer`] wraps [`num_bigint::BigInt`] (two's-complement, arbitrary
//! precision) and adds the operation surface §4.A lists that `num-bigint`
//! doesn't provide out of the box: probable-primality testing and
//! generation, the generalized Legendre/Jacobi symbol, integer square
//! root, and the `i2bsp`/`bs2ip`/`wnaf` byte-string and signed-digit
//! conversions used throughout the rest of the crate. Every other
//! component (`field`, `curve`, `mech1`) is built on top of this type
//! rather than reaching for `num_bigint` directly, so there is a single
//! place that owns "what an integer is" for this crate.

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer as _;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::RngCore;
use thiserror::Error;

/// Errors arising from the big-integer facade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BigIntError {
    /// A modular inverse was requested of a value not coprime to the modulus.
    #[error("{0} has no inverse mod {1}: gcd = {2}")]
    NotInvertible(String, String, String),
    /// `i2bsp` was asked to encode a negative integer, a negative bit
    /// length, or a value whose natural encoding exceeds `bit_len`.
    #[error("i2bsp overflow or invalid input: {0}")]
    EncodingOverflow(String),
}

/// Arbitrary-precision signed integer (§3 "Integer", §4.A).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

impl Integer {
    /// Zero.
    pub fn zero() -> Self {
        Integer(BigInt::zero())
    }

    /// One.
    pub fn one() -> Self {
        Integer(BigInt::one())
    }

    /// Build an `Integer` from any type `num_bigint::BigInt` can be built from.
    pub fn from_i64(v: i64) -> Self {
        Integer(BigInt::from(v))
    }

    /// Build an `Integer` from an unsigned 64-bit value.
    pub fn from_u64(v: u64) -> Self {
        Integer(BigInt::from(v))
    }

    /// View as a `BigInt` reference (escape hatch for this module's siblings).
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// Wrap a `BigInt`.
    pub fn from_bigint(v: BigInt) -> Self {
        Integer(v)
    }

    /// Wrap a non-negative `BigUint`.
    pub fn from_biguint(v: BigUint) -> Self {
        Integer(BigInt::from_biguint(Sign::Plus, v))
    }

    /// Convert to a `BigUint`, assuming (and debug-asserting) non-negativity.
    pub fn to_biguint(&self) -> BigUint {
        debug_assert!(!self.0.is_negative(), "to_biguint called on a negative Integer");
        self.0.to_biguint().unwrap_or_else(BigUint::zero)
    }

    /// `true` iff the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `-1`, `0`, or `1` according to the sign of the value.
    pub fn signum(&self) -> i32 {
        if self.0.is_negative() {
            -1
        } else if self.0.is_zero() {
            0
        } else {
            1
        }
    }

    /// Number of bits in the magnitude's minimal two's-complement-free
    /// representation (i.e. `bit_length()` as Java's `BigInteger` defines it).
    pub fn bit_length(&self) -> u64 {
        self.0.magnitude().bits()
    }

    /// `self + rhs`.
    pub fn add(&self, rhs: &Integer) -> Integer {
        Integer(&self.0 + &rhs.0)
    }

    /// `self - rhs`.
    pub fn sub(&self, rhs: &Integer) -> Integer {
        Integer(&self.0 - &rhs.0)
    }

    /// `self * rhs`.
    pub fn mul(&self, rhs: &Integer) -> Integer {
        Integer(&self.0 * &rhs.0)
    }

    /// `self * self`.
    pub fn square(&self) -> Integer {
        Integer(&self.0 * &self.0)
    }

    /// Negation.
    pub fn neg(&self) -> Integer {
        Integer(-&self.0)
    }

    /// Truncating division and remainder, `(self / rhs, self % rhs)`.
    pub fn div_rem(&self, rhs: &Integer) -> (Integer, Integer) {
        let (q, r) = self.0.div_rem(&rhs.0);
        (Integer(q), Integer(r))
    }

    /// Euclidean modulo: the unique representative in `[0, |rhs|)`.
    pub fn modulo(&self, rhs: &Integer) -> Integer {
        Integer(self.0.mod_floor(&rhs.0))
    }

    /// Modular exponentiation `self^exp mod modulus` (exp may be any sign
    /// only when `self` is invertible mod `modulus`; non-negative exponents
    /// are always supported).
    pub fn modpow(&self, exp: &Integer, modulus: &Integer) -> Integer {
        if exp.0.is_negative() {
            let base_inv = self
                .mod_inverse(modulus)
                .expect("modpow with negative exponent requires an invertible base");
            let pos_exp = Integer((-&exp.0).to_biguint().unwrap().into());
            base_inv.modpow(&pos_exp, modulus)
        } else {
            let base_u = self.modulo(modulus).to_biguint();
            let exp_u = exp.0.to_biguint().expect("exp must be non-negative here");
            let m_u = modulus.to_biguint();
            Integer::from_biguint(base_u.modpow(&exp_u, &m_u))
        }
    }

    /// Greatest common divisor (always non-negative).
    pub fn gcd(&self, rhs: &Integer) -> Integer {
        Integer(self.0.gcd(&rhs.0))
    }

    /// Modular inverse via the extended Euclidean algorithm. Fails with
    /// [`BigIntError::NotInvertible`] when `gcd(self, modulus) != 1`.
    pub fn mod_inverse(&self, modulus: &Integer) -> Result<Integer, BigIntError> {
        let (g, x, _y) = extended_gcd(&self.0, &modulus.0);
        if g != BigInt::one() && g != -BigInt::one() {
            return Err(BigIntError::NotInvertible(
                self.0.to_string(),
                modulus.0.to_string(),
                g.to_string(),
            ));
        }
        let m = modulus.0.magnitude().clone();
        let x_mod = x.mod_floor(&BigInt::from_biguint(Sign::Plus, m));
        Ok(Integer(x_mod))
    }

    /// Shift left by `n` bits (`self * 2^n`).
    pub fn shl(&self, n: u64) -> Integer {
        Integer(&self.0 << n)
    }

    /// Arithmetic shift right by `n` bits (`self / 2^n`, rounding toward `-inf`).
    pub fn shr(&self, n: u64) -> Integer {
        Integer(&self.0 >> n)
    }

    /// Test whether bit `n` (0-indexed, little-endian) is set in the
    /// two's-complement representation.
    pub fn test_bit(&self, n: u64) -> bool {
        self.0.bit(n)
    }

    /// Return a copy with bit `n` set.
    pub fn set_bit(&self, n: u64) -> Integer {
        let mut v = self.0.clone();
        v.set_bit(n, true);
        Integer(v)
    }

    /// The smallest probable prime strictly greater than `self`.
    ///
    /// Trial-divides by small primes before falling back to Miller–Rabin,
    /// the same cheap-filter-then-expensive-test shape as Java's
    /// `BigInteger::nextProbablePrime`.
    pub fn next_probable_prime(&self, rng: &mut impl RngCore) -> Integer {
        let mut candidate = if self.0.is_negative() || self.0.is_zero() {
            BigInt::from(2)
        } else if self.test_bit(0) {
            &self.0 + BigInt::from(2)
        } else {
            &self.0 + BigInt::one()
        };
        loop {
            let c_u = candidate.to_biguint().expect("candidate is non-negative by construction");
            if is_probable_prime(&c_u, 40, rng) {
                return Integer(candidate);
            }
            candidate += BigInt::from(2);
        }
    }

    /// A random probable prime of exactly `bit_length` bits, with Miller–Rabin
    /// `certainty` (error probability bounded by `4^-certainty`).
    pub fn probable_prime(bit_length: u64, certainty: u32, rng: &mut impl RngCore) -> Integer {
        assert!(bit_length >= 2, "probable_prime requires bit_length >= 2");
        loop {
            let mut cand = rng.gen_biguint(bit_length as usize);
            cand.set_bit(bit_length - 1, true);
            cand.set_bit(0, true);
            if cand.bits() == bit_length && is_probable_prime(&cand, certainty, rng) {
                return Integer::from_biguint(cand);
            }
        }
    }

    /// A uniformly random non-negative integer of exactly `bit_length` bits
    /// (top bit set, per the same convention `probable_prime` uses).
    /// `bit_length == 0` yields zero.
    pub fn random_bits(bit_length: u64, rng: &mut impl RngCore) -> Integer {
        if bit_length == 0 {
            return Integer::zero();
        }
        let mut v = rng.gen_biguint(bit_length as usize);
        v.set_bit(bit_length - 1, true);
        Integer::from_biguint(v)
    }

    /// `true` iff `self` passes a Miller–Rabin test with `certainty` rounds.
    pub fn is_probable_prime(&self, certainty: u32, rng: &mut impl RngCore) -> bool {
        if self.0.is_negative() {
            return false;
        }
        is_probable_prime(&self.0.to_biguint().unwrap_or_else(BigUint::zero), certainty, rng)
    }

    /// Generalized Legendre/Jacobi symbol `(self / n)` for odd positive `n`.
    /// Returns `-1`, `0`, or `1`.
    pub fn jacobi_symbol(&self, n: &Integer) -> i32 {
        jacobi(&self.0, &n.0)
    }

    /// Integer square root by binary search: the largest `r` with `r*r <= self`.
    pub fn isqrt(&self) -> Integer {
        assert!(!self.0.is_negative(), "isqrt requires a non-negative integer");
        if self.0.is_zero() {
            return Integer::zero();
        }
        let n = &self.0;
        let mut lo = BigInt::zero();
        let mut hi = n.clone() + BigInt::one();
        // Invariant: lo*lo <= n < hi*hi.
        while &hi - &lo > BigInt::one() {
            let mid = (&lo + &hi) >> 1u32;
            if &mid * &mid <= *n {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Integer(lo)
    }

    /// Render in the given radix (2..=36).
    pub fn to_str_radix(&self, radix: u32) -> String {
        self.0.to_str_radix(radix)
    }

    /// Parse from the given radix (2..=36).
    pub fn from_str_radix(s: &str, radix: u32) -> Option<Integer> {
        BigInt::parse_bytes(s.as_bytes(), radix).map(Integer)
    }

    /// `i2bsp(n, bit_len)`: big-endian byte array of length
    /// `ceil(bit_len / 8)`, left-padded with zero bytes. Fails when `n` is
    /// negative, `bit_len` is negative, or the natural encoding would not
    /// fit in the target length.
    pub fn i2bsp(&self, bit_len: i64) -> Result<Vec<u8>, BigIntError> {
        if self.0.is_negative() || bit_len < 0 {
            return Err(BigIntError::EncodingOverflow(
                "i2bsp requires a non-negative integer and non-negative bit_len".into(),
            ));
        }
        let byte_len = ((bit_len as u64) + 7) / 8;
        let natural = self.0.to_biguint().unwrap_or_else(BigUint::zero).to_bytes_be();
        if natural.len() as u64 > byte_len {
            return Err(BigIntError::EncodingOverflow(format!(
                "value needs {} bytes but bit_len only allows {}",
                natural.len(),
                byte_len
            )));
        }
        let mut out = vec![0u8; byte_len as usize];
        let offset = out.len() - natural.len();
        out[offset..].copy_from_slice(&natural);
        Ok(out)
    }

    /// Unsigned `i2bsp(n)`: the minimal big-endian encoding with no leading
    /// sign byte, i.e. `i2bsp(n, bit_length(n))` (or a single zero byte for
    /// `n == 0`).
    pub fn i2bsp_unsigned(&self) -> Result<Vec<u8>, BigIntError> {
        let bits = self.bit_length().max(1);
        self.i2bsp(bits as i64)
    }

    /// `bs2ip`: read an unsigned big-endian byte string into an `Integer`.
    pub fn bs2ip(bytes: &[u8]) -> Integer {
        Integer::from_biguint(BigUint::from_bytes_be(bytes))
    }
}

/// Optimal wNAF window size per §4.A's table, keyed by operand bit length.
pub fn optimal_wnaf_window(bit_length: u64) -> u32 {
    match bit_length {
        b if b > 9065 => 8,
        b if b > 3529 => 7,
        b if b > 1324 => 6,
        b if b > 474 => 5,
        b if b > 157 => 4,
        b if b > 47 => 3,
        _ => 2,
    }
}

/// Width-`w` non-adjacent form of `n`: digits `d_0, ..., d_l` with
/// `d_i` odd-or-zero in `[-2^(w-1), 2^(w-1)-1]`, `n = sum d_i * 2^i`, and a
/// nonzero last entry (§4.A).
pub fn wnaf(n: &Integer, w: u32) -> Vec<i8> {
    assert!((2..=8).contains(&w), "wnaf window must be in 2..=8");
    if n.is_zero() {
        return vec![0];
    }
    let mut k = n.0.clone();
    let negative = k.is_negative();
    if negative {
        k = -k;
    }
    let modulus = BigInt::one() << w;
    let half = BigInt::one() << (w - 1);
    let mut digits = Vec::new();
    while !k.is_zero() {
        if k.bit(0) {
            let mut d = &k % &modulus;
            if d >= half {
                d -= &modulus;
            }
            k -= &d;
            digits.push(d.to_i8().expect("wnaf digit fits in i8 for w <= 8"));
        } else {
            digits.push(0);
        }
        k >>= 1u32;
    }
    if negative {
        for d in digits.iter_mut() {
            *d = -*d;
        }
    }
    while digits.len() > 1 && *digits.last().unwrap() == 0 {
        digits.pop();
    }
    digits
}

/// Extended Euclidean algorithm: returns `(g, x, y)` with `g = gcd(a,b)`
/// and `a*x + b*y = g`.
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());
    while !r.is_zero() {
        let q = &old_r / &r;
        let new_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, new_r);
        let new_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, new_s);
        let new_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, new_t);
    }
    (old_r, old_s, old_t)
}

/// Jacobi symbol `(a / n)` for odd `n > 0`. Extends to negative/zero `a`
/// via the standard reciprocity rules.
fn jacobi(a: &BigInt, n: &BigInt) -> i32 {
    assert!(n.is_positive() && n.is_odd(), "jacobi symbol requires odd positive n");
    if n.is_one() {
        return 1;
    }
    let mut a = a.mod_floor(n);
    let mut n = n.clone();
    let mut result = 1i32;
    while !a.is_zero() {
        while a.is_even() {
            a >>= 1u32;
            let r = (&n % BigInt::from(8)).to_i32().unwrap();
            if r == 3 || r == 5 {
                result = -result;
            }
        }
        std::mem::swap(&mut a, &mut n);
        let a_mod4 = (&a % BigInt::from(4)).to_i32().unwrap();
        let n_mod4 = (&n % BigInt::from(4)).to_i32().unwrap();
        if a_mod4 == 3 && n_mod4 == 3 {
            result = -result;
        }
        a = a.mod_floor(&n);
    }
    if n.is_one() {
        result
    } else {
        0
    }
}

/// Miller–Rabin probable-primality test with `rounds` random witnesses
/// (error probability bounded by `4^-rounds`), preceded by trial division
/// by small primes as a cheap filter.
fn is_probable_prime(n: &BigUint, rounds: u32, rng: &mut impl RngCore) -> bool {
    const SMALL_PRIMES: &[u64] = &[
        2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83,
        89, 97,
    ];
    if n.is_zero() || *n == BigUint::one() {
        return false;
    }
    for &p in SMALL_PRIMES {
        let bp = BigUint::from(p);
        if *n == bp {
            return true;
        }
        if (n % &bp).is_zero() {
            return false;
        }
    }
    // n - 1 = d * 2^r, d odd.
    let one = BigUint::one();
    let n_minus_1 = n - &one;
    let mut d = n_minus_1.clone();
    let mut r = 0u64;
    while d.is_even() {
        d >>= 1u32;
        r += 1;
    }
    'witness: for _ in 0..rounds.max(1) {
        // witness in [2, n-2]
        let a = rng.gen_biguint_range(&BigUint::from(2u32), &(n - &BigUint::from(2u32)));
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_1 {
            continue 'witness;
        }
        for _ in 0..r.saturating_sub(1) {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(714159265)
    }

    #[test]
    fn add_sub_mul_roundtrip() {
        let a = Integer::from_i64(123456789);
        let b = Integer::from_i64(987654321);
        assert_eq!(a.add(&b).sub(&b), a);
        assert_eq!(a.mul(&b), b.mul(&a));
        assert_eq!(a.square(), a.mul(&a));
    }

    #[test]
    fn mod_inverse_works() {
        let a = Integer::from_i64(17);
        let m = Integer::from_i64(3120);
        let inv = a.mod_inverse(&m).unwrap();
        assert_eq!(a.mul(&inv).modulo(&m), Integer::one());
    }

    #[test]
    fn mod_inverse_fails_when_not_coprime() {
        let a = Integer::from_i64(6);
        let m = Integer::from_i64(9);
        assert!(a.mod_inverse(&m).is_err());
    }

    #[test]
    fn i2bsp_roundtrip() {
        let n = Integer::from_u64(0x1234);
        let bytes = n.i2bsp(32).unwrap();
        assert_eq!(bytes.len(), 4);
        assert_eq!(Integer::bs2ip(&bytes), n);
    }

    #[test]
    fn i2bsp_rejects_overflow() {
        let n = Integer::from_u64(0xFFFF_FFFF);
        assert!(n.i2bsp(8).is_err());
    }

    #[test]
    fn jacobi_symbol_matches_known_values() {
        assert_eq!(Integer::from_i64(1001).jacobi_symbol(&Integer::from_i64(9907)), -1);
        assert_eq!(Integer::from_i64(19).jacobi_symbol(&Integer::from_i64(45)), 1);
        assert_eq!(Integer::from_i64(8).jacobi_symbol(&Integer::from_i64(21)), -1);
    }

    #[test]
    fn isqrt_matches_known_values() {
        assert_eq!(Integer::from_u64(99).isqrt(), Integer::from_u64(9));
        assert_eq!(Integer::from_u64(100).isqrt(), Integer::from_u64(10));
    }

    #[test]
    fn wnaf_reconstructs_value() {
        let n = Integer::from_i64(123456789);
        let digits = wnaf(&n, 4);
        let mut acc = BigInt::zero();
        for (i, d) in digits.iter().enumerate() {
            acc += BigInt::from(*d) << i;
        }
        assert_eq!(Integer(acc), n);
    }

    #[test]
    fn probable_prime_generation_is_prime() {
        let mut r = rng();
        let p = Integer::probable_prime(64, 20, &mut r);
        assert!(p.is_probable_prime(20, &mut r));
        assert_eq!(p.bit_length(), 64);
    }

    #[test]
    fn next_probable_prime_finds_a_prime_above_input() {
        let mut r = rng();
        let p = Integer::from_u64(100).next_probable_prime(&mut r);
        assert!(p > Integer::from_u64(100));
        assert!(p.is_probable_prime(20, &mut r));
        assert_eq!(p, Integer::from_u64(101));
    }
}
