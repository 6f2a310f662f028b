//! Component F — hashing and encoding utilities (§4.F).
//!
//! `i2bsp`/`bs2ip` live on [`crate::bigint::Integer`] directly; this module
//! adds the length-extended hash `HL`, hash-to-field (`HBS2PF2`), and
//! hash-to-curve (`HBS2ECP`) built on top of it.

use std::rc::Rc;

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::bigint::Integer;
use crate::curve::group::CurveGroup;
use crate::curve::{AffinePoint, CurveError};
use crate::field::{Fq, Fq2, Fq2Params, FieldParams};

/// The hash primitive backing `HL`/`HBS2PF2`/`HBS2ECP`, selected per §6's
/// `hash_algorithm` scheme parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Parse a scheme-configuration hash identifier.
    pub fn from_identifier(s: &str) -> Option<HashAlgorithm> {
        match s {
            "sha1" => Some(HashAlgorithm::Sha1),
            "sha256" => Some(HashAlgorithm::Sha256),
            "sha512" => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// One-shot digest.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

/// `HL(seed, bit_len)`: an MGF1-style length-extended hash producing
/// `ceil(bit_len/8)` bytes' worth of pseudorandomness as an `Integer`.
///
/// The loop bound and byte selection follow the **documented source
/// behavior** rather than a literal reading of the standard: the block
/// count is `ceil(byte_len / hash_len) + 1` (one block beyond the naive
/// ceiling,
/// `++i <= ...` rather than `i < ...`), and the final value is taken from
/// the **trailing** `byte_len` bytes of the concatenated blocks rather
/// than the leading ones.
pub fn hl(seed: &[u8], bit_len: u64, alg: HashAlgorithm) -> Integer {
    let byte_len = ((bit_len + 7) / 8) as usize;
    let h = alg.output_len();
    let blocks = (byte_len + h - 1) / h + 1;
    let mut buf = Vec::with_capacity(blocks * h);
    for i in 1..=blocks as u32 {
        let mut input = Vec::with_capacity(seed.len() + 4);
        input.extend_from_slice(seed);
        input.extend_from_slice(&i.to_be_bytes());
        buf.extend_from_slice(&alg.digest(&input));
    }
    let trailing = &buf[buf.len() - byte_len..];
    Integer::bs2ip(trailing)
}

/// Byte-string sibling of [`hl`]: the same MGF1-style block construction,
/// but returning the raw trailing `byte_len` bytes rather than folding them
/// into an `Integer`. Used by transcript-building code that wants a fixed
/// byte string (a nonce, a linking-base salt) rather than a field/ring
/// element.
pub fn hl_bytes(seed: &[u8], byte_len: usize, alg: HashAlgorithm) -> Vec<u8> {
    let h = alg.output_len();
    let blocks = (byte_len + h - 1) / h + 1;
    let mut buf = Vec::with_capacity(blocks * h);
    for i in 1..=blocks as u32 {
        let mut input = Vec::with_capacity(seed.len() + 4);
        input.extend_from_slice(seed);
        input.extend_from_slice(&i.to_be_bytes());
        buf.extend_from_slice(&alg.digest(&input));
    }
    buf[buf.len() - byte_len..].to_vec()
}

/// A Fiat–Shamir transcript builder: accumulates the exact byte
/// concatenation §6 requires ("preserve that order, unpadded where
/// components are big integers") and reduces it to a challenge via [`hl`].
/// Used by `mech1`/`mech4`'s sign/verify/join proofs so every challenge is
/// built the same way rather than each call site hand-rolling `Vec<u8>`
/// concatenation.
pub struct Transcript(Vec<u8>);

impl Transcript {
    pub fn new() -> Self {
        Transcript(Vec::new())
    }

    /// Append a big integer's unsigned encoding, unpadded.
    pub fn int(mut self, v: &Integer) -> Self {
        self.0.extend_from_slice(&v.i2bsp_unsigned().unwrap_or_default());
        self
    }

    /// Append raw bytes (a message, a linking base, a domain tag).
    pub fn bytes(mut self, v: &[u8]) -> Self {
        self.0.extend_from_slice(v);
        self
    }

    /// Reduce the accumulated transcript to a `bit_len`-bit challenge.
    pub fn challenge(self, bit_len: u64, alg: HashAlgorithm) -> Integer {
        hl(&self.0, bit_len, alg)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Transcript::new()
    }
}

/// `HBS2PF2`: hash arbitrary bytes into `Fq`, expanding to `bitlen(q) + 128`
/// bits before reducing mod `q` to keep the bias from the reduction
/// negligible. Always succeeds (every bit string reduces to a valid
/// element), matching §8's "never fails" testable property.
pub fn hash_to_fq(field: &Rc<FieldParams>, data: &[u8], alg: HashAlgorithm) -> Fq {
    let wide = hl(data, field.bit_len + 128, alg);
    Fq::from_natural(field, wide)
}

/// `HBS2PF2` over `Fq²`: hash the `a` and `b` coordinates independently
/// under distinct domain tags, so the pair behaves like a fresh uniform
/// sample of `Fq²` rather than a repeated `Fq` value.
pub fn hash_to_fq2(params: &Rc<Fq2Params>, data: &[u8], alg: HashAlgorithm) -> Fq2 {
    let mut tag_a = data.to_vec();
    tag_a.push(0);
    let mut tag_b = data.to_vec();
    tag_b.push(1);
    let a = hash_to_fq(&params.base, &tag_a, alg);
    let b = hash_to_fq(&params.base, &tag_b, alg);
    Fq2::new(params, a, b)
}

/// `HBS2ECP` over G1: counter-prefixed hash-to-field until the curve
/// equation's right-hand side has a square root, per §4.D. Unreachable
/// failure after `2^32` attempts is surfaced as [`CurveError::HashToPointExhausted`].
pub fn hash_to_point_g1(
    group: &CurveGroup<Fq>,
    data: &[u8],
    alg: HashAlgorithm,
) -> Result<AffinePoint<Fq>, CurveError> {
    for counter in 0u32..=u32::MAX {
        let mut input = data.to_vec();
        input.extend_from_slice(&counter.to_be_bytes());
        let x = hash_to_fq(&group.a.field, &input, alg);
        let rhs = x.square().mul(&x).add(&group.a.mul(&x)).add(&group.b);
        if let Ok(y) = rhs.sqrt() {
            return Ok(AffinePoint::new(x, y));
        }
    }
    Err(CurveError::HashToPointExhausted)
}

/// `HBS2ECP` over G2, analogous to [`hash_to_point_g1`].
pub fn hash_to_point_g2(
    group: &CurveGroup<Fq2>,
    data: &[u8],
    alg: HashAlgorithm,
) -> Result<AffinePoint<Fq2>, CurveError> {
    for counter in 0u32..=u32::MAX {
        let mut input = data.to_vec();
        input.extend_from_slice(&counter.to_be_bytes());
        let x = hash_to_fq2(&group.a.params, &input, alg);
        let rhs = x.square().mul(&x).add(&group.a.mul(&x)).add(&group.b);
        if let Ok(y) = rhs.sqrt() {
            return Ok(AffinePoint::new(x, y));
        }
    }
    Err(CurveError::HashToPointExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::Integer as Int;

    #[test]
    fn hl_produces_requested_byte_length() {
        let v = hl(b"seed", 160, HashAlgorithm::Sha1);
        // bs2ip of a value whose top byte may be zero can report fewer bits
        // than requested; assert on the byte budget instead.
        assert!(v.bit_length() <= 160);
    }

    #[test]
    fn hl_is_deterministic_and_seed_sensitive() {
        let a = hl(b"seed-a", 256, HashAlgorithm::Sha256);
        let b = hl(b"seed-a", 256, HashAlgorithm::Sha256);
        let c = hl(b"seed-b", 256, HashAlgorithm::Sha256);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_to_fq_always_succeeds_over_many_inputs() {
        let field = FieldParams::new(Integer::from_u64(10007));
        for i in 0u32..150 {
            let data = [b"fifty-byte-ish input padded out".as_slice(), &i.to_be_bytes()].concat();
            let x = hash_to_fq(&field, &data, HashAlgorithm::Sha512);
            assert!(x.to_natural() < Int::from_u64(10007));
        }
    }

    #[test]
    fn hl_bytes_matches_hl_integer_bytes() {
        let bytes = hl_bytes(b"seed", 20, HashAlgorithm::Sha1);
        assert_eq!(bytes.len(), 20);
        assert_eq!(Integer::bs2ip(&bytes), hl(b"seed", 160, HashAlgorithm::Sha1));
    }

    #[test]
    fn transcript_is_order_sensitive() {
        let a = Transcript::new().int(&Int::from_u64(1)).bytes(b"msg").challenge(128, HashAlgorithm::Sha256);
        let b = Transcript::new().bytes(b"msg").int(&Int::from_u64(1)).challenge(128, HashAlgorithm::Sha256);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_to_point_g1_succeeds_on_a_real_curve() {
        // y^2 = x^3 + 3 over F_13 again; small enough that failure (no
        // sqrt on the first several counters) is exercised, not just luck.
        let field = FieldParams::new(Integer::from_u64(13));
        let a = Fq::zero(&field);
        let b = Fq::from_natural(&field, Integer::from_u64(3));
        let group = CurveGroup::new(a, b, Integer::from_u64(17), Integer::from_u64(1), false);
        for i in 0u32..150 {
            let data = i.to_be_bytes();
            let p = hash_to_point_g1(&group, &data, HashAlgorithm::Sha256).unwrap();
            assert!(!p.infinite);
            assert!(group.on_curve(&p.x, &p.y));
        }
    }
}
