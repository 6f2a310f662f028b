//! Component G — Mechanism 1, the RSA-group anonymous signature (§4.G).
//!
//! Every value here is a plain [`Integer`] reduced mod the group modulus
//! `n`; Mechanism 1 is the one mechanism that "uses BigInt arithmetic
//! only" (§6), so none of `field`/`curve`/`pairing` is involved.

pub mod join;
pub mod link;
pub mod revoke;
pub mod setup;
pub mod sign;
pub mod verify;

use crate::bigint::Integer;
use crate::hash::HashAlgorithm;

pub use join::{Credential, CredentialRequest, IssuerChallenge, JoinRequest, ProverJoinState};
pub use link::link;
pub use revoke::is_revoked;
pub use setup::group_setup;
pub use sign::{sign, Precomputation};
pub use verify::verify;

/// Recognized configuration parameters for Mechanism 1 (§6).
#[derive(Clone, Debug)]
pub struct Mechanism1Params {
    /// Prime size (bits) for the safe-prime factors `p′`, `q′`.
    pub lp: u64,
    /// Committed-value size (bits) for the joiner's secret `x′`.
    pub lx: u64,
    /// Extended committed-value size (bits), `LX > Lx`.
    pub lx_big: u64,
    /// Credential exponent slack (bits).
    pub le: u64,
    /// Credential exponent size (bits).
    pub le_big: u64,
    /// Fiat–Shamir challenge size (bits).
    pub k: u64,
    /// Range-proof slack `ε`, as a rational `eps_num / eps_den` (typically `5/4`).
    pub eps_num: u64,
    pub eps_den: u64,
    /// Hash algorithm backing every `HL`/Fiat–Shamir derivation in this mechanism.
    pub hash_algorithm: HashAlgorithm,
}

impl Mechanism1Params {
    /// `ceil(eps * bits)`, the slack-scaled bound used throughout range checks.
    pub fn eps_scale(&self, bits: u64) -> u64 {
        ((bits as u128 * self.eps_num as u128 + self.eps_den as u128 - 1) / self.eps_den as u128) as u64
    }
}

/// The group public key (§3 "Mechanism-1 public key"): `(n, a, a₀, g, h, b)`, all in `QR(n)`.
#[derive(Clone, Debug)]
pub struct GroupPublicKey {
    pub n: Integer,
    pub a: Integer,
    pub a0: Integer,
    pub g: Integer,
    pub h: Integer,
    pub b: Integer,
}

/// The issuer's private key (§3): the safe-prime factors' halves, `(p′, q′)`.
#[derive(Clone)]
pub struct IssuingPrivateKey {
    pub p_prime: Integer,
    pub q_prime: Integer,
}

impl IssuingPrivateKey {
    pub fn p(&self) -> Integer {
        self.p_prime.add(&self.p_prime).add(&Integer::one())
    }
    pub fn q(&self) -> Integer {
        self.q_prime.add(&self.q_prime).add(&Integer::one())
    }
    /// `p′·q′`, the order of the private-exponent ring `A⁽·⁾ mod n` operates in.
    pub fn phi_quarter(&self) -> Integer {
        self.p_prime.mul(&self.q_prime)
    }
}

/// A joined member's signature key (§3 "Membership credential" for
/// Mechanism 1): `(A, e, x)`.
#[derive(Clone)]
pub struct SignatureKey {
    pub a: Integer,
    pub e: Integer,
    pub x: Integer,
}

/// A Mechanism-1 signature: `(c, s₁..s₅, s₉, s₁₀, T₁..T₄)` (§3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub c: Integer,
    pub s1: Integer,
    pub s2: Integer,
    pub s3: Integer,
    pub s4: Integer,
    pub s5: Integer,
    pub s9: Integer,
    pub s10: Integer,
    pub t1: Integer,
    pub t2: Integer,
    pub t3: Integer,
    pub t4: Integer,
}

/// `self.bit_length() <= bound`, the range check §4.G's verify step applies
/// to every response scalar (values are allowed to be negative; only the
/// magnitude is bounded).
pub fn in_range(v: &Integer, bound: u64) -> bool {
    v.bit_length() <= bound
}
