//! Component H — Mechanism 4, the BN-curve pairing-based anonymous
//! signature (§4.H).
//!
//! Fixed parameterization per §4.H: `b=2`, `β=−1` (`Fq²=Fq[u]/(u²+1)`),
//! `ξ=1+u` (the sextic-twist non-residue baked into `Fq6`/`Fq12`'s
//! `mul_by_v`/`mul_by_xi_one_plus_u`), and BN loop parameter
//! `t = −4647714815446351873`. `q` and `r` are not transcribed as decimal
//! literals here (this workflow has no way to cross-check a pasted
//! constant); they are the two Barreto–Naehrig polynomials evaluated on
//! `t` — `q(t)=36t⁴+36t³+24t²+6t+1`, `r(t)=36t⁴+36t³+18t²+6t+1` — which is
//! how a BN parameterization is actually *defined*, and which
//! `pairing::PairingContext::new` independently checks (`q-1 ≡ 0 mod 6`,
//! `r | q¹²-1`) when the context is built.
//!
//! Credential shape (§4.H "Join" returns `(A,B,C,D)`): a member's secret is
//! a single scalar `f`. The credential ties `f` to the issuer's two master
//! secrets `x,y` via two Boneh–Lynn–Shacham–style linear signatures on the
//! member's own commitment `Γ=[f]P₁`:
//!   `A=[x]Γ`, `B=Γ`, `C=[y]Γ`, `D=[f]P₂`.
//! `A`/`C` are the actual credentials (validity checked by
//! `e(A,P₂)=e(Γ,X)`, `e(C,P₂)=e(Γ,Y)`); `B`/`D` are join-time binding
//! echoes letting the member confirm the issuer signed the `f` it
//! submitted, without which a dishonest issuer could silently substitute a
//! different member's commitment. `credential_update` exploits `A`'s
//! linearity directly: `new_A = [x'/x] old_A = [x']Γ`.

pub mod credential_update;
pub mod join;
pub mod nonrevocation;
pub mod setup;
pub mod sign;
pub mod verify;

use std::rc::Rc;

use crate::bigint::Integer;
use crate::curve::{AffinePoint, CurveGroup};
use crate::field::{Fq, Fq12, Fq2};
use crate::hash::HashAlgorithm;
use crate::pairing::PairingContext;

pub use credential_update::{rotate_issuer_key, update_credential};
pub use join::{issuer_issue_credential, prover_finalize, prover_make_request, JoinRequest4, PartialCredential4};
pub use nonrevocation::{check_nonrevocation_proof, respond_to_challenge, NonRevocationChallenge, NonRevocationProof};
pub use setup::group_setup;
pub use sign::sign;
pub use verify::{link, verify};

/// Recognized configuration parameters for Mechanism 4 (§6): the
/// Fiat–Shamir/nonce hash algorithm and nonce byte length. The BN curve
/// parameterization itself is fixed (not a configuration knob, per §4.H).
#[derive(Clone, Debug)]
pub struct Mechanism4Params {
    pub nonce_len: usize,
    pub hash_algorithm: HashAlgorithm,
}

/// The fixed curve/pairing substrate shared by every Mechanism-4 scheme
/// instance: field towers, both curve groups, generators, and the pairing
/// context (§4.H "Barreto–Naehrig curve with a fixed parameterization").
pub struct Mechanism4Context {
    pub pairing: PairingContext,
    pub g1_group: CurveGroup<Fq>,
    pub g2_group: CurveGroup<Fq2>,
    pub p1: AffinePoint<Fq>,
    pub p2: AffinePoint<Fq2>,
    pub r: Integer,
    /// `e(P₁,P₂)`, precomputed once at context-build time so callers that
    /// need it (e.g. a future batched-verification path) don't repeat the
    /// Miller loop for the one pairing every instance shares.
    pub e_p1_p2: Fq12,
}

/// The group public key (§4.H "Group setup"): the curve/pairing context
/// plus the issuer's two commitments `X=[x]P₂`, `Y=[y]P₂`.
#[derive(Clone)]
pub struct GroupPublicKey4 {
    pub ctx: Rc<Mechanism4Context>,
    pub x_pub: AffinePoint<Fq2>,
    pub y_pub: AffinePoint<Fq2>,
}

/// The issuer's private key (§4.H): the two master secrets `x, y`.
#[derive(Clone)]
pub struct IssuingPrivateKey4 {
    pub x: Integer,
    pub y: Integer,
}

/// The membership credential `(A,B,C,D)` — see this module's doc comment
/// for what each component proves and why.
#[derive(Clone)]
pub struct Credential4 {
    pub a: AffinePoint<Fq>,
    pub b: AffinePoint<Fq>,
    pub c: AffinePoint<Fq>,
    pub d: AffinePoint<Fq2>,
}

/// A joined member's full signature key: the credential plus the secret
/// `f` needed to reprove knowledge of it at sign time.
#[derive(Clone)]
pub struct SignatureKey4 {
    pub credential: Credential4,
    pub f: Integer,
}

/// A Mechanism-4 signature (§4.H "Sign"): the bsn-deterministic
/// rerandomization of the credential (doubling as the linking token) plus
/// a Fiat–Shamir proof of knowledge binding it to `message`.
#[derive(Clone)]
pub struct Signature4 {
    pub a_prime: AffinePoint<Fq>,
    pub gamma_prime: AffinePoint<Fq>,
    pub c: Integer,
    pub s: Integer,
}

/// Reduce `v` into `[0, r)`; `Integer::modulo` can return a result with the
/// sign of `v` when `v` is negative, which a scalar used in `scalar_mul`
/// must not be.
pub(crate) fn mod_r(v: &Integer, r: &Integer) -> Integer {
    let m = v.modulo(r);
    if m.signum() < 0 {
        m.add(r)
    } else {
        m
    }
}
