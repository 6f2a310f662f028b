//! Mechanism-4 join (§4.H "Join"): the prover picks a secret `f`, submits
//! `Γ=[f]P₁`, and the issuer returns the credential's issuer-computable
//! components `(A,B,C)`; the prover fills in the fourth, `D=[f]P₂`, itself
//! at `prover_finalize` time (the issuer never learns `f`, only `Γ`, so it
//! cannot compute a G2 value keyed on `f`).
//!
//! Unlike Mechanism 1's join (§4.G), there is no separate interactive
//! proof round trip: a single Schnorr proof of knowledge of `f` rides
//! along with the commitment in one message.

use rand::RngCore;

use crate::bigint::Integer;
use crate::curve::scalar_mul::scalar_mul;
use crate::curve::AffinePoint;
use crate::error::{GroupSigError, Result};
use crate::field::Fq;
use crate::hash::{HashAlgorithm, Transcript};
use crate::mech4::{mod_r, Credential4, GroupPublicKey4, IssuingPrivateKey4, Mechanism4Params, SignatureKey4};

/// A join request: the commitment `Γ=[f]P₁` plus a Schnorr proof of
/// knowledge of `f`.
pub struct JoinRequest4 {
    pub gamma: AffinePoint<Fq>,
    pub proof_c: Integer,
    pub proof_s: Integer,
}

/// Prover-held state between `prover_make_request` and `prover_finalize`.
pub struct ProverJoinState4 {
    f: Integer,
}

impl ProverJoinState4 {
    pub fn f(&self) -> &Integer {
        &self.f
    }
}

/// The issuer-computable three-quarters of a credential; `prover_finalize`
/// completes it into a full [`crate::mech4::Credential4`].
pub struct PartialCredential4 {
    pub a: AffinePoint<Fq>,
    pub b: AffinePoint<Fq>,
    pub c: AffinePoint<Fq>,
}

fn proof_transcript(gamma: &AffinePoint<Fq>, r_point: &AffinePoint<Fq>, alg: HashAlgorithm) -> Integer {
    Transcript::new()
        .int(&gamma.x.to_natural())
        .int(&gamma.y.to_natural())
        .int(&r_point.x.to_natural())
        .int(&r_point.y.to_natural())
        .challenge(256, alg)
}

/// §4.H "Join", prover side, step 1: draw `f`, commit `Γ=[f]P₁`, prove
/// knowledge of `f`.
pub fn prover_make_request(pk: &GroupPublicKey4, params: &Mechanism4Params, rng: &mut impl RngCore) -> (JoinRequest4, ProverJoinState4) {
    let ctx = &pk.ctx;
    let f = mod_r(&Integer::random_bits(ctx.r.bit_length(), rng), &ctx.r);
    let gamma = scalar_mul(&ctx.p1, &f, &ctx.g1_group);

    let k = mod_r(&Integer::random_bits(ctx.r.bit_length(), rng), &ctx.r);
    let r_point = scalar_mul(&ctx.p1, &k, &ctx.g1_group);
    let c = mod_r(&proof_transcript(&gamma, &r_point, params.hash_algorithm), &ctx.r);
    let s = mod_r(&k.add(&c.mul(&f)), &ctx.r);

    (JoinRequest4 { gamma, proof_c: c, proof_s: s }, ProverJoinState4 { f })
}

/// §4.H "Join", issuer side: verify the proof of knowledge of `f`, then
/// issue the issuer-computable credential components `A=[x]Γ`, `B=Γ`,
/// `C=[y]Γ`.
#[tracing::instrument(skip(pk, isk, params, req))]
pub fn issuer_issue_credential(
    pk: &GroupPublicKey4,
    isk: &IssuingPrivateKey4,
    params: &Mechanism4Params,
    req: &JoinRequest4,
) -> Result<PartialCredential4> {
    let ctx = &pk.ctx;
    if req.gamma.infinite {
        return Err(GroupSigError::Validation("join request committed to the identity".into()));
    }

    let r_hat = scalar_mul(&ctx.p1, &req.proof_s, &ctx.g1_group).add(&scalar_mul(&req.gamma, &req.proof_c, &ctx.g1_group).negate(), &ctx.g1_group);
    let c_hat = mod_r(&proof_transcript(&req.gamma, &r_hat, params.hash_algorithm), &ctx.r);
    if c_hat != req.proof_c {
        tracing::debug!("mechanism-4 join: proof of knowledge of f failed");
        return Err(GroupSigError::Validation("invalid proof of knowledge of f".into()));
    }

    let a = scalar_mul(&req.gamma, &isk.x, &ctx.g1_group);
    let c = scalar_mul(&req.gamma, &isk.y, &ctx.g1_group);

    Ok(PartialCredential4 { a, b: req.gamma.clone(), c })
}

/// §4.H "Join", prover side, step 2: fill in `D=[f]P₂` and check every
/// pairing relation the credential promises before trusting it.
#[tracing::instrument(skip(pk, state, partial))]
pub fn prover_finalize(pk: &GroupPublicKey4, state: ProverJoinState4, partial: PartialCredential4) -> Result<SignatureKey4> {
    let ctx = &pk.ctx;
    let d = scalar_mul(&ctx.p2, &state.f, &ctx.g2_group);

    let own_gamma = scalar_mul(&ctx.p1, &state.f, &ctx.g1_group);
    if own_gamma.x != partial.b.x || own_gamma.y != partial.b.y {
        return Err(GroupSigError::Validation("issuer's B does not match the committed f".into()));
    }

    let lhs_a = ctx.pairing.pairing(&ctx.p2, &partial.a)?;
    let rhs_a = ctx.pairing.pairing(&pk.x_pub, &partial.b)?;
    if lhs_a != rhs_a {
        return Err(GroupSigError::Validation("credential A failed its pairing equation".into()));
    }

    let lhs_c = ctx.pairing.pairing(&ctx.p2, &partial.c)?;
    let rhs_c = ctx.pairing.pairing(&pk.y_pub, &partial.b)?;
    if lhs_c != rhs_c {
        return Err(GroupSigError::Validation("credential C failed its pairing equation".into()));
    }

    Ok(SignatureKey4 {
        credential: Credential4 { a: partial.a, b: partial.b, c: partial.c, d },
        f: state.f,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use crate::mech4::setup::group_setup;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy_params() -> Mechanism4Params {
        Mechanism4Params { nonce_len: 16, hash_algorithm: HashAlgorithm::Sha256 }
    }

    #[test]
    fn full_join_handshake_succeeds() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = toy_params();
        let (pk, isk) = group_setup(&params, &mut rng).unwrap();
        let (req, state) = prover_make_request(&pk, &params, &mut rng);
        let partial = issuer_issue_credential(&pk, &isk, &params, &req).unwrap();
        let key = prover_finalize(&pk, state, partial).unwrap();
        assert!(!key.credential.a.infinite);
    }

    #[test]
    fn tampered_proof_is_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        let params = toy_params();
        let (pk, isk) = group_setup(&params, &mut rng).unwrap();
        let (mut req, _state) = prover_make_request(&pk, &params, &mut rng);
        req.proof_s = req.proof_s.add(&Integer::one());
        assert!(issuer_issue_credential(&pk, &isk, &params, &req).is_err());
    }
}
