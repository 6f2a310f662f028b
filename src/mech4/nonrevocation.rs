//! Mechanism-4 verifier-local non-revocation (§4.H "Non-revocation"),
//! mirroring Mechanism 1's `revoke.rs` but against the `C=[y]Γ` credential
//! component instead of ACJT's `T₄`.
//!
//! For a candidate revoked secret `f'`, a verifier who only knows `f'`
//! (never the member's `Γ` or credential) can still test membership: form
//! `Γ_f'=[f']P₁` and check `e(C,P₂) = e(Γ_f',Y)`. Bilinearity makes this
//! hold iff `f=f'` — `e(C,P₂)=e([y]Γ,P₂)=e(P₁,P₂)^{yf}` and
//! `e(Γ_f',Y)=e(P₁,P₂)^{y f'}`. This is deliberately a VLR-style check: the
//! member reveals `C` as-is, which links across every non-revocation query
//! it's used in (unlike `sign`'s per-`bsn` rerandomized tokens) — standard
//! for a revocation list check per §4.I's local-private-key-revocation
//! category.

use crate::bigint::Integer;
use crate::curve::scalar_mul::scalar_mul;
use crate::curve::AffinePoint;
use crate::error::{GroupSigError, Result};
use crate::field::Fq;
use crate::mech4::{Credential4, GroupPublicKey4};

/// A verifier's non-revocation challenge: the candidate blacklisted
/// secret-key value `f'` to test the member's credential against.
pub struct NonRevocationChallenge {
    pub f_candidate: Integer,
}

/// The member's response: its credential's `C=[y]Γ` component, revealed
/// as-is.
pub struct NonRevocationProof {
    pub c: AffinePoint<Fq>,
}

/// Member side: answer a non-revocation challenge by revealing `C`. The
/// challenge itself carries no information the member needs — the same
/// `C` answers every challenge — but it is threaded through to keep the
/// request/response shape symmetric with Mechanism 1's revocation API.
pub fn respond_to_challenge(credential: &Credential4, _challenge: &NonRevocationChallenge) -> NonRevocationProof {
    NonRevocationProof { c: credential.c.clone() }
}

/// Verifier side: does the member's proof match the candidate revoked
/// value, i.e. is this member exactly the one whose secret is `f'`?
#[tracing::instrument(skip(pk, proof))]
pub fn check_nonrevocation_proof(pk: &GroupPublicKey4, challenge: &NonRevocationChallenge, proof: &NonRevocationProof) -> Result<bool> {
    let ctx = &pk.ctx;
    if proof.c.infinite {
        return Err(GroupSigError::Validation("non-revocation proof committed to the identity".into()));
    }

    let gamma_candidate = scalar_mul(&ctx.p1, &challenge.f_candidate, &ctx.g1_group);
    let lhs = ctx.pairing.pairing(&ctx.p2, &proof.c)?;
    let rhs = ctx.pairing.pairing(&pk.y_pub, &gamma_candidate)?;
    Ok(lhs == rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mech4::join::{issuer_issue_credential, prover_finalize, prover_make_request};
    use crate::mech4::setup::group_setup;
    use crate::mech4::Mechanism4Params;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy_params() -> Mechanism4Params {
        Mechanism4Params { nonce_len: 16, hash_algorithm: crate::hash::HashAlgorithm::Sha256 }
    }

    #[test]
    fn matching_secret_is_flagged_revoked() {
        let mut rng = StdRng::seed_from_u64(20);
        let params = toy_params();
        let (pk, isk) = group_setup(&params, &mut rng).unwrap();
        let (req, state) = prover_make_request(&pk, &params, &mut rng);
        let partial = issuer_issue_credential(&pk, &isk, &params, &req).unwrap();
        let key = prover_finalize(&pk, state, partial).unwrap();

        let challenge = NonRevocationChallenge { f_candidate: key.f.clone() };
        let proof = respond_to_challenge(&key.credential, &challenge);
        assert!(check_nonrevocation_proof(&pk, &challenge, &proof).unwrap());
    }

    #[test]
    fn unrelated_secret_is_not_flagged() {
        let mut rng = StdRng::seed_from_u64(21);
        let params = toy_params();
        let (pk, isk) = group_setup(&params, &mut rng).unwrap();
        let (req, state) = prover_make_request(&pk, &params, &mut rng);
        let partial = issuer_issue_credential(&pk, &isk, &params, &req).unwrap();
        let key = prover_finalize(&pk, state, partial).unwrap();

        let other_f = crate::mech4::mod_r(&Integer::from_u64(42), &pk.ctx.r);
        let challenge = NonRevocationChallenge { f_candidate: other_f };
        let proof = respond_to_challenge(&key.credential, &challenge);
        assert!(!check_nonrevocation_proof(&pk, &challenge, &proof).unwrap());
    }
}
