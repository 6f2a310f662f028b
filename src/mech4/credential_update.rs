//! Mechanism-4 credential update (§4.H "Credential update" / §4.I
//! credential-update revocation): the issuer rotates its `x` master secret
//! and ratio-updates every still-valid member's `A` component, without
//! ever needing to learn the member's secret `f`.
//!
//! `A=[x]Γ` is linear in `Γ`, so `new_A = [x'·x⁻¹ mod r] old_A = [x']Γ` —
//! exactly the new credential a freshly-joined member with the same `Γ`
//! would receive under `x'`. A revoked member is simply left out of this
//! update; its old `A` still satisfies the *old* `e(A,P₂)=e(Γ,X)` relation
//! but no longer matches the newly-published `X'`, so `verify` against the
//! current group public key rejects it.

use crate::bigint::Integer;
use crate::curve::scalar_mul::scalar_mul;
use crate::curve::AffinePoint;
use crate::error::{GroupSigError, Result};
use crate::field::Fq;
use crate::mech4::{mod_r, Mechanism4Context};

/// Draw a fresh issuer secret `x'` and return it alongside its public
/// commitment `X'=[x']P₂`. The caller swaps this into the group public key
/// and issuer private key it holds.
pub fn rotate_issuer_key(ctx: &Mechanism4Context, rng: &mut impl rand::RngCore) -> (Integer, crate::curve::AffinePoint<crate::field::Fq2>) {
    let x_new = mod_r(&Integer::random_bits(ctx.r.bit_length(), rng), &ctx.r);
    let x_pub_new = scalar_mul(&ctx.p2, &x_new, &ctx.g2_group);
    (x_new, x_pub_new)
}

/// §4.H "Credential update": recompute a still-valid member's `A`
/// component for the newly rotated `x'`, given only the old `A` and the
/// ratio `x'/x⁻¹ mod r` — the issuer needs neither the member's `f` nor
/// its `Γ`.
#[tracing::instrument(skip(ctx, old_a))]
pub fn update_credential(ctx: &Mechanism4Context, old_a: &AffinePoint<Fq>, x_old: &Integer, x_new: &Integer) -> Result<AffinePoint<Fq>> {
    let x_old_inv = x_old
        .mod_inverse(&ctx.r)
        .map_err(|_| GroupSigError::Validation("issuer secret x is not invertible mod r".into()))?;
    let ratio = mod_r(&x_new.mul(&x_old_inv), &ctx.r);
    Ok(scalar_mul(old_a, &ratio, &ctx.g1_group))
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
    fn updated_credential_satisfies_new_key() {
        let mut rng = StdRng::seed_from_u64(30);
        let params = toy_params();
        let (pk, isk) = group_setup(&params, &mut rng).unwrap();
        let (req, state) = prover_make_request(&pk, &params, &mut rng);
        let partial = issuer_issue_credential(&pk, &isk, &params, &req).unwrap();
        let key = prover_finalize(&pk, state, partial).unwrap();

        let (x_new, x_pub_new) = rotate_issuer_key(&pk.ctx, &mut rng);
        let new_a = update_credential(&pk.ctx, &key.credential.a, &isk.x, &x_new).unwrap();

        let lhs = pk.ctx.pairing.pairing(&pk.ctx.p2, &new_a).unwrap();
        let rhs = pk.ctx.pairing.pairing(&x_pub_new, &key.credential.b).unwrap();
        assert!(lhs == rhs);
    }
}
