//! Mechanism-1 private-key revocation (§4.G "Verifier-local revocation" /
//! §4.I): given a list of leaked member secrets `xᵢ′`, a verifier can check
//! whether a signature was produced by one of them without learning which
//! member produced any *other* signature.
//!
//! `T₄ = f^x mod n` where `f = HL(bsn,2Lp)² mod n` and the credential's `x`
//! satisfies `x ≡ x′ (mod 2^Lx)`-style derivation from the join transcript;
//! per §4.G a signer is revoked when `f^(2·xᵢ′) ≡ T₄ mod n` for some leaked
//! `xᵢ′` in the revocation list (the `2·` reflects that the stored secret is
//! the join-time `x′`, and `x`'s low-order structure ties back to it via the
//! squaring in `f`'s definition).

use crate::bigint::Integer;
use crate::mech1::sign::bsn_generator;
use crate::mech1::{GroupPublicKey, Mechanism1Params, Signature};

/// Whether `sig` (signed under `bsn`) was produced by a member whose private
/// key appears (as `x′`) in `leaked_keys`.
#[tracing::instrument(skip(pk, params, sig, leaked_keys))]
pub fn is_revoked(
    pk: &GroupPublicKey,
    params: &Mechanism1Params,
    sig: &Signature,
    bsn: &[u8],
    leaked_keys: &[Integer],
) -> bool {
    let f = bsn_generator(bsn, params, &pk.n);
    let two = Integer::from_u64(2);
    for xi in leaked_keys {
        let exponent = two.mul(xi);
        if f.modpow(&exponent, &pk.n) == sig.t4 {
            tracing::debug!("mechanism-1 signature matched a revoked key");
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use crate::mech1::join::*;
    use crate::mech1::setup::group_setup;
    use crate::mech1::sign::sign;
    use crate::mech1::Mechanism1Params as Params;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy_params() -> Params {
        Params {
            lp: 48,
            lx: 40,
            lx_big: 90,
            le: 20,
            le_big: 100,
            k: 32,
            eps_num: 5,
            eps_den: 4,
            hash_algorithm: HashAlgorithm::Sha1,
        }
    }

    #[test]
    fn revoked_key_is_detected() {
        let mut rng = StdRng::seed_from_u64(55);
        let params = toy_params();
        let (pk, isk) = group_setup(&params, &mut rng).unwrap();
        let (req1, state1) = prover_make_request(&pk, &params, &mut rng);
        let challenge = issuer_verify_request(&pk, &isk, &params, &req1, &mut rng).unwrap();
        let (req2, state2) = prover_make_credential_request(&pk, &params, &state1, &challenge, &mut rng);
        let credential = issuer_issue_credential(&pk, &isk, &params, &req2, &req1.c1, &challenge, &mut rng).unwrap();
        let x_prime = state1.x_prime().clone();
        let key = prover_finalize(&pk, state2, credential).unwrap();

        let sig = sign(&pk, &params, &key, b"bsn", b"msg", &mut rng);
        assert!(is_revoked(&pk, &params, &sig, b"bsn", &[x_prime]));
    }

    #[test]
    fn unrelated_key_is_not_revoked() {
        let mut rng = StdRng::seed_from_u64(56);
        let params = toy_params();
        let (pk, isk) = group_setup(&params, &mut rng).unwrap();
        let (req1, state1) = prover_make_request(&pk, &params, &mut rng);
        let challenge = issuer_verify_request(&pk, &isk, &params, &req1, &mut rng).unwrap();
        let (req2, state2) = prover_make_credential_request(&pk, &params, &state1, &challenge, &mut rng);
        let credential = issuer_issue_credential(&pk, &isk, &params, &req2, &req1.c1, &challenge, &mut rng).unwrap();
        let key = prover_finalize(&pk, state2, credential).unwrap();

        let sig = sign(&pk, &params, &key, b"bsn", b"msg", &mut rng);
        let unrelated = Integer::random_bits(params.lx, &mut rng);
        assert!(!is_revoked(&pk, &params, &sig, b"bsn", &[unrelated]));
    }
}
