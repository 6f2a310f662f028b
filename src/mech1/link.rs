//! Mechanism-1 linking (§4.G "Link"): two signatures are linked iff their
//! `T₄` values agree. `T₄ = HL(bsn,2Lp)²ˣ mod n` is the same for every
//! signature a given member produces under the same `bsn`, and (under the
//! DDH-like assumption on `QR(n)`) reveals nothing else about `x`.

use crate::mech1::Signature;

/// Two signatures signed under the same basename link iff `T₄` matches.
/// Callers are responsible for confirming the two signatures were produced
/// against the same `bsn` (and verified individually) before calling this —
/// comparing `T₄` across different basenames is meaningless and must not be
/// treated as a linking decision.
pub fn link(sig1: &Signature, sig2: &Signature) -> bool {
    sig1.t4 == sig2.t4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use crate::mech1::join::*;
    use crate::mech1::setup::group_setup;
    use crate::mech1::sign::sign;
    use crate::mech1::{GroupPublicKey, Mechanism1Params, SignatureKey};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy_params() -> Mechanism1Params {
        Mechanism1Params {
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

    fn joined_member(rng: &mut StdRng) -> (GroupPublicKey, SignatureKey, Mechanism1Params) {
        let params = toy_params();
        let (pk, isk) = group_setup(&params, rng).unwrap();
        let (req1, state1) = prover_make_request(&pk, &params, rng);
        let challenge = issuer_verify_request(&pk, &isk, &params, &req1, rng).unwrap();
        let (req2, state2) = prover_make_credential_request(&pk, &params, &state1, &challenge, rng);
        let credential = issuer_issue_credential(&pk, &isk, &params, &req2, &req1.c1, &challenge, rng).unwrap();
        let key = prover_finalize(&pk, state2, credential).unwrap();
        (pk, key, params)
    }

    #[test]
    fn same_member_same_bsn_links() {
        let mut rng = StdRng::seed_from_u64(7);
        let (pk, key, params) = joined_member(&mut rng);
        let sig1 = sign(&pk, &params, &key, b"event-1", b"msg-a", &mut rng);
        let sig2 = sign(&pk, &params, &key, b"event-1", b"msg-b", &mut rng);
        assert!(link(&sig1, &sig2));
    }

    #[test]
    fn same_member_different_bsn_does_not_link() {
        let mut rng = StdRng::seed_from_u64(8);
        let (pk, key, params) = joined_member(&mut rng);
        let sig1 = sign(&pk, &params, &key, b"event-1", b"msg-a", &mut rng);
        let sig2 = sign(&pk, &params, &key, b"event-2", b"msg-a", &mut rng);
        assert!(!link(&sig1, &sig2));
    }

    #[test]
    fn different_members_same_bsn_do_not_link() {
        let mut rng = StdRng::seed_from_u64(9);
        let (pk, key_a, params) = joined_member(&mut rng);
        let (_, key_b) = {
            let (pk2, isk2) = group_setup(&params, &mut rng).unwrap();
            let (req1, state1) = prover_make_request(&pk2, &params, &mut rng);
            let challenge = issuer_verify_request(&pk2, &isk2, &params, &req1, &mut rng).unwrap();
            let (req2, state2) = prover_make_credential_request(&pk2, &params, &state1, &challenge, &mut rng);
            let credential = issuer_issue_credential(&pk2, &isk2, &params, &req2, &req1.c1, &challenge, &mut rng).unwrap();
            (pk2, prover_finalize(&pk2, state2, credential).unwrap())
        };
        let sig_a = sign(&pk, &params, &key_a, b"event-1", b"msg", &mut rng);
        let sig_b = sign(&pk, &params, &key_b, b"event-1", b"msg", &mut rng);
        assert!(!link(&sig_a, &sig_b));
    }
}
