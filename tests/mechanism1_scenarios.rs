//! Black-box §8 scenarios for Mechanism 1, exercised only through the
//! public API (no access to module-private state).

use groupsig::bigint::Integer;
use groupsig::hash::HashAlgorithm;
use groupsig::mech1::join::{issuer_issue_credential, issuer_verify_request, prover_finalize, prover_make_credential_request, prover_make_request};
use groupsig::mech1::{group_setup, is_revoked, link, sign, verify, GroupPublicKey, IssuingPrivateKey, Mechanism1Params, SignatureKey};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn toy_params() -> Mechanism1Params {
    Mechanism1Params {
        lp: 64,
        lx: 48,
        lx_big: 110,
        le: 24,
        le_big: 130,
        k: 48,
        eps_num: 5,
        eps_den: 4,
        hash_algorithm: HashAlgorithm::Sha1,
    }
}

fn setup_group(seed: u64) -> (GroupPublicKey, IssuingPrivateKey, Mechanism1Params) {
    let mut rng = StdRng::seed_from_u64(seed);
    let params = toy_params();
    let (pk, isk) = group_setup(&params, &mut rng).unwrap();
    (pk, isk, params)
}

fn join_as_member(pk: &GroupPublicKey, isk: &IssuingPrivateKey, params: &Mechanism1Params, seed: u64) -> (SignatureKey, Integer) {
    let mut rng = StdRng::seed_from_u64(seed);
    let (req1, state1) = prover_make_request(pk, params, &mut rng);
    let challenge = issuer_verify_request(pk, isk, params, &req1, &mut rng).unwrap();
    let (req2, state2) = prover_make_credential_request(pk, params, &state1, &challenge, &mut rng);
    let credential = issuer_issue_credential(pk, isk, params, &req2, &req1.c1, &challenge, &mut rng).unwrap();
    let x_prime = state1.x_prime().clone();
    let key = prover_finalize(pk, state2, credential).unwrap();
    (key, x_prime)
}

/// §8 scenario 4: group creation → join → sign → verify = true; tampering
/// the message flips verify to false.
#[test]
fn scenario4_sign_verify_and_tamper() {
    let (pk, isk, params) = setup_group(400);
    let (key, _x_prime) = join_as_member(&pk, &isk, &params, 401);
    let mut rng = StdRng::seed_from_u64(402);

    let sig = sign(&pk, &params, &key, b"bsn-event", b"message", &mut rng);
    assert!(verify(&pk, &params, &sig, b"bsn-event", b"message"));
    assert!(!verify(&pk, &params, &sig, b"bsn-event", b"messagE"));
}

#[test]
fn linkability_holds_under_same_bsn_and_fails_across_signers() {
    let (pk, isk, params) = setup_group(410);
    let (key_a, _) = join_as_member(&pk, &isk, &params, 411);
    let (key_b, _) = join_as_member(&pk, &isk, &params, 412);

    let mut rng = StdRng::seed_from_u64(413);
    let sig_a1 = sign(&pk, &params, &key_a, b"event", b"msg-1", &mut rng);
    let sig_a2 = sign(&pk, &params, &key_a, b"event", b"msg-2", &mut rng);
    assert!(link(&sig_a1, &sig_a2));

    let sig_b = sign(&pk, &params, &key_b, b"event", b"msg-1", &mut rng);
    assert!(!link(&sig_a1, &sig_b));
}

/// §8 "Revocation": after a signer's private key is added to a revocation
/// list, further signatures by that signer fail verification; other
/// signers' signatures stay valid.
#[test]
fn private_key_revocation_blocks_only_the_revoked_signer() {
    let (pk, isk, params) = setup_group(420);
    let (key, x_prime) = join_as_member(&pk, &isk, &params, 421);
    let (key_other, _) = join_as_member(&pk, &isk, &params, 422);

    let mut rng = StdRng::seed_from_u64(423);
    let sig = sign(&pk, &params, &key, b"event", b"message", &mut rng);
    let sig_other = sign(&pk, &params, &key_other, b"event", b"message", &mut rng);

    assert!(is_revoked(&pk, &params, &sig, b"event", &[x_prime]));
    assert!(!is_revoked(&pk, &params, &sig_other, b"event", &[]));
}
