//! Black-box §8 scenarios for Mechanism 4, exercised only through the
//! public API.

use groupsig::hash::HashAlgorithm;
use groupsig::mech4::credential_update::{rotate_issuer_key, update_credential};
use groupsig::mech4::join::{issuer_issue_credential, prover_finalize, prover_make_request};
use groupsig::mech4::nonrevocation::{check_nonrevocation_proof, respond_to_challenge, NonRevocationChallenge};
use groupsig::mech4::{group_setup, link, sign, verify, GroupPublicKey4, IssuingPrivateKey4, Mechanism4Params, SignatureKey4};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn toy_params() -> Mechanism4Params {
    Mechanism4Params { nonce_len: 16, hash_algorithm: HashAlgorithm::Sha256 }
}

fn setup_group(seed: u64) -> (GroupPublicKey4, IssuingPrivateKey4, Mechanism4Params) {
    let mut rng = StdRng::seed_from_u64(seed);
    let params = toy_params();
    let (pk, isk) = group_setup(&params, &mut rng).unwrap();
    (pk, isk, params)
}

fn join_as_member(pk: &GroupPublicKey4, isk: &IssuingPrivateKey4, params: &Mechanism4Params, seed: u64) -> SignatureKey4 {
    let mut rng = StdRng::seed_from_u64(seed);
    let (req, state) = prover_make_request(pk, params, &mut rng);
    let partial = issuer_issue_credential(pk, isk, params, &req).unwrap();
    prover_finalize(pk, state, partial).unwrap()
}

/// §8 scenario 5: join → sign("aMessage") → verify = true, repeated 100
/// times, all verifying.
#[test]
fn scenario5_repeated_sign_all_verify() {
    let (pk, isk, params) = setup_group(500);
    let key = join_as_member(&pk, &isk, &params, 501);

    for i in 0..100u64 {
        let mut rng = StdRng::seed_from_u64(1_000 + i);
        let sig = sign(&pk, &params, &key, b"bsn", b"aMessage", &mut rng);
        assert!(verify(&pk, &sig, b"bsn", b"aMessage", params.hash_algorithm));
    }
}

#[test]
fn tampering_the_signature_fails_verification() {
    let (pk, isk, params) = setup_group(510);
    let key = join_as_member(&pk, &isk, &params, 511);
    let mut rng = StdRng::seed_from_u64(512);
    let mut sig = sign(&pk, &params, &key, b"bsn", b"message", &mut rng);
    sig.s = sig.s.add(&groupsig::bigint::Integer::one());
    assert!(!verify(&pk, &sig, b"bsn", b"message", params.hash_algorithm));
}

#[test]
fn linkability_same_bsn_links_other_bsn_does_not() {
    let (pk, isk, params) = setup_group(520);
    let key = join_as_member(&pk, &isk, &params, 521);
    let mut rng = StdRng::seed_from_u64(522);

    let sig1 = sign(&pk, &params, &key, b"event", b"m1", &mut rng);
    let sig2 = sign(&pk, &params, &key, b"event", b"m2", &mut rng);
    assert!(link(&sig1, &sig2));

    let sig3 = sign(&pk, &params, &key, b"other-event", b"m1", &mut rng);
    assert!(!link(&sig1, &sig3));
}

/// §8 scenario 6: with three members {A,B,C}, a credential update that
/// carries forward only A leaves A's subsequent signatures valid and B's
/// and C's invalid against the new key; the reverse update (excluding A,
/// carrying forward B and C) then flips which members can sign validly.
#[test]
fn scenario6_credential_update_excludes_the_right_members() {
    let (pk, isk, params) = setup_group(530);
    let key_a = join_as_member(&pk, &isk, &params, 531);
    let key_b = join_as_member(&pk, &isk, &params, 532);
    let key_c = join_as_member(&pk, &isk, &params, 533);

    let mut rng = StdRng::seed_from_u64(534);
    let (x_new, x_pub_new) = rotate_issuer_key(&pk.ctx, &mut rng);
    let new_a_for_a = update_credential(&pk.ctx, &key_a.credential.a, &isk.x, &x_new).unwrap();

    let mut pk_updated = pk.clone();
    pk_updated.x_pub = x_pub_new.clone();
    let mut key_a_updated = key_a.clone();
    key_a_updated.credential.a = new_a_for_a;

    let mut rng2 = StdRng::seed_from_u64(535);
    let sig_a = sign(&pk_updated, &params, &key_a_updated, b"bsn", b"msg", &mut rng2);
    assert!(verify(&pk_updated, &sig_a, b"bsn", b"msg", params.hash_algorithm));

    let sig_b = sign(&pk_updated, &params, &key_b, b"bsn", b"msg", &mut rng2);
    assert!(!verify(&pk_updated, &sig_b, b"bsn", b"msg", params.hash_algorithm));
    let sig_c = sign(&pk_updated, &params, &key_c, b"bsn", b"msg", &mut rng2);
    assert!(!verify(&pk_updated, &sig_c, b"bsn", b"msg", params.hash_algorithm));

    // B and C were excluded from the first update, so their credential's
    // `A` is still under the original `isk.x`, not `x_new`.
    let mut rng3 = StdRng::seed_from_u64(536);
    let (x_new2, x_pub_new2) = rotate_issuer_key(&pk.ctx, &mut rng3);
    let new_a_for_b = update_credential(&pk.ctx, &key_b.credential.a, &isk.x, &x_new2).unwrap();
    let new_a_for_c = update_credential(&pk.ctx, &key_c.credential.a, &isk.x, &x_new2).unwrap();

    let mut pk_updated2 = pk_updated.clone();
    pk_updated2.x_pub = x_pub_new2;
    let mut key_b_updated = key_b.clone();
    key_b_updated.credential.a = new_a_for_b;
    let mut key_c_updated = key_c.clone();
    key_c_updated.credential.a = new_a_for_c;

    let sig_a2 = sign(&pk_updated2, &params, &key_a_updated, b"bsn", b"msg", &mut rng3);
    assert!(!verify(&pk_updated2, &sig_a2, b"bsn", b"msg", params.hash_algorithm));
    let sig_b2 = sign(&pk_updated2, &params, &key_b_updated, b"bsn", b"msg", &mut rng3);
    assert!(verify(&pk_updated2, &sig_b2, b"bsn", b"msg", params.hash_algorithm));
    let sig_c2 = sign(&pk_updated2, &params, &key_c_updated, b"bsn", b"msg", &mut rng3);
    assert!(verify(&pk_updated2, &sig_c2, b"bsn", b"msg", params.hash_algorithm));
}

#[test]
fn nonrevocation_challenge_response_identifies_exact_member() {
    let (pk, isk, params) = setup_group(540);
    let key = join_as_member(&pk, &isk, &params, 541);

    let challenge = NonRevocationChallenge { f_candidate: key.f.clone() };
    let proof = respond_to_challenge(&key.credential, &challenge);
    assert!(check_nonrevocation_proof(&pk, &challenge, &proof).unwrap());

    let other_key = join_as_member(&pk, &isk, &params, 542);
    let mismatched_proof = respond_to_challenge(&other_key.credential, &challenge);
    assert!(!check_nonrevocation_proof(&pk, &challenge, &mismatched_proof).unwrap());
}
