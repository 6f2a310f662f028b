//! Mechanism-1 verification (§4.G "Verify"): reconstruct the commitments
//! `d₁..d₅` from the signature's scalars and the public targets they were
//! built against, then recheck the Fiat–Shamir equation.
//!
//! Each `dᵢ` in `sign.rs` is a representation-of-knowledge commitment
//! `baseˣ * baseʸ * ...` for some public target `Xᵢ` that the signing
//! relations (`T₁=A·b^w1`, `T₂=g^w1·h^w2`, `T₃=g^e·h^w3`, `A^e=a₀·a^x`,
//! `T₄=f^x`) make computable from `T₁..T₄` alone, without knowing any
//! secret — shifting every exponent by its public offset (`e-2^LE`,
//! `x-2^LX`) turns the credential-validity relation into a linear one.
//! Recovering the five targets below is "inverting the response
//! definitions" that §4.G's Verify step describes at a higher level.

use crate::bigint::Integer;
use crate::hash::Transcript;
use crate::mech1::sign::bsn_generator;
use crate::mech1::{in_range, GroupPublicKey, Mechanism1Params, Signature};

fn inv(pk: &GroupPublicKey, v: &Integer) -> Option<Integer> {
    v.mod_inverse(&pk.n).ok()
}

#[tracing::instrument(skip(pk, params, sig), fields(msg_len = message.len()))]
pub fn verify(pk: &GroupPublicKey, params: &Mechanism1Params, sig: &Signature, bsn: &[u8], message: &[u8]) -> bool {
    if !in_range(&sig.s1, params.eps_scale(2 * params.lp + params.k))
        || !in_range(&sig.s2, params.eps_scale(params.lx_big + params.k))
        || !in_range(&sig.s3, params.eps_scale(2 * params.lp + params.k))
        || !in_range(&sig.s4, params.eps_scale(2 * params.lp + params.k))
        || !in_range(&sig.s5, params.eps_scale(2 * params.lp + params.k))
        || !in_range(&sig.s9, params.eps_scale(params.le_big + 2 * params.lp + params.k))
        || !in_range(&sig.s10, params.eps_scale(params.le_big + 2 * params.lp + params.k))
    {
        tracing::debug!("mechanism-1 verify: response scalar out of range");
        return false;
    }

    let n = &pk.n;
    let two_le_big = Integer::one().shl(params.le_big);
    let two_lx_big = Integer::one().shl(params.lx_big);

    let t1_pow_2le = sig.t1.modpow(&two_le_big, n);
    let t1_pow_2le_inv = match inv(pk, &t1_pow_2le) {
        Some(v) => v,
        None => return false,
    };
    let x1 = pk.a0.mul(&pk.a.modpow(&two_lx_big, n)).modulo(n).mul(&t1_pow_2le_inv).modulo(n);

    let t2_pow_2le_inv = match inv(pk, &sig.t2.modpow(&two_le_big, n)) {
        Some(v) => v,
        None => return false,
    };
    let x2 = t2_pow_2le_inv;

    let g_pow_2le_inv = match inv(pk, &pk.g.modpow(&two_le_big, n)) {
        Some(v) => v,
        None => return false,
    };
    let x4 = sig.t3.mul(&g_pow_2le_inv).modulo(n);

    let f = bsn_generator(bsn, params, n);
    let f_pow_2lx_inv = match inv(pk, &f.modpow(&two_lx_big, n)) {
        Some(v) => v,
        None => return false,
    };
    let x5 = sig.t4.mul(&f_pow_2lx_inv).modulo(n);

    let a_s2_b_s9_inv = match inv(pk, &pk.a.modpow(&sig.s2, n).mul(&pk.b.modpow(&sig.s9, n)).modulo(n)) {
        Some(v) => v,
        None => return false,
    };
    let d1_hat = sig.t1.modpow(&sig.s1, n).mul(&a_s2_b_s9_inv).modulo(n).mul(&x1.modpow(&sig.c, n)).modulo(n);

    let g_s9_h_s10_inv = match inv(pk, &pk.g.modpow(&sig.s9, n).mul(&pk.h.modpow(&sig.s10, n)).modulo(n)) {
        Some(v) => v,
        None => return false,
    };
    let d2_hat = sig.t2.modpow(&sig.s1, n).mul(&g_s9_h_s10_inv).modulo(n).mul(&x2.modpow(&sig.c, n)).modulo(n);

    let d3_hat = pk.g.modpow(&sig.s3, n).mul(&pk.h.modpow(&sig.s4, n)).modulo(n).mul(&sig.t2.modpow(&sig.c, n)).modulo(n);

    let d4_hat = pk.g.modpow(&sig.s1, n).mul(&pk.h.modpow(&sig.s5, n)).modulo(n).mul(&x4.modpow(&sig.c, n)).modulo(n);

    let d5_hat = f.modpow(&sig.s2, n).mul(&x5.modpow(&sig.c, n)).modulo(n);

    let recomputed = Transcript::new()
        .int(&pk.a)
        .int(&pk.a0)
        .int(&pk.g)
        .int(&pk.h)
        .int(&sig.t1)
        .int(&sig.t2)
        .int(&sig.t3)
        .int(&sig.t4)
        .int(&d1_hat)
        .int(&d2_hat)
        .int(&d3_hat)
        .int(&d4_hat)
        .int(&d5_hat)
        .bytes(message)
        .challenge(params.k, params.hash_algorithm);

    recomputed == sig.c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use crate::mech1::join::*;
    use crate::mech1::setup::group_setup;
    use crate::mech1::sign::sign;
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

    fn joined_member(rng: &mut StdRng) -> (GroupPublicKey, crate::mech1::SignatureKey, Mechanism1Params) {
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
    fn honestly_generated_signature_verifies() {
        let mut rng = StdRng::seed_from_u64(99);
        let (pk, key, params) = joined_member(&mut rng);
        let sig = sign(&pk, &params, &key, b"bsn-a", b"message", &mut rng);
        assert!(verify(&pk, &params, &sig, b"bsn-a", b"message"));
    }

    #[test]
    fn tampering_with_message_flips_verification() {
        let mut rng = StdRng::seed_from_u64(100);
        let (pk, key, params) = joined_member(&mut rng);
        let sig = sign(&pk, &params, &key, b"bsn-a", b"message", &mut rng);
        assert!(!verify(&pk, &params, &sig, b"bsn-a", b"messagE"));
    }

    #[test]
    fn tampering_with_bsn_flips_verification() {
        let mut rng = StdRng::seed_from_u64(101);
        let (pk, key, params) = joined_member(&mut rng);
        let sig = sign(&pk, &params, &key, b"bsn-a", b"message", &mut rng);
        assert!(!verify(&pk, &params, &sig, b"bsn-b", b"message"));
    }
}
