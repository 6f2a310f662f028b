//! Mechanism-1 signing (§4.G "Sign"), including the partial/full
//! precomputation split the spec calls out explicitly.

use rand::RngCore;

use crate::bigint::Integer;
use crate::hash::{hl, Transcript};
use crate::mech1::{GroupPublicKey, Mechanism1Params, SignatureKey, Signature};

/// The bsn-independent half of a signature (steps 1–2 of §4.G "Sign"):
/// randomized re-blindings of the credential plus their opening proofs'
/// commitments, none of which depend on the message or linking base.
pub struct Precomputation {
    w1: Integer,
    w2: Integer,
    w3: Integer,
    r1: Integer,
    r2: Integer,
    r3: Integer,
    r4: Integer,
    r5: Integer,
    r9: Integer,
    r10: Integer,
    t1: Integer,
    t2: Integer,
    t3: Integer,
    d1: Integer,
    d2: Integer,
    d3: Integer,
    d4: Integer,
}

/// Step 1–2: sample the blinding factors and commitments that do not
/// depend on `bsn` or the message.
pub fn precompute(pk: &GroupPublicKey, params: &Mechanism1Params, key: &SignatureKey, rng: &mut impl RngCore) -> Precomputation {
    let two_lp = 2 * params.lp;
    let w1 = Integer::random_bits(two_lp, rng);
    let w2 = Integer::random_bits(two_lp, rng);
    let w3 = Integer::random_bits(two_lp, rng);

    let r1 = Integer::random_bits(params.eps_scale(2 * params.lp + params.k), rng);
    let r2 = Integer::random_bits(params.eps_scale(params.lx_big + params.k), rng);
    let r3 = Integer::random_bits(params.eps_scale(2 * params.lp + params.k), rng);
    let r4 = Integer::random_bits(params.eps_scale(2 * params.lp + params.k), rng);
    let r5 = Integer::random_bits(params.eps_scale(2 * params.lp + params.k), rng);
    let r9 = Integer::random_bits(params.eps_scale(params.le_big + 2 * params.lp + params.k), rng);
    let r10 = Integer::random_bits(params.eps_scale(params.le_big + 2 * params.lp + params.k), rng);

    let t1 = key.a.mul(&pk.b.modpow(&w1, &pk.n)).modulo(&pk.n);
    let t2 = pk.g.modpow(&w1, &pk.n).mul(&pk.h.modpow(&w2, &pk.n)).modulo(&pk.n);
    let t3 = pk.g.modpow(&key.e, &pk.n).mul(&pk.h.modpow(&w3, &pk.n)).modulo(&pk.n);

    let a_r2_b_r9 = pk.a.modpow(&r2, &pk.n).mul(&pk.b.modpow(&r9, &pk.n)).modulo(&pk.n);
    let d1 = t1
        .modpow(&r1, &pk.n)
        .mul(&a_r2_b_r9.mod_inverse(&pk.n).expect("a^r2*b^r9 invertible mod n"))
        .modulo(&pk.n);
    let g_r9_h_r10 = pk.g.modpow(&r9, &pk.n).mul(&pk.h.modpow(&r10, &pk.n)).modulo(&pk.n);
    let d2 = t2
        .modpow(&r1, &pk.n)
        .mul(&g_r9_h_r10.mod_inverse(&pk.n).expect("g^r9*h^r10 invertible mod n"))
        .modulo(&pk.n);
    let d3 = pk.g.modpow(&r3, &pk.n).mul(&pk.h.modpow(&r4, &pk.n)).modulo(&pk.n);
    let d4 = pk.g.modpow(&r1, &pk.n).mul(&pk.h.modpow(&r5, &pk.n)).modulo(&pk.n);

    Precomputation { w1, w2, w3, r1, r2, r3, r4, r5, r9, r10, t1, t2, t3, d1, d2, d3, d4 }
}

/// Step 3: the per-bsn generator `f = HL(bsn, 2Lp)² mod n`.
pub fn bsn_generator(bsn: &[u8], params: &Mechanism1Params, n: &Integer) -> Integer {
    hl(bsn, 2 * params.lp, params.hash_algorithm).square().modulo(n)
}

/// Full sign: precompute, derive the bsn-dependent pieces, hash the
/// transcript, and produce the response scalars.
#[tracing::instrument(skip(pk, params, key, rng), fields(msg_len = message.len()))]
pub fn sign(
    pk: &GroupPublicKey,
    params: &Mechanism1Params,
    key: &SignatureKey,
    bsn: &[u8],
    message: &[u8],
    rng: &mut impl RngCore,
) -> Signature {
    let pre = precompute(pk, params, key, rng);
    sign_with_precomputation(pk, params, key, pre, bsn, message)
}

/// Online phase only: given a precomputation from [`precompute`], finish
/// the signature using only the message-dependent stages.
pub fn sign_with_precomputation(
    pk: &GroupPublicKey,
    params: &Mechanism1Params,
    key: &SignatureKey,
    pre: Precomputation,
    bsn: &[u8],
    message: &[u8],
) -> Signature {
    let f = bsn_generator(bsn, params, &pk.n);
    let t4 = f.modpow(&key.x, &pk.n);
    let d5 = f.modpow(&pre.r2, &pk.n);

    let c = Transcript::new()
        .int(&pk.a)
        .int(&pk.a0)
        .int(&pk.g)
        .int(&pk.h)
        .int(&pre.t1)
        .int(&pre.t2)
        .int(&pre.t3)
        .int(&t4)
        .int(&pre.d1)
        .int(&pre.d2)
        .int(&pre.d3)
        .int(&pre.d4)
        .int(&d5)
        .bytes(message)
        .challenge(params.k, params.hash_algorithm);

    let two_le_big = Integer::one().shl(params.le_big);
    let two_lx_big = Integer::one().shl(params.lx_big);
    let s1 = pre.r1.sub(&c.mul(&key.e.sub(&two_le_big)));
    let s2 = pre.r2.sub(&c.mul(&key.x.sub(&two_lx_big)));
    let s3 = pre.r3.sub(&c.mul(&pre.w1));
    let s4 = pre.r4.sub(&c.mul(&pre.w2));
    let s5 = pre.r5.sub(&c.mul(&pre.w3));
    let s9 = pre.r9.sub(&c.mul(&key.e.mul(&pre.w1)));
    let s10 = pre.r10.sub(&c.mul(&key.e.mul(&pre.w2)));

    Signature {
        c,
        s1,
        s2,
        s3,
        s4,
        s5,
        s9,
        s10,
        t1: pre.t1,
        t2: pre.t2,
        t3: pre.t3,
        t4,
    }
}
