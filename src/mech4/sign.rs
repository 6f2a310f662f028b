//! Mechanism-4 signing (§4.H "Sign").
//!
//! `ρ = HL(f ‖ bsn) mod r` is *deterministic* in `(f, bsn)`, not freshly
//! random: rerandomizing the credential `(A,Γ)` by the same `ρ` every time
//! a given member signs under a given `bsn` is exactly what makes the
//! revealed pair `(A',Γ') = ([ρ]A, [ρ]Γ)` double as the linking token
//! (§4.G's `T₄` done the pairing way) while staying a fresh-looking,
//! unrelated pair under any other `bsn` — the same role `bsn_generator`
//! plays in Mechanism 1's `T₄`.
//!
//! `(A',Γ')` alone already lets anyone check `e(A',P₂)=e(Γ',X)` without
//! learning `f`, so membership validity needs no separate proof. What
//! *does* need a proof is binding the signature to `message`: without it,
//! an eavesdropper could replay an observed `(A',Γ')` pair under a
//! different message. The Schnorr proof of knowledge of `ζ=ρf` (the
//! discrete log of `Γ'` relative to `P₁`) is Fiat–Shamir-bound to
//! `message`, so forging it for a new message requires solving that
//! discrete log — it does not, by itself, prove anything about group
//! membership, which the pairing check alone already guarantees.

use rand::RngCore;

use crate::hash::{hl, Transcript};
use crate::mech4::{mod_r, GroupPublicKey4, Mechanism4Params, Signature4, SignatureKey4};

use crate::curve::scalar_mul::scalar_mul;

fn transcript(pk: &GroupPublicKey4, a_prime: &crate::curve::AffinePoint<crate::field::Fq>, gamma_prime: &crate::curve::AffinePoint<crate::field::Fq>, r_point: &crate::curve::AffinePoint<crate::field::Fq>, message: &[u8], bsn: &[u8], alg: crate::hash::HashAlgorithm) -> crate::bigint::Integer {
    let _ = pk;
    Transcript::new()
        .int(&a_prime.x.to_natural())
        .int(&a_prime.y.to_natural())
        .int(&gamma_prime.x.to_natural())
        .int(&gamma_prime.y.to_natural())
        .int(&r_point.x.to_natural())
        .int(&r_point.y.to_natural())
        .bytes(message)
        .bytes(bsn)
        .challenge(256, alg)
}

/// §4.H "Sign": deterministically rerandomize the credential under `bsn`,
/// then prove knowledge of the rerandomized exponent bound to `message`.
#[tracing::instrument(skip(pk, params, key, rng), fields(msg_len = message.len()))]
pub fn sign(pk: &GroupPublicKey4, params: &Mechanism4Params, key: &SignatureKey4, bsn: &[u8], message: &[u8], rng: &mut impl RngCore) -> Signature4 {
    let ctx = &pk.ctx;

    let mut rho_seed = key.f.to_str_radix(16).into_bytes();
    rho_seed.extend_from_slice(bsn);
    let rho = mod_r(&hl(&rho_seed, ctx.r.bit_length() + 128, params.hash_algorithm), &ctx.r);

    let a_prime = scalar_mul(&key.credential.a, &rho, &ctx.g1_group);
    let gamma_prime = scalar_mul(&key.credential.b, &rho, &ctx.g1_group);
    let zeta = mod_r(&key.f.mul(&rho), &ctx.r);

    let k = mod_r(&crate::bigint::Integer::random_bits(ctx.r.bit_length(), rng), &ctx.r);
    let r_point = scalar_mul(&ctx.p1, &k, &ctx.g1_group);
    let c = mod_r(&transcript(pk, &a_prime, &gamma_prime, &r_point, message, bsn, params.hash_algorithm), &ctx.r);
    let s = mod_r(&k.add(&c.mul(&zeta)), &ctx.r);

    Signature4 { a_prime, gamma_prime, c, s }
}

pub(crate) fn recompute_transcript(pk: &GroupPublicKey4, sig: &Signature4, message: &[u8], bsn: &[u8], alg: crate::hash::HashAlgorithm) -> crate::bigint::Integer {
    let ctx = &pk.ctx;
    let r_hat = scalar_mul(&ctx.p1, &sig.s, &ctx.g1_group).add(&scalar_mul(&sig.gamma_prime, &sig.c, &ctx.g1_group).negate(), &ctx.g1_group);
    transcript(pk, &sig.a_prime, &sig.gamma_prime, &r_hat, message, bsn, alg)
}
