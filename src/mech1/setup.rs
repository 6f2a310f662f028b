//! Mechanism-1 group setup (§4.G "Group setup").

use rand::RngCore;

use crate::bigint::Integer;
use crate::error::GroupSigError;
use crate::mech1::{GroupPublicKey, IssuingPrivateKey, Mechanism1Params};

/// Draw a uniformly random element of `QR(n)`: square a random unit mod `n`.
fn sample_qrn(n: &Integer, rng: &mut impl RngCore) -> Integer {
    loop {
        let r = Integer::random_bits(n.bit_length(), rng).modulo(n);
        if r.is_zero() || r.gcd(n) != Integer::one() {
            continue;
        }
        let sq = r.square().modulo(n);
        if !sq.is_zero() {
            return sq;
        }
    }
}

/// Group setup: draw safe primes `p = 2p′+1`, `q = 2q′+1` of `Lp` bits,
/// `n = p·q`, and pairwise-distinct generators `a, a₀, g, h, b ∈ QR(n)`.
#[tracing::instrument(skip(rng), fields(lp = params.lp))]
pub fn group_setup(
    params: &Mechanism1Params,
    rng: &mut impl RngCore,
) -> Result<(GroupPublicKey, IssuingPrivateKey), GroupSigError> {
    if params.lp < 16 {
        return Err(GroupSigError::Parameter(format!("Lp too small: {}", params.lp)));
    }
    let (p, p_prime) = safe_prime(params.lp, rng);
    let (q, q_prime) = safe_prime(params.lp, rng);
    let n = p.mul(&q);

    let mut generators = Vec::with_capacity(5);
    while generators.len() < 5 {
        let candidate = sample_qrn(&n, rng);
        if !generators.contains(&candidate) {
            generators.push(candidate);
        }
    }
    let (a, a0, g, h, b) = (
        generators[0].clone(),
        generators[1].clone(),
        generators[2].clone(),
        generators[3].clone(),
        generators[4].clone(),
    );

    tracing::debug!(bit_len = n.bit_length(), "mechanism-1 group setup complete");
    Ok((
        GroupPublicKey { n, a, a0, g, h, b },
        IssuingPrivateKey { p_prime, q_prime },
    ))
}

/// A safe prime `p = 2p′+1` of exactly `bit_length` bits, returned alongside `p′`.
fn safe_prime(bit_length: u64, rng: &mut impl RngCore) -> (Integer, Integer) {
    loop {
        let p_prime = Integer::probable_prime(bit_length - 1, 40, rng);
        let p = p_prime.mul(&Integer::from_u64(2)).add(&Integer::one());
        if p.is_probable_prime(40, rng) {
            return (p, p_prime);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

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

    #[test]
    fn generators_are_distinct_and_in_qrn() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = toy_params();
        let (pk, isk) = group_setup(&params, &mut rng).unwrap();
        assert_eq!(pk.n, isk.p().mul(&isk.q()));
        let gens = [pk.a.clone(), pk.a0.clone(), pk.g.clone(), pk.h.clone(), pk.b.clone()];
        for i in 0..gens.len() {
            for j in (i + 1)..gens.len() {
                assert_ne!(gens[i], gens[j]);
            }
        }
    }
}
