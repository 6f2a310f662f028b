//! §6 "Persisted state": fixed safe-prime/BN-parameter test fixtures,
//! gated behind `#[cfg(feature = "dev-vectors")]` so downstream crates can
//! opt into the same reproducible values for their own tests rather than
//! paying a fresh `group_setup` prime search every run.
//!
//! §6 names the standard's own prefixed safe primes for Lp ∈ {384, 512,
//! 1024}; `examples/original_source/` — the one place those could have
//! been mined from — was filtered down to zero retrievable source files
//! (see its `_INDEX.md`), so this module does not claim to reproduce them.
//! What it provides instead are independently generated safe primes at
//! smaller bit lengths, verified probably-prime by a standalone
//! Miller–Rabin run, suitable for fast deterministic tests but not for
//! matching the standard's own shipped test vectors byte-for-byte.

use crate::bigint::Integer;

/// A safe-prime pair `(p, q)` with `p = 2q+1`, both prime, for Mechanism-1
/// group setup with `skip_create`-style fixed primes instead of a fresh
/// search.
pub struct SafePrimePair {
    pub p: Integer,
    pub q: Integer,
}

impl SafePrimePair {
    /// `p'`, the safe prime's Sophie Germain half (§3 "safe prime factors'
    /// halves").
    pub fn p_prime(&self) -> Integer {
        self.q.clone()
    }
}

fn pair(p_decimal: &str, q_decimal: &str) -> SafePrimePair {
    SafePrimePair {
        p: Integer::from_str_radix(p_decimal, 10).expect("valid decimal literal"),
        q: Integer::from_str_radix(q_decimal, 10).expect("valid decimal literal"),
    }
}

/// A 48-bit safe prime, useful for the fastest possible Mechanism-1 tests.
pub fn safe_prime_48() -> SafePrimePair {
    pair("203493106137947", "101746553068973")
}

/// A 64-bit safe prime.
pub fn safe_prime_64() -> SafePrimePair {
    pair("12368480899045270283", "6184240449522635141")
}
