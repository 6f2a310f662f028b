//! Mechanism 5 (prime-order elliptic curve, discrete-log encryption) is
//! explicitly out of scope (§1) beyond "what is needed to describe the
//! revocation/open workflow". This module carries no cryptography: it
//! exists only so `config::SchemeIdentifier::parse`, `revocation`, and
//! `party::create_scheme` can dispatch on an `m5-*` scheme identifier
//! uniformly with Mechanisms 1 and 4, per §6's factory grammar, which
//! names `m5` as a valid mechanism prefix and requires unknown parameter
//! names to fail regardless of which mechanism they were given for.
//!
//! `party::Issuer::Mechanism5Placeholder`/`Signer::Mechanism5Placeholder`/
//! `Linker::Mechanism5Placeholder` are the actual placeholder values;
//! nothing here is a type those need, since the placeholder role variants
//! carry no state. This module is the comment anchor for that design
//! choice plus `config::validate_mechanism5_params`, which is the one
//! piece of Mechanism 5 surface this crate actually executes.

/// Returns the error every Mechanism-5 signing/verification attempt
/// produces. Kept as a named constant string (rather than inlined at each
/// call site) so `party`'s placeholder variants and any future caller
/// report the exact same message.
pub const OUT_OF_SCOPE_MESSAGE: &str = "mechanism 5 is out of scope beyond the revocation/open workflow interface";
