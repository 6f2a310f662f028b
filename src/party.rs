//! Component J — party orchestration (§4.J / §6 factory grammar).
//!
//! Each protocol role a scheme participant can play — issuer, signer,
//! verifier, linker — is an enum over the mechanisms this crate actually
//! runs (Mechanism 1, Mechanism 4) plus a `Mechanism5Placeholder` variant
//! that exists only so `revocation`/`party` dispatch uniformly across all
//! three `m{1,4,5}-*` identifiers §6 names; its `sign`/`verify` return
//! `GroupSigError::Protocol` since Mechanism 5 itself is out of scope
//! (§1). `create_scheme` is the one factory entry point: it parses a
//! scheme identifier and parameter table once (§9 "Factory-of-strings
//! dispatch") and hands back role-tagged types that hold protocol state
//! behind a small enum rather than threading raw mechanism types everywhere.

use std::collections::BTreeMap;

use rand::RngCore;

use crate::config::{parse_mechanism1_params, parse_mechanism4_params, validate_mechanism5_params, MechanismId, SchemeIdentifier};
use crate::error::{GroupSigError, Result};
use crate::mech1;
use crate::mech4;
use crate::revocation::RevocationPolicy;

/// The issuer role: holds the mechanism's private key and can run `join`
/// and (for Mechanism 4) rotate the group key for a credential update.
pub enum Issuer {
    Mechanism1 { pk: mech1::GroupPublicKey, isk: mech1::IssuingPrivateKey, params: mech1::Mechanism1Params },
    Mechanism4 { pk: mech4::GroupPublicKey4, isk: mech4::IssuingPrivateKey4, params: mech4::Mechanism4Params },
    Mechanism5Placeholder,
}

/// The signer role: holds a joined member's signature key and can `sign`.
pub enum Signer {
    Mechanism1 { pk: mech1::GroupPublicKey, params: mech1::Mechanism1Params, key: mech1::SignatureKey },
    Mechanism4 { pk: mech4::GroupPublicKey4, params: mech4::Mechanism4Params, key: mech4::SignatureKey4 },
    Mechanism5Placeholder,
}

/// The verifier role: holds the group public key and an active
/// [`RevocationPolicy`], and can `verify` plus consult that policy.
pub struct Verifier<M> {
    pub mechanism: M,
    pub policy: RevocationPolicy,
}

pub enum VerifierMechanism {
    Mechanism1 { pk: mech1::GroupPublicKey, params: mech1::Mechanism1Params },
    Mechanism4 { pk: mech4::GroupPublicKey4, params: mech4::Mechanism4Params },
    Mechanism5Placeholder,
}

/// The linker role: holds just enough public state to decide whether two
/// signatures came from the same signer under the same `bsn`.
pub enum Linker {
    Mechanism1,
    Mechanism4,
    Mechanism5Placeholder,
}

impl Signer {
    #[tracing::instrument(skip(self, rng))]
    pub fn sign(&self, bsn: &[u8], message: &[u8], rng: &mut impl RngCore) -> Result<SignatureAny> {
        match self {
            Signer::Mechanism1 { pk, params, key } => Ok(SignatureAny::Mechanism1(mech1::sign(pk, params, key, bsn, message, rng))),
            Signer::Mechanism4 { pk, params, key } => Ok(SignatureAny::Mechanism4(mech4::sign(pk, params, key, bsn, message, rng))),
            Signer::Mechanism5Placeholder => Err(GroupSigError::Protocol(crate::mech5::OUT_OF_SCOPE_MESSAGE.into())),
        }
    }
}

/// A signature tagged by which mechanism produced it, so a verifier or
/// linker that holds mixed-mechanism state can still dispatch correctly.
pub enum SignatureAny {
    Mechanism1(mech1::Signature),
    Mechanism4(mech4::Signature4),
}

impl Verifier<VerifierMechanism> {
    #[tracing::instrument(skip(self, sig))]
    pub fn verify(&self, sig: &SignatureAny, bsn: &[u8], message: &[u8]) -> Result<bool> {
        match (&self.mechanism, sig) {
            (VerifierMechanism::Mechanism1 { pk, params }, SignatureAny::Mechanism1(sig)) => Ok(mech1::verify(pk, params, sig, bsn, message)),
            (VerifierMechanism::Mechanism4 { pk, params }, SignatureAny::Mechanism4(sig)) => {
                Ok(mech4::verify(pk, sig, bsn, message, params.hash_algorithm))
            }
            (VerifierMechanism::Mechanism5Placeholder, _) => Err(GroupSigError::Protocol(crate::mech5::OUT_OF_SCOPE_MESSAGE.into())),
            _ => Err(GroupSigError::Protocol("signature mechanism does not match this verifier's scheme".into())),
        }
    }
}

impl Linker {
    pub fn link(&self, a: &SignatureAny, b: &SignatureAny) -> Result<bool> {
        match (self, a, b) {
            (Linker::Mechanism1, SignatureAny::Mechanism1(a), SignatureAny::Mechanism1(b)) => Ok(mech1::link(a, b)),
            (Linker::Mechanism4, SignatureAny::Mechanism4(a), SignatureAny::Mechanism4(b)) => Ok(mech4::link(a, b)),
            (Linker::Mechanism5Placeholder, _, _) => Err(GroupSigError::Protocol(crate::mech5::OUT_OF_SCOPE_MESSAGE.into())),
            _ => Err(GroupSigError::Protocol("signature mechanism does not match this linker's scheme".into())),
        }
    }
}

/// §6 "Scheme identifiers" / the factory: parse `identifier` and `params`
/// once, build the fixed per-scheme state (group setup for Mechanisms 1/4,
/// nothing buildable for Mechanism 5), and hand back the issuer alongside
/// a freshly-constructed verifier sharing the same group public key.
#[tracing::instrument(skip(params, rng))]
pub fn create_scheme(identifier: &str, params: &BTreeMap<String, String>, policy: RevocationPolicy, rng: &mut impl RngCore) -> Result<(Issuer, Verifier<VerifierMechanism>, Linker)> {
    let parsed = SchemeIdentifier::parse(identifier)?;
    match parsed.mechanism {
        MechanismId::One => {
            let mech_params = parse_mechanism1_params(params)?;
            let (pk, isk) = mech1::group_setup(&mech_params, rng)?;
            let verifier = Verifier { mechanism: VerifierMechanism::Mechanism1 { pk: pk.clone(), params: mech_params.clone() }, policy };
            Ok((Issuer::Mechanism1 { pk, isk, params: mech_params }, verifier, Linker::Mechanism1))
        }
        MechanismId::Four => {
            let mech_params = parse_mechanism4_params(params)?;
            let (pk, isk) = mech4::group_setup(&mech_params, rng)?;
            let verifier = Verifier { mechanism: VerifierMechanism::Mechanism4 { pk: pk.clone(), params: mech_params.clone() }, policy };
            Ok((Issuer::Mechanism4 { pk, isk, params: mech_params }, verifier, Linker::Mechanism4))
        }
        MechanismId::Five => {
            validate_mechanism5_params(params)?;
            let verifier = Verifier { mechanism: VerifierMechanism::Mechanism5Placeholder, policy };
            Ok((Issuer::Mechanism5Placeholder, verifier, Linker::Mechanism5Placeholder))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mechanism1_params_map() -> BTreeMap<String, String> {
        let mut m = BTreeMap::new();
        m.insert("Lp".to_string(), "48".to_string());
        m.insert("Lx".to_string(), "40".to_string());
        m.insert("LX".to_string(), "90".to_string());
        m.insert("Le".to_string(), "20".to_string());
        m.insert("LE".to_string(), "100".to_string());
        m.insert("k".to_string(), "32".to_string());
        m.insert("eps".to_string(), "5/4".to_string());
        m.insert("hash_algorithm".to_string(), "sha1".to_string());
        m
    }

    #[test]
    fn mechanism5_identifiers_construct_placeholder_parties() {
        let mut rng = StdRng::seed_from_u64(1);
        let (issuer, verifier, linker) = create_scheme("m5-nr", &BTreeMap::new(), RevocationPolicy::none(), &mut rng).unwrap();
        assert!(matches!(issuer, Issuer::Mechanism5Placeholder));
        assert!(matches!(verifier.mechanism, VerifierMechanism::Mechanism5Placeholder));
        assert!(matches!(linker, Linker::Mechanism5Placeholder));
    }

    #[test]
    fn mechanism5_unknown_parameter_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut params = BTreeMap::new();
        params.insert("bogus".to_string(), "1".to_string());
        assert!(create_scheme("m5-nr", &params, RevocationPolicy::none(), &mut rng).is_err());
    }

    #[test]
    fn mechanism1_end_to_end_through_party_api() {
        let mut rng = StdRng::seed_from_u64(2);
        let (issuer, verifier, linker) = create_scheme("m1-lpk", &mechanism1_params_map(), RevocationPolicy::private_key_revocation(crate::revocation::RevocationScope::Local), &mut rng).unwrap();
        let (pk, params) = match &issuer {
            Issuer::Mechanism1 { pk, params, .. } => (pk.clone(), params.clone()),
            _ => unreachable!(),
        };
        let isk = match &issuer {
            Issuer::Mechanism1 { isk, .. } => isk.clone(),
            _ => unreachable!(),
        };

        let (req1, state1) = mech1::join::prover_make_request(&pk, &params, &mut rng);
        let challenge = mech1::join::issuer_verify_request(&pk, &isk, &params, &req1, &mut rng).unwrap();
        let (req2, state2) = mech1::join::prover_make_credential_request(&pk, &params, &state1, &challenge, &mut rng);
        let credential = mech1::join::issuer_issue_credential(&pk, &isk, &params, &req2, &req1.c1, &challenge, &mut rng).unwrap();
        let key = mech1::join::prover_finalize(&pk, state2, credential).unwrap();

        let signer = Signer::Mechanism1 { pk, params, key };
        let sig = signer.sign(b"bsn", b"message", &mut rng).unwrap();
        assert!(verifier.verify(&sig, b"bsn", b"message").unwrap());
        assert!(linker.link(&sig, &sig).unwrap());

        let _ = HashAlgorithm::Sha1;
    }
}
