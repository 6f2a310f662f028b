//! Component I — Revocation policy fabric (§4.I).
//!
//! A verifier's behavior when checking signature validity is parameterized
//! by a [`RevocationPolicy`]: `none`, `blacklisting`, `private-key
//! revocation`, or `signature revocation` (each either [`RevocationScope::Local`]
//! — instantiated fresh per verifier — or [`RevocationScope::Global`] — a
//! singleton shared across verifiers under a scheme), plus the
//! issuer-driven, inherently-global `credential update` policy.
//!
//! This module is the policy-*dispatch* layer §4.I names; it does not
//! reimplement revocation's cryptography. The actual per-mechanism checks
//! already live next to their signature schemes (`mech1::revoke::is_revoked`
//! for private-key revocation under Mechanism 1, `mech4::nonrevocation` for
//! the challenge/response form under Mechanism 4) — a caller runs the
//! mechanism-specific check first and reports its outcome, or the leaked
//! value it tested, to the policy held here. Signature-revocation's "live
//! signer reference" requirement (§4.I) accordingly lives one layer up, in
//! whoever orchestrates the challenge/response exchange (`party`), not in
//! this module: a [`RevocationPolicy`] only ever sees the already-derived
//! comparable value, never the live prover.

use crate::bigint::Integer;
use crate::error::{GroupSigError, Result};

/// Whether a policy's list is private to one verifier or a scheme-wide
/// singleton. Does not change how a check is performed, only who may call
/// the `request_*` mutators under the party-orchestration layer's access
/// rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevocationScope {
    Local,
    Global,
}

/// §4.I's policy taxonomy. Each list entry is a scheme-specific value in
/// its own numeric domain (a joiner's `x′` mod `n` for Mechanism 1, a
/// member's `f` mod `r` for Mechanism 4, or an opaque identifier/token for
/// blacklisting and signature revocation) — this module treats every list
/// entry as an [`Integer`] and leaves domain interpretation to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevocationPolicy {
    None,
    Blacklisting { scope: RevocationScope, blacklist: Vec<Integer> },
    PrivateKeyRevocation { scope: RevocationScope, leaked_keys: Vec<Integer> },
    SignatureRevocation { scope: RevocationScope, revoked_tokens: Vec<Integer> },
    CredentialUpdate { excluded: Vec<Integer> },
}

impl RevocationPolicy {
    pub fn none() -> Self {
        RevocationPolicy::None
    }

    pub fn blacklisting(scope: RevocationScope) -> Self {
        RevocationPolicy::Blacklisting { scope, blacklist: Vec::new() }
    }

    pub fn private_key_revocation(scope: RevocationScope) -> Self {
        RevocationPolicy::PrivateKeyRevocation { scope, leaked_keys: Vec::new() }
    }

    pub fn signature_revocation(scope: RevocationScope) -> Self {
        RevocationPolicy::SignatureRevocation { scope, revoked_tokens: Vec::new() }
    }

    pub fn credential_update() -> Self {
        RevocationPolicy::CredentialUpdate { excluded: Vec::new() }
    }

    /// §4.I `requestBlacklistRevocation`.
    pub fn request_blacklist_revocation(&mut self, identity: Integer) -> Result<()> {
        match self {
            RevocationPolicy::Blacklisting { blacklist, .. } => {
                blacklist.push(identity);
                Ok(())
            }
            _ => Err(GroupSigError::Policy("active policy does not support blacklist revocation".into())),
        }
    }

    /// §4.I `requestPrivateKeyRevocation`.
    pub fn request_private_key_revocation(&mut self, leaked_key: Integer) -> Result<()> {
        match self {
            RevocationPolicy::PrivateKeyRevocation { leaked_keys, .. } => {
                leaked_keys.push(leaked_key);
                Ok(())
            }
            _ => Err(GroupSigError::Policy("active policy does not support private-key revocation".into())),
        }
    }

    /// §4.I `requestSignatureRevocation`.
    pub fn request_signature_revocation(&mut self, token: Integer) -> Result<()> {
        match self {
            RevocationPolicy::SignatureRevocation { revoked_tokens, .. } => {
                revoked_tokens.push(token);
                Ok(())
            }
            _ => Err(GroupSigError::Policy("active policy does not support signature revocation".into())),
        }
    }

    /// §4.I `onCredentialUpdate`, triggered by the issuer after a
    /// `mech4::credential_update::rotate_issuer_key` round: replace the
    /// excluded-member list with the members not carried forward.
    pub fn on_credential_update(&mut self, excluded_members: &[Integer]) -> Result<()> {
        match self {
            RevocationPolicy::CredentialUpdate { excluded } => {
                excluded.clear();
                excluded.extend_from_slice(excluded_members);
                Ok(())
            }
            _ => Err(GroupSigError::Policy("active policy is not credential-update".into())),
        }
    }

    /// §4.I `isAuthorRevoked(bsn,sig)`: for blacklisting and private-key
    /// revocation this is a direct membership test against the policy's
    /// list. `linked_value` is whatever the mechanism-specific check
    /// already derived (the linking base for blacklisting, the recovered
    /// private-key witness for private-key revocation); signature and
    /// credential-update policies answer this question through
    /// `is_signature_revoked`/the credential itself instead, so they always
    /// report `false` here.
    pub fn is_author_revoked(&self, linked_value: &Integer) -> bool {
        match self {
            RevocationPolicy::None => false,
            RevocationPolicy::Blacklisting { blacklist, .. } => blacklist.contains(linked_value),
            RevocationPolicy::PrivateKeyRevocation { leaked_keys, .. } => leaked_keys.contains(linked_value),
            RevocationPolicy::SignatureRevocation { .. } => false,
            RevocationPolicy::CredentialUpdate { .. } => false,
        }
    }

    /// §4.I `isSignatureRevoked(m,sig,prover)`: `candidate_token` is the
    /// value recovered from the challenge/response interaction the caller
    /// already ran against the live prover (e.g. the `f'` that
    /// `mech4::nonrevocation::check_nonrevocation_proof` confirmed a match
    /// for); this only decides whether that recovered value appears on the
    /// revoked list.
    pub fn is_signature_revoked(&self, candidate_token: &Integer) -> bool {
        match self {
            RevocationPolicy::SignatureRevocation { revoked_tokens, .. } => revoked_tokens.contains(candidate_token),
            _ => false,
        }
    }

    pub fn scope(&self) -> Option<RevocationScope> {
        match self {
            RevocationPolicy::None => None,
            RevocationPolicy::Blacklisting { scope, .. }
            | RevocationPolicy::PrivateKeyRevocation { scope, .. }
            | RevocationPolicy::SignatureRevocation { scope, .. } => Some(*scope),
            RevocationPolicy::CredentialUpdate { .. } => Some(RevocationScope::Global),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_revocation_flags_listed_key() {
        let mut policy = RevocationPolicy::private_key_revocation(RevocationScope::Local);
        let leaked = Integer::from_u64(42);
        policy.request_private_key_revocation(leaked.clone()).unwrap();
        assert!(policy.is_author_revoked(&leaked));
        assert!(!policy.is_author_revoked(&Integer::from_u64(7)));
    }

    #[test]
    fn wrong_policy_rejects_mismatched_request() {
        let mut policy = RevocationPolicy::none();
        assert!(policy.request_blacklist_revocation(Integer::from_u64(1)).is_err());
    }

    #[test]
    fn credential_update_tracks_excluded_members() {
        let mut policy = RevocationPolicy::credential_update();
        let excluded = vec![Integer::from_u64(1), Integer::from_u64(2)];
        policy.on_credential_update(&excluded).unwrap();
        match policy {
            RevocationPolicy::CredentialUpdate { excluded: got } => assert_eq!(got, excluded),
            _ => panic!("expected credential-update policy"),
        }
    }
}
