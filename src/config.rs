//! Configuration — §6 "External interfaces": the scheme-identifier grammar
//! and each mechanism's recognized parameter table.
//!
//! `m{1,4,5}-{policy}[-{repr}-{mulmode}]` is parsed once at the boundary
//! (§9 "Factory-of-strings dispatch" → "parse the identifier string once")
//! into an enumerated [`SchemeIdentifier`], and a flat key/value parameter
//! map is parsed into the concrete `Mechanism{1,4}Params` struct the
//! matching module already defines, rejecting any name §6 doesn't list
//! with `GroupSigError::Parameter` exactly as §7 requires.

use std::collections::BTreeMap;

use crate::error::{GroupSigError, Result};
use crate::hash::HashAlgorithm;
use crate::mech1::Mechanism1Params;
use crate::mech4::Mechanism4Params;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MechanismId {
    One,
    Four,
    Five,
}

/// §6's seven policy tags, named after the revocation categories they
/// select (`nr`=none, `bl`=blacklisting, `lpk`/`gpk`=local/global
/// private-key revocation, `ls`/`gs`=local/global signature revocation,
/// `cu`=credential update).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyTag {
    Nr,
    Bl,
    Lpk,
    Gpk,
    Ls,
    Gs,
    Cu,
}

impl PolicyTag {
    fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "nr" => PolicyTag::Nr,
            "bl" => PolicyTag::Bl,
            "lpk" => PolicyTag::Lpk,
            "gpk" => PolicyTag::Gpk,
            "ls" => PolicyTag::Ls,
            "gs" => PolicyTag::Gs,
            "cu" => PolicyTag::Cu,
            other => return Err(GroupSigError::Parameter(format!("unknown policy tag `{other}`"))),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegerRepr {
    BigInt,
    MontBigInt,
    FixedWidth,
    MontFixedWidth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarMulMode {
    Affine,
    Mixed,
}

/// A parsed scheme identifier (§6 "Scheme identifiers").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemeIdentifier {
    pub mechanism: MechanismId,
    pub policy: PolicyTag,
    pub repr: Option<IntegerRepr>,
    pub mul_mode: Option<ScalarMulMode>,
}

impl SchemeIdentifier {
    /// Parses `m{1,4,5}-{policy}[-{repr}-{mulmode}]`. Mechanism 1 rejects
    /// any `repr`/`mulmode` suffix outright ("it uses BigInt arithmetic
    /// only"); `mont-bigint`/`mont-fixedwidth` themselves contain a hyphen,
    /// so the suffix is matched against the remaining token count rather
    /// than split naively on every `-`.
    pub fn parse(id: &str) -> Result<Self> {
        let tokens: Vec<&str> = id.split('-').collect();
        if tokens.len() < 2 {
            return Err(GroupSigError::Parameter(format!("malformed scheme identifier `{id}`")));
        }

        let mechanism = match tokens[0] {
            "m1" => MechanismId::One,
            "m4" => MechanismId::Four,
            "m5" => MechanismId::Five,
            other => return Err(GroupSigError::Parameter(format!("unknown mechanism identifier `{other}`"))),
        };
        let policy = PolicyTag::parse(tokens[1])?;
        let rest = &tokens[2..];

        if mechanism == MechanismId::One {
            if !rest.is_empty() {
                return Err(GroupSigError::Parameter("mechanism 1 accepts only `mN-POLICY`, no representation/mulmode suffix".into()));
            }
            return Ok(SchemeIdentifier { mechanism, policy, repr: None, mul_mode: None });
        }

        if rest.is_empty() {
            return Ok(SchemeIdentifier { mechanism, policy, repr: None, mul_mode: None });
        }

        let (repr_tokens, mulmode_token) = rest.split_at(rest.len() - 1);
        let mulmode_token = mulmode_token
            .first()
            .ok_or_else(|| GroupSigError::Parameter(format!("malformed scheme identifier `{id}`")))?;

        let repr = match repr_tokens {
            ["bigint"] => IntegerRepr::BigInt,
            ["fixedwidth"] => IntegerRepr::FixedWidth,
            ["mont", "bigint"] => IntegerRepr::MontBigInt,
            ["mont", "fixedwidth"] => IntegerRepr::MontFixedWidth,
            other => return Err(GroupSigError::Parameter(format!("unknown representation `{}`", other.join("-")))),
        };
        let mul_mode = match *mulmode_token {
            "affine" => ScalarMulMode::Affine,
            "mixed" => ScalarMulMode::Mixed,
            other => return Err(GroupSigError::Parameter(format!("unknown scalar-mul mode `{other}`"))),
        };

        Ok(SchemeIdentifier { mechanism, policy, repr: Some(repr), mul_mode: Some(mul_mode) })
    }
}

fn require(params: &BTreeMap<String, String>, key: &str) -> Result<&str> {
    params.get(key).map(|s| s.as_str()).ok_or_else(|| GroupSigError::Parameter(format!("missing required parameter `{key}`")))
}

fn parse_u64(params: &BTreeMap<String, String>, key: &str) -> Result<u64> {
    require(params, key)?.parse::<u64>().map_err(|_| GroupSigError::Parameter(format!("parameter `{key}` is not an integer")))
}

fn parse_hash_algorithm(params: &BTreeMap<String, String>) -> Result<HashAlgorithm> {
    match require(params, "hash_algorithm")? {
        "sha1" => Ok(HashAlgorithm::Sha1),
        "sha256" => Ok(HashAlgorithm::Sha256),
        "sha512" => Ok(HashAlgorithm::Sha512),
        other => Err(GroupSigError::Parameter(format!("unknown hash_algorithm `{other}`"))),
    }
}

/// §6 Mechanism 1's recognized key set: `{k, Lx, LX, Lp, Le, LE,
/// hash_algorithm, eps|epsilon}`. Any other key is rejected.
const MECHANISM1_KEYS: &[&str] = &["k", "Lx", "LX", "Lp", "Le", "LE", "hash_algorithm", "eps", "epsilon"];

pub fn parse_mechanism1_params(params: &BTreeMap<String, String>) -> Result<Mechanism1Params> {
    for key in params.keys() {
        if !MECHANISM1_KEYS.contains(&key.as_str()) {
            return Err(GroupSigError::Parameter(format!("unknown mechanism-1 parameter `{key}`")));
        }
    }
    let eps_str = params.get("eps").or_else(|| params.get("epsilon")).ok_or_else(|| GroupSigError::Parameter("missing required parameter `eps`/`epsilon`".into()))?;
    let (eps_num, eps_den) = match eps_str.split_once('/') {
        Some((n, d)) => (
            n.parse::<u64>().map_err(|_| GroupSigError::Parameter("eps numerator is not an integer".into()))?,
            d.parse::<u64>().map_err(|_| GroupSigError::Parameter("eps denominator is not an integer".into()))?,
        ),
        None => return Err(GroupSigError::Parameter("eps must be given as `num/den`, e.g. `5/4`".into())),
    };

    Ok(Mechanism1Params {
        lp: parse_u64(params, "Lp")?,
        lx: parse_u64(params, "Lx")?,
        lx_big: parse_u64(params, "LX")?,
        le: parse_u64(params, "Le")?,
        le_big: parse_u64(params, "LE")?,
        k: parse_u64(params, "k")?,
        eps_num,
        eps_den,
        hash_algorithm: parse_hash_algorithm(params)?,
    })
}

/// §6 Mechanism 4's recognized key set: `{t, hash_algorithm}`, where `t`
/// here is the nonce byte length (not the BN loop parameter, which is
/// fixed and not a configuration knob — see `mech4`'s module doc comment).
const MECHANISM4_KEYS: &[&str] = &["t", "hash_algorithm"];

pub fn parse_mechanism4_params(params: &BTreeMap<String, String>) -> Result<Mechanism4Params> {
    for key in params.keys() {
        if !MECHANISM4_KEYS.contains(&key.as_str()) {
            return Err(GroupSigError::Parameter(format!("unknown mechanism-4 parameter `{key}`")));
        }
    }
    let nonce_len = parse_u64(params, "t")? as usize;
    Ok(Mechanism4Params { nonce_len, hash_algorithm: parse_hash_algorithm(params)? })
}

/// §6 Mechanism 5's recognized key set: `{Kn, K, Kc, Ks, Ke, Keprime, m,
/// hash_algorithm}`. Mechanism 5 is out of scope (§1); this only validates
/// the key set so the factory can at least parse `m5-*` identifiers and
/// reject unknown parameter names per §6, without building anything from
/// the values.
const MECHANISM5_KEYS: &[&str] = &["Kn", "K", "Kc", "Ks", "Ke", "Keprime", "m", "hash_algorithm"];

pub fn validate_mechanism5_params(params: &BTreeMap<String, String>) -> Result<()> {
    for key in params.keys() {
        if !MECHANISM5_KEYS.contains(&key.as_str()) {
            return Err(GroupSigError::Parameter(format!("unknown mechanism-5 parameter `{key}`")));
        }
    }
    Ok(())
}

/// A `SchemeIdentifier` plus its raw parameter map, round-trippable
/// through JSON (feature `serde`) for embedding in test fixtures.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemeConfig {
    pub identifier: String,
    pub params: BTreeMap<String, String>,
}

impl SchemeConfig {
    pub fn parsed_identifier(&self) -> Result<SchemeIdentifier> {
        SchemeIdentifier::parse(&self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mechanism1_identifier() {
        let id = SchemeIdentifier::parse("m1-lpk").unwrap();
        assert_eq!(id.mechanism, MechanismId::One);
        assert_eq!(id.policy, PolicyTag::Lpk);
        assert!(id.repr.is_none());
    }

    #[test]
    fn mechanism1_rejects_repr_suffix() {
        assert!(SchemeIdentifier::parse("m1-lpk-bigint-affine").is_err());
    }

    #[test]
    fn parses_mechanism4_identifier_with_montgomery_repr() {
        let id = SchemeIdentifier::parse("m4-nr-mont-bigint-mixed").unwrap();
        assert_eq!(id.mechanism, MechanismId::Four);
        assert_eq!(id.repr, Some(IntegerRepr::MontBigInt));
        assert_eq!(id.mul_mode, Some(ScalarMulMode::Mixed));
    }

    #[test]
    fn unknown_policy_tag_is_rejected() {
        assert!(SchemeIdentifier::parse("m4-bogus-bigint-affine").is_err());
    }

    #[test]
    fn mechanism1_params_reject_unknown_key() {
        let mut params = BTreeMap::new();
        params.insert("Lp".to_string(), "1024".to_string());
        params.insert("bogus".to_string(), "1".to_string());
        assert!(parse_mechanism1_params(&params).is_err());
    }

    #[test]
    fn mechanism1_params_parse_successfully() {
        let mut params = BTreeMap::new();
        params.insert("Lp".to_string(), "1024".to_string());
        params.insert("Lx".to_string(), "160".to_string());
        params.insert("LX".to_string(), "410".to_string());
        params.insert("Le".to_string(), "170".to_string());
        params.insert("LE".to_string(), "420".to_string());
        params.insert("k".to_string(), "160".to_string());
        params.insert("eps".to_string(), "5/4".to_string());
        params.insert("hash_algorithm".to_string(), "sha1".to_string());
        let parsed = parse_mechanism1_params(&params).unwrap();
        assert_eq!(parsed.lp, 1024);
        assert_eq!(parsed.eps_num, 5);
        assert_eq!(parsed.eps_den, 4);
    }
}
