//! Error taxonomy (§7).
//!
//! Every fallible public operation in this crate returns a
//! [`GroupSigError`]. Lower layers (`bigint`, `field`, `curve`, `pairing`)
//! keep their own narrow error enums and convert into this one at the
//! protocol boundary, the same way `myzkp::pcs::VerifyError` stayed local
//! to `pcs` and only got wrapped once it crossed into `scheduler`.

use thiserror::Error;

use crate::bigint::BigIntError;
use crate::curve::CurveError;
use crate::field::FieldError;
use crate::pairing::PairingError;

/// The six error kinds named in §7, in the order they are introduced there.
#[derive(Debug, Error)]
pub enum GroupSigError {
    /// Unknown scheme-identifier parameter name, or a value that fails to parse.
    #[error("parameter error: {0}")]
    Parameter(String),

    /// A protocol message was malformed or arrived out of order.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A zero-knowledge proof failed to verify, a commitment fell outside
    /// `QR(n)`, a range check failed, or a membership credential failed its
    /// pairing equation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A modular inverse of a non-invertible element was requested, a
    /// square root was requested of a non-residue, or a bit-string
    /// conversion overflowed its target length.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// A pool was double-released, or acquired after being closed.
    #[error("pool error: {0}")]
    Pool(String),

    /// The operation is not supported under the verifier's active
    /// revocation policy.
    #[error("policy error: {0}")]
    Policy(String),
}

impl From<BigIntError> for GroupSigError {
    fn from(e: BigIntError) -> Self {
        GroupSigError::Arithmetic(e.to_string())
    }
}

impl From<FieldError> for GroupSigError {
    fn from(e: FieldError) -> Self {
        GroupSigError::Arithmetic(e.to_string())
    }
}

impl From<CurveError> for GroupSigError {
    fn from(e: CurveError) -> Self {
        GroupSigError::Arithmetic(e.to_string())
    }
}

impl From<PairingError> for GroupSigError {
    fn from(e: PairingError) -> Self {
        GroupSigError::Arithmetic(e.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, GroupSigError>;
