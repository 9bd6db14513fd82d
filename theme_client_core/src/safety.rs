//! Safety gate
//!
//! The one decision that must hold before any sync, push or dev-server
//! invocation: the target theme is not the live theme. It is re-derived
//! from the candidate and the live theme alone, never from how the
//! selection menu was built.

use crate::theme::Theme;
use thiserror::Error;

/// Why a candidate was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SafetyViolation {
    #[error("BLOCKED: Selected theme IS the live theme (ID: {id})")]
    SameIdAsLive { id: u64 },

    #[error("BLOCKED: Selected theme has role \"live\" (ID: {id})")]
    RoleIsLive { id: u64 },
}

/// `false` iff the candidate shares the live theme's id or has role `live`
pub fn is_eligible(candidate: &Theme, live: &Theme) -> bool {
    verify(candidate, live).is_ok()
}

/// Authoritative gate; ids are compared before roles
pub fn verify(candidate: &Theme, live: &Theme) -> Result<(), SafetyViolation> {
    if candidate.id == live.id {
        return Err(SafetyViolation::SameIdAsLive { id: candidate.id });
    }

    if candidate.role.is_live() {
        return Err(SafetyViolation::RoleIsLive { id: candidate.id });
    }

    Ok(())
}
