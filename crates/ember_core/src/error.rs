//! Command validation errors
//!
//! Combat commands arrive from the input collaborator and may be
//! malformed. Nothing here is fatal: callers treat a rejected command
//! as "no effect" and keep simulating.

use thiserror::Error;

/// Why an externally supplied combat command was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command contained a non-finite vector component")]
    NonFinite,
    #[error("command direction has zero length")]
    ZeroDirection,
}

/// Validate an origin/direction pair from the outside world
pub fn validate_command(
    origin: glam::Vec3,
    direction: glam::Vec3,
) -> Result<glam::Vec3, CommandError> {
    if !origin.is_finite() || !direction.is_finite() {
        return Err(CommandError::NonFinite);
    }
    let dir = direction.normalize_or_zero();
    if dir == glam::Vec3::ZERO {
        return Err(CommandError::ZeroDirection);
    }
    Ok(dir)
}
