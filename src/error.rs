//! Errors for the configuration surface
//!
//! The simulation itself never fails; only loading a [`crate::Settings`]
//! can.

use core::fmt;

#[derive(Debug)]
pub enum SettingsError {
    /// The JSON could not be parsed into settings
    Parse(serde_json::Error),
    /// A size, speed or interval that must be positive was not
    NonPositive { field: &'static str, value: i64 },
    /// Jump velocity must point up (negative y)
    JumpNotUpward { jump_velocity: i32 },
    /// The world must be wider than the viewport and every actor
    WorldTooNarrow { world_width: i32, required: i32 },
    /// No room for enemies between the top margin and the ground
    EmptySpawnBand { ground_y: i32, clearance: i32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid settings JSON: {err}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::JumpNotUpward { jump_velocity } => {
                write!(f, "jump_velocity must be negative (got {jump_velocity})")
            }
            Self::WorldTooNarrow {
                world_width,
                required,
            } => write!(f, "world_width {world_width} is too narrow (need at least {required})"),
            Self::EmptySpawnBand { ground_y, clearance } => write!(
                f,
                "enemy spawn band is empty (ground_y {ground_y}, clearance {clearance})"
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
