//! Gear construction errors

use crate::float_types::Real;

/// Everything that can go wrong between a gear description and its mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GearError {
    /// The involute tip angle leaves no room between neighbouring teeth
    #[error(
        "(InvalidGearParameters) 2 x {contact_half_angle:.6} rad exceeds pitch {tooth_pitch:.6} rad"
    )]
    InvalidGearParameters {
        contact_half_angle: Real,
        tooth_pitch: Real,
    },
    /// A bisection ran out of iterations before reaching the tolerance
    #[error("(SolverNonConvergence) gave up after {iterations} iterations, residual {residual:e}")]
    SolverNonConvergence { iterations: usize, residual: Real },
    /// A dimension or count is zero, negative, NaN or infinite
    #[error("(InvalidDimension) {name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: Real },
    /// Writing an exported mesh failed
    #[error("(Io) {0}")]
    Io(String),
}

impl From<std::io::Error> for GearError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl GearError {
    /// Whether the error came from the numeric solve rather than from the inputs.
    pub const fn is_solver_failure(&self) -> bool {
        matches!(self, GearError::SolverNonConvergence { .. })
    }
}
