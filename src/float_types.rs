// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used by every bisection in the crate.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `GEARTRAIN_TOLERANCE`
///     (e.g. `GEARTRAIN_TOLERANCE=1e-9 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before building any gear
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-7
    }
}

/// Returns the current solver tolerance.
/// If not set yet, it tries `GEARTRAIN_TOLERANCE` (parsed as the active `Real`) and
/// falls back to the precision default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("GEARTRAIN_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Upper bound on bisection steps before a solve is reported as non-convergent.
pub const MAX_BISECTION_ITERATIONS: usize = 200;

// Epsilon
/// Loose comparison threshold for geometric checks
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Loose comparison threshold for geometric checks
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-8;

// Frac Pi 2
/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Gear body proportions
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Share of the free (non-engaged) pitch angle given to the addendum arc.
/// The dedendum arc receives the remainder.
pub const DUMMY_SPLIT_COEFFICIENT: Real = 0.35;

/// Inner radius of the rim, as a fraction of the pitch radius.
pub const RIM_INNER_FRACTION: Real = 0.8;
/// Outer radius of the hub.
pub const HUB_OUTER_FRACTION: Real = 0.2;
/// Radius of the bore through the hub.
pub const HUB_BORE_FRACTION: Real = 0.1;
/// Half of a spoke's width.
pub const ARM_HALF_WIDTH_FRACTION: Real = 0.05;

/// Angular resolution of the hub, independent of the gear tessellation.
pub const HUB_SEGMENTS: usize = 360;
