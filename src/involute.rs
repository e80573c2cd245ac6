//! Involute tooth geometry solved by bisection.
//!
//! The involute of a circle of radius `r`, parametrised by the unwinding angle `t`,
//! is
//!
//! ```text
//! x(t) = r·(cos t + t·sin t)
//! y(t) = r·(sin t − t·cos t)
//! ρ(t) = r·√(1 + t²)
//! ```
//!
//! `ρ` is strictly increasing on `[0, π/2]`, so the parameter at which a flank
//! reaches the addendum circle is found with a plain bisection.

use crate::errors::GearError;
use crate::float_types::{DUMMY_SPLIT_COEFFICIENT, FRAC_PI_2, MAX_BISECTION_ITERATIONS, Real};
use crate::gear::GearSpec;
use nalgebra::Point3;

/// Classic parametric involute of a circle.
///
/// # Parameters
/// - `base_radius`: radius of the circle the string unwinds from
/// - `t`: involute parameter (unwinding angle)
///
/// # Returns
/// Cartesian coordinates (x, y) of the involute point
#[inline]
pub fn involute_xy(base_radius: Real, t: Real) -> (Real, Real) {
    (
        base_radius * (t.cos() + t * t.sin()),
        base_radius * (t.sin() - t * t.cos()),
    )
}

/// Distance from the centre of the base circle to the involute point at `t`.
#[inline]
pub fn involute_radius(base_radius: Real, t: Real) -> Real {
    base_radius * (1.0 + t * t).sqrt()
}

/// Outcome of a converged [`bisect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisection {
    pub root: Real,
    pub residual: Real,
    pub iterations: usize,
}

/// Bounded bisection on an increasing `residual` over `[lo, hi]`.
///
/// Stops as soon as `|residual(mid)| <= tolerance`. A bracket that never yields
/// such a midpoint within [`MAX_BISECTION_ITERATIONS`] steps is reported as
/// [`GearError::SolverNonConvergence`] instead of returning an inaccurate root.
pub fn bisect<F>(
    mut lo: Real,
    mut hi: Real,
    tolerance: Real,
    residual: F,
) -> Result<Bisection, GearError>
where
    F: Fn(Real) -> Real,
{
    let mut last = Real::INFINITY;
    for iteration in 1..=MAX_BISECTION_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        let value = residual(mid);
        if value.abs() <= tolerance {
            return Ok(Bisection {
                root: mid,
                residual: value,
                iterations: iteration,
            });
        }
        if value > 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
        last = value;
    }

    Err(GearError::SolverNonConvergence {
        iterations: MAX_BISECTION_ITERATIONS,
        residual: last,
    })
}

/// Where a gear's flank meets its addendum circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoluteSolution {
    /// Involute parameter `t*` with `ρ(t*) = pitch_radius + tooth_height`
    pub parametric_angle: Real,
    /// Polar angle of the involute point at `t*`; half of the angle one tooth flank pair engages
    pub contact_half_angle: Real,
}

/// Angular layout of one tooth pitch.
///
/// Going counter-clockwise through one pitch: the dedendum arc (`theta_small`),
/// a rising flank (`contact_half_angle`), the addendum arc (`theta_big`) and a
/// falling flank (`contact_half_angle`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToothAngles {
    pub tooth_pitch: Real,
    pub contact_half_angle: Real,
    pub theta_small: Real,
    pub theta_big: Real,
}

/// Solve for the involute parameter at which the flank reaches `pitch_radius + tooth_height`.
///
/// The search bracket is `t ∈ [0, π/2]`.
pub fn solve(
    pitch_radius: Real,
    tooth_height: Real,
    tolerance: Real,
) -> Result<InvoluteSolution, GearError> {
    let target = pitch_radius + tooth_height;
    let bisection = bisect(0.0, FRAC_PI_2, tolerance, |t| {
        let (x, y) = involute_xy(pitch_radius, t);
        (x * x + y * y).sqrt() - target
    })?;

    let t = bisection.root;
    let (x, y) = involute_xy(pitch_radius, t);
    tracing::debug!(
        pitch_radius,
        tooth_height,
        parametric_angle = t,
        iterations = bisection.iterations,
        residual = bisection.residual,
        "involute solve converged"
    );

    Ok(InvoluteSolution {
        parametric_angle: t,
        contact_half_angle: y.atan2(x),
    })
}

impl InvoluteSolution {
    /// Solve for `spec` to within `tolerance` and reject gears whose teeth would overlap.
    pub fn for_spec(spec: &GearSpec, tolerance: Real) -> Result<Self, GearError> {
        let solution = solve(spec.pitch_radius(), spec.tooth_height(), tolerance)?;
        solution.tooth_angles(spec.tooth_count())?;
        Ok(solution)
    }

    /// Split the tooth pitch of a `tooth_count` gear around this solution.
    ///
    /// Fails with [`GearError::InvalidGearParameters`] when
    /// `2 * contact_half_angle >= 2π / tooth_count`.
    pub fn tooth_angles(&self, tooth_count: usize) -> Result<ToothAngles, GearError> {
        let tooth_pitch = crate::float_types::TAU / tooth_count as Real;
        let engaged = 2.0 * self.contact_half_angle;
        if !(engaged < tooth_pitch) {
            return Err(GearError::InvalidGearParameters {
                contact_half_angle: self.contact_half_angle,
                tooth_pitch,
            });
        }

        let free = tooth_pitch - engaged;
        Ok(ToothAngles {
            tooth_pitch,
            contact_half_angle: self.contact_half_angle,
            theta_small: free * (1.0 - DUMMY_SPLIT_COEFFICIENT),
            theta_big: free * DUMMY_SPLIT_COEFFICIENT,
        })
    }
}

/// Contact geometry of a meshing pair, expressed in the drive gear's frame
/// (drive centre at the origin, driven centre on +X at `r1 + r2 + h`).
///
/// Only used to draw a debug overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshingContact {
    /// Angle of the base-circle tangent points seen from either centre
    pub line_of_action_angle: Real,
    /// First contact: line of action meets the driven addendum circle.
    /// Second contact: mirrored line meets the drive addendum circle.
    pub points: [Point3<Real>; 2],
    /// The two line-of-action segments between the base circles
    pub lines: [[Point3<Real>; 2]; 2],
}

impl MeshingContact {
    /// Find both contact points of two gears sharing `tooth_height`.
    pub fn solve(
        drive_radius: Real,
        driven_radius: Real,
        tooth_height: Real,
        tolerance: Real,
    ) -> Result<Self, GearError> {
        let r1 = drive_radius;
        let r2 = driven_radius;
        let distance = r1 + r2 + tooth_height;
        let alpha = ((r1 + r2) / distance).acos();
        let (sin_a, cos_a) = alpha.sin_cos();
        let cot_a = cos_a / sin_a;

        // Tangent to the drive base circle, descending towards the driven gear.
        let falling = |x: Real| -cot_a * (x - r1 * cos_a) + r1 * sin_a;
        // Mirror line, tangent to the driven base circle.
        let rising = |x: Real| cot_a * (x - (distance - r2 * cos_a)) + r2 * sin_a;

        let driven_tip_sq = (r2 + tooth_height) * (r2 + tooth_height);
        let first = bisect(r1, r1 + tooth_height, tolerance, |x| {
            let y = falling(x);
            driven_tip_sq - ((x - distance) * (x - distance) + y * y)
        })?;

        let drive_tip_sq = (r1 + tooth_height) * (r1 + tooth_height);
        let second = bisect(r1, r1 + tooth_height, tolerance, |x| {
            let y = rising(x);
            x * x + y * y - drive_tip_sq
        })?;

        let drive_tangent_x = r1 * cos_a;
        let driven_tangent_x = distance - r2 * cos_a;

        Ok(Self {
            line_of_action_angle: alpha,
            points: [
                Point3::new(first.root, falling(first.root), 0.0),
                Point3::new(second.root, rising(second.root), 0.0),
            ],
            lines: [
                [
                    Point3::new(drive_tangent_x, r1 * sin_a, 0.0),
                    Point3::new(driven_tangent_x, falling(driven_tangent_x), 0.0),
                ],
                [
                    Point3::new(driven_tangent_x, r2 * sin_a, 0.0),
                    Point3::new(drive_tangent_x, rising(drive_tangent_x), 0.0),
                ],
            ],
        })
    }
}
