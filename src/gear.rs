//! Immutable description of a single spur gear.

use crate::errors::GearError;
use crate::float_types::Real;

/// Shape parameters of one gear.
///
/// Built once and never changed afterwards. All lengths share one unit; the
/// `pitch_radius` is the circle the involute flanks unwind from, and the teeth
/// extend `tooth_height` beyond it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearSpec {
    tooth_count: usize,
    pitch_radius: Real,
    tooth_height: Real,
    thickness: Real,
    arm_count: usize,
    tessellation: usize,
    corrosion: bool,
}

impl GearSpec {
    /// Validate and create a [`GearSpec`].
    ///
    /// # Parameters
    /// - `tooth_count`: number of teeth (>= 1)
    /// - `pitch_radius`: radius of the circle the tooth flanks start from
    /// - `tooth_height`: radial extent of a tooth beyond `pitch_radius`
    /// - `thickness`: face width along the gear axis
    /// - `arm_count`: number of spokes between hub and rim (>= 1)
    /// - `tessellation`: subdivisions per curve and per surface direction (>= 1)
    /// - `corrosion`: whether vertices carry a speckle index in `tex_coord.x`
    ///
    /// Whether the teeth fit around the circumference is only known after the
    /// involute solve; see [`crate::involute::InvoluteSolution::for_spec`].
    pub fn new(
        tooth_count: usize,
        pitch_radius: Real,
        tooth_height: Real,
        thickness: Real,
        arm_count: usize,
        tessellation: usize,
        corrosion: bool,
    ) -> Result<Self, GearError> {
        check_count("tooth_count", tooth_count)?;
        check_length("pitch_radius", pitch_radius)?;
        check_length("tooth_height", tooth_height)?;
        check_length("thickness", thickness)?;
        check_count("arm_count", arm_count)?;
        check_count("tessellation", tessellation)?;

        Ok(Self {
            tooth_count,
            pitch_radius,
            tooth_height,
            thickness,
            arm_count,
            tessellation,
            corrosion,
        })
    }

    pub const fn tooth_count(&self) -> usize {
        self.tooth_count
    }

    pub const fn pitch_radius(&self) -> Real {
        self.pitch_radius
    }

    pub const fn tooth_height(&self) -> Real {
        self.tooth_height
    }

    pub const fn thickness(&self) -> Real {
        self.thickness
    }

    pub const fn arm_count(&self) -> usize {
        self.arm_count
    }

    pub const fn tessellation(&self) -> usize {
        self.tessellation
    }

    pub const fn corrosion(&self) -> bool {
        self.corrosion
    }

    /// Radius of the tooth tips.
    pub fn addendum_radius(&self) -> Real {
        self.pitch_radius + self.tooth_height
    }

    /// Angle between two neighbouring teeth.
    pub fn tooth_pitch(&self) -> Real {
        crate::float_types::TAU / self.tooth_count as Real
    }
}

fn check_length(name: &'static str, value: Real) -> Result<(), GearError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GearError::InvalidDimension { name, value })
    }
}

fn check_count(name: &'static str, value: usize) -> Result<(), GearError> {
    if value > 0 {
        Ok(())
    } else {
        Err(GearError::InvalidDimension {
            name,
            value: value as Real,
        })
    }
}
