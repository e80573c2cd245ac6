//! Struct and functions for working with the `Vertex`s that quad strips are made of.

use crate::float_types::Real;
use nalgebra::{Point3, Rotation3, Vector2, Vector3};

/// A strip vertex, holding position, normal and texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    /// `x` is the corrosion speckle index (`0` when the gear is not corroded), `y` is unused
    pub tex_coord: Vector2<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`] with zero texture coordinates.
    ///
    /// * `pos`    – the position in gear space
    /// * `normal` – unit normal; it is **copied verbatim**, so make sure it
    ///   points out of the solid
    pub fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex {
            pos,
            normal,
            tex_coord: Vector2::new(0.0, 0.0),
        }
    }

    /// Same vertex with the speckle index replaced.
    pub fn with_speckle(mut self, speckle: Real) -> Self {
        self.tex_coord = Vector2::new(speckle, 0.0);
        self
    }

    /// Same vertex moved along the gear axis.
    pub fn at_depth(mut self, z: Real) -> Self {
        self.pos.z = z;
        self
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Rotate position and normal about the gear axis (Z).
    pub fn rotated_z(&self, rotation: &Rotation3<Real>) -> Vertex {
        Vertex {
            pos: rotation * self.pos,
            normal: rotation * self.normal,
            tex_coord: self.tex_coord,
        }
    }

    /// Reflect position and normal across the XZ plane (`y → −y`).
    pub fn mirrored_xz(&self) -> Vertex {
        Vertex {
            pos: Point3::new(self.pos.x, -self.pos.y, self.pos.z),
            normal: Vector3::new(self.normal.x, -self.normal.y, self.normal.z),
            tex_coord: self.tex_coord,
        }
    }
}
