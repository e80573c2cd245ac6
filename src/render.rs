//! Drawing backend seam.
//!
//! The crate does not talk to any graphics API. A frame is described as a
//! [`FrameSetup`] followed by gear and line draws; a windowing front end
//! implements [`Renderer`] on top of whatever it uses.

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::scene::Fog;
use nalgebra::{Isometry3, Matrix4, Point3};

/// Phong material of one gear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearMaterial {
    pub color: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl GearMaterial {
    pub const DRIVE: GearMaterial = GearMaterial::with_color([0.039, 0.492, 0.547]);
    pub const DRIVEN: GearMaterial = GearMaterial::with_color([0.715, 0.254, 0.055]);

    pub const fn with_color(color: [f32; 3]) -> Self {
        Self {
            color,
            ambient: 0.33,
            diffuse: 0.33,
            specular: 0.33,
            specular_color: [0.7, 0.7, 0.6],
            shininess: 20.0,
        }
    }
}

/// Per-frame state shared by every draw of the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSetup {
    pub projection: Matrix4<Real>,
    pub view: Matrix4<Real>,
    pub fog: Option<Fog>,
    pub light_position: Point3<Real>,
    /// Draw a marker at the light position
    pub light_marker: bool,
}

/// One gear placed in the world.
#[derive(Debug, Clone, Copy)]
pub struct GearDraw<'a> {
    pub mesh: &'a Mesh,
    pub transform: Isometry3<Real>,
    pub material: GearMaterial,
    /// Modulate the surface with the per-vertex speckle index
    pub corroded: bool,
}

/// Unlit polylines such as the axes and the lines of action.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDraw {
    pub color: [f32; 3],
    pub width: f32,
    pub polylines: Vec<Vec<Point3<Real>>>,
}

/// Unlit markers, drawn as round dots of `size` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PointDraw {
    pub color: [f32; 3],
    pub size: f32,
    pub points: Vec<Point3<Real>>,
}

pub trait Renderer {
    fn begin_frame(&mut self, frame: &FrameSetup);
    fn draw_gear(&mut self, gear: &GearDraw<'_>);
    fn draw_lines(&mut self, lines: &LineDraw);
    fn draw_points(&mut self, points: &PointDraw);
}

/// Renderer that only reports what it was asked to draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRenderer {
    pub frames: usize,
}

impl Renderer for TracingRenderer {
    fn begin_frame(&mut self, frame: &FrameSetup) {
        self.frames += 1;
        tracing::trace!(
            frame = self.frames,
            fog = frame.fog.is_some(),
            light = ?frame.light_position,
            "begin frame"
        );
    }

    fn draw_gear(&mut self, gear: &GearDraw<'_>) {
        tracing::trace!(
            strips = gear.mesh.strip_count(),
            translation = ?gear.transform.translation.vector,
            corroded = gear.corroded,
            "draw gear"
        );
    }

    fn draw_lines(&mut self, lines: &LineDraw) {
        tracing::trace!(polylines = lines.polylines.len(), "draw lines");
    }

    fn draw_points(&mut self, points: &PointDraw) {
        tracing::trace!(points = points.points.len(), "draw points");
    }
}
