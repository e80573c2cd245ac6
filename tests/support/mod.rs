//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use geartrain::{
    float_types::Real,
    gear::GearSpec,
    mesh::{Mesh, QuadStrip},
};
use nalgebra::Vector3;

/// Bisection tolerance used by the tests, the f64 default.
pub const TOLERANCE: Real = 1e-7;

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]` of every vertex.
pub fn bounding_box(mesh: &Mesh) -> [Real; 6] {
    let mut bb = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        Real::MIN,
        Real::MIN,
        Real::MIN,
    ];
    for v in mesh.vertices() {
        let p = v.pos;
        bb[0] = bb[0].min(p.x);
        bb[1] = bb[1].min(p.y);
        bb[2] = bb[2].min(p.z);
        bb[3] = bb[3].max(p.x);
        bb[4] = bb[4].max(p.y);
        bb[5] = bb[5].max(p.z);
    }
    bb
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Geometric normal of every non-degenerate quad compared against the summed
/// vertex normals; returns the smallest cosine found (1.0 for a perfect strip).
pub fn worst_quad_alignment(strip: &QuadStrip) -> Real {
    strip
        .quads()
        .filter_map(|[a0, b0, b1, a1]| {
            let geometric = (b0.pos - a0.pos).cross(&(b1.pos - a0.pos))
                + (b1.pos - a0.pos).cross(&(a1.pos - a0.pos));
            let shading: Vector3<Real> = a0.normal + b0.normal + b1.normal + a1.normal;
            let (g, s) = (geometric.norm(), shading.norm());
            (g > 1e-12 && s > 1e-12).then(|| geometric.dot(&shading) / (g * s))
        })
        .fold(1.0, Real::min)
}

/// The drive gear of the default transmission, coarsely tessellated.
pub fn drive_spec(tessellation: usize, corrosion: bool) -> GearSpec {
    GearSpec::new(23, 10.0, 2.0, 2.0, 3, tessellation, corrosion).unwrap()
}

/// The driven gear of the default transmission, coarsely tessellated.
pub fn driven_spec(tessellation: usize, corrosion: bool) -> GearSpec {
    GearSpec::new(47, 10.0 * 47.0 / 23.0, 2.0, 2.0, 5, tessellation, corrosion).unwrap()
}
