//! `Mesh` struct: an unindexed soup of quad strips, plus the gear generator in [`gear`].

use crate::aabb::Aabb;
use crate::float_types::{EPSILON, HUB_SEGMENTS, Real};
use crate::triangulated::Triangulated3D;
use nalgebra::Point3;
use std::sync::OnceLock;

pub mod gear;
pub mod vertex;

use vertex::Vertex;

/// Which part of the gear a strip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Involute contact surface of a tooth
    Flank,
    /// Dedendum arc between two teeth
    Root,
    /// Addendum arc on top of a tooth
    Tip,
    /// Top or bottom face of a tooth
    ToothFace,
    /// Top or bottom face of the ring carrying the teeth
    Rim,
    /// Inner wall of the rim, facing the axis
    Bore,
    /// Hub rings and caps
    Hub,
    /// Spokes between hub and rim
    Arm,
}

/// A quad strip: vertices come in `(a, b)` pairs and quad `k` is
/// `(a_k, b_k, b_{k+1}, a_{k+1})`.
///
/// Every producer in this crate orders its pairs so that
/// `(b_k − a_k) × (a_{k+1} − a_k)` points along the vertex normals.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadStrip {
    pub surface: Surface,
    pub vertices: Vec<Vertex>,
}

impl QuadStrip {
    pub fn with_capacity(surface: Surface, pairs: usize) -> Self {
        Self {
            surface,
            vertices: Vec::with_capacity(2 * pairs),
        }
    }

    #[inline]
    pub fn push_pair(&mut self, a: Vertex, b: Vertex) {
        self.vertices.push(a);
        self.vertices.push(b);
    }

    pub fn pair_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Quads of this strip, in `(a_k, b_k, b_{k+1}, a_{k+1})` order.
    pub fn quads(&self) -> impl Iterator<Item = [&Vertex; 4]> + '_ {
        self.vertices
            .windows(4)
            .step_by(2)
            .map(|w| [&w[0], &w[1], &w[3], &w[2]])
    }
}

/// Renderable gear surface. Built once, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Strips in emission order
    pub strips: Vec<QuadStrip>,

    /// Lazily calculated AABB that spans `strips`.
    pub bounding_box: OnceLock<Aabb>,
}

impl Mesh {
    pub fn from_strips(strips: Vec<QuadStrip>) -> Self {
        Self {
            strips,
            bounding_box: OnceLock::new(),
        }
    }

    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.strips.iter().map(|s| s.vertices.len()).sum()
    }

    /// All vertices in emission order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.strips.iter().flat_map(|s| s.vertices.iter())
    }

    pub fn strips_of(&self, surface: Surface) -> impl Iterator<Item = &QuadStrip> + '_ {
        self.strips.iter().filter(move |s| s.surface == surface)
    }

    /// Returns the AABB of all vertex positions (a point box at the origin for an empty mesh).
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            Aabb::from_points(self.vertices().map(|v| &v.pos))
                .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
        })
    }

    /// Largest distance of any vertex from the gear axis (Z).
    pub fn bounding_radius(&self) -> Real {
        self.vertices()
            .map(|v| v.pos.x.hypot(v.pos.y))
            .fold(0.0, Real::max)
    }

    /// Number of vertices [`Mesh::gear`] emits for the given counts.
    ///
    /// Per tooth `24·n(n+1)`, for the hub `8·360·(n+1)`, per arm `8·n(n+1)`.
    pub const fn expected_vertex_count(
        tooth_count: usize,
        arm_count: usize,
        tessellation: usize,
    ) -> usize {
        let n = tessellation;
        24 * tooth_count * n * (n + 1) + 8 * HUB_SEGMENTS * (n + 1) + 8 * arm_count * n * (n + 1)
    }
}

/// Whether a triangle has area relative to its own size.
///
/// `|e1 × e2|` is compared against `EPSILON · longest²`, so the test does not
/// depend on the absolute scale of the gear.
fn is_degenerate([a, b, c]: &[Vertex; 3]) -> bool {
    let (ab, ac, bc) = (b.pos - a.pos, c.pos - a.pos, c.pos - b.pos);
    let longest = ab
        .norm_squared()
        .max(ac.norm_squared())
        .max(bc.norm_squared());
    let threshold = EPSILON * longest;
    ab.cross(&ac).norm_squared() <= threshold * threshold
}

/// Each quad is split along `a_k → b_{k+1}`; zero-area triangles are skipped.
impl Triangulated3D for Mesh {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for strip in &self.strips {
            for [a0, b0, b1, a1] in strip.quads() {
                for tri in [[*a0, *b0, *b1], [*a0, *b1, *a1]] {
                    if !is_degenerate(&tri) {
                        f(tri);
                    }
                }
            }
        }
    }
}
