//! Procedural spur gear as a quad-strip soup.
//!
//! ## **Tooth layout**
//!
//! One tooth pitch `2π/z` is split, counter-clockwise, into
//! ```text
//! | root arc θs | rising flank α | tip arc θb | falling flank α |
//! ```
//! where `α` is the involute's contact half angle and `θs : θb = 0.65 : 0.35`.
//! The tooth frame is centred on the root arc, so the rising flank starts at
//! `θs/2`; the falling flank of a tooth is emitted as the mirrored flank of
//! the next tooth (at `−θs/2 − α`).
//!
//! ## **Gear body**
//! ```text
//!   radius   r+h ┬ tip arc
//!                │ teeth (flanks, faces)
//!            r   ┼ root arc
//!                │ rim faces
//!         0.8r   ┼ bore wall
//!                │ spokes
//!         0.2r   ┼ hub outer ring
//!         0.1r   ┴ hub bore
//! ```
//! The gear occupies `z ∈ [−thickness, 0]`; every surface is tessellated
//! `n × n` (the hub uses 360 angular steps).
//!
//! Strips never share vertices: neighbouring strips re-evaluate the same
//! parametric sample, so the mesh is unindexed.

use crate::errors::GearError;
use crate::float_types::{
    ARM_HALF_WIDTH_FRACTION, HUB_BORE_FRACTION, HUB_OUTER_FRACTION, HUB_SEGMENTS,
    RIM_INNER_FRACTION, Real, TAU,
};
use crate::gear::GearSpec;
use crate::involute::{InvoluteSolution, ToothAngles, involute_xy};
use crate::mesh::vertex::Vertex;
use crate::mesh::{Mesh, QuadStrip, Surface};
use nalgebra::{Point3, Rotation3, Vector3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Corrosion speckle indices are drawn uniformly from `0..SPECKLE_LEVELS`.
pub const SPECKLE_LEVELS: u32 = 10;

impl Mesh {
    /// Solve the involute for `spec` to within `tolerance` and build its mesh.
    ///
    /// `seed` drives the corrosion speckle; it has no effect when
    /// `spec.corrosion()` is off, and the same seed always yields the same mesh.
    ///
    /// # Example
    /// ```
    /// # use geartrain::{gear::GearSpec, mesh::Mesh};
    /// let spec = GearSpec::new(23, 10.0, 2.0, 2.0, 3, 4, false).unwrap();
    /// let mesh = Mesh::gear(&spec, 1e-7, 0).unwrap();
    /// assert_eq!(mesh.vertex_count(), Mesh::expected_vertex_count(23, 3, 4));
    /// ```
    pub fn gear(spec: &GearSpec, tolerance: Real, seed: u64) -> Result<Mesh, GearError> {
        let solution = InvoluteSolution::for_spec(spec, tolerance)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        Self::gear_with_rng(spec, &solution, &mut rng)
    }

    /// Build the mesh of `spec` from an already solved involute.
    ///
    /// Fails only when `solution` does not fit `spec.tooth_count()` teeth.
    pub fn gear_with_rng<R: Rng>(
        spec: &GearSpec,
        solution: &InvoluteSolution,
        rng: &mut R,
    ) -> Result<Mesh, GearError> {
        let angles = solution.tooth_angles(spec.tooth_count())?;
        let layout = Layout {
            n: spec.tessellation(),
            radius: spec.pitch_radius(),
            height: spec.tooth_height(),
            thickness: spec.thickness(),
            parametric_angle: solution.parametric_angle,
            angles,
        };

        let mut emitter = Emitter {
            rng,
            corrosion: spec.corrosion(),
            strips: Vec::with_capacity(
                12 * layout.n * spec.tooth_count()
                    + 4 * HUB_SEGMENTS
                    + 4 * layout.n * spec.arm_count(),
            ),
        };

        let tooth = layout.tooth();
        for k in 0..spec.tooth_count() {
            emitter.emit_rotated(&tooth, k as Real * angles.tooth_pitch);
        }

        for strip in layout.hub() {
            emitter.emit(strip);
        }

        let arm = layout.arm();
        let arm_step = TAU / spec.arm_count() as Real;
        for k in 0..spec.arm_count() {
            emitter.emit_rotated(&arm, k as Real * arm_step);
        }

        let mesh = Mesh::from_strips(emitter.strips);
        tracing::debug!(
            teeth = spec.tooth_count(),
            arms = spec.arm_count(),
            strips = mesh.strip_count(),
            vertices = mesh.vertex_count(),
            "gear mesh built"
        );
        Ok(mesh)
    }
}

/// Pushes finished strips, stamping the speckle index on every vertex.
struct Emitter<'a, R: Rng> {
    rng: &'a mut R,
    corrosion: bool,
    strips: Vec<QuadStrip>,
}

impl<R: Rng> Emitter<'_, R> {
    fn speckle(&mut self, v: Vertex) -> Vertex {
        if self.corrosion {
            v.with_speckle(self.rng.random_range(0..SPECKLE_LEVELS) as Real)
        } else {
            v
        }
    }

    fn emit(&mut self, mut strip: QuadStrip) {
        for v in &mut strip.vertices {
            *v = self.speckle(*v);
        }
        self.strips.push(strip);
    }

    fn emit_rotated(&mut self, template: &[QuadStrip], angle: Real) {
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), angle);
        for strip in template {
            let vertices = strip
                .vertices
                .iter()
                .map(|v| self.speckle(v.rotated_z(&rotation)))
                .collect();
            self.strips.push(QuadStrip {
                surface: strip.surface,
                vertices,
            });
        }
    }
}

/// Everything the templates need, in plain numbers.
struct Layout {
    n: usize,
    radius: Real,
    height: Real,
    thickness: Real,
    parametric_angle: Real,
    angles: ToothAngles,
}

#[inline]
fn lerp(from: Real, to: Real, i: usize, n: usize) -> Real {
    from + (to - from) * i as Real / n as Real
}

/// Point on a circle with a radial normal, pointing away from the axis when `outward`.
fn radial(radius: Real, angle: Real, z: Real, outward: bool) -> Vertex {
    let (sin, cos) = angle.sin_cos();
    let sign = if outward { 1.0 } else { -1.0 };
    Vertex::new(
        Point3::new(radius * cos, radius * sin, z),
        Vector3::new(sign * cos, sign * sin, 0.0),
    )
}

/// Point of a face perpendicular to the axis: `+Z` on top (`z = 0`), `−Z` underneath.
fn axial(radius: Real, angle: Real, z: Real, up: bool) -> Vertex {
    let (sin, cos) = angle.sin_cos();
    Vertex::new(
        Point3::new(radius * cos, radius * sin, z),
        Vector3::new(0.0, 0.0, if up { 1.0 } else { -1.0 }),
    )
}

impl Layout {
    fn depth(&self, j: usize) -> Real {
        -self.thickness * j as Real / self.n as Real
    }

    /// Sweep the profile edge `a → b` through the thickness.
    ///
    /// `ẑ × (b − a)` must point along the normals of `a` and `b`.
    fn extrude(&self, surface: Surface, a: &Vertex, b: &Vertex) -> QuadStrip {
        let mut strip = QuadStrip::with_capacity(surface, self.n + 1);
        for j in 0..=self.n {
            let z = a.pos.z + self.depth(j);
            strip.push_pair(a.at_depth(z), b.at_depth(z));
        }
        strip
    }

    /// Ring sector between two radii on the top (`up`) or bottom face.
    fn annulus(
        &self,
        surface: Surface,
        outer: Real,
        inner: Real,
        from: Real,
        to: Real,
        up: bool,
    ) -> QuadStrip {
        let z = if up { 0.0 } else { -self.thickness };
        let mut strip = QuadStrip::with_capacity(surface, self.n + 1);
        for j in 0..=self.n {
            let angle = lerp(from, to, j, self.n);
            let o = axial(outer, angle, z, up);
            let i = axial(inner, angle, z, up);
            if up {
                strip.push_pair(i, o);
            } else {
                strip.push_pair(o, i);
            }
        }
        strip
    }

    /// Strips of the tooth at angle 0: flanks, root and tip arcs, tooth faces,
    /// the rim band under one pitch and the bore wall behind it.
    fn tooth(&self) -> Vec<QuadStrip> {
        let n = self.n;
        let r = self.radius;
        let ToothAngles {
            contact_half_angle: alpha,
            theta_small,
            theta_big,
            ..
        } = self.angles;
        let half_small = 0.5 * theta_small;
        // Tooth body spans [0, 2α + θb] before the half-root offset.
        let body = 2.0 * alpha + theta_big;
        let offset = Rotation3::from_axis_angle(&Vector3::z_axis(), half_small);

        let samples: Vec<Real> = (0..=n).map(|i| lerp(0.0, self.parametric_angle, i, n)).collect();
        let flank: Vec<Vertex> = samples
            .iter()
            .map(|&c| {
                let (x, y) = involute_xy(r, c);
                let (sin, cos) = c.sin_cos();
                Vertex::new(Point3::new(x, y, 0.0), Vector3::new(sin, -cos, 0.0)).rotated_z(&offset)
            })
            .collect();
        // (radius, polar angle) of each flank sample before the half-root offset
        let polar: Vec<(Real, Real)> = samples
            .iter()
            .map(|&c| {
                let (x, y) = involute_xy(r, c);
                (x.hypot(y), y.atan2(x))
            })
            .collect();

        let mut strips = Vec::with_capacity(12 * n);

        for i in 1..=n {
            strips.push(self.extrude(Surface::Flank, &flank[i], &flank[i - 1]));
        }
        for i in 1..=n {
            strips.push(self.extrude(
                Surface::Flank,
                &flank[i - 1].mirrored_xz(),
                &flank[i].mirrored_xz(),
            ));
        }

        let root: Vec<Vertex> = (0..=n)
            .map(|i| radial(r, lerp(-half_small, half_small, i, n), 0.0, true))
            .collect();
        for i in 1..=n {
            strips.push(self.extrude(Surface::Root, &root[i], &root[i - 1]));
        }

        let tip_start = half_small + alpha;
        let tip_end = tip_start + theta_big;
        let tip: Vec<Vertex> = (0..=n)
            .map(|i| radial(r + self.height, lerp(tip_start, tip_end, i, n), 0.0, true))
            .collect();
        for i in 1..=n {
            strips.push(self.extrude(Surface::Tip, &tip[i], &tip[i - 1]));
        }

        // Faces: row i runs at the radius of involute sample i, from the rising
        // flank to its mirror image about the tooth's centre line.
        for up in [true, false] {
            let z = if up { 0.0 } else { -self.thickness };
            for i in 0..n {
                let (rho0, phi0) = polar[i];
                let (rho1, phi1) = polar[i + 1];
                let mut strip = QuadStrip::with_capacity(Surface::ToothFace, n + 1);
                for j in 0..=n {
                    let inner = axial(rho0, half_small + lerp(phi0, body - phi0, j, n), z, up);
                    let outer = axial(rho1, half_small + lerp(phi1, body - phi1, j, n), z, up);
                    if up {
                        strip.push_pair(inner, outer);
                    } else {
                        strip.push_pair(outer, inner);
                    }
                }
                strips.push(strip);
            }
        }

        let rim_span = (1.0 - RIM_INNER_FRACTION) * r;
        let sectors = [(0.0, body), (-theta_small, 0.0)];
        for up in [true, false] {
            for (from, to) in sectors {
                for i in 0..n {
                    strips.push(self.annulus(
                        Surface::Rim,
                        r - rim_span * i as Real / n as Real,
                        r - rim_span * (i + 1) as Real / n as Real,
                        half_small + from,
                        half_small + to,
                        up,
                    ));
                }
            }
        }

        let bore_radius = RIM_INNER_FRACTION * r;
        for (from, to) in sectors {
            let wall: Vec<Vertex> = (0..=n)
                .map(|i| radial(bore_radius, half_small + lerp(from, to, i, n), 0.0, false))
                .collect();
            for i in 1..=n {
                strips.push(self.extrude(Surface::Bore, &wall[i - 1], &wall[i]));
            }
        }

        strips
    }

    /// Hub around the axis: outer ring, bore ring, top and bottom annulus.
    fn hub(&self) -> Vec<QuadStrip> {
        let outer = HUB_OUTER_FRACTION * self.radius;
        let bore = HUB_BORE_FRACTION * self.radius;
        let step = TAU / HUB_SEGMENTS as Real;

        let mut strips = Vec::with_capacity(4 * HUB_SEGMENTS);
        for s in 1..=HUB_SEGMENTS {
            let prev = (s - 1) as Real * step;
            let next = s as Real * step;

            strips.push(self.extrude(
                Surface::Hub,
                &radial(outer, next, 0.0, true),
                &radial(outer, prev, 0.0, true),
            ));
            strips.push(self.extrude(
                Surface::Hub,
                &radial(bore, prev, 0.0, false),
                &radial(bore, next, 0.0, false),
            ));

            for up in [true, false] {
                let z = if up { 0.0 } else { -self.thickness };
                let mut cap = QuadStrip::with_capacity(Surface::Hub, self.n + 1);
                for j in 0..=self.n {
                    let rho = lerp(outer, bore, j, self.n);
                    let a = axial(rho, prev, z, up);
                    let b = axial(rho, next, z, up);
                    if up {
                        cap.push_pair(a, b);
                    } else {
                        cap.push_pair(b, a);
                    }
                }
                strips.push(cap);
            }
        }
        strips
    }

    /// One spoke along +X, from the hub ring to the bore wall.
    ///
    /// The ends follow both circles, so the spoke meets them without gaps.
    fn arm(&self) -> Vec<QuadStrip> {
        let n = self.n;
        let hub = HUB_OUTER_FRACTION * self.radius;
        let rim = RIM_INNER_FRACTION * self.radius;
        let half_width = ARM_HALF_WIDTH_FRACTION * self.radius;
        let start = |y: Real| (hub * hub - y * y).sqrt();
        let end = |y: Real| (rim * rim - y * y).sqrt();
        let along = |y: Real, k: usize| lerp(start(y), end(y), k, n);

        let up_normal = Vector3::z();
        let down_normal = -Vector3::z();

        let mut strips = Vec::with_capacity(4 * n);
        for i in 1..=n {
            let y0 = lerp(-half_width, half_width, i - 1, n);
            let y1 = lerp(-half_width, half_width, i, n);

            let mut top = QuadStrip::with_capacity(Surface::Arm, n + 1);
            let mut bottom = QuadStrip::with_capacity(Surface::Arm, n + 1);
            for k in 0..=n {
                top.push_pair(
                    Vertex::new(Point3::new(along(y1, k), y1, 0.0), up_normal),
                    Vertex::new(Point3::new(along(y0, k), y0, 0.0), up_normal),
                );
                bottom.push_pair(
                    Vertex::new(Point3::new(along(y0, k), y0, -self.thickness), down_normal),
                    Vertex::new(Point3::new(along(y1, k), y1, -self.thickness), down_normal),
                );
            }
            strips.push(top);
            strips.push(bottom);
        }

        for i in 1..=n {
            let upper = self.depth(i - 1);
            let lower = self.depth(i);

            let mut left = QuadStrip::with_capacity(Surface::Arm, n + 1);
            let mut right = QuadStrip::with_capacity(Surface::Arm, n + 1);
            for k in 0..=n {
                let x = along(half_width, k);
                left.push_pair(
                    Vertex::new(Point3::new(x, half_width, lower), Vector3::y()),
                    Vertex::new(Point3::new(x, half_width, upper), Vector3::y()),
                );
                right.push_pair(
                    Vertex::new(Point3::new(x, -half_width, upper), -Vector3::y()),
                    Vertex::new(Point3::new(x, -half_width, lower), -Vector3::y()),
                );
            }
            strips.push(left);
            strips.push(right);
        }

        strips
    }
}
