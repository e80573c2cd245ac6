//! Two meshing gears: configuration, placement, one-time build and per-frame draws.
//!
//! World layout (gear axes along Z):
//! ```text
//!        drive                 driven
//!   (−r1, 0, 0) ───── r1+r2+h ───── (h+r2, 0, 0)
//! ```
//! The drive base circle touches the origin; the driven addendum circle reaches
//! past it by `h`, so the teeth of both gears overlap by one tooth height.

use crate::axes::axes;
use crate::errors::GearError;
use crate::float_types::{Real, tolerance};
use crate::gear::GearSpec;
use crate::involute::{InvoluteSolution, MeshingContact};
use crate::mesh::Mesh;
use crate::render::{FrameSetup, GearDraw, GearMaterial, LineDraw, PointDraw, Renderer};
use crate::scene::{AnimationClock, SceneState};
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Length of the reference axes.
pub const AXES_LENGTH: Real = 1.5;
/// Line width of the reference axes, in pixels.
pub const AXES_WIDTH: f32 = 3.0;
/// Size of the contact point markers, in pixels.
pub const CONTACT_POINT_SIZE: f32 = 5.0;

/// Startup parameters of the transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmissionConfig {
    pub drive_teeth: usize,
    pub driven_teeth: usize,
    pub drive_radius: Real,
    pub tooth_height: Real,
    pub thickness: Real,
    pub drive_arms: usize,
    pub driven_arms: usize,
    pub tessellation: usize,
    /// Bisection tolerance for the involute and contact solves
    pub tolerance: Real,
    /// Seed of the corrosion speckle; the driven gear uses `seed + 1`
    pub seed: u64,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self {
            drive_teeth: 23,
            driven_teeth: 47,
            drive_radius: 10.0,
            tooth_height: 2.0,
            thickness: 2.0,
            drive_arms: 3,
            driven_arms: 5,
            tessellation: 20,
            tolerance: tolerance(),
            seed: 0,
        }
    }
}

impl TransmissionConfig {
    /// Driven radius keeping both tooth pitches equal: `r1·z2/z1`.
    pub fn driven_radius(&self) -> Real {
        self.drive_radius * self.driven_teeth as Real / self.drive_teeth as Real
    }
}

/// The two gear descriptions and where they sit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearPair {
    pub drive: GearSpec,
    pub driven: GearSpec,
}

impl GearPair {
    /// The drive gear is plain, the driven gear carries the corrosion speckle.
    pub fn new(config: &TransmissionConfig) -> Result<Self, GearError> {
        let drive = GearSpec::new(
            config.drive_teeth,
            config.drive_radius,
            config.tooth_height,
            config.thickness,
            config.drive_arms,
            config.tessellation,
            false,
        )?;
        let driven = GearSpec::new(
            config.driven_teeth,
            config.driven_radius(),
            config.tooth_height,
            config.thickness,
            config.driven_arms,
            config.tessellation,
            true,
        )?;
        Ok(Self { drive, driven })
    }

    pub fn center_distance(&self) -> Real {
        self.drive.pitch_radius() + self.driven.pitch_radius() + self.drive.tooth_height()
    }

    pub fn drive_center(&self) -> Point3<Real> {
        Point3::new(-self.drive.pitch_radius(), 0.0, 0.0)
    }

    pub fn driven_center(&self) -> Point3<Real> {
        Point3::new(self.drive.tooth_height() + self.driven.pitch_radius(), 0.0, 0.0)
    }

    /// `z2 / z1`
    pub fn ratio(&self) -> Real {
        self.driven.tooth_count() as Real / self.drive.tooth_count() as Real
    }

    /// Radii of the two circles that roll on each other at the current centre distance.
    ///
    /// They split the centre distance in the tooth-count ratio and are tangent.
    pub fn operating_pitch_radii(&self) -> (Real, Real) {
        let distance = self.center_distance();
        let z1 = self.drive.tooth_count() as Real;
        let z2 = self.driven.tooth_count() as Real;
        let drive = distance * z1 / (z1 + z2);
        (drive, distance - drive)
    }

    /// Rotation of the driven gear when the drive gear has turned by `drive_angle`.
    pub fn driven_angle(&self, drive_angle: Real) -> Real {
        -drive_angle / self.ratio()
    }
}

/// A gear ready to draw.
#[derive(Debug, Clone)]
pub struct BuiltGear {
    pub spec: GearSpec,
    pub solution: InvoluteSolution,
    pub mesh: Mesh,
}

impl BuiltGear {
    pub fn build(spec: GearSpec, tolerance: Real, seed: u64) -> Result<Self, GearError> {
        let solution = InvoluteSolution::for_spec(&spec, tolerance)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let mesh = Mesh::gear_with_rng(&spec, &solution, &mut rng)?;
        Ok(Self {
            spec,
            solution,
            mesh,
        })
    }
}

/// Contact points and lines of action in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugOverlay {
    pub contact: MeshingContact,
    pub points: Vec<Point3<Real>>,
    pub lines: Vec<Vec<Point3<Real>>>,
}

impl DebugOverlay {
    fn new(contact: MeshingContact, offset: &Translation3<Real>) -> Self {
        Self {
            points: contact.points.iter().map(|p| offset * p).collect(),
            lines: contact
                .lines
                .iter()
                .map(|segment| segment.iter().map(|p| offset * p).collect())
                .collect(),
            contact,
        }
    }
}

/// Both gears, built once. Read-only afterwards.
#[derive(Debug, Clone)]
pub struct Transmission {
    pub config: TransmissionConfig,
    pub pair: GearPair,
    pub drive: BuiltGear,
    pub driven: BuiltGear,
    /// `None` when the contact solve failed
    pub overlay: Option<DebugOverlay>,
}

impl Transmission {
    /// Solve and tessellate both gears.
    ///
    /// A gear that cannot be built fails the whole transmission; a failed
    /// contact solve only drops the debug overlay.
    pub fn build(config: TransmissionConfig) -> Result<Self, GearError> {
        let pair = GearPair::new(&config)?;
        let driven_seed = config.seed.wrapping_add(1);

        #[cfg(feature = "parallel")]
        let (drive, driven) = rayon::join(
            || BuiltGear::build(pair.drive, config.tolerance, config.seed),
            || BuiltGear::build(pair.driven, config.tolerance, driven_seed),
        );
        #[cfg(not(feature = "parallel"))]
        let (drive, driven) = (
            BuiltGear::build(pair.drive, config.tolerance, config.seed),
            BuiltGear::build(pair.driven, config.tolerance, driven_seed),
        );
        let (drive, driven) = (drive?, driven?);

        let overlay = match MeshingContact::solve(
            pair.drive.pitch_radius(),
            pair.driven.pitch_radius(),
            pair.drive.tooth_height(),
            config.tolerance,
        ) {
            Ok(contact) => {
                let offset = Translation3::from(pair.drive_center().coords);
                Some(DebugOverlay::new(contact, &offset))
            },
            Err(err) => {
                tracing::warn!(%err, "contact point solve failed, debug lines disabled");
                None
            },
        };

        tracing::info!(
            drive_vertices = drive.mesh.vertex_count(),
            driven_vertices = driven.mesh.vertex_count(),
            center_distance = pair.center_distance(),
            "transmission built"
        );

        Ok(Self {
            config,
            pair,
            drive,
            driven,
            overlay,
        })
    }

    /// World placement of both gears with the drive gear turned by `drive_angle`.
    pub fn placements(&self, drive_angle: Real) -> (Isometry3<Real>, Isometry3<Real>) {
        let place = |center: Point3<Real>, angle: Real| {
            Isometry3::from_parts(
                Translation3::from(center.coords),
                UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle),
            )
        };
        (
            place(self.pair.drive_center(), drive_angle),
            place(self.pair.driven_center(), self.pair.driven_angle(drive_angle)),
        )
    }

    /// Emit one frame at animation `time`.
    pub fn render<R: Renderer>(&self, scene: &SceneState, time: Real, renderer: &mut R) {
        renderer.begin_frame(&FrameSetup {
            projection: scene.projection.matrix(),
            view: scene.view_matrix(),
            fog: scene.fog(),
            light_position: scene.light_position(time),
            light_marker: scene.light_on,
        });

        if scene.axes_on {
            renderer.draw_lines(&LineDraw {
                color: scene.axis_color.rgb(),
                width: AXES_WIDTH,
                polylines: axes(AXES_LENGTH),
            });
        }

        if scene.contact_lines {
            if let Some(overlay) = &self.overlay {
                renderer.draw_points(&PointDraw {
                    color: [1.0, 1.0, 1.0],
                    size: CONTACT_POINT_SIZE,
                    points: overlay.points.clone(),
                });
                renderer.draw_lines(&LineDraw {
                    color: [1.0, 1.0, 1.0],
                    width: 1.0,
                    polylines: overlay.lines.clone(),
                });
            }
        }

        let drive_angle = if scene.frozen {
            0.0
        } else {
            AnimationClock::drive_angle(time)
        };
        let (drive_at, driven_at) = self.placements(drive_angle);

        for (gear, transform, material) in [
            (&self.drive, drive_at, GearMaterial::DRIVE),
            (&self.driven, driven_at, GearMaterial::DRIVEN),
        ] {
            renderer.draw_gear(&GearDraw {
                mesh: &gear.mesh,
                transform,
                material,
                corroded: scene.corroded && gear.spec.corrosion(),
            });
        }
    }
}
