mod support;

use geartrain::float_types::{Real, TAU};
use geartrain::involute::{InvoluteSolution, MeshingContact, involute_radius};
use geartrain::render::{FrameSetup, GearDraw, GearMaterial, LineDraw, PointDraw, Renderer};
use geartrain::scene::{AnimationClock, ManualClock, Projection, SceneState};
use geartrain::transmission::{GearPair, Transmission, TransmissionConfig};
use nalgebra::{Isometry3, Point3, Vector3};
use support::approx_eq;

/// Keeps everything it is asked to draw.
#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<FrameSetup>,
    gears: Vec<(Isometry3<Real>, GearMaterial, bool, usize)>,
    lines: Vec<LineDraw>,
    points: Vec<PointDraw>,
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, frame: &FrameSetup) {
        self.frames.push(frame.clone());
    }

    fn draw_gear(&mut self, gear: &GearDraw<'_>) {
        self.gears
            .push((gear.transform, gear.material, gear.corroded, gear.mesh.vertex_count()));
    }

    fn draw_lines(&mut self, lines: &LineDraw) {
        self.lines.push(lines.clone());
    }

    fn draw_points(&mut self, points: &PointDraw) {
        self.points.push(points.clone());
    }
}

fn coarse() -> TransmissionConfig {
    TransmissionConfig {
        tessellation: 2,
        ..Default::default()
    }
}

#[test]
fn default_config_values() {
    let config = TransmissionConfig::default();
    assert_eq!((config.drive_teeth, config.driven_teeth), (23, 47));
    assert_eq!((config.drive_arms, config.driven_arms), (3, 5));
    assert_eq!(config.tessellation, 20);
    assert_eq!(config.tolerance, geartrain::float_types::tolerance());
    assert!(approx_eq(config.driven_radius(), 10.0 * 47.0 / 23.0, 1e-12));
}

#[test]
fn gears_are_placed_one_tooth_height_apart() {
    let pair = GearPair::new(&TransmissionConfig::default()).unwrap();
    let r1 = pair.drive.pitch_radius();
    let r2 = pair.driven.pitch_radius();
    assert_eq!(pair.drive_center(), Point3::new(-10.0, 0.0, 0.0));
    assert!(approx_eq(pair.driven_center().x, 2.0 + r2, 1e-12));
    assert!(approx_eq(pair.center_distance(), r1 + r2 + 2.0, 1e-12));

    // Addendum circles overlap, base circles do not.
    let gap = pair.center_distance();
    assert!(gap < pair.drive.addendum_radius() + pair.driven.addendum_radius());
    assert!(gap > r1 + r2);

    // Rolling circles are tangent and turn at the tooth ratio.
    let (p1, p2) = pair.operating_pitch_radii();
    assert!(approx_eq(p1 + p2, gap, 1e-12));
    assert!(approx_eq(p2 / p1, 47.0 / 23.0, 1e-12));
    assert!(approx_eq(pair.driven_angle(TAU), -TAU * 23.0 / 47.0, 1e-12));
}

#[test]
fn matched_module_gears_roll_on_tangent_operating_circles() {
    let pair = GearPair::new(&TransmissionConfig::default()).unwrap();
    let (z1, z2) = (23.0, 47.0);
    let (r1, r2) = (pair.drive.pitch_radius(), pair.driven.pitch_radius());
    // Same tooth pitch on both pitch circles.
    assert!(approx_eq(r1 * TAU / z1, r2 * TAU / z2, 1e-12));

    // The spec pitch circle is the involute base circle of each gear.
    let drive = InvoluteSolution::for_spec(&pair.drive, 1e-10).unwrap();
    let driven = InvoluteSolution::for_spec(&pair.driven, 1e-10).unwrap();
    assert!(approx_eq(involute_radius(r1, drive.parametric_angle), r1 + 2.0, 1e-9));
    assert!(approx_eq(involute_radius(r2, driven.parametric_angle), r2 + 2.0, 1e-9));
    assert!(approx_eq(drive.contact_half_angle, 0.077639, 1e-6));
    assert!(approx_eq(driven.contact_half_angle, 0.027676, 1e-6));
    assert!(drive.tooth_angles(23).is_ok());
    assert!(driven.tooth_angles(47).is_ok());

    // Operating pitch circles touch at the centre distance, in the tooth ratio.
    let distance = pair.center_distance();
    assert!(approx_eq(distance, 32.434783, 1e-6));
    let (p1, p2) = pair.operating_pitch_radii();
    assert!(approx_eq(p1, 10.657143, 1e-6));
    assert!(approx_eq(p2, 21.777640, 1e-6));
    assert!(approx_eq(p1 + p2, distance, 1e-12));
    assert!(approx_eq(p2 / p1, z2 / z1, 1e-12));
    assert!(p1 > r1 && p2 > r2);

    // The contact point lies on the drive operating circle.
    let tangent = pair.drive_center() + Vector3::x() * p1;
    assert!(approx_eq((pair.driven_center() - tangent).norm(), p2, 1e-12));
}

#[test]
fn configured_tolerance_reaches_every_solve() {
    let loose = Transmission::build(TransmissionConfig {
        tolerance: 1e-2,
        ..coarse()
    })
    .unwrap();
    let tight = Transmission::build(TransmissionConfig {
        tolerance: 1e-10,
        ..coarse()
    })
    .unwrap();

    for (t, gear) in [(1e-2, &loose.drive), (1e-10, &tight.drive), (1e-10, &tight.driven)] {
        assert_eq!(gear.solution, InvoluteSolution::for_spec(&gear.spec, t).unwrap());
        let rho = involute_radius(gear.spec.pitch_radius(), gear.solution.parametric_angle);
        assert!((rho - gear.spec.addendum_radius()).abs() <= t);
    }
    assert_ne!(loose.drive.solution, tight.drive.solution);

    let contact = MeshingContact::solve(10.0, 10.0 * 47.0 / 23.0, 2.0, 1e-2).unwrap();
    assert_eq!(loose.overlay.unwrap().contact, contact);
}

#[test]
fn only_driven_gear_is_corroded() {
    let transmission = Transmission::build(coarse()).unwrap();
    assert!(!transmission.drive.spec.corrosion());
    assert!(transmission.driven.spec.corrosion());
    assert!(transmission.drive.mesh.vertices().all(|v| v.tex_coord.x == 0.0));
    assert!(transmission.driven.mesh.vertices().any(|v| v.tex_coord.x > 0.0));
}

#[test]
fn build_is_deterministic() {
    let a = Transmission::build(coarse()).unwrap();
    let b = Transmission::build(coarse()).unwrap();
    assert_eq!(a.drive.mesh.strips, b.drive.mesh.strips);
    assert_eq!(a.driven.mesh.strips, b.driven.mesh.strips);
    assert_eq!(a.overlay, b.overlay);
}

#[test]
fn overlay_is_in_world_frame() {
    let transmission = Transmission::build(coarse()).unwrap();
    let overlay = transmission.overlay.as_ref().unwrap();
    let pair = &transmission.pair;

    let drive_tip = pair.drive.addendum_radius();
    let driven_tip = pair.driven.addendum_radius();
    let second = overlay.points[1];
    let first = overlay.points[0];
    assert!(approx_eq((second - pair.drive_center()).norm(), drive_tip, 1e-5));
    assert!(approx_eq((first - pair.driven_center()).norm(), driven_tip, 1e-5));
    assert_eq!(overlay.lines.len(), 2);
}

#[test]
fn invalid_config_fails_to_build() {
    let config = TransmissionConfig {
        drive_teeth: 60,
        ..coarse()
    };
    assert!(Transmission::build(config).is_err());

    let config = TransmissionConfig {
        thickness: 0.0,
        ..coarse()
    };
    assert!(Transmission::build(config).is_err());
}

#[test]
fn render_emits_both_gears_with_their_materials() {
    let transmission = Transmission::build(coarse()).unwrap();
    let scene = SceneState::new();
    let mut renderer = RecordingRenderer::default();
    transmission.render(&scene, 0.25, &mut renderer);

    assert_eq!(renderer.frames.len(), 1);
    assert!(renderer.lines.is_empty());
    assert!(renderer.points.is_empty());
    assert_eq!(renderer.gears.len(), 2);

    let (drive_at, drive_material, drive_corroded, drive_vertices) = renderer.gears[0];
    let (driven_at, driven_material, driven_corroded, _) = renderer.gears[1];
    assert_eq!(drive_material, GearMaterial::DRIVE);
    assert_eq!(driven_material, GearMaterial::DRIVEN);
    assert!(!drive_corroded && !driven_corroded);
    assert_eq!(drive_vertices, transmission.drive.mesh.vertex_count());

    let drive_angle = AnimationClock::drive_angle(0.25);
    assert!(approx_eq(drive_at.rotation.angle(), drive_angle, 1e-9));
    assert!(approx_eq(driven_at.rotation.angle(), drive_angle * 23.0 / 47.0, 1e-9));
    assert!(driven_at.rotation.axis().unwrap().z < 0.0);
    assert_eq!(drive_at.translation.vector, transmission.pair.drive_center().coords);
}

#[test]
fn toggles_add_overlays_and_freeze_gears() {
    let transmission = Transmission::build(coarse()).unwrap();
    let mut scene = SceneState::new();
    scene.key('x');
    scene.key('l');
    scene.key('c');
    scene.key('f');
    scene.depth_cue = true;
    scene.key('o');

    let mut renderer = RecordingRenderer::default();
    let time = AnimationClock::default().time(&ManualClock(12_345));
    transmission.render(&scene, time, &mut renderer);

    assert_eq!(renderer.lines.len(), 2);
    assert_eq!(renderer.lines[0].polylines.len(), 8);
    assert_eq!(renderer.points.len(), 1);
    assert_eq!(renderer.points[0].points.len(), 2);

    let frame = &renderer.frames[0];
    assert!(frame.fog.is_some());
    assert_eq!(frame.projection, Projection::Orthographic.matrix());

    for (transform, _, _, _) in &renderer.gears {
        assert_eq!(transform.rotation.angle(), 0.0);
    }
    assert!(!renderer.gears[0].2);
    assert!(renderer.gears[1].2);
}
