mod support;

use geartrain::errors::GearError;
use geartrain::float_types::{Real, tolerance};
use geartrain::gear::GearSpec;
use geartrain::involute::{
    InvoluteSolution, MeshingContact, bisect, involute_radius, involute_xy, solve,
};
use support::approx_eq;

#[test]
fn solve_hits_addendum_within_tolerance() {
    for (r, h) in [(10.0, 2.0), (20.434782608695652, 2.0), (3.0, 0.25), (50.0, 7.5)] {
        let solution = solve(r, h, 1e-7).unwrap();
        assert!(solution.parametric_angle > 0.0);
        assert!(solution.parametric_angle < std::f64::consts::FRAC_PI_2 as Real);
        let rho = involute_radius(r, solution.parametric_angle);
        assert!((rho - (r + h)).abs() <= 1e-7, "r={r} h={h} rho={rho}");
    }
}

#[test]
fn contact_angle_is_polar_angle_of_tip_point() {
    let solution = solve(10.0, 2.0, 1e-9).unwrap();
    let (x, y) = involute_xy(10.0, solution.parametric_angle);
    assert!(approx_eq(solution.contact_half_angle, y.atan2(x), 1e-12));
    // Involute function: inv(φ) = tan φ − φ, with tan φ = t.
    let t = solution.parametric_angle;
    assert!(approx_eq(solution.contact_half_angle, t - t.atan(), 1e-9));
}

#[test]
fn taller_teeth_need_larger_angles() {
    let mut last = 0.0;
    for h in [0.5, 1.0, 2.0, 4.0, 6.0] {
        let solution = solve(10.0, h, 1e-9).unwrap();
        assert!(solution.parametric_angle > last);
        last = solution.parametric_angle;
    }
}

#[test]
fn crowded_teeth_are_rejected() {
    let spec = GearSpec::new(60, 10.0, 2.0, 2.0, 3, 4, false).unwrap();
    let err = InvoluteSolution::for_spec(&spec, tolerance()).unwrap_err();
    match &err {
        GearError::InvalidGearParameters {
            contact_half_angle,
            tooth_pitch,
        } => assert!(2.0 * *contact_half_angle >= *tooth_pitch),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!err.is_solver_failure());
}

#[test]
fn default_gears_fit() {
    for spec in [support::drive_spec(4, false), support::driven_spec(4, true)] {
        let solution = InvoluteSolution::for_spec(&spec, tolerance()).unwrap();
        let angles = solution.tooth_angles(spec.tooth_count()).unwrap();
        assert!(2.0 * angles.contact_half_angle < angles.tooth_pitch);
        let free = angles.tooth_pitch - 2.0 * angles.contact_half_angle;
        assert!(approx_eq(angles.theta_small, 0.65 * free, 1e-12));
        assert!(approx_eq(angles.theta_big, 0.35 * free, 1e-12));
    }
}

#[test]
fn default_tolerance_is_used() {
    assert!(tolerance() > 0.0);
    let spec = support::drive_spec(2, false);
    let solution = InvoluteSolution::for_spec(&spec, tolerance()).unwrap();
    let rho = involute_radius(10.0, solution.parametric_angle);
    assert!((rho - 12.0).abs() <= tolerance());
}

#[test]
fn bisect_finds_square_root() {
    let found = bisect(0.0, 2.0, 1e-10, |x| x * x - 2.0).unwrap();
    assert!(approx_eq(found.root, (2.0 as Real).sqrt(), 1e-9));
    assert!(found.iterations > 1);
}

#[test]
fn contact_points_lie_on_addendum_circles() {
    let r1 = 10.0;
    let r2 = 10.0 * 47.0 / 23.0;
    let h = 2.0;
    let contact = MeshingContact::solve(r1, r2, h, 1e-9).unwrap();
    let distance = r1 + r2 + h;

    let [first, second] = contact.points;
    let to_driven = ((first.x - distance).powi(2) + first.y.powi(2)).sqrt();
    assert!(approx_eq(to_driven, r2 + h, 1e-6));
    assert!(approx_eq(second.coords.norm(), r1 + h, 1e-6));
    assert!(first.x >= r1 && first.x <= r1 + h);
    assert!(second.x >= r1 && second.x <= r1 + h);

    assert!(approx_eq(contact.line_of_action_angle.cos(), (r1 + r2) / distance, 1e-12));

    // Each line of action starts on its base circle.
    assert!(approx_eq(contact.lines[0][0].coords.norm(), r1, 1e-9));
    let driven_start = contact.lines[1][0];
    let from_driven = (driven_start.x - distance).hypot(driven_start.y);
    assert!(approx_eq(from_driven, r2, 1e-9));
}
