//! Reference axes with stroked X/Y/Z labels, as polylines.

use crate::float_types::Real;
use nalgebra::Point3;

/// Glyph height as a fraction of the axis length.
const LENGTH_FRACTION: Real = 0.10;
/// Distance of a glyph from the origin as a fraction of the axis length.
const BASE_FRACTION: Real = 1.10;

/// A glyph is a list of strokes, each stroke a polyline in glyph units.
type Glyph = &'static [&'static [[Real; 2]]];

const X_GLYPH: Glyph = &[&[[0.0, -0.5], [1.0, 0.5]], &[[0.0, 0.5], [1.0, -0.5]]];

const Y_GLYPH: Glyph = &[
    &[[0.0, 0.0], [0.0, 0.6], [-0.5, 1.0]],
    &[[0.0, 0.6], [0.5, 1.0]],
];

const Z_GLYPH: Glyph = &[
    &[[1.0, 0.5], [0.0, 0.5], [1.0, -0.5], [0.0, -0.5]],
    &[[0.25, 0.0], [0.75, 0.0]],
];

/// Axis lines of `length` along +X, +Y and +Z with a label past the end of each.
pub fn axes(length: Real) -> Vec<Vec<Point3<Real>>> {
    let fact = LENGTH_FRACTION * length;
    let base = BASE_FRACTION * length;

    let mut lines = vec![
        vec![
            Point3::new(length, 0.0, 0.0),
            Point3::origin(),
            Point3::new(0.0, length, 0.0),
        ],
        vec![Point3::origin(), Point3::new(0.0, 0.0, length)],
    ];

    let place = |glyph: Glyph, at: &dyn Fn(Real, Real) -> Point3<Real>| -> Vec<Vec<Point3<Real>>> {
        glyph
            .iter()
            .map(|stroke| stroke.iter().map(|&[u, v]| at(u, v)).collect())
            .collect()
    };

    lines.extend(place(X_GLYPH, &|u, v| Point3::new(base + fact * u, fact * v, 0.0)));
    lines.extend(place(Y_GLYPH, &|u, v| Point3::new(fact * u, base + fact * v, 0.0)));
    lines.extend(place(Z_GLYPH, &|u, v| Point3::new(0.0, fact * v, base + fact * u)));
    lines
}
