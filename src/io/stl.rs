use crate::errors::GearError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::vertex::Vertex;
use crate::triangulated::Triangulated3D;
use nalgebra::Vector3;
use std::fmt::Write as _;
use std::io::Cursor;

/// Unit normal of the triangle's plane, oriented by its winding.
///
/// Gear strips carry smooth shading normals (a flank vertex normal follows the
/// involute, not the facet), so STL facets are recomputed from the corners.
/// Falls back to the first vertex normal for a collapsed triangle.
pub fn facet_normal([a, b, c]: &[Vertex; 3]) -> Vector3<Real> {
    (b.pos - a.pos)
        .cross(&(c.pos - a.pos))
        .try_normalize(0.0)
        .unwrap_or(a.normal)
}

/// Export to ASCII STL
///
/// Convert a triangulated surface to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use geartrain::{gear::GearSpec, mesh::Mesh};
/// let spec = GearSpec::new(23, 10.0, 2.0, 2.0, 3, 2, false).unwrap();
/// let mesh = Mesh::gear(&spec, 1e-7, 0).unwrap();
/// let text = mesh.to_stl_ascii("drive_gear");
/// assert!(text.starts_with("solid drive_gear"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = format!("solid {name}\n");

    // Writing into a String cannot fail.
    shape.visit_triangles(|tri| {
        let n = facet_normal(&tri);
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for p in tri.map(|v| v.pos) {
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
        }
        out.push_str("    endloop\n  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// The header is left blank; `stl_io` does not carry a solid name.
///
/// ```rust,no_run
/// # use geartrain::{gear::GearSpec, mesh::Mesh};
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let spec = GearSpec::new(47, 20.4, 2.0, 2.0, 5, 20, true)?;
/// let bytes = Mesh::gear(&spec, 1e-7, 1)?.to_stl_binary("driven_gear")?;
/// std::fs::write("stl/driven_gear.stl", bytes)?;
/// # Ok(())
/// # }
/// ```
pub fn to_stl_binary<T: Triangulated3D>(shape: &T, _name: &str) -> Result<Vec<u8>, GearError> {
    #[allow(clippy::unnecessary_cast)]
    let single = |v: Vector3<Real>| [v.x as f32, v.y as f32, v.z as f32];

    let mut triangles = Vec::<stl_io::Triangle>::new();
    shape.visit_triangles(|tri| {
        triangles.push(stl_io::Triangle {
            normal: stl_io::Normal::new(single(facet_normal(&tri))),
            vertices: tri.map(|v| stl_io::Vertex::new(single(v.pos.coords))),
        });
    });

    let mut cursor = Cursor::new(Vec::with_capacity(84 + 50 * triangles.len()));
    stl_io::write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self, name: &str) -> Result<Vec<u8>, GearError> {
        self::to_stl_binary(self, name)
    }
}
