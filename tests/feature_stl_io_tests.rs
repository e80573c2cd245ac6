#![cfg(feature = "stl-io")]

mod support;

use geartrain::io::facet_normal;
use geartrain::mesh::Mesh;
use geartrain::triangulated::Triangulated3D;

#[test]
fn gear_to_stl_ascii() {
    let mesh = Mesh::gear(&support::drive_spec(2, false), support::TOLERANCE, 0).unwrap();
    let stl_str = mesh.to_stl_ascii("drive_gear");
    // Basic checks
    assert!(stl_str.starts_with("solid drive_gear\n"));
    assert!(stl_str.trim_end().ends_with("endsolid drive_gear"));

    let facets = stl_str.matches("facet normal").count();
    assert_eq!(facets, mesh.triangle_count());
    assert_eq!(stl_str.matches("vertex").count(), 3 * facets);
}

#[test]
fn gear_to_stl_binary_and_back() -> Result<(), Box<dyn std::error::Error>> {
    let mesh = Mesh::gear(&support::driven_spec(2, true), support::TOLERANCE, 7)?;
    let bytes = mesh.to_stl_binary("driven_gear")?;
    // 80 byte header, u32 count, 50 bytes per triangle
    assert_eq!(bytes.len(), 84 + 50 * mesh.triangle_count());

    let read = stl_io::read_stl(&mut std::io::Cursor::new(&bytes))?;
    assert_eq!(read.faces.len(), mesh.triangle_count());
    Ok(())
}

#[test]
fn corrosion_does_not_change_exported_geometry() {
    let plain = Mesh::gear(&support::driven_spec(2, false), support::TOLERANCE, 0).unwrap();
    let corroded = Mesh::gear(&support::driven_spec(2, true), support::TOLERANCE, 11).unwrap();
    assert_eq!(
        plain.to_stl_binary("gear").unwrap(),
        corroded.to_stl_binary("gear").unwrap()
    );
}

#[test]
fn facet_normals_follow_triangle_winding() {
    let mesh = Mesh::gear(&support::drive_spec(3, false), support::TOLERANCE, 0).unwrap();
    mesh.visit_triangles(|tri| {
        let n = facet_normal(&tri);
        assert!((n.norm() - 1.0).abs() < 1e-9);
        let shading = tri[0].normal + tri[1].normal + tri[2].normal;
        assert!(n.dot(&shading) > 0.0, "facet {n:?} against shading {shading:?}");
    });

    // The ASCII writer emits the same facet normal.
    let text = mesh.to_stl_ascii("drive_gear");
    let first = text.lines().nth(1).unwrap();
    let tri = {
        let mut first_tri = None;
        mesh.visit_triangles(|tri| {
            first_tri.get_or_insert(tri);
        });
        first_tri.unwrap()
    };
    let n = facet_normal(&tri);
    assert_eq!(first, format!("  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z));
}
