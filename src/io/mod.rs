//! Mesh export.
//!
//! Every backend consumes a [`Triangulated3D`](crate::triangulated::Triangulated3D), so gear
//! meshes (and anything else that can hand out triangles) share the same writers.
//! Backends are behind cargo feature-flags.

#[cfg(feature = "stl-io")]
pub mod stl;

#[cfg(feature = "stl-io")]
pub use stl::{facet_normal, to_stl_ascii, to_stl_binary};
