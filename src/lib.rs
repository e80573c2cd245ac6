//! Procedural **involute spur gears** for a two-gear transmission viewer.
//!
//! A [`GearSpec`](gear::GearSpec) is solved for its involute tooth flank by
//! [bisection](involute), tessellated once into an unindexed soup of
//! [quad strips](mesh::QuadStrip), and then only transformed and drawn every
//! frame through the [`Renderer`](render::Renderer) seam.
//!
//! ```
//! # use geartrain::transmission::{Transmission, TransmissionConfig};
//! let transmission = Transmission::build(TransmissionConfig {
//!     tessellation: 4,
//!     ..Default::default()
//! })
//! .unwrap();
//! assert!(transmission.drive.mesh.bounding_radius() <= 12.0 + 1e-6);
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to build both gears of a transmission at once

#![forbid(unsafe_code)]
#![warn(unused, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod axes;
pub mod errors;
pub mod float_types;
pub mod gear;
pub mod involute;
pub mod io;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod transmission;
pub mod triangulated;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::GearError;
pub use gear::GearSpec;
pub use mesh::Mesh;
pub use mesh::vertex::Vertex;
pub use transmission::{Transmission, TransmissionConfig};
