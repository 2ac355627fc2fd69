// src/lib.rs
//! Etch
//!
//! Pooled immediate-mode 3D debug drawing built on wgpu and winit. Draw
//! lines, spheres, and cubes every frame without per-frame allocation:
//! primitives come from growable recycling pools and are overwritten in
//! place on reuse.
//!
//! The core drawer works without a GPU, which keeps it testable:
//!
//! ```
//! use etch::prelude::*;
//!
//! fn draw(gizmos: &mut Gizmos) -> Result<(), GizmoError> {
//!     gizmos.begin()?;
//!     gizmos.set_color(Color::GREEN);
//!     gizmos.line(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0))?;
//!     gizmos.sphere(Vector3::new(0.0, 1.0, 0.0), 0.25)?;
//!     gizmos.end()
//! }
//!
//! let mut gizmos = Gizmos::new();
//! draw(&mut gizmos).unwrap();
//! assert_eq!(gizmos.frame().len(), 2);
//! ```
//!
//! For a windowed application, [`EtchApp`] wires the drawer to an orbit
//! camera, a wgpu renderer, and an imgui overlay; see the demos.

pub mod app;
pub mod gfx;
pub mod gizmos;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::EtchApp;
pub use gizmos::{Color, GizmoError, Gizmos};

/// Creates a default application instance
pub fn default() -> EtchApp {
    EtchApp::new()
}
