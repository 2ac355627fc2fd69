//! # Graphics Layer
//!
//! Everything GPU-facing: geometry generation, the orbit camera, the gizmo
//! renderer and its unlit pipelines, and the render engine tying them to a
//! window surface.

pub mod camera;
pub mod geometry;
pub mod gizmo_renderer;
pub mod render_engine;
pub mod texture_resource;
pub mod vertex;

pub use gizmo_renderer::GizmoRenderer;
pub use render_engine::RenderEngine;
