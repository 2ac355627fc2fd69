//! # Etch Prelude
//!
//! Convenient imports for typical applications:
//!
//! ```rust
//! use etch::prelude::*;
//! ```

// Re-export core application types
pub use crate::app::EtchApp;
pub use crate::default;

// Re-export the gizmo drawer and its supporting types
pub use crate::gizmos::{
    Color, GizmoError, GizmoStatistics, Gizmos, GizmosConfig, WireSphereStyle,
};

// Re-export UI utilities
pub use crate::ui::gizmo_stats_panel;

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
pub use imgui::Ui;
