//! ImGui overlay: context management and the built-in stats panel.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::gizmo_stats_panel;
