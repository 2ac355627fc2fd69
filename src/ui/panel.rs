//! Default UI panels
//!
//! Pre-built panels for inspecting the gizmo system at runtime.

use crate::gizmos::GizmoStatistics;

/// Pool statistics panel.
///
/// Shows the frame's attachment count and, per pool, the in-use cursor and
/// the high-water capacity. Useful for spotting runaway draw loops: a pool
/// whose capacity keeps climbing means some frame drew more than ever before.
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `statistics` - Snapshot taken while the frame was open
pub fn gizmo_stats_panel(ui: &imgui::Ui, statistics: &GizmoStatistics) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Gizmo Pools")
        .size([300.0, 240.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            ui.text(format!("Drawn this frame: {}", statistics.attached));
            ui.separator();

            ui.columns(3, "pool_stats", true);
            ui.text("Pool");
            ui.next_column();
            ui.text("In use");
            ui.next_column();
            ui.text("Capacity");
            ui.next_column();
            ui.separator();

            for pool in &statistics.pools {
                ui.text(format!("{:?}", pool.kind));
                ui.next_column();
                ui.text(format!("{}", pool.in_use));
                ui.next_column();
                ui.text(format!("{}", pool.capacity));
                ui.next_column();
            }
            ui.columns(1, "", false);
        });
}
