//! # Application Shell
//!
//! Winit application wrapper that owns the window, render engine, camera, UI
//! manager, and the gizmo drawer, and wires them into the event loop. User
//! code supplies a draw callback that runs once per frame inside an already
//! open begin/end window, and optionally a UI callback for the imgui overlay.

use cgmath::Vector3;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{CameraController, CameraManager, OrbitCamera},
    render_engine::RenderEngine,
};
use crate::gizmos::{GizmoError, GizmoStatistics, Gizmos, GizmosConfig};
use crate::ui::UiManager;

/// Per-frame draw callback: receives the open gizmo drawer and the seconds
/// elapsed since the app started.
pub type DrawCallback = Box<dyn FnMut(&mut Gizmos, f32) -> Result<(), GizmoError>>;

/// UI overlay callback: receives the imgui frame and the drawer statistics
/// captured just before the frame closed.
pub type UiCallback = Box<dyn Fn(&imgui::Ui, &GizmoStatistics) + Send + Sync>;

pub struct EtchApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
    draw_callback: Option<DrawCallback>,
    ui_callback: Option<UiCallback>,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    camera_manager: CameraManager,
    gizmos: Gizmos,
    start_time: Instant,
    draw_callback: Option<DrawCallback>,
    ui_callback: Option<UiCallback>,
}

impl Default for EtchApp {
    fn default() -> Self {
        Self::new()
    }
}

impl EtchApp {
    /// Create a new application with default settings
    pub fn new() -> Self {
        Self::with_config(GizmosConfig::default())
    }

    /// Create a new application with explicit gizmo pool tuning
    pub fn with_config(config: GizmosConfig) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let mut camera = OrbitCamera::new(20.0, 0.4, 0.6, Vector3::new(0.0, 0.0, 0.0), 1.0);
        camera.bounds.min_distance = Some(2.0);
        let controller = CameraController::new(0.005, 0.5);
        let camera_manager = CameraManager::new(camera, controller);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                camera_manager,
                gizmos: Gizmos::with_config(config),
                start_time: Instant::now(),
                draw_callback: None,
                ui_callback: None,
            },
            draw_callback: None,
            ui_callback: None,
        }
    }

    /// Set the per-frame draw callback
    pub fn set_draw<F>(&mut self, draw_fn: F)
    where
        F: FnMut(&mut Gizmos, f32) -> Result<(), GizmoError> + 'static,
    {
        self.draw_callback = Some(Box::new(draw_fn));
    }

    /// Set UI callback
    pub fn set_ui<F>(&mut self, ui_fn: F)
    where
        F: Fn(&imgui::Ui, &GizmoStatistics) + Send + Sync + 'static,
    {
        self.ui_callback = Some(Box::new(ui_fn));
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        self.app_state.draw_callback = self.draw_callback.take();
        self.app_state.ui_callback = self.ui_callback.take();
        self.app_state.start_time = Instant::now();

        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl AppState {
    /// Runs one gizmo frame: begin, user callback, statistics snapshot, end.
    ///
    /// `end()` runs even when the callback fails, so the pools always reset
    /// and the next frame starts from a clean cursor.
    fn run_draw_frame(&mut self) -> GizmoStatistics {
        let elapsed = self.start_time.elapsed().as_secs_f32();

        if let Err(error) = self.gizmos.begin() {
            log::error!("failed to open gizmo frame: {error}");
            return GizmoStatistics::default();
        }

        if let Some(callback) = self.draw_callback.as_mut() {
            if let Err(error) = callback(&mut self.gizmos, elapsed) {
                log::error!("draw callback failed: {error}");
            }
        }

        let statistics = self.gizmos.statistics();

        if let Err(error) = self.gizmos.end() {
            log::error!("failed to close gizmo frame: {error}");
        }

        statistics
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("etch")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.camera_manager.camera.resize_projection(width, height);

            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            });

            let ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if matches!(
                    key_event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }
                self.camera_manager.process_keyboard_event(&key_event);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager.camera.resize_projection(width, height);
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.camera_manager.camera.update_view_proj();
                let camera_uniform = self.camera_manager.camera.uniform;

                let statistics = self.run_draw_frame();

                let Some(render_engine) = self.render_engine.as_mut() else {
                    return;
                };
                render_engine.update(camera_uniform);

                if let (Some(ui_manager), Some(ui_callback)) =
                    (self.ui_manager.as_mut(), &self.ui_callback)
                {
                    render_engine.render_frame(
                        &mut self.gizmos,
                        Some(
                            |device: &wgpu::Device,
                             queue: &wgpu::Queue,
                             encoder: &mut wgpu::CommandEncoder,
                             color_attachment: &wgpu::TextureView| {
                                ui_manager.update_logic(&window, |ui| {
                                    ui_callback(ui, &statistics);
                                });
                                ui_manager.render_display_only(
                                    device,
                                    queue,
                                    encoder,
                                    color_attachment,
                                );
                            },
                        ),
                    );
                } else {
                    render_engine.render_frame(
                        &mut self.gizmos,
                        None::<
                            fn(
                                &wgpu::Device,
                                &wgpu::Queue,
                                &mut wgpu::CommandEncoder,
                                &wgpu::TextureView,
                            ),
                        >,
                    );
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Don't process camera events when UI is active
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_input() {
                return;
            }
        }

        self.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
