//! Orbit camera, its input controller, and the shared camera uniform.

pub mod camera_controller;
pub mod orbit_camera;

pub use camera_controller::CameraController;
pub use orbit_camera::{CameraUniform, OrbitCamera, OPENGL_TO_WGPU_MATRIX};

use winit::{
    event::{DeviceEvent, KeyEvent},
    window::Window,
};

/// Bundles the orbit camera with its input controller.
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn process_event(&mut self, event: &DeviceEvent, window: &Window) {
        self.controller
            .process_events(event, window, &mut self.camera);
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.controller
            .process_keyed_events(event, &mut self.camera);
    }
}
