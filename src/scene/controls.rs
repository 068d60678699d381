use std::f32::consts::{FRAC_PI_4, PI, TAU};

use crate::foundation::core::Vec3;
use crate::scene::camera::PerspectiveCamera;

/// Drag-to-orbit camera controls with damping.
///
/// Zoom and pan are not supported; the polar angle stays within 45 degrees of the horizon.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControls {
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Smallest polar angle (from +Y) in radians.
    pub min_polar: f32,
    /// Largest polar angle in radians.
    pub max_polar: f32,
    /// Fraction of the pending rotation applied per update.
    pub damping: f32,
    /// Drag sensitivity.
    pub rotate_speed: f32,
    /// Spin slowly around the target when idle.
    pub auto_rotate: bool,
    /// Auto-rotation speed; 2.0 is one turn per 30 s at 60 updates per second.
    pub auto_rotate_speed: f32,
    pending_theta: f32,
    pending_phi: f32,
    dragging: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            min_polar: FRAC_PI_4,
            max_polar: 3.0 * FRAC_PI_4,
            damping: 0.08,
            rotate_speed: 0.4,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            dragging: false,
        }
    }
}

impl OrbitControls {
    /// Pointer went down on the canvas.
    pub fn begin(&mut self) {
        self.dragging = true;
    }

    /// Pointer moved by `(dx, dy)` pixels on a canvas `height` pixels tall.
    pub fn drag(&mut self, dx: f32, dy: f32, height: u32) {
        if !self.dragging || height == 0 {
            return;
        }
        let h = height as f32;
        self.pending_theta -= TAU * dx / h * self.rotate_speed;
        self.pending_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Pointer released; damping keeps the remaining motion going.
    pub fn end(&mut self) {
        self.dragging = false;
    }

    /// True between [`OrbitControls::begin`] and [`OrbitControls::end`].
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True while a damped rotation is still settling.
    pub fn is_settling(&self) -> bool {
        self.pending_theta.abs() > 1e-5 || self.pending_phi.abs() > 1e-5
    }

    /// Drop any pending rotation.
    pub fn stop(&mut self) {
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
    }

    /// Apply one frame of rotation to `camera` and aim it at the target.
    pub fn update(&self, camera: &mut PerspectiveCamera) -> OrbitStep {
        let offset = camera.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return OrbitStep::default();
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.auto_rotate && !self.dragging {
            theta -= TAU / 60.0 / 60.0 * self.auto_rotate_speed;
        }
        theta += self.pending_theta * self.damping;
        phi += self.pending_phi * self.damping;
        phi = phi.clamp(self.min_polar, self.max_polar).clamp(1e-6, PI - 1e-6);

        let sin_phi = phi.sin();
        camera.position = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
        camera.look_at(self.target);

        OrbitStep {
            theta_left: self.pending_theta * (1.0 - self.damping),
            phi_left: self.pending_phi * (1.0 - self.damping),
        }
    }

    /// Run [`OrbitControls::update`] and keep the damped remainder.
    pub fn tick(&mut self, camera: &mut PerspectiveCamera) {
        let step = self.update(camera);
        self.pending_theta = step.theta_left;
        self.pending_phi = step.phi_left;
    }
}

/// Rotation left over after one damped update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitStep {
    /// Remaining azimuth delta.
    pub theta_left: f32,
    /// Remaining polar delta.
    pub phi_left: f32,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/controls.rs"]
mod tests;
