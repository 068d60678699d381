use crate::foundation::core::{Canvas, Mat4, Point, Quat, Vec3, Viewport};

/// Extra room around the model when fitting the camera on load.
pub const FIT_MARGIN: f32 = 1.8;

/// Perspective camera looking down its local -Z axis.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Width over height.
    pub aspect: f32,
    /// Position in scene units.
    pub position: Vec3,
    /// Orientation.
    pub orientation: Quat,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            near: 0.1,
            far: 1000.0,
            aspect: 1.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            orientation: Quat::IDENTITY,
        }
    }
}

/// A point projected onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Pixel position, y down.
    pub point: Point,
    /// Distance along the view axis.
    pub depth: f32,
}

impl PerspectiveCamera {
    /// Default camera for a canvas; empty canvases keep aspect 1.
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self {
            aspect: canvas.aspect().unwrap_or(1.0),
            ..Self::default()
        }
    }

    fn half_fov_tan(&self) -> f32 {
        (self.fov_deg.to_radians() / 2.0).tan()
    }

    /// Turn the camera towards `target`, keeping +Y up.
    pub fn look_at(&mut self, target: Vec3) {
        if (target - self.position).length_squared() <= f32::EPSILON {
            return;
        }
        let view = Mat4::look_at_rh(self.position, target, Vec3::Y);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        self.orientation = rotation.normalize();
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    /// Camera-to-clip transform.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    /// Project a scene point onto `canvas`; `None` when it lies behind the near plane.
    pub fn project(&self, world: Vec3, canvas: Canvas) -> Option<Projected> {
        let view = self.view_matrix().transform_point3(world);
        let depth = -view.z;
        if depth < self.near {
            return None;
        }
        let ndc = self.projection_matrix().project_point3(view);
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        Some(Projected {
            point: Point::new(
                (f64::from(ndc.x) + 1.0) * 0.5 * w,
                (1.0 - f64::from(ndc.y)) * 0.5 * h,
            ),
            depth,
        })
    }

    /// Distance at which a box of `size` fills the view, before any margin.
    pub fn fit_distance(&self, size: Vec3) -> f32 {
        let tan = self.half_fov_tan();
        let for_height = size.y / (2.0 * tan);
        let for_width = size.x / (2.0 * tan * self.aspect);
        for_height.max(for_width)
    }

    /// Place the camera on +Z so a model of `size` fits with [`FIT_MARGIN`], looking at the
    /// origin.
    pub fn fit_to(&mut self, size: Vec3) {
        self.position = Vec3::new(0.0, 0.0, self.fit_distance(size) * FIT_MARGIN);
        self.look_at(Vec3::ZERO);
    }

    /// Re-apply the device-class zoom after a resize.
    ///
    /// Returns `false` and leaves the camera untouched for an empty canvas.
    pub fn update_zoom(&mut self, size: Vec3, canvas: Canvas, viewport: Viewport) -> bool {
        let Some(aspect) = canvas.aspect() else {
            return false;
        };
        self.aspect = aspect;
        self.position.z = self.fit_distance(size) * zoom_factor(viewport);
        self.look_at(Vec3::ZERO);
        true
    }
}

/// Distance multiplier for the viewport's device class.
pub fn zoom_factor(viewport: Viewport) -> f32 {
    let width = viewport.width;
    if viewport.is_landscape() {
        return match width {
            0..=767 => 1.5,
            768..=1250 => 1.8,
            _ => 1.5,
        };
    }
    match width {
        0..=479 => 1.9,
        480..=767 => 1.8,
        _ => 1.5,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
