/// Perspective camera for the viewer.
///
/// Stores projection parameters (field of view, aspect ratio, clip
/// planes) and a position/look-at pose. View and projection matrices
/// are computed on demand from the stored parameters; nothing is cached.

use glam::{Mat4, Vec3};

/// Default vertical field of view, in degrees.
pub const DEFAULT_FOV_DEGREES: f32 = 50.0;
/// Default near clip plane.
pub const DEFAULT_NEAR: f32 = 0.1;
/// Default far clip plane.
pub const DEFAULT_FAR: f32 = 1000.0;
/// Padding factor applied to the framing distance so a framed node
/// does not touch the viewport edges.
pub const FRAMING_PADDING: f32 = 1.5;

/// Perspective camera with a position/look-at pose.
///
/// The aspect ratio must match the output surface's client
/// width/height whenever a frame is rendered; the Viewer keeps it in
/// sync on resize.
#[derive(Debug, Clone)]
pub struct Camera {
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    position: Vec3,
    target: Vec3,
}

impl Camera {
    /// Create a camera at `(0, 0, distance)` looking at the origin.
    pub fn new(aspect: f32, distance: f32) -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            aspect,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            position: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
        }
    }

    // ===== GETTERS =====

    /// Vertical field of view, in degrees.
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Aspect ratio (surface client width / height).
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near clip plane.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip plane.
    pub fn far(&self) -> f32 {
        self.far
    }

    /// World-space position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// World-space look-at target.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// View matrix (right-handed, +Y up).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Perspective projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    // ===== SETTERS =====

    /// Set the aspect ratio. Called on surface resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Set the position, keeping the current target.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the look-at target, keeping the current position.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Set position and target together.
    pub fn set_pose(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    // ===== FRAMING =====

    /// Distance from which a node of the given maximum extent fills the
    /// viewport with the standard padding margin.
    ///
    /// `|max_extent/2 / tan(fov/2)| * FRAMING_PADDING`
    pub fn framing_distance(&self, max_extent: f32) -> f32 {
        let fov_rad = self.fov_degrees.to_radians();
        (max_extent / 2.0 / (fov_rad / 2.0).tan()).abs() * FRAMING_PADDING
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
