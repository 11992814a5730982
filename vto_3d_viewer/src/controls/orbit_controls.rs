/// Damped orbit controls around a target point.
///
/// Host pointer/gesture handling is outside this component; the host
/// translates its input events into `rotate_by`/`zoom_by`/`pan_by`
/// calls, and the render loop advances the damped state once per frame
/// via `update` before the draw. The controls never hold a camera
/// reference — the camera is passed in where its pose is read or
/// written.

use std::f32::consts::{PI, TAU};
use glam::Vec3;
use crate::camera::Camera;

/// Fraction of the remaining delta consumed per frame.
pub const DAMPING_FACTOR: f32 = 0.05;
/// Closest allowed orbit distance.
pub const MIN_DISTANCE: f32 = 1.0;
/// Farthest allowed orbit distance.
pub const MAX_DISTANCE: f32 = 5.0;
/// Largest allowed polar angle; prevents flipping under the ground plane.
pub const MAX_POLAR_ANGLE: f32 = PI / 1.5;
/// Auto-rotate speed; 2.0 means one orbit per 30 seconds at 60 fps.
pub const AUTO_ROTATE_SPEED: f32 = 2.0;

/// Spherical coordinates of the camera offset from the target.
///
/// `theta` is the azimuth around +Y measured from +Z, `phi` the polar
/// angle from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Spherical {
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return Spherical { radius: MIN_DISTANCE, theta: 0.0, phi: PI / 2.0 };
        }
        Spherical {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }

    fn clamped(self) -> Spherical {
        Spherical {
            radius: self.radius.clamp(MIN_DISTANCE, MAX_DISTANCE),
            theta: self.theta,
            phi: self.phi.clamp(0.0, MAX_POLAR_ANGLE),
        }
    }
}

/// Damped orbit/zoom/pan bound to the viewer camera.
pub struct OrbitControls {
    target: Vec3,
    current: Spherical,
    desired: Spherical,
    screen_space_panning: bool,
    auto_rotate: bool,
    auto_rotate_speed: f32,
}

impl OrbitControls {
    /// Bind controls to the camera's current pose.
    pub fn new(camera: &Camera, auto_rotate: bool) -> Self {
        let target = camera.target();
        let spherical = Spherical::from_offset(camera.position() - target).clamped();
        Self {
            target,
            current: spherical,
            desired: spherical,
            screen_space_panning: false,
            auto_rotate,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
        }
    }

    /// Orbit target point.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Auto-rotate flag.
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Screen-space panning is disabled; panning stays parallel to the
    /// ground plane.
    pub fn screen_space_panning(&self) -> bool {
        self.screen_space_panning
    }

    // ===== INPUT =====

    /// Orbit by the given azimuth/polar deltas (radians).
    pub fn rotate_by(&mut self, delta_theta: f32, delta_phi: f32) {
        self.desired.theta += delta_theta;
        self.desired.phi += delta_phi;
        self.desired = self.desired.clamped();
    }

    /// Scale the orbit distance; factors above 1 zoom out.
    pub fn zoom_by(&mut self, factor: f32) {
        if factor > 0.0 {
            self.desired.radius *= factor;
            self.desired = self.desired.clamped();
        }
    }

    /// Pan the target parallel to the ground plane, in camera-relative
    /// right/forward directions.
    pub fn pan_by(&mut self, delta_right: f32, delta_forward: f32) {
        let offset = self.current.to_offset();
        let view = -offset;
        let mut right = view.cross(Vec3::Y);
        if right.length_squared() <= f32::EPSILON {
            right = Vec3::X;
        }
        let right = right.normalize();
        let ground_forward = Vec3::Y.cross(right).normalize();
        self.target += right * delta_right + ground_forward * delta_forward;
    }

    // ===== FRAME UPDATE =====

    /// Advance the damped state one frame and write the resulting pose
    /// to the camera. Called once per render-loop iteration, always
    /// before the draw.
    pub fn update(&mut self, camera: &mut Camera) {
        if self.auto_rotate {
            self.desired.theta += TAU / 60.0 / 60.0 * self.auto_rotate_speed;
        }
        self.current.radius += (self.desired.radius - self.current.radius) * DAMPING_FACTOR;
        self.current.theta += (self.desired.theta - self.current.theta) * DAMPING_FACTOR;
        self.current.phi += (self.desired.phi - self.current.phi) * DAMPING_FACTOR;
        self.current = self.current.clamped();
        camera.set_pose(self.target + self.current.to_offset(), self.target);
    }

    // ===== POSE SYNC =====

    /// Re-sync to the camera's current pose, dropping any damping in
    /// flight. Used after explicit camera positioning.
    pub fn reset(&mut self, camera: &Camera) {
        self.target = camera.target();
        self.current = Spherical::from_offset(camera.position() - self.target).clamped();
        self.desired = self.current;
    }

    /// Move the orbit target (framing sync) and re-derive the spherical
    /// state from the camera's pose around it.
    pub fn set_target(&mut self, target: Vec3, camera: &Camera) {
        self.target = target;
        self.current = Spherical::from_offset(camera.position() - target).clamped();
        self.desired = self.current;
    }

    /// Flip the auto-rotate flag and return the new value.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }
}

#[cfg(test)]
#[path = "orbit_controls_tests.rs"]
mod tests;
