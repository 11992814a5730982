use glam::{Mat4, Vec3};
use super::*;

const EPS: f32 = 1e-5;

fn assert_vec3_near(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < EPS,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new_defaults() {
    let camera = Camera::new(16.0 / 9.0, 2.5);

    assert_eq!(camera.fov_degrees(), DEFAULT_FOV_DEGREES);
    assert_eq!(camera.near(), DEFAULT_NEAR);
    assert_eq!(camera.far(), DEFAULT_FAR);
    assert_eq!(camera.aspect(), 16.0 / 9.0);
    assert_vec3_near(camera.position(), Vec3::new(0.0, 0.0, 2.5));
    assert_vec3_near(camera.target(), Vec3::ZERO);
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn test_view_matrix() {
    let camera = Camera::new(1.0, 3.0);
    let expected = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
    assert_eq!(camera.view_matrix(), expected);
}

#[test]
fn test_projection_matrix() {
    let camera = Camera::new(2.0, 2.5);
    let expected = Mat4::perspective_rh(
        DEFAULT_FOV_DEGREES.to_radians(),
        2.0,
        DEFAULT_NEAR,
        DEFAULT_FAR,
    );
    assert_eq!(camera.projection_matrix(), expected);
}

#[test]
fn test_view_projection_matrix() {
    let camera = Camera::new(1.5, 2.5);
    let expected = camera.projection_matrix() * camera.view_matrix();
    assert_eq!(camera.view_projection_matrix(), expected);
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn test_set_aspect() {
    let mut camera = Camera::new(1.0, 2.5);
    camera.set_aspect(2.0);
    assert_eq!(camera.aspect(), 2.0);
}

#[test]
fn test_set_position_keeps_target() {
    let mut camera = Camera::new(1.0, 2.5);
    camera.look_at(Vec3::new(0.0, 1.0, 0.0));
    camera.set_position(Vec3::new(1.0, 2.0, 3.0));

    assert_vec3_near(camera.position(), Vec3::new(1.0, 2.0, 3.0));
    assert_vec3_near(camera.target(), Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_set_pose() {
    let mut camera = Camera::new(1.0, 2.5);
    camera.set_pose(Vec3::new(0.0, 1.0, 4.0), Vec3::new(0.0, 1.0, 0.0));

    assert_vec3_near(camera.position(), Vec3::new(0.0, 1.0, 4.0));
    assert_vec3_near(camera.target(), Vec3::new(0.0, 1.0, 0.0));
}

// ============================================================================
// Framing distance
// ============================================================================

#[test]
fn test_framing_distance() {
    let camera = Camera::new(1.0, 2.5);

    // max_extent 2.0 at fov 50 deg:
    // |2/2 / tan(25 deg)| * 1.5 = (1 / 0.4663077) * 1.5
    let expected = 1.0 / (25.0_f32.to_radians()).tan() * 1.5;
    assert!((camera.framing_distance(2.0) - expected).abs() < 1e-4);
    assert!((camera.framing_distance(2.0) - 3.21675).abs() < 1e-3);
}

#[test]
fn test_framing_distance_scales_linearly() {
    let camera = Camera::new(1.0, 2.5);
    let d1 = camera.framing_distance(1.0);
    let d4 = camera.framing_distance(4.0);
    assert!((d4 - 4.0 * d1).abs() < 1e-4);
}

#[test]
fn test_framing_distance_zero_extent() {
    let camera = Camera::new(1.0, 2.5);
    assert_eq!(camera.framing_distance(0.0), 0.0);
}

// ============================================================================
// Clone
// ============================================================================

#[test]
fn test_camera_clone() {
    let mut camera = Camera::new(1.25, 2.5);
    camera.set_pose(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 0.5, 0.5));

    let cloned = camera.clone();
    assert_eq!(cloned.aspect(), 1.25);
    assert_vec3_near(cloned.position(), Vec3::new(1.0, 2.0, 3.0));
    assert_vec3_near(cloned.target(), Vec3::new(0.5, 0.5, 0.5));
}
