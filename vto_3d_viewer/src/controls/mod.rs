//! Interactive controls module — damped orbit/zoom/pan.
//!
//! Optional: the viewer holds zero or one `OrbitControls`, and every
//! control-dependent operation is a no-op when they are absent.

mod orbit_controls;

pub use orbit_controls::{
    OrbitControls,
    DAMPING_FACTOR, MIN_DISTANCE, MAX_DISTANCE, MAX_POLAR_ANGLE, AUTO_ROTATE_SPEED,
};
