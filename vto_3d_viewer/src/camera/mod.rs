//! Camera module — perspective projection parameters and pose.
//!
//! The viewer owns exactly one camera. It is a plain data holder whose
//! matrices are derived on demand; resize and framing operations mutate
//! it through the Viewer.

mod camera;

pub use camera::{
    Camera,
    DEFAULT_FOV_DEGREES, DEFAULT_NEAR, DEFAULT_FAR, FRAMING_PADDING,
};
