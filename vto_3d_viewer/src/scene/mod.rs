//! Scene graph module
//!
//! Provides the scene container (lights, helpers, mesh slots), the
//! normalized mesh node type, and the fixed lighting rig.

mod lighting;
mod node;
mod scene;

pub use lighting::{
    Light, LightKind, standard_rig,
    AMBIENT_INTENSITY, KEY_LIGHT_INTENSITY, FILL_LIGHT_INTENSITY, RIM_LIGHT_INTENSITY,
    KEY_LIGHT_SHADOW_MAP_SIZE,
};
pub use node::{
    Aabb, Color, MaterialDesc, MeshNode, MeshPart, NodeKey,
    FLAG_CAST_SHADOW, FLAG_RECEIVE_SHADOW,
    NORMALIZED_MAX_EXTENT,
};
pub use scene::{Helper, MeshSlot, Scene, GRID_SIZE, GRID_DIVISIONS};
