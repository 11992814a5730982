/// Scene — the set of renderable content owned by one viewer.
///
/// Holds a background color, the fixed lights, optional helpers, and
/// the loaded mesh nodes in a SlotMap for O(1) attach/detach with
/// stable keys. Two fixed slots (body, garment) each reference at most
/// one node at a time.

use std::fmt;
use slotmap::SlotMap;
use super::lighting::Light;
use super::node::{Color, MeshNode, NodeKey};

/// Grid helper side length.
pub const GRID_SIZE: f32 = 10.0;
/// Grid helper line divisions per side.
pub const GRID_DIVISIONS: u32 = 10;

/// Visual helper content (not part of the loaded meshes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Helper {
    /// Ground-plane grid.
    Grid { size: f32, divisions: u32 },
}

/// One of the two fixed roles a loaded node may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshSlot {
    Body,
    Garment,
}

impl fmt::Display for MeshSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshSlot::Body => write!(f, "body"),
            MeshSlot::Garment => write!(f, "garment"),
        }
    }
}

/// A renderable scene: background, lights, helpers, and slot nodes.
///
/// Lights are installed once at initialization and never removed.
/// Nodes are attached/detached exclusively through their slot, which
/// guarantees at most one node per slot at any time.
pub struct Scene {
    background: Color,
    lights: Vec<Light>,
    helpers: Vec<Helper>,
    nodes: SlotMap<NodeKey, MeshNode>,
    body: Option<NodeKey>,
    garment: Option<NodeKey>,
}

impl Scene {
    /// Create an empty scene with the given background color.
    pub fn new(background: Color) -> Self {
        Self {
            background,
            lights: Vec::new(),
            helpers: Vec::new(),
            nodes: SlotMap::with_key(),
            body: None,
            garment: None,
        }
    }

    /// Current background color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Replace the background color.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Install the lighting rig. A second call is ignored — lights are
    /// added once and never removed.
    pub fn install_lights(&mut self, rig: Vec<Light>) {
        if self.lights.is_empty() {
            self.lights = rig;
        }
    }

    /// Installed lights.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Add a visual helper.
    pub fn add_helper(&mut self, helper: Helper) {
        self.helpers.push(helper);
    }

    /// Installed helpers.
    pub fn helpers(&self) -> &[Helper] {
        &self.helpers
    }

    // ===== SLOT NODES =====

    /// Attach a node to a slot, detaching and releasing any previous
    /// occupant first. Returns the new node's stable key.
    pub fn attach_slot_node(&mut self, slot: MeshSlot, node: MeshNode) -> NodeKey {
        self.detach_slot_node(slot);
        let key = self.nodes.insert(node);
        match slot {
            MeshSlot::Body => self.body = Some(key),
            MeshSlot::Garment => self.garment = Some(key),
        }
        key
    }

    /// Detach and release the node occupying a slot, if any.
    /// Returns true if a node was removed.
    pub fn detach_slot_node(&mut self, slot: MeshSlot) -> bool {
        let occupant = match slot {
            MeshSlot::Body => self.body.take(),
            MeshSlot::Garment => self.garment.take(),
        };
        match occupant {
            Some(key) => self.nodes.remove(key).is_some(),
            None => false,
        }
    }

    /// Key of the node occupying a slot, if any.
    pub fn slot_node_key(&self, slot: MeshSlot) -> Option<NodeKey> {
        match slot {
            MeshSlot::Body => self.body,
            MeshSlot::Garment => self.garment,
        }
    }

    /// Look up a node by key.
    pub fn node(&self, key: NodeKey) -> Option<&MeshNode> {
        self.nodes.get(key)
    }

    /// Number of attached nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Detach and release both slot nodes. Called on disposal.
    pub fn clear_slots(&mut self) {
        self.detach_slot_node(MeshSlot::Body);
        self.detach_slot_node(MeshSlot::Garment);
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
