use glam::Vec3;
use crate::loader::{RawMeshContent, RawMeshPart};
use super::*;
use crate::scene::{standard_rig, Color, MaterialDesc, MeshNode};

fn test_node() -> MeshNode {
    let content = RawMeshContent {
        parts: vec![RawMeshPart {
            name: "part".to_string(),
            positions: vec![Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE],
            normals: Vec::new(),
            indices: Vec::new(),
        }],
    };
    MeshNode::normalized(content, MaterialDesc::body()).unwrap()
}

// ============================================================================
// Background
// ============================================================================

#[test]
fn test_background() {
    let mut scene = Scene::new(Color::from_hex(0xf0f0f0));
    assert_eq!(scene.background(), Color::from_hex(0xf0f0f0));

    scene.set_background(Color::from_hex(0x202020));
    assert_eq!(scene.background(), Color::from_hex(0x202020));
}

// ============================================================================
// Lights and helpers
// ============================================================================

#[test]
fn test_install_lights_once() {
    let mut scene = Scene::new(Color::WHITE);
    assert!(scene.lights().is_empty());

    scene.install_lights(standard_rig());
    assert_eq!(scene.lights().len(), 4);

    // Lights are installed once; a second install is ignored.
    scene.install_lights(Vec::new());
    scene.install_lights(standard_rig());
    assert_eq!(scene.lights().len(), 4);
}

#[test]
fn test_helpers() {
    let mut scene = Scene::new(Color::WHITE);
    assert!(scene.helpers().is_empty());

    scene.add_helper(Helper::Grid { size: GRID_SIZE, divisions: GRID_DIVISIONS });
    assert_eq!(scene.helpers().len(), 1);
    assert_eq!(
        scene.helpers()[0],
        Helper::Grid { size: 10.0, divisions: 10 }
    );
}

// ============================================================================
// Slot nodes
// ============================================================================

#[test]
fn test_attach_slot_node() {
    let mut scene = Scene::new(Color::WHITE);
    let key = scene.attach_slot_node(MeshSlot::Body, test_node());

    assert_eq!(scene.node_count(), 1);
    assert_eq!(scene.slot_node_key(MeshSlot::Body), Some(key));
    assert!(scene.slot_node_key(MeshSlot::Garment).is_none());
    assert!(scene.node(key).is_some());
}

#[test]
fn test_attach_replaces_previous_occupant() {
    let mut scene = Scene::new(Color::WHITE);
    let first = scene.attach_slot_node(MeshSlot::Body, test_node());
    let second = scene.attach_slot_node(MeshSlot::Body, test_node());

    assert_ne!(first, second);
    assert_eq!(scene.node_count(), 1);
    assert_eq!(scene.slot_node_key(MeshSlot::Body), Some(second));
    // The replaced node was released; its key no longer resolves.
    assert!(scene.node(first).is_none());
}

#[test]
fn test_detach_slot_node() {
    let mut scene = Scene::new(Color::WHITE);
    let key = scene.attach_slot_node(MeshSlot::Garment, test_node());

    assert!(scene.detach_slot_node(MeshSlot::Garment));
    assert_eq!(scene.node_count(), 0);
    assert!(scene.slot_node_key(MeshSlot::Garment).is_none());
    assert!(scene.node(key).is_none());

    // Empty slot: nothing to detach.
    assert!(!scene.detach_slot_node(MeshSlot::Garment));
}

#[test]
fn test_slots_are_independent() {
    let mut scene = Scene::new(Color::WHITE);
    let body = scene.attach_slot_node(MeshSlot::Body, test_node());
    let garment = scene.attach_slot_node(MeshSlot::Garment, test_node());

    assert_eq!(scene.node_count(), 2);
    scene.detach_slot_node(MeshSlot::Body);
    assert_eq!(scene.node_count(), 1);
    assert!(scene.node(body).is_none());
    assert!(scene.node(garment).is_some());
}

#[test]
fn test_clear_slots() {
    let mut scene = Scene::new(Color::WHITE);
    scene.install_lights(standard_rig());
    scene.attach_slot_node(MeshSlot::Body, test_node());
    scene.attach_slot_node(MeshSlot::Garment, test_node());

    scene.clear_slots();

    assert_eq!(scene.node_count(), 0);
    assert!(scene.slot_node_key(MeshSlot::Body).is_none());
    assert!(scene.slot_node_key(MeshSlot::Garment).is_none());
    // Lights survive slot clearing; they are never removed.
    assert_eq!(scene.lights().len(), 4);
}

// ============================================================================
// Slot display
// ============================================================================

#[test]
fn test_mesh_slot_display() {
    assert_eq!(format!("{}", MeshSlot::Body), "body");
    assert_eq!(format!("{}", MeshSlot::Garment), "garment");
}
