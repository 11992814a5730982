use std::io::Cursor;
use glam::Vec3;
use vto_3d_viewer::loader::{LoadEvent, PendingMesh, RawMeshContent};
use super::*;

fn parse(source: &str) -> Result<RawMeshContent, String> {
    let (feed, _pending) = PendingMesh::channel();
    parse_obj(Cursor::new(source.as_bytes()), source.len() as u64, &feed)
}

// ============================================================================
// Basic records
// ============================================================================

#[test]
fn test_parse_single_triangle() {
    let content = parse(
        "v 0 0 0\n\
         v 1 0 0\n\
         v 0 1 0\n\
         f 1 2 3\n",
    )
    .unwrap();

    assert_eq!(content.parts.len(), 1);
    let part = &content.parts[0];
    assert_eq!(part.name, "default");
    assert_eq!(part.positions.len(), 3);
    assert_eq!(part.indices, vec![0, 1, 2]);
    assert!(part.normals.is_empty());
}

#[test]
fn test_parse_skips_comments_and_blanks() {
    let content = parse(
        "# a comment\n\
         \n\
         v 0 0 0\n\
         v 1 0 0\n\
         v 0 1 0\n\
         # another comment\n\
         f 1 2 3\n",
    )
    .unwrap();

    assert_eq!(content.vertex_count(), 3);
}

#[test]
fn test_parse_ignores_unsupported_records() {
    let content = parse(
        "mtllib scene.mtl\n\
         usemtl fabric\n\
         s off\n\
         v 0 0 0\n\
         v 1 0 0\n\
         v 0 1 0\n\
         vt 0.5 0.5\n\
         f 1/1 2/1 3/1\n",
    )
    .unwrap();

    assert_eq!(content.parts[0].indices.len(), 3);
}

// ============================================================================
// Triangulation and dedup
// ============================================================================

#[test]
fn test_quad_is_triangulated_as_fan() {
    let content = parse(
        "v 0 0 0\n\
         v 1 0 0\n\
         v 1 1 0\n\
         v 0 1 0\n\
         f 1 2 3 4\n",
    )
    .unwrap();

    let part = &content.parts[0];
    assert_eq!(part.positions.len(), 4);
    assert_eq!(part.indices, vec![0, 1, 2, 0, 2, 3]);
}

#[test]
fn test_shared_vertices_are_deduplicated() {
    let content = parse(
        "v 0 0 0\n\
         v 1 0 0\n\
         v 1 1 0\n\
         v 0 1 0\n\
         f 1 2 3\n\
         f 1 3 4\n",
    )
    .unwrap();

    let part = &content.parts[0];
    assert_eq!(part.positions.len(), 4);
    assert_eq!(part.indices, vec![0, 1, 2, 0, 2, 3]);
}

// ============================================================================
// Normals
// ============================================================================

#[test]
fn test_normals_follow_vertices() {
    let content = parse(
        "v 0 0 0\n\
         v 1 0 0\n\
         v 0 1 0\n\
         vn 0 0 1\n\
         f 1//1 2//1 3//1\n",
    )
    .unwrap();

    let part = &content.parts[0];
    assert_eq!(part.normals.len(), part.positions.len());
    assert_eq!(part.normals[0], Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn test_partial_normals_are_dropped() {
    let content = parse(
        "v 0 0 0\n\
         v 1 0 0\n\
         v 0 1 0\n\
         vn 0 0 1\n\
         f 1//1 2 3\n",
    )
    .unwrap();

    assert!(content.parts[0].normals.is_empty());
    assert_eq!(content.parts[0].positions.len(), 3);
}

// ============================================================================
// Groups and objects
// ============================================================================

#[test]
fn test_objects_become_parts() {
    let content = parse(
        "o torso\n\
         v 0 0 0\n\
         v 1 0 0\n\
         v 0 1 0\n\
         f 1 2 3\n\
         o sleeve\n\
         v 0 0 1\n\
         f 2 3 4\n",
    )
    .unwrap();

    assert_eq!(content.parts.len(), 2);
    assert_eq!(content.parts[0].name, "torso");
    assert_eq!(content.parts[1].name, "sleeve");
    assert_eq!(content.parts[0].positions.len(), 3);
    assert_eq!(content.parts[1].positions.len(), 3);
}

#[test]
fn test_empty_groups_are_skipped() {
    let content = parse(
        "o empty_one\n\
         o real\n\
         v 0 0 0\n\
         v 1 0 0\n\
         v 0 1 0\n\
         f 1 2 3\n",
    )
    .unwrap();

    assert_eq!(content.parts.len(), 1);
    assert_eq!(content.parts[0].name, "real");
}

// ============================================================================
// Index resolution
// ============================================================================

#[test]
fn test_negative_indices_are_relative() {
    let content = parse(
        "v 0 0 0\n\
         v 1 0 0\n\
         v 0 1 0\n\
         f -3 -2 -1\n",
    )
    .unwrap();

    assert_eq!(content.parts[0].indices, vec![0, 1, 2]);
    assert_eq!(content.parts[0].positions[2], Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_out_of_range_index_fails() {
    let error = parse("v 0 0 0\nf 1 2 3\n").unwrap_err();
    assert!(error.contains("line 2"));
    assert!(error.contains("out of range"));
}

#[test]
fn test_zero_index_fails() {
    let error = parse("v 0 0 0\nf 0 1 1\n").unwrap_err();
    assert!(error.contains("index 0"));
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_malformed_vertex_fails_with_line() {
    let error = parse("v 0 zero 0\n").unwrap_err();
    assert!(error.contains("line 1"));
    assert!(error.contains("invalid number"));
}

#[test]
fn test_short_face_fails() {
    let error = parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
    assert!(error.contains("fewer than 3"));
}

#[test]
fn test_empty_file_fails() {
    let error = parse("").unwrap_err();
    assert!(error.contains("no geometry"));
}

#[test]
fn test_vertex_only_file_yields_point_part() {
    let content = parse("v 0 0 0\nv 1 2 3\n").unwrap();

    assert_eq!(content.parts.len(), 1);
    assert_eq!(content.parts[0].positions.len(), 2);
    assert!(content.parts[0].indices.is_empty());
}

// ============================================================================
// Progress
// ============================================================================

#[test]
fn test_progress_reported_for_large_input() {
    let mut source = String::new();
    for i in 0..6000 {
        source.push_str(&format!("v {}.0 0.0 0.0\n", i));
    }
    source.push_str("v 0 1 0\nv 0 0 1\nf 1 2 3\n");

    let (feed, pending) = PendingMesh::channel();
    parse_obj(Cursor::new(source.as_bytes()), source.len() as u64, &feed).unwrap();

    let mut fractions = Vec::new();
    while let Some(LoadEvent::Progress(fraction)) = pending.try_next() {
        fractions.push(fraction);
    }

    assert!(!fractions.is_empty());
    assert!(fractions.iter().all(|f| *f > 0.0 && *f <= 1.0));
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
}

// ============================================================================
// URL resolution
// ============================================================================

#[test]
fn test_resolve_url_strips_file_scheme() {
    assert_eq!(
        resolve_url("file:///tmp/body.obj"),
        std::path::PathBuf::from("/tmp/body.obj")
    );
    assert_eq!(
        resolve_url("/tmp/body.obj"),
        std::path::PathBuf::from("/tmp/body.obj")
    );
}
