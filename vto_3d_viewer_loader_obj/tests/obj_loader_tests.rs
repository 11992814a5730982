//! Integration tests for the OBJ loader backend.
//!
//! Exercise the full `begin_load` path: background thread, file I/O,
//! and event delivery over the load channel.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use vto_3d_viewer::loader::{LoadEvent, MeshFormatLoader};
use vto_3d_viewer_loader_obj::ObjMeshLoader;

const CUBE_OBJ: &str = "o cube\n\
v -2 -1 -0.5\n\
v 2 -1 -0.5\n\
v 2 1 -0.5\n\
v -2 1 -0.5\n\
v -2 -1 0.5\n\
v 2 -1 0.5\n\
v 2 1 0.5\n\
v -2 1 0.5\n\
f 1 2 3 4\n\
f 5 6 7 8\n\
f 1 2 6 5\n\
f 2 3 7 6\n\
f 3 4 8 7\n\
f 4 1 5 8\n";

fn fixture_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vto3d_obj_fixture_{}_{}", std::process::id(), name))
}

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = fixture_path(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Wait for the terminal event of a load, collecting progress on the way.
fn wait_for_outcome(pending: &vto_3d_viewer::loader::PendingMesh) -> LoadEvent {
    loop {
        match pending.next_timeout(Duration::from_secs(10)) {
            Some(LoadEvent::Progress(_)) => continue,
            Some(terminal) => return terminal,
            None => panic!("load did not finish within the timeout"),
        }
    }
}

#[test]
fn test_load_cube_from_path() {
    let path = write_fixture("cube.obj", CUBE_OBJ);
    let loader = ObjMeshLoader::new();

    let pending = loader.begin_load(path.to_str().unwrap());
    let outcome = wait_for_outcome(&pending);
    fs::remove_file(&path).ok();

    match outcome {
        LoadEvent::Resolved(content) => {
            assert_eq!(content.parts.len(), 1);
            let part = &content.parts[0];
            assert_eq!(part.name, "cube");
            assert_eq!(part.positions.len(), 8);
            // 6 quads, 2 triangles each.
            assert_eq!(part.indices.len(), 36);

            let aabb = content.aabb().unwrap();
            assert_eq!(aabb.size(), glam::Vec3::new(4.0, 2.0, 1.0));
        }
        other => panic!("expected Resolved, got {:?}", other),
    }
}

#[test]
fn test_load_with_file_url() {
    let path = write_fixture("cube_url.obj", CUBE_OBJ);
    let loader = ObjMeshLoader::new();

    let url = format!("file://{}", path.display());
    let pending = loader.begin_load(&url);
    let outcome = wait_for_outcome(&pending);
    fs::remove_file(&path).ok();

    assert!(matches!(outcome, LoadEvent::Resolved(_)));
}

#[test]
fn test_load_missing_file_fails() {
    let loader = ObjMeshLoader::new();
    let pending = loader.begin_load("/nonexistent/vto3d/missing.obj");

    match wait_for_outcome(&pending) {
        LoadEvent::Failed(cause) => {
            assert!(cause.contains("open"));
            assert!(cause.contains("missing.obj"));
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[test]
fn test_load_malformed_file_fails_with_line() {
    let path = write_fixture("broken.obj", "v 0 0 0\nv not-a-number 0 0\n");
    let loader = ObjMeshLoader::new();

    let pending = loader.begin_load(path.to_str().unwrap());
    let outcome = wait_for_outcome(&pending);
    fs::remove_file(&path).ok();

    match outcome {
        LoadEvent::Failed(cause) => {
            assert!(cause.contains("line 2"));
            assert!(cause.contains("invalid number"));
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}
