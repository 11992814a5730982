/// Mock mesh loader for unit tests (no files, no threads)
///
/// Records every requested URL and hands the test full control over
/// each load's event feed, so progress, resolution, failure, and
/// ordering races can be driven deterministically.

use std::sync::{Arc, Mutex};
use super::mesh_loader::{LoadFeed, MeshFormatLoader, PendingMesh, RawMeshContent};

struct MockState {
    started: Vec<String>,
    feeds: Vec<Option<LoadFeed>>,
}

/// Test double implementing `MeshFormatLoader`.
///
/// Clones share state, so a test can keep a handle while the viewer
/// owns the boxed loader.
#[derive(Clone)]
pub struct MockMeshLoader {
    state: Arc<Mutex<MockState>>,
}

impl MockMeshLoader {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                started: Vec::new(),
                feeds: Vec::new(),
            })),
        }
    }

    /// URLs passed to `begin_load`, in call order.
    pub fn started_urls(&self) -> Vec<String> {
        self.state.lock().unwrap().started.clone()
    }

    /// Number of loads started.
    pub fn load_count(&self) -> usize {
        self.state.lock().unwrap().started.len()
    }

    /// Report progress on the `index`-th load.
    pub fn progress(&self, index: usize, fraction: f32) {
        let state = self.state.lock().unwrap();
        if let Some(Some(feed)) = state.feeds.get(index) {
            feed.progress(fraction);
        }
    }

    /// Resolve the `index`-th load with the given content.
    pub fn resolve(&self, index: usize, content: RawMeshContent) {
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.feeds.get_mut(index) {
            if let Some(feed) = slot.take() {
                feed.resolve(content);
            }
        }
    }

    /// Fail the `index`-th load with the given cause.
    pub fn fail(&self, index: usize, cause: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.feeds.get_mut(index) {
            if let Some(feed) = slot.take() {
                feed.fail(cause);
            }
        }
    }

    /// Drop the `index`-th feed without a terminal event, simulating a
    /// dead loader backend.
    pub fn abandon(&self, index: usize) {
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.feeds.get_mut(index) {
            slot.take();
        }
    }
}

impl MeshFormatLoader for MockMeshLoader {
    fn begin_load(&self, url: &str) -> PendingMesh {
        let (feed, pending) = PendingMesh::channel();
        let mut state = self.state.lock().unwrap();
        state.started.push(url.to_string());
        state.feeds.push(Some(feed));
        pending
    }
}
