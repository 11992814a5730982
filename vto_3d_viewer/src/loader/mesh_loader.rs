/// MeshFormatLoader trait - asynchronous mesh asset loading capability
///
/// A loader backend resolves a URL to parsed scene content. Loading
/// starts immediately on `begin_load` and reports through a channel:
/// zero or more `Progress` events followed by exactly one terminal
/// `Resolved` or `Failed`. Backends may use background threads
/// internally; the channel is the only communication path back to the
/// viewer's thread.

use std::time::Duration;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use glam::Vec3;
use crate::scene::Aabb;

// ============================================================================
// Raw content
// ============================================================================

/// One named piece of parsed geometry.
#[derive(Debug, Clone, Default)]
pub struct RawMeshPart {
    /// Part name from the asset (object/group name), may be empty.
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals aligned with `positions`; empty when absent.
    pub normals: Vec<Vec3>,
    /// Triangle indices into `positions`; empty for non-indexed parts.
    pub indices: Vec<u32>,
}

/// Parsed scene content produced by a loader backend, before
/// normalization and material assignment.
#[derive(Debug, Clone, Default)]
pub struct RawMeshContent {
    pub parts: Vec<RawMeshPart>,
}

impl RawMeshContent {
    /// Bounding box over all parts. `None` when there are no vertices.
    pub fn aabb(&self) -> Option<Aabb> {
        let mut aabb: Option<Aabb> = None;
        for part in &self.parts {
            if let Some(part_aabb) = Aabb::from_points(&part.positions) {
                aabb = Some(match aabb {
                    Some(acc) => acc.union(&part_aabb),
                    None => part_aabb,
                });
            }
        }
        aabb
    }

    /// Total vertex count across all parts.
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.positions.len()).sum()
    }
}

// ============================================================================
// Load channel
// ============================================================================

/// Event emitted by an in-flight load.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// Fraction loaded so far, in `[0, 1]`.
    Progress(f32),
    /// Terminal success with the parsed content.
    Resolved(RawMeshContent),
    /// Terminal failure with the underlying cause.
    Failed(String),
}

/// Producer half of a load channel, held by the loader backend.
///
/// Terminal sends consume the feed, so a load emits at most one
/// terminal event. Sends after the receiver is dropped (viewer gone)
/// are silently discarded.
pub struct LoadFeed {
    sender: Sender<LoadEvent>,
}

impl LoadFeed {
    /// Report the fraction loaded so far.
    pub fn progress(&self, fraction: f32) {
        let _ = self.sender.send(LoadEvent::Progress(fraction));
    }

    /// Resolve the load with parsed content.
    pub fn resolve(self, content: RawMeshContent) {
        let _ = self.sender.send(LoadEvent::Resolved(content));
    }

    /// Fail the load with the underlying cause.
    pub fn fail(self, cause: impl Into<String>) {
        let _ = self.sender.send(LoadEvent::Failed(cause.into()));
    }
}

/// Non-blocking poll result of a pending load.
#[derive(Debug, Clone)]
pub enum PendingPoll {
    /// An event is ready.
    Event(LoadEvent),
    /// No event ready; the load is still in flight.
    Idle,
    /// The backend dropped the feed without a terminal event
    /// (e.g. its worker died). The load will never complete.
    Abandoned,
}

/// Consumer half of a load channel, owned by the viewer.
pub struct PendingMesh {
    events: Receiver<LoadEvent>,
}

impl PendingMesh {
    /// Create a connected feed/pending pair.
    pub fn channel() -> (LoadFeed, PendingMesh) {
        let (sender, events) = unbounded();
        (LoadFeed { sender }, PendingMesh { events })
    }

    /// Poll for the next event without blocking, distinguishing an
    /// in-flight load from one whose backend went away.
    pub fn poll_event(&self) -> PendingPoll {
        match self.events.try_recv() {
            Ok(event) => PendingPoll::Event(event),
            Err(TryRecvError::Empty) => PendingPoll::Idle,
            Err(TryRecvError::Disconnected) => PendingPoll::Abandoned,
        }
    }

    /// Next event if one is ready; never blocks.
    pub fn try_next(&self) -> Option<LoadEvent> {
        self.events.try_recv().ok()
    }

    /// Next event, waiting up to `timeout`. Intended for synchronous
    /// hosts and tests; the viewer itself only uses `try_next`.
    pub fn next_timeout(&self, timeout: Duration) -> Option<LoadEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}

// ============================================================================
// MeshFormatLoader trait
// ============================================================================

/// Mesh-format loader capability.
///
/// Implemented by asset backends (OBJ file loader, test doubles).
/// `begin_load` must not block: fetch and parse happen asynchronously
/// and report through the returned `PendingMesh`.
pub trait MeshFormatLoader {
    /// Start loading the asset at `url`.
    fn begin_load(&self, url: &str) -> PendingMesh;
}

#[cfg(test)]
#[path = "mesh_loader_tests.rs"]
mod tests;
