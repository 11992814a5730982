//! Mesh loading module
//!
//! Defines the mesh-format loader capability: an asynchronous,
//! progress-reporting fetch-and-parse of a mesh asset into raw scene
//! content. Backends (e.g. the OBJ loader crate) implement
//! `MeshFormatLoader`; the Viewer consumes the resulting `PendingMesh`
//! events on the cooperative main thread.

mod mesh_loader;
#[cfg(test)]
pub(crate) mod mock_loader;

pub use mesh_loader::{
    LoadEvent, LoadFeed, MeshFormatLoader, PendingMesh, PendingPoll,
    RawMeshContent, RawMeshPart,
};
