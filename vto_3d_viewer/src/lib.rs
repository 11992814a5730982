/*!
# VTO 3D Viewer

Embeddable real-time 3D preview viewer for virtual try-on.

Loads a body mesh and a garment mesh into a shared scene, frames a
perspective camera around arbitrary mesh geometry, runs a continuous
render loop, and manages the lifecycle of surface-backed resources
across repeated asset swaps and eventual teardown.

The host environment supplies four capabilities as trait objects:

- **RenderSurface / RenderSurfaceProvider**: the 3D drawing binding of
  one canvas (one draw call per frame, pixel readback, resize)
- **MeshFormatLoader**: asynchronous fetch-and-parse of mesh assets,
  with progress reporting over a channel
- **FrameScheduler**: the display-refresh frame callback
- **ResizeEvents**: resize notifications as an explicit subscription

Backend implementations plug in from outside (e.g. the OBJ loader
crate); software implementations of the surface, scheduler, and resize
capabilities ship in this crate for GPU-less hosts and tests.
*/

// Internal modules
mod error;
mod render_loop;
mod viewer;
pub mod camera;
pub mod controls;
pub mod loader;
pub mod log;
pub mod scene;
pub mod surface;

// Main vto3d namespace module
pub mod vto3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Viewer aggregate
    pub use crate::viewer::{
        HostCapabilities, LoadStatus, LoadTicket, Viewer, ViewerOptions,
    };

    // Render loop state machine
    pub use crate::render_loop::{LoopState, RenderLoop};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: viewer_* macros are NOT re-exported here - they are internal only
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Controls sub-module
    pub mod controls {
        pub use crate::controls::*;
    }

    // Loader sub-module
    pub mod loader {
        pub use crate::loader::*;
    }

    // Surface sub-module
    pub mod surface {
        pub use crate::surface::*;
    }
}

// Re-export math library at crate root
pub use glam;
