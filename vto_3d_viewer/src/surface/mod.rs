//! Output-surface module - host-facing rendering capabilities
//!
//! Defines the traits the host environment supplies: the 3D-capable
//! render surface bound to a canvas, the display-refresh frame
//! scheduler, and the resize notification channel. Ships software
//! implementations (`HeadlessSurface`, `ManualFrameScheduler`,
//! `ResizeRegistry`) for embedders without a GPU host and for tests.

mod headless;
mod render_surface;
mod resize;
mod scheduler;

pub use headless::{HeadlessCanvas, HeadlessSurface, HeadlessSurfaceProvider, SurfaceCounters};
pub use render_surface::{FramePixels, RenderSurface, RenderSurfaceProvider, SurfaceConfig};
pub use resize::{ResizeEvents, ResizeRegistry, ResizeSubscription};
pub use scheduler::{FrameScheduler, FrameToken, ManualFrameScheduler};
