/// Software render surface (no GPU required)
///
/// A pure-CPU implementation of the surface capability: it maintains a
/// framebuffer at the canvas's drawable resolution and clears it to the
/// scene background on every draw. Shading is out of its scope — it
/// exists so embedders without a GPU host, and the test suite, can run
/// the full viewer lifecycle including screenshots.
///
/// Bookkeeping (draw/resize/dispose counters) is shared through an Arc
/// so a host or test can observe the surface after handing ownership
/// to the viewer.

use std::sync::{Arc, Mutex};
use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::scene::Scene;
use super::render_surface::{FramePixels, RenderSurface, RenderSurfaceProvider, SurfaceConfig};

// ============================================================================
// Canvas
// ============================================================================

struct CanvasState {
    client_width: u32,
    client_height: u32,
    pixel_ratio: f64,
}

/// Stand-in for the host canvas element: client size plus device pixel
/// ratio, mutable from the host side while the surface is bound.
///
/// Clones share state.
#[derive(Clone)]
pub struct HeadlessCanvas {
    state: Arc<Mutex<CanvasState>>,
}

impl HeadlessCanvas {
    pub fn new(client_width: u32, client_height: u32, pixel_ratio: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(CanvasState {
                client_width,
                client_height,
                pixel_ratio,
            })),
        }
    }

    /// Current client (CSS) size.
    pub fn client_size(&self) -> (u32, u32) {
        let state = self.state.lock().unwrap();
        (state.client_width, state.client_height)
    }

    /// Device pixel ratio.
    pub fn pixel_ratio(&self) -> f64 {
        self.state.lock().unwrap().pixel_ratio
    }

    /// Change the client size (host-side layout change). The surface
    /// picks the new size up on the next `Viewer::handle_resize`.
    pub fn set_client_size(&self, client_width: u32, client_height: u32) {
        let mut state = self.state.lock().unwrap();
        state.client_width = client_width;
        state.client_height = client_height;
    }
}

// ============================================================================
// Counters
// ============================================================================

/// Observable surface state, shared with the creating provider.
#[derive(Debug, Clone, Default)]
pub struct SurfaceCounters {
    /// Completed draw calls.
    pub draws: u64,
    /// Resize calls accepted.
    pub resizes: u64,
    /// Surface has been disposed.
    pub disposed: bool,
    /// Current drawable width (client width x pixel ratio).
    pub drawable_width: u32,
    /// Current drawable height (client height x pixel ratio).
    pub drawable_height: u32,
    /// RGB the framebuffer was last cleared to.
    pub last_clear: Option<[u8; 3]>,
}

// ============================================================================
// Surface
// ============================================================================

/// Software implementation of `RenderSurface`.
pub struct HeadlessSurface {
    canvas: HeadlessCanvas,
    config: SurfaceConfig,
    drawable_width: u32,
    drawable_height: u32,
    framebuffer: Vec<u8>,
    disposed: bool,
    counters: Arc<Mutex<SurfaceCounters>>,
}

impl HeadlessSurface {
    fn new(
        canvas: HeadlessCanvas,
        config: SurfaceConfig,
        counters: Arc<Mutex<SurfaceCounters>>,
    ) -> Self {
        let (client_width, client_height) = canvas.client_size();
        let ratio = canvas.pixel_ratio();
        let drawable_width = Self::scaled(client_width, ratio);
        let drawable_height = Self::scaled(client_height, ratio);
        {
            let mut shared = counters.lock().unwrap();
            shared.drawable_width = drawable_width;
            shared.drawable_height = drawable_height;
        }
        Self {
            canvas,
            config,
            drawable_width,
            drawable_height,
            framebuffer: vec![0; (drawable_width * drawable_height * 4) as usize],
            disposed: false,
            counters,
        }
    }

    fn scaled(dimension: u32, ratio: f64) -> u32 {
        (dimension as f64 * ratio).round() as u32
    }

    /// Surface creation configuration.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Current drawable size (client size scaled by the pixel ratio).
    pub fn drawable_size(&self) -> (u32, u32) {
        (self.drawable_width, self.drawable_height)
    }
}

impl RenderSurface for HeadlessSurface {
    fn client_size(&self) -> (u32, u32) {
        self.canvas.client_size()
    }

    fn pixel_ratio(&self) -> f64 {
        self.canvas.pixel_ratio()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.disposed {
            return;
        }
        let ratio = self.canvas.pixel_ratio();
        let drawable_width = Self::scaled(width, ratio);
        let drawable_height = Self::scaled(height, ratio);
        if drawable_width != self.drawable_width || drawable_height != self.drawable_height {
            self.drawable_width = drawable_width;
            self.drawable_height = drawable_height;
            self.framebuffer = vec![0; (drawable_width * drawable_height * 4) as usize];
        }
        let mut counters = self.counters.lock().unwrap();
        counters.resizes += 1;
        counters.drawable_width = self.drawable_width;
        counters.drawable_height = self.drawable_height;
    }

    fn draw(&mut self, scene: &Scene, _camera: &Camera) -> Result<()> {
        if self.disposed {
            return Err(Error::SurfaceError("draw on a disposed surface".to_string()));
        }
        let [r, g, b] = scene.background().to_rgb8();
        for pixel in self.framebuffer.chunks_exact_mut(4) {
            pixel[0] = r;
            pixel[1] = g;
            pixel[2] = b;
            pixel[3] = 255;
        }
        let mut counters = self.counters.lock().unwrap();
        counters.draws += 1;
        counters.last_clear = Some([r, g, b]);
        Ok(())
    }

    fn read_pixels(&self) -> Result<FramePixels> {
        if self.disposed {
            return Err(Error::SurfaceError("read_pixels on a disposed surface".to_string()));
        }
        Ok(FramePixels {
            width: self.drawable_width,
            height: self.drawable_height,
            rgba: self.framebuffer.clone(),
        })
    }

    fn dispose(&mut self) {
        self.framebuffer = Vec::new();
        self.disposed = true;
        self.counters.lock().unwrap().disposed = true;
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Factory for `HeadlessSurface`, with an unavailable mode simulating
/// a canvas that cannot provide a 3D drawing context.
pub struct HeadlessSurfaceProvider {
    canvas: HeadlessCanvas,
    available: bool,
    counters: Arc<Mutex<SurfaceCounters>>,
}

impl HeadlessSurfaceProvider {
    pub fn new(canvas: HeadlessCanvas) -> Self {
        Self {
            canvas,
            available: true,
            counters: Arc::new(Mutex::new(SurfaceCounters::default())),
        }
    }

    /// Provider whose surface creation always fails, like a canvas
    /// without 3D support.
    pub fn unavailable(canvas: HeadlessCanvas) -> Self {
        Self {
            canvas,
            available: false,
            counters: Arc::new(Mutex::new(SurfaceCounters::default())),
        }
    }

    /// Shared counters of the created surface.
    pub fn counters(&self) -> Arc<Mutex<SurfaceCounters>> {
        self.counters.clone()
    }
}

impl RenderSurfaceProvider for HeadlessSurfaceProvider {
    fn create_surface(&mut self, config: &SurfaceConfig) -> Result<Box<dyn RenderSurface>> {
        if !self.available {
            return Err(Error::InitializationFailed(
                "no 3D-capable drawing context available".to_string(),
            ));
        }
        Ok(Box::new(HeadlessSurface::new(
            self.canvas.clone(),
            config.clone(),
            self.counters.clone(),
        )))
    }
}

#[cfg(test)]
#[path = "headless_tests.rs"]
mod tests;
