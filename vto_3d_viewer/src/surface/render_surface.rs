/// RenderSurface trait - the 3D drawing binding for one canvas
///
/// The central capability the host must supply: a surface that knows
/// its canvas's current client size and device pixel ratio, accepts
/// one draw call per frame, and can read back the current frame for
/// screenshots. Exclusively owned by one viewer instance.

use crate::camera::Camera;
use crate::error::Result;
use crate::scene::Scene;

/// Surface creation configuration.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Multisample the output.
    pub antialias: bool,
    /// Surface has an alpha channel.
    pub alpha: bool,
    /// Enable shadow mapping.
    pub shadow_maps: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            alpha: true,
            shadow_maps: true,
        }
    }
}

/// Raw RGBA pixels read back from a surface.
#[derive(Debug, Clone)]
pub struct FramePixels {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, row-major, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// The rendering surface bound to one canvas.
pub trait RenderSurface {
    /// Current client (CSS) size of the bound canvas.
    fn client_size(&self) -> (u32, u32);

    /// Device pixel ratio of the bound canvas.
    fn pixel_ratio(&self) -> f64;

    /// Resize the drawable to the given client size (the surface
    /// applies its pixel ratio internally).
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame of the scene through the camera.
    ///
    /// # Errors
    ///
    /// Returns `Error::SurfaceError` when the surface has been
    /// disposed or the backend rejects the draw.
    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<()>;

    /// Read back the pixels of the most recently drawn frame.
    fn read_pixels(&self) -> Result<FramePixels>;

    /// Release the surface's resources. Further draws must fail
    /// rather than touch released state.
    fn dispose(&mut self);
}

/// Factory for the render surface, supplied by the host at
/// initialization.
///
/// Creation fails when the canvas cannot provide a 3D-capable drawing
/// context; the viewer reports this by logging and staying
/// uninitialized.
pub trait RenderSurfaceProvider {
    /// Create the surface binding for the viewer's canvas.
    fn create_surface(&mut self, config: &SurfaceConfig) -> Result<Box<dyn RenderSurface>>;
}
