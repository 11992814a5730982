//! Viewer — the top-level owned aggregate.
//!
//! Constructs the scene, camera, surface binding, lighting, optional
//! controls, and render loop in dependency order; orchestrates
//! asynchronous mesh loads into the two scene slots; and tears
//! everything down deterministically on disposal.

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::camera::Camera;
use crate::controls::OrbitControls;
use crate::error::{Error, Result};
use crate::loader::{LoadEvent, MeshFormatLoader, PendingMesh, PendingPoll, RawMeshContent};
use crate::render_loop::{LoopState, RenderLoop};
use crate::scene::{
    standard_rig, Color, Helper, MaterialDesc, MeshNode, MeshSlot, NodeKey, Scene,
    GRID_DIVISIONS, GRID_SIZE,
};
use crate::surface::{
    FrameScheduler, RenderSurface, RenderSurfaceProvider, ResizeEvents, ResizeSubscription,
    SurfaceConfig,
};
use crate::{viewer_debug, viewer_error, viewer_info};

const SOURCE: &str = "vto3d::Viewer";

// ============================================================================
// Configuration
// ============================================================================

/// Viewer construction options.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Scene background color.
    pub background_color: Color,
    /// Initial camera distance from the origin along +Z.
    pub camera_distance: f32,
    /// Install orbit controls.
    pub enable_controls: bool,
    /// Start with auto-rotate on (only meaningful with controls).
    pub auto_rotate: bool,
    /// Add a ground-plane grid helper.
    pub show_grid: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            background_color: Color::from_hex(0xf0f0f0),
            camera_distance: 2.5,
            enable_controls: true,
            auto_rotate: false,
            show_grid: false,
        }
    }
}

/// External capabilities the host supplies to one viewer instance.
pub struct HostCapabilities {
    /// Factory for the 3D drawing binding of the viewer's canvas.
    pub surface_provider: Box<dyn RenderSurfaceProvider>,
    /// Display-refresh frame callback scheduler.
    pub scheduler: Box<dyn FrameScheduler>,
    /// Resize notification channel.
    pub resize_events: Box<dyn ResizeEvents>,
    /// Mesh-format loader backend.
    pub mesh_loader: Box<dyn MeshFormatLoader>,
}

// ============================================================================
// Load tracking
// ============================================================================

/// Handle to one asynchronous mesh load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Observable state of a mesh load.
#[derive(Debug, Clone)]
pub enum LoadStatus {
    /// Still in flight; `progress` is the last reported fraction.
    Pending { progress: f32 },
    /// Resolved and attached; the node is reachable under this key.
    Loaded(NodeKey),
    /// Failed; the slot was left empty.
    Failed(Error),
}

struct InFlightLoad {
    slot: MeshSlot,
    url: String,
    pending: PendingMesh,
    progress: f32,
}

// ============================================================================
// Viewer
// ============================================================================

/// The embeddable 3D try-on preview viewer.
///
/// Created once per canvas via [`Viewer::initialize`]; destroyed by
/// explicit [`Viewer::dispose`]. When initialization fails (no
/// 3D-capable drawing context), the failure is logged, the viewer is
/// returned with `initialized == false`, and every operation that
/// needs the surface no-ops or rejects instead of panicking.
///
/// All state mutation happens on the host thread: loader backends
/// deliver results over a channel that is drained at the top of each
/// render-loop iteration (and by `poll_load`), so attach-to-scene is a
/// single synchronous step and no frame observes a half-attached node.
pub struct Viewer {
    options: ViewerOptions,
    scene: Scene,
    camera: Camera,
    surface: Option<Box<dyn RenderSurface>>,
    scheduler: Box<dyn FrameScheduler>,
    resize_events: Box<dyn ResizeEvents>,
    resize_subscription: Option<ResizeSubscription>,
    mesh_loader: Box<dyn MeshFormatLoader>,
    controls: Option<OrbitControls>,
    render_loop: RenderLoop,
    in_flight: FxHashMap<u64, InFlightLoad>,
    completed: FxHashMap<u64, LoadStatus>,
    next_ticket: u64,
    initialized: bool,
}

impl Viewer {
    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::NotInitialized(msg) => {
                viewer_error!(SOURCE, "Viewer not initialized: {}", msg);
            }
            Error::LoadFailed(msg) => {
                viewer_error!(SOURCE, "Mesh load failed: {}", msg);
            }
            _ => {
                viewer_error!(SOURCE, "Viewer error: {}", error);
            }
        }
        error
    }

    // ===== INITIALIZATION =====

    /// Configure all sub-components exactly once.
    ///
    /// On success the viewer is fully wired: scene with background and
    /// the four-light rig (plus optional grid), camera at
    /// `(0, 0, camera_distance)` looking at the origin with the aspect
    /// of the surface's client size, optional orbit controls, an
    /// active resize subscription, and a Running render loop.
    ///
    /// Surface creation failure is logged and leaves the viewer
    /// uninitialized; it is not returned as an error.
    pub fn initialize(mut host: HostCapabilities, options: ViewerOptions) -> Viewer {
        let surface = match host.surface_provider.create_surface(&SurfaceConfig::default()) {
            Ok(surface) => Some(surface),
            Err(error) => {
                viewer_error!(SOURCE, "Failed to initialize 3D viewer: {}", error);
                None
            }
        };

        let aspect = surface
            .as_ref()
            .map(|s| {
                let (width, height) = s.client_size();
                if height == 0 { 1.0 } else { width as f32 / height as f32 }
            })
            .unwrap_or(1.0);

        let camera = Camera::new(aspect, options.camera_distance);
        let scene = Scene::new(options.background_color);

        let mut viewer = Viewer {
            camera,
            scene,
            surface,
            scheduler: host.scheduler,
            resize_events: host.resize_events,
            resize_subscription: None,
            mesh_loader: host.mesh_loader,
            controls: None,
            render_loop: RenderLoop::new(),
            in_flight: FxHashMap::default(),
            completed: FxHashMap::default(),
            next_ticket: 1,
            options,
            initialized: false,
        };

        if viewer.surface.is_none() {
            return viewer;
        }

        viewer.scene.install_lights(standard_rig());
        if viewer.options.show_grid {
            viewer.scene.add_helper(Helper::Grid {
                size: GRID_SIZE,
                divisions: GRID_DIVISIONS,
            });
        }

        if viewer.options.enable_controls {
            viewer.controls = Some(OrbitControls::new(&viewer.camera, viewer.options.auto_rotate));
        }

        viewer.resize_subscription = Some(viewer.resize_events.subscribe());
        viewer.render_loop.start(viewer.scheduler.as_mut());
        viewer.initialized = true;

        viewer_info!(SOURCE, "3D viewer initialized");
        viewer
    }

    /// Whether initialization completed successfully and the viewer has
    /// not been disposed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    /// State of the render loop.
    pub fn loop_state(&self) -> LoopState {
        self.render_loop.state()
    }

    /// Key of the current body node, if one is attached.
    pub fn body_node_key(&self) -> Option<NodeKey> {
        self.scene.slot_node_key(MeshSlot::Body)
    }

    /// Key of the current garment node, if one is attached.
    pub fn garment_node_key(&self) -> Option<NodeKey> {
        self.scene.slot_node_key(MeshSlot::Garment)
    }

    /// Look up a loaded node by key.
    pub fn node(&self, key: NodeKey) -> Option<&MeshNode> {
        self.scene.node(key)
    }

    // ===== MESH LOADING =====

    /// Start loading the body mesh from `url`.
    ///
    /// Any node currently in the body slot is detached and released
    /// before the load starts. Completion is observed via
    /// [`Viewer::poll_load`]; the render loop keeps running while the
    /// load is in flight.
    ///
    /// Concurrent loads into the same slot are not deduplicated: each
    /// resolution attaches its node, so whichever load resolves last
    /// wins the slot.
    ///
    /// # Errors
    ///
    /// Rejects with `Error::NotInitialized` (before any state change)
    /// when the viewer is uninitialized or disposed.
    pub fn load_body_mesh(&mut self, url: &str) -> Result<LoadTicket> {
        self.start_load(MeshSlot::Body, url)
    }

    /// Start loading the garment mesh from `url`.
    ///
    /// Same contract as [`Viewer::load_body_mesh`], for the garment slot.
    pub fn load_garment_mesh(&mut self, url: &str) -> Result<LoadTicket> {
        self.start_load(MeshSlot::Garment, url)
    }

    fn start_load(&mut self, slot: MeshSlot, url: &str) -> Result<LoadTicket> {
        if !self.initialized {
            return Err(Self::log_and_return_error(Error::NotInitialized(format!(
                "cannot load {} mesh",
                slot
            ))));
        }

        self.scene.detach_slot_node(slot);

        let pending = self.mesh_loader.begin_load(url);
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight.insert(id, InFlightLoad {
            slot,
            url: url.to_string(),
            pending,
            progress: 0.0,
        });

        viewer_debug!(SOURCE, "Started {} mesh load: {}", slot, url);
        Ok(LoadTicket(id))
    }

    /// Poll the state of a load started by
    /// [`Viewer::load_body_mesh`]/[`Viewer::load_garment_mesh`].
    ///
    /// Drains pending loader events first, so resolutions become
    /// visible without waiting for the next frame. Returns `None` for
    /// a ticket this viewer never issued.
    pub fn poll_load(&mut self, ticket: LoadTicket) -> Option<LoadStatus> {
        self.pump_loads();
        if let Some(load) = self.in_flight.get(&ticket.0) {
            return Some(LoadStatus::Pending { progress: load.progress });
        }
        self.completed.get(&ticket.0).cloned()
    }

    /// Drain loader events and apply terminal outcomes to the scene.
    ///
    /// Attach happens here, synchronously, which makes a resolution
    /// visible to the very next render iteration. Resolutions arriving
    /// after disposal are discarded (the released scene must not be
    /// touched) and reported as failures on their tickets.
    fn pump_loads(&mut self) {
        let mut finished: Vec<(u64, std::result::Result<RawMeshContent, String>)> = Vec::new();

        for (&id, load) in self.in_flight.iter_mut() {
            loop {
                match load.pending.poll_event() {
                    PendingPoll::Event(LoadEvent::Progress(fraction)) => {
                        load.progress = fraction;
                        viewer_debug!(
                            SOURCE,
                            "Loading {} mesh: {:.1}%",
                            load.slot,
                            fraction * 100.0
                        );
                    }
                    PendingPoll::Event(LoadEvent::Resolved(content)) => {
                        finished.push((id, Ok(content)));
                        break;
                    }
                    PendingPoll::Event(LoadEvent::Failed(cause)) => {
                        finished.push((id, Err(cause)));
                        break;
                    }
                    PendingPoll::Idle => break,
                    PendingPoll::Abandoned => {
                        finished.push((id, Err("loader abandoned the load".to_string())));
                        break;
                    }
                }
            }
        }

        // Deterministic when several loads finish between two pumps:
        // later-started loads are applied later, so they win the slot.
        finished.sort_by_key(|(id, _)| *id);

        for (id, outcome) in finished {
            let Some(load) = self.in_flight.remove(&id) else { continue };
            let status = match outcome {
                Ok(content) => self.finish_load(&load, content),
                Err(cause) => LoadStatus::Failed(Self::log_and_return_error(Error::LoadFailed(
                    format!("{}: {}", load.url, cause),
                ))),
            };
            self.completed.insert(id, status);
        }
    }

    fn finish_load(&mut self, load: &InFlightLoad, content: RawMeshContent) -> LoadStatus {
        if !self.initialized {
            return LoadStatus::Failed(Error::NotInitialized(format!(
                "{} mesh load resolved after disposal",
                load.slot
            )));
        }

        let material = match load.slot {
            MeshSlot::Body => MaterialDesc::body(),
            MeshSlot::Garment => MaterialDesc::garment(),
        };

        match MeshNode::normalized(content, material) {
            Ok(node) => {
                let vertices = node.vertex_count();
                let key = self.scene.attach_slot_node(load.slot, node);
                viewer_info!(
                    SOURCE,
                    "Attached {} mesh ({} vertices): {}",
                    load.slot,
                    vertices,
                    load.url
                );
                LoadStatus::Loaded(key)
            }
            Err(error) => LoadStatus::Failed(Self::log_and_return_error(error)),
        }
    }

    // ===== RENDERING =====

    /// Run one render-loop iteration. Called by the host when a
    /// scheduled frame callback fires.
    ///
    /// Order within the iteration: re-arm the next frame, drain load
    /// resolutions, advance controls damping, draw. A draw failure is
    /// logged and never stops the loop.
    pub fn render_frame(&mut self) {
        if !self.initialized {
            return;
        }
        if !self.render_loop.begin_iteration(self.scheduler.as_mut()) {
            return;
        }

        self.pump_loads();

        if let Some(controls) = self.controls.as_mut() {
            controls.update(&mut self.camera);
        }

        if let Some(surface) = self.surface.as_mut() {
            if let Err(error) = surface.draw(&self.scene, &self.camera) {
                viewer_error!(SOURCE, "Draw failed: {}", error);
            }
        }
    }

    // ===== CAMERA OPERATIONS =====

    /// Place the camera explicitly, looking at the origin.
    /// No-op when uninitialized.
    pub fn set_camera_position(&mut self, x: f32, y: f32, z: f32) {
        if !self.initialized {
            return;
        }
        self.camera.set_pose(Vec3::new(x, y, z), Vec3::ZERO);
        if let Some(controls) = self.controls.as_mut() {
            controls.reset(&self.camera);
        }
    }

    /// Restore the initial camera pose (`(0, 0, camera_distance)`
    /// looking at the origin) and re-sync the controls.
    /// No-op when uninitialized.
    pub fn reset_camera(&mut self) {
        if !self.initialized {
            return;
        }
        self.camera
            .set_pose(Vec3::new(0.0, 0.0, self.options.camera_distance), Vec3::ZERO);
        if let Some(controls) = self.controls.as_mut() {
            controls.reset(&self.camera);
        }
    }

    /// Frame the camera around a loaded node.
    ///
    /// Positions the camera along +Z from the node's world-space
    /// bounding-box center at the padded framing distance, targets the
    /// center, and synchronizes the controls target. No-op for an
    /// unknown key or when uninitialized.
    pub fn focus_on_node(&mut self, key: NodeKey) {
        if !self.initialized {
            return;
        }
        let Some(node) = self.scene.node(key) else { return };
        let aabb = node.world_aabb();
        let center = aabb.center();
        let distance = self.camera.framing_distance(aabb.max_extent());
        self.camera
            .set_pose(Vec3::new(center.x, center.y, center.z + distance), center);
        if let Some(controls) = self.controls.as_mut() {
            controls.set_target(center, &self.camera);
        }
    }

    // ===== SURFACE OPERATIONS =====

    /// Re-read the canvas client size, update the camera aspect, and
    /// resize the drawable. Synchronous and idempotent; no-op when
    /// uninitialized.
    pub fn handle_resize(&mut self) {
        if !self.initialized {
            return;
        }
        let Some(surface) = self.surface.as_mut() else { return };
        let (width, height) = surface.client_size();
        let aspect = if height == 0 { 1.0 } else { width as f32 / height as f32 };
        self.camera.set_aspect(aspect);
        surface.resize(width, height);
    }

    /// Render one frame and return it encoded as PNG.
    /// `None` when uninitialized or when the surface rejects the
    /// draw/readback.
    pub fn take_screenshot(&mut self) -> Option<Vec<u8>> {
        if !self.initialized {
            return None;
        }
        let surface = self.surface.as_mut()?;

        if let Err(error) = surface.draw(&self.scene, &self.camera) {
            viewer_error!(SOURCE, "Screenshot draw failed: {}", error);
            return None;
        }
        let pixels = match surface.read_pixels() {
            Ok(pixels) => pixels,
            Err(error) => {
                viewer_error!(SOURCE, "Screenshot readback failed: {}", error);
                return None;
            }
        };

        let image = image::RgbaImage::from_raw(pixels.width, pixels.height, pixels.rgba)?;
        let mut encoded = Vec::new();
        if let Err(error) =
            image.write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Png)
        {
            viewer_error!(SOURCE, "Screenshot encoding failed: {}", error);
            return None;
        }
        Some(encoded)
    }

    /// Replace the scene background color. No-op when uninitialized.
    pub fn set_background_color(&mut self, color: Color) {
        if !self.initialized {
            return;
        }
        self.scene.set_background(color);
    }

    // ===== CONTROLS OPERATIONS =====

    /// Flip auto-rotate and return the new value; `false` when
    /// controls are absent.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        match self.controls.as_mut() {
            Some(controls) => controls.toggle_auto_rotate(),
            None => false,
        }
    }

    // ===== DISPOSAL =====

    /// Tear everything down: stop the render loop (cancelling the
    /// pending frame), cancel the resize subscription, release the
    /// controls, detach both slot nodes, and dispose the surface.
    ///
    /// Idempotent. In-flight loads are not aborted; their resolutions
    /// are discarded by the `initialized` guard when they arrive.
    pub fn dispose(&mut self) {
        let was_initialized = self.initialized;

        self.render_loop.stop(self.scheduler.as_mut());

        if let Some(subscription) = self.resize_subscription.take() {
            self.resize_events.unsubscribe(subscription);
        }

        self.controls = None;
        self.scene.clear_slots();

        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
        }

        self.initialized = false;
        if was_initialized {
            viewer_info!(SOURCE, "3D viewer disposed");
        }
    }
}

#[cfg(test)]
#[path = "viewer_tests.rs"]
mod tests;
