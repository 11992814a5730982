//! Render loop state machine.
//!
//! Replaces a self-re-arming animation callback with an explicit
//! Running/Stopped state plus an owned handle to the next scheduled
//! frame, so stopping can check and cancel the pending callback
//! atomically.

use crate::surface::{FrameScheduler, FrameToken};

/// State of the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A frame request is armed; iterations run as the host fires them.
    Running,
    /// No frame request pending; no further iterations.
    Stopped,
}

/// The render loop: owns the loop state and the pending frame token.
///
/// The Viewer drives it: `start` at initialization, `begin_iteration`
/// at the top of every `render_frame`, `stop` at disposal.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    pending: Option<FrameToken>,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Stopped,
            pending: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Token of the armed frame request, if any.
    pub fn pending_token(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Transition to Running and arm the first frame request.
    /// Already-running loops are left untouched.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.state == LoopState::Running {
            return;
        }
        self.state = LoopState::Running;
        self.pending = Some(scheduler.request_frame());
    }

    /// Begin one iteration: consume the fired token and immediately
    /// re-arm the next request. Returns false when the loop is stopped,
    /// in which case no iteration work may run.
    pub fn begin_iteration(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Transition to Stopped, cancelling the pending frame request.
    /// Idempotent.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel_frame(token);
        }
        self.state = LoopState::Stopped;
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "render_loop_tests.rs"]
mod tests;
