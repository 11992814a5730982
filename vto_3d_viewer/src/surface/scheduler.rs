/// FrameScheduler trait - per-frame callback scheduling capability
///
/// Models the host's display-refresh-synchronized callback: the render
/// loop requests the next frame at the start of every iteration and
/// cancels the pending request when it stops. The host fires requests
/// in order and calls `Viewer::render_frame` for each.

use std::sync::{Arc, Mutex};

/// Handle to one scheduled frame callback.
pub type FrameToken = u64;

/// Per-frame scheduling capability supplied by the host.
pub trait FrameScheduler {
    /// Request the next animation callback. Returns a token that can
    /// be cancelled until the callback fires.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancel a pending request. Unknown or already-fired tokens are
    /// ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

// ============================================================================
// Manual scheduler
// ============================================================================

struct SchedulerState {
    next_token: FrameToken,
    pending: Vec<FrameToken>,
    cancelled: Vec<FrameToken>,
}

/// Host-driven scheduler: requests queue up until the host pops and
/// fires them.
///
/// Clones share state, so the host (or a test) keeps a handle while
/// the viewer owns the boxed scheduler. Typical host loop: on each
/// display refresh, `fire_next()` and, if a token was pending, call
/// `Viewer::render_frame`.
#[derive(Clone)]
pub struct ManualFrameScheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState {
                next_token: 1,
                pending: Vec::new(),
                cancelled: Vec::new(),
            })),
        }
    }

    /// Pop the oldest pending request, if any.
    pub fn fire_next(&self) -> Option<FrameToken> {
        let mut state = self.state.lock().unwrap();
        if state.pending.is_empty() {
            None
        } else {
            Some(state.pending.remove(0))
        }
    }

    /// Tokens currently pending, oldest first.
    pub fn pending_tokens(&self) -> Vec<FrameToken> {
        self.state.lock().unwrap().pending.clone()
    }

    /// Tokens that were cancelled before firing.
    pub fn cancelled_tokens(&self) -> Vec<FrameToken> {
        self.state.lock().unwrap().cancelled.clone()
    }
}

impl Default for ManualFrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let mut state = self.state.lock().unwrap();
        let token = state.next_token;
        state.next_token += 1;
        state.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let mut state = self.state.lock().unwrap();
        if let Some(index) = state.pending.iter().position(|&t| t == token) {
            state.pending.remove(index);
            state.cancelled.push(token);
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
