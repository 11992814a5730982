/// ResizeEvents trait - resize notification capability
///
/// Replaces an ambient window-resize listener with an explicit
/// subscription object: the viewer subscribes at initialization and
/// cancels the subscription during disposal, so no process-wide
/// registry is involved. The host delivers the actual notifications by
/// calling `Viewer::handle_resize` while a subscription is active.

use std::sync::{Arc, Mutex};

/// Handle to one active resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSubscription(u64);

impl ResizeSubscription {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Resize notification capability supplied by the host.
pub trait ResizeEvents {
    /// Register interest in resize notifications.
    fn subscribe(&mut self) -> ResizeSubscription;

    /// Cancel a subscription. Unknown subscriptions are ignored.
    fn unsubscribe(&mut self, subscription: ResizeSubscription);
}

// ============================================================================
// Registry implementation
// ============================================================================

struct RegistryState {
    next_id: u64,
    active: Vec<u64>,
}

/// Subscription registry for hosts and tests.
///
/// Clones share state; the host checks `active_count()` to decide
/// whether resize notifications should be forwarded to the viewer.
#[derive(Clone)]
pub struct ResizeRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl ResizeRegistry {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RegistryState {
                next_id: 1,
                active: Vec::new(),
            })),
        }
    }

    /// Number of active subscriptions.
    pub fn active_count(&self) -> usize {
        self.state.lock().unwrap().active.len()
    }
}

impl Default for ResizeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeEvents for ResizeRegistry {
    fn subscribe(&mut self) -> ResizeSubscription {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.active.push(id);
        ResizeSubscription(id)
    }

    fn unsubscribe(&mut self, subscription: ResizeSubscription) {
        let mut state = self.state.lock().unwrap();
        if let Some(index) = state.active.iter().position(|&id| id == subscription.id()) {
            state.active.remove(index);
        }
    }
}

#[cfg(test)]
#[path = "resize_tests.rs"]
mod tests;
