// Application state management
// Holds the startup-captured version string and the pending approval slot

use crate::state::snap_update::{FlowStatus, SnapUpdateFlow};

/// Main application state
///
/// At most one snap update approval is pending at a time; while one is
/// pending the approval screen takes over the window.
pub struct AppState {
    /// Application version, read from the platform once at startup
    pub version: String,
    /// The approval flow currently awaiting a decision, if any
    pending_update: Option<SnapUpdateFlow>,
}

impl AppState {
    /// Create application state with the given version string
    pub fn new(version: String) -> Self {
        Self {
            version,
            pending_update: None,
        }
    }

    /// Queue a snap update for approval
    /// Returns false (and drops nothing) if one is already pending
    pub fn request_snap_update(&mut self, flow: SnapUpdateFlow) -> bool {
        if self.pending_update.is_some() {
            false
        } else {
            self.pending_update = Some(flow);
            true
        }
    }

    /// Mutable access to the pending flow, if any
    pub fn pending_update_mut(&mut self) -> Option<&mut SnapUpdateFlow> {
        self.pending_update.as_mut()
    }

    /// Whether an approval is awaiting a decision
    pub fn has_pending_update(&self) -> bool {
        self.pending_update.is_some()
    }

    /// Clear the pending slot after a flow reports the given status
    /// Returns true if the slot was cleared
    pub fn resolve_pending(&mut self, status: FlowStatus) -> bool {
        if status == FlowStatus::Resolved {
            self.pending_update = None;
            true
        } else {
            false
        }
    }
}
