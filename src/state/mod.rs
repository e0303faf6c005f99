// State management module
// Application state plus the snap update approval flow

pub mod app_state;
pub mod snap_update;

pub use app_state::AppState;
pub use snap_update::{FlowStatus, SnapUpdateFlow, SnapUpdateRequest, TargetSubjectMetadata};
