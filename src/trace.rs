use crate::types::{AbandonReason, Axis, CommitAction, GestureState, SwipeDirection};

/// Snapshot of the last sample a session processed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureTrace {
    pub t_ms: u64,
    pub state_id: GestureState,
    pub axis: Option<Axis>,
    pub candidate: Option<SwipeDirection>,
    pub has_moved: bool,
    pub sample_count: u16,
    pub elapsed_ms: u64,
    pub distance_px: f32,
    pub velocity_px_per_ms: f32,
    pub committed: Option<CommitAction>,
    pub abandon_reason: AbandonReason,
    pub cancelled: bool,
}
