//! Release-time commit decision.

use crate::{
    classify::classify,
    config::SwipeConfig,
    types::{AbandonReason, Axis, CommitAction, DirectionSet, Displacement, SwipeDirection},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommitInput {
    pub displacement: Displacement,
    pub elapsed_ms: u64,
    pub has_moved: bool,
    /// Directions with a registered, enabled handler.
    pub eligible: DirectionSet,
    pub tap_registered: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommitDecision {
    pub action: Option<CommitAction>,
    pub reason: AbandonReason,
    pub distance_px: f32,
    pub velocity_px_per_ms: f32,
}

impl CommitDecision {
    fn commit(action: CommitAction, distance_px: f32, velocity_px_per_ms: f32) -> Self {
        Self {
            action: Some(action),
            reason: AbandonReason::None,
            distance_px,
            velocity_px_per_ms,
        }
    }

    fn abandon(reason: AbandonReason, distance_px: f32, velocity_px_per_ms: f32) -> Self {
        Self {
            action: None,
            reason,
            distance_px,
            velocity_px_per_ms,
        }
    }

    pub fn committed(&self) -> bool {
        self.action.is_some()
    }
}

pub fn velocity_px_per_ms(distance_px: f32, elapsed_ms: u64) -> f32 {
    distance_px / elapsed_ms.max(1) as f32
}

/// Swipe commits when distance OR velocity crosses its threshold.
pub fn crosses_commit_threshold(
    distance_px: f32,
    velocity_px_per_ms: f32,
    config: &SwipeConfig,
) -> bool {
    distance_px > config.commit_distance_px
        || velocity_px_per_ms > config.commit_velocity_px_per_ms
}

/// Decides what a released gesture fires: one swipe, a tap, or nothing.
///
/// The candidate is recomputed from the final displacement, so a gesture
/// pulled back under the reveal threshold cannot commit directionally.
pub fn evaluate_commit(input: CommitInput, config: &SwipeConfig) -> CommitDecision {
    let classification = classify(input.displacement, input.eligible, config);

    if let Some(direction) = classification.candidate {
        let distance = input.displacement.along(direction).max(0.0);
        let velocity = velocity_px_per_ms(distance, input.elapsed_ms);
        if crosses_commit_threshold(distance, velocity, config) {
            return CommitDecision::commit(CommitAction::Swipe(direction), distance, velocity);
        }
        return evaluate_tap(input, config, AbandonReason::BelowThreshold, distance, velocity);
    }

    let axis_reason = match classification.axis {
        Some(axis) => {
            let component = match axis {
                Axis::Horizontal => input.displacement.dx,
                Axis::Vertical => input.displacement.dy,
            };
            let revealed = component.abs() > config.reveal_threshold_px;
            let direction = SwipeDirection::from_axis_sign(axis, component);
            if revealed && !input.eligible.contains(direction) {
                AbandonReason::DirectionIneligible
            } else {
                AbandonReason::NoCandidate
            }
        }
        None => AbandonReason::NoCandidate,
    };
    let distance = input.displacement.length();
    let velocity = velocity_px_per_ms(distance, input.elapsed_ms);
    evaluate_tap(input, config, axis_reason, distance, velocity)
}

fn evaluate_tap(
    input: CommitInput,
    config: &SwipeConfig,
    swipe_reason: AbandonReason,
    distance: f32,
    velocity: f32,
) -> CommitDecision {
    if input.has_moved {
        return CommitDecision::abandon(swipe_reason, distance, velocity);
    }
    if input.elapsed_ms >= config.tap_max_duration_ms {
        return CommitDecision::abandon(AbandonReason::TapTooSlow, distance, velocity);
    }
    if !input.tap_registered {
        return CommitDecision::abandon(AbandonReason::TapUnregistered, distance, velocity);
    }
    let tap_distance = input.displacement.length();
    CommitDecision::commit(
        CommitAction::Tap,
        tap_distance,
        velocity_px_per_ms(tap_distance, input.elapsed_ms),
    )
}
