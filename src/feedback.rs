//! Visual feedback derived from the current drag.

use crate::{
    config::SwipeConfig,
    types::{Displacement, SwipeDirection},
};

/// What the consumer renders each frame; the engine has no opinion on how.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Feedback {
    /// Damped displacement for translating the element.
    pub offset: Displacement,
    pub candidate: Option<SwipeDirection>,
    /// Travel toward the candidate relative to saturation, in [0, 1].
    pub progress: f32,
    /// Overlay opacity in [0, 1]; floored once a candidate is revealed.
    pub overlay_opacity: f32,
    /// Degrees, proportional to the horizontal offset.
    pub rotation: f32,
    pub active: bool,
}

impl Feedback {
    pub const REST: Self = Self {
        offset: Displacement::ZERO,
        candidate: None,
        progress: 0.0,
        overlay_opacity: 0.0,
        rotation: 0.0,
        active: false,
    };
}

pub fn progress_toward(
    displacement: Displacement,
    candidate: SwipeDirection,
    config: &SwipeConfig,
) -> f32 {
    (displacement.along(candidate) / config.feedback_saturation_px).clamp(0.0, 1.0)
}

pub fn overlay_opacity(progress: f32, config: &SwipeConfig) -> f32 {
    (progress * config.max_opacity)
        .max(config.min_visible_opacity)
        .clamp(0.0, 1.0)
}

/// Projects the displacement of an active gesture onto render feedback.
pub fn project(
    displacement: Displacement,
    candidate: Option<SwipeDirection>,
    active: bool,
    config: &SwipeConfig,
) -> Feedback {
    if !active {
        return Feedback::REST;
    }

    let offset = displacement * config.damping_factor;
    let (progress, opacity) = match candidate {
        Some(direction) => {
            let progress = progress_toward(displacement, direction, config);
            (progress, overlay_opacity(progress, config))
        }
        None => (0.0, 0.0),
    };

    Feedback {
        offset,
        candidate,
        progress,
        overlay_opacity: opacity,
        rotation: offset.dx * config.rotation_scale,
        active,
    }
}
