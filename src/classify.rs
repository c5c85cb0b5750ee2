//! Dominant-axis and candidate-direction classification.

use crate::{
    config::SwipeConfig,
    types::{Axis, DirectionSet, Displacement, SwipeDirection},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub axis: Option<Axis>,
    pub candidate: Option<SwipeDirection>,
}

impl Classification {
    pub const NONE: Self = Self {
        axis: None,
        candidate: None,
    };
}

/// Resolves the dominant axis, favouring vertical by `vertical_bias`.
pub fn dominant_axis(displacement: Displacement, config: &SwipeConfig) -> Option<Axis> {
    let horizontal = displacement.dx.abs();
    let vertical = displacement.dy.abs();
    if horizontal <= config.noise_threshold_px && vertical <= config.noise_threshold_px {
        return None;
    }

    if vertical > horizontal * config.vertical_bias {
        Some(Axis::Vertical)
    } else {
        Some(Axis::Horizontal)
    }
}

/// Classifies the displacement since origin.
///
/// The candidate only appears once travel on the dominant axis passes the
/// reveal threshold, and only for directions in `eligible`. It is a pure
/// function of the inputs, so pulling back under the threshold clears it.
pub fn classify(
    displacement: Displacement,
    eligible: DirectionSet,
    config: &SwipeConfig,
) -> Classification {
    let Some(axis) = dominant_axis(displacement, config) else {
        return Classification::NONE;
    };

    let component = match axis {
        Axis::Horizontal => displacement.dx,
        Axis::Vertical => displacement.dy,
    };
    if component.abs() <= config.reveal_threshold_px {
        return Classification {
            axis: Some(axis),
            candidate: None,
        };
    }

    let direction = SwipeDirection::from_axis_sign(axis, component);
    Classification {
        axis: Some(axis),
        candidate: eligible.contains(direction).then_some(direction),
    }
}
