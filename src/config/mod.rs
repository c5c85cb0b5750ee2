#[cfg(feature = "toml-config")]
mod catalog;

#[cfg(feature = "toml-config")]
pub use catalog::{SurfaceCatalog, SurfaceOverrides};

use crate::error::ConfigError;

pub const DEFAULT_NOISE_THRESHOLD_PX: f32 = 5.0;
pub const DEFAULT_TAP_MAX_DURATION_MS: u64 = 200;
pub const DEFAULT_VERTICAL_BIAS: f32 = 0.8;
pub const DEFAULT_COMMIT_VELOCITY_PX_PER_MS: f32 = 0.3;
pub const DEFAULT_DAMPING_FACTOR: f32 = 0.8;
pub const DEFAULT_MIN_VISIBLE_OPACITY: f32 = 0.25;
pub const DEFAULT_MAX_OPACITY: f32 = 0.85;
pub const DEFAULT_ROTATION_SCALE: f32 = 0.015;

/// Tuning for one interactive surface.
///
/// Distances are logical pixels, velocities logical pixels per millisecond.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    /// Displacement below which the contact counts as stationary.
    pub noise_threshold_px: f32,
    /// Axis travel needed before a candidate direction is surfaced.
    pub reveal_threshold_px: f32,
    pub commit_distance_px: f32,
    pub commit_velocity_px_per_ms: f32,
    pub tap_max_duration_ms: u64,
    /// Vertical wins when `|dy| > |dx| * vertical_bias`.
    pub vertical_bias: f32,
    pub damping_factor: f32,
    /// Travel at which feedback progress reaches 1.
    pub feedback_saturation_px: f32,
    pub min_visible_opacity: f32,
    pub max_opacity: f32,
    /// Degrees of rotation per pixel of damped horizontal offset.
    pub rotation_scale: f32,
}

impl SwipeConfig {
    pub const CARD: Self = Self {
        noise_threshold_px: DEFAULT_NOISE_THRESHOLD_PX,
        reveal_threshold_px: 40.0,
        commit_distance_px: 80.0,
        commit_velocity_px_per_ms: DEFAULT_COMMIT_VELOCITY_PX_PER_MS,
        tap_max_duration_ms: DEFAULT_TAP_MAX_DURATION_MS,
        vertical_bias: DEFAULT_VERTICAL_BIAS,
        damping_factor: DEFAULT_DAMPING_FACTOR,
        feedback_saturation_px: 120.0,
        min_visible_opacity: DEFAULT_MIN_VISIBLE_OPACITY,
        max_opacity: DEFAULT_MAX_OPACITY,
        rotation_scale: DEFAULT_ROTATION_SCALE,
    };

    pub const TIMELINE_ROW: Self = Self {
        reveal_threshold_px: 30.0,
        commit_distance_px: 60.0,
        feedback_saturation_px: 90.0,
        rotation_scale: 0.0,
        ..Self::CARD
    };

    // Paging surfaces commit on short travel.
    pub const FULL_SCREEN_STEP: Self = Self {
        reveal_threshold_px: 20.0,
        commit_distance_px: 25.0,
        commit_velocity_px_per_ms: 0.2,
        feedback_saturation_px: 60.0,
        min_visible_opacity: 0.3,
        max_opacity: 0.9,
        rotation_scale: 0.0,
        ..Self::CARD
    };

    pub const fn for_surface(kind: SurfaceKind) -> Self {
        match kind {
            SurfaceKind::Card => Self::CARD,
            SurfaceKind::TimelineRow => Self::TIMELINE_ROW,
            SurfaceKind::FullScreenStep => Self::FULL_SCREEN_STEP,
        }
    }

    pub fn with_commit_thresholds(mut self, distance_px: f32, velocity_px_per_ms: f32) -> Self {
        self.commit_distance_px = distance_px;
        self.commit_velocity_px_per_ms = velocity_px_per_ms;
        self
    }

    pub fn with_feel(mut self, damping_factor: f32, vertical_bias: f32) -> Self {
        self.damping_factor = damping_factor;
        self.vertical_bias = vertical_bias;
        self
    }

    /// Checks the invariants the classifier and projector rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("noise_threshold_px", self.noise_threshold_px)?;
        positive("reveal_threshold_px", self.reveal_threshold_px)?;
        positive("commit_distance_px", self.commit_distance_px)?;
        positive("commit_velocity_px_per_ms", self.commit_velocity_px_per_ms)?;
        positive("vertical_bias", self.vertical_bias)?;
        positive("feedback_saturation_px", self.feedback_saturation_px)?;

        if self.reveal_threshold_px <= self.noise_threshold_px {
            return Err(ConfigError::invalid(
                "reveal_threshold_px",
                "must be larger than noise_threshold_px",
            ));
        }
        if self.tap_max_duration_ms == 0 {
            return Err(ConfigError::invalid("tap_max_duration_ms", "must be non-zero"));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(ConfigError::invalid("damping_factor", "must be in (0, 1]"));
        }
        unit_interval("min_visible_opacity", self.min_visible_opacity)?;
        unit_interval("max_opacity", self.max_opacity)?;
        if self.min_visible_opacity > self.max_opacity {
            return Err(ConfigError::invalid(
                "min_visible_opacity",
                "must not exceed max_opacity",
            ));
        }
        if !self.rotation_scale.is_finite() {
            return Err(ConfigError::invalid("rotation_scale", "must be finite"));
        }
        Ok(())
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::CARD
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be a positive finite number"))
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be within [0, 1]"))
    }
}

/// Kind of interactive surface a session is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceKind {
    #[default]
    Card,
    TimelineRow,
    FullScreenStep,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 3] = [
        SurfaceKind::Card,
        SurfaceKind::TimelineRow,
        SurfaceKind::FullScreenStep,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SurfaceKind::Card => "card",
            SurfaceKind::TimelineRow => "timeline_row",
            SurfaceKind::FullScreenStep => "full_screen_step",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name.trim().to_ascii_lowercase())
    }
}
