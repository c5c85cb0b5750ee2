//! Swipe and tap recognition for interactive surfaces.
//!
//! A [`GestureSession`] owns one surface's gesture lifecycle: it classifies
//! the drag into a candidate direction, projects render feedback while the
//! finger is down, and on release fires at most one registered handler.
//! [`TouchSurface`] adapts raw touch frames onto a session.

pub mod classify;
pub mod commit;
pub mod config;
pub mod error;
pub mod feedback;
pub mod input;
pub mod session;
pub mod trace;
pub mod types;

#[cfg(feature = "toml-config")]
pub use config::SurfaceCatalog;
pub use config::{SurfaceKind, SwipeConfig};
pub use error::ConfigError;
pub use feedback::Feedback;
pub use input::{InputEnvironment, TouchFrame, TouchSurface};
pub use session::{ActionBinding, BindingStyle, Color, GestureOutput, GestureSession};
pub use trace::GestureTrace;
pub use types::{
    AbandonReason, Axis, CommitAction, DirectionSet, Displacement, GestureReport, GestureSignal,
    GestureState, Point, SwipeDirection,
};
