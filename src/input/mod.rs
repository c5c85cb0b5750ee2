//! Raw touch frames to session calls.
//!
//! Touch controllers and pointer layers report a contact count plus up to two
//! points per frame. [`TouchSurface`] turns that stream into the
//! `start`/`update`/`end`/`cancel` calls a [`GestureSession`] expects: the
//! first contact drives the gesture, and a second contact cancels it and
//! suppresses input until every finger lifts.

use crate::{
    session::{GestureOutput, GestureSession},
    types::Point,
};

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchFrame {
    pub touch_count: u8,
    pub points: [Point; 2],
}

impl TouchFrame {
    pub const RELEASED: Self = Self {
        touch_count: 0,
        points: [Point::ZERO; 2],
    };

    pub const fn single(point: Point) -> Self {
        Self {
            touch_count: 1,
            points: [point, Point::ZERO],
        }
    }

    pub const fn pair(first: Point, second: Point) -> Self {
        Self {
            touch_count: 2,
            points: [first, second],
        }
    }

    fn primary(&self) -> (u8, Option<Point>) {
        if self.touch_count == 0 {
            (0, None)
        } else {
            (self.touch_count, Some(self.points[0]))
        }
    }
}

/// Host hooks around the gesture lifecycle.
///
/// Zoom or pan suppression belongs to the host: it hears about multi-touch
/// here and decides what to do with the viewport.
pub trait InputEnvironment {
    fn gesture_began(&mut self, origin: Point) {
        let _ = origin;
    }

    fn gesture_finished(&mut self, output: &GestureOutput) {
        let _ = output;
    }

    fn multi_touch_detected(&mut self, touch_count: u8) {
        let _ = touch_count;
    }
}

impl InputEnvironment for () {}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContactState {
    #[default]
    Up,
    Down,
    /// Multi-touch seen; ignored until the count drops to zero.
    Suppressed,
}

pub struct TouchSurface<E = ()> {
    session: GestureSession,
    environment: E,
    contact: ContactState,
}

impl TouchSurface<()> {
    pub fn new(session: GestureSession) -> Self {
        Self::with_environment(session, ())
    }
}

impl<E: InputEnvironment> TouchSurface<E> {
    pub fn with_environment(session: GestureSession, environment: E) -> Self {
        Self {
            session,
            environment,
            contact: ContactState::Up,
        }
    }

    pub fn tick(&mut self, now_ms: u64, frame: TouchFrame) -> GestureOutput {
        let (count, point) = frame.primary();
        match (self.contact, count, point) {
            (ContactState::Suppressed, 0, _) => {
                self.contact = ContactState::Up;
                GestureOutput::default()
            }
            (ContactState::Suppressed, _, _) => GestureOutput::default(),
            (contact, count, _) if count >= 2 => {
                log::debug!("touch: {count} contacts, suppressing gesture");
                let output = if contact == ContactState::Down {
                    self.session.cancel()
                } else {
                    GestureOutput::default()
                };
                self.contact = ContactState::Suppressed;
                self.environment.multi_touch_detected(count);
                output
            }
            (ContactState::Up, 1, Some(point)) => {
                let output = self.session.start(now_ms, point);
                self.contact = ContactState::Down;
                self.environment.gesture_began(point);
                output
            }
            (ContactState::Down, 1, Some(point)) => self.session.update(now_ms, point),
            (ContactState::Down, 0, _) => {
                let output = self.session.end(now_ms);
                self.contact = ContactState::Up;
                self.environment.gesture_finished(&output);
                output
            }
            _ => GestureOutput::default(),
        }
    }

    /// The element went away mid-gesture: cancel without firing.
    pub fn detach(&mut self) -> GestureOutput {
        self.contact = ContactState::Up;
        self.session.cancel()
    }

    pub fn contact(&self) -> ContactState {
        self.contact
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GestureSession {
        &mut self.session
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.environment
    }
}
