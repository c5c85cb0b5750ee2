use std::{cell::Cell, rc::Rc};

use super::*;
use crate::{
    config::SurfaceKind,
    types::{AbandonReason, GestureSignal, SwipeDirection},
};

#[derive(Debug, Default)]
struct Recorder {
    began: Vec<Point>,
    finished: usize,
    multi_touch: Vec<u8>,
}

impl InputEnvironment for Recorder {
    fn gesture_began(&mut self, origin: Point) {
        self.began.push(origin);
    }

    fn gesture_finished(&mut self, _output: &GestureOutput) {
        self.finished += 1;
    }

    fn multi_touch_detected(&mut self, touch_count: u8) {
        self.multi_touch.push(touch_count);
    }
}

fn one(x: f32, y: f32) -> TouchFrame {
    TouchFrame::single(Point::new(x, y))
}

fn two(x0: f32, y0: f32, x1: f32, y1: f32) -> TouchFrame {
    TouchFrame::pair(Point::new(x0, y0), Point::new(x1, y1))
}

fn surface_with_counter() -> (TouchSurface<Recorder>, Rc<Cell<u32>>) {
    let count = Rc::new(Cell::new(0));
    let mut session = GestureSession::for_surface(SurfaceKind::Card);
    let fired = Rc::clone(&count);
    session.on_swipe(SwipeDirection::Left, move |_| fired.set(fired.get() + 1));
    (
        TouchSurface::with_environment(session, Recorder::default()),
        count,
    )
}

#[test]
fn single_contact_drives_a_swipe() {
    let (mut surface, fired) = surface_with_counter();

    surface.tick(0, one(300.0, 200.0));
    surface.tick(30, one(260.0, 201.0));
    surface.tick(60, one(200.0, 203.0));
    let output = surface.tick(70, TouchFrame::RELEASED);

    assert_eq!(fired.get(), 1);
    assert!(output.committed().is_some());
    assert_eq!(surface.contact(), ContactState::Up);
    assert_eq!(surface.environment().began, vec![Point::new(300.0, 200.0)]);
    assert_eq!(surface.environment().finished, 1);
}

#[test]
fn second_finger_cancels_and_suppresses() {
    let (mut surface, fired) = surface_with_counter();

    surface.tick(0, one(300.0, 200.0));
    surface.tick(20, one(250.0, 200.0));
    let cancelled = surface.tick(30, two(240.0, 200.0, 100.0, 100.0));
    assert!(cancelled.cancelled());
    assert_eq!(surface.contact(), ContactState::Suppressed);

    // Lifting one finger must not start a fresh gesture.
    assert!(surface.tick(40, one(150.0, 200.0)).is_empty());
    assert!(surface.tick(50, one(100.0, 200.0)).is_empty());
    assert!(surface.tick(60, TouchFrame::RELEASED).is_empty());
    assert_eq!(surface.contact(), ContactState::Up);

    assert_eq!(fired.get(), 0);
    assert_eq!(surface.environment().multi_touch, vec![2]);
    assert_eq!(surface.environment().finished, 0);
}

#[test]
fn pinch_from_rest_never_starts() {
    let (mut surface, _) = surface_with_counter();

    assert!(surface.tick(0, two(10.0, 10.0, 90.0, 90.0)).is_empty());
    assert!(surface.tick(10, two(0.0, 0.0, 100.0, 100.0)).is_empty());
    surface.tick(20, TouchFrame::RELEASED);

    let started = surface.tick(30, one(50.0, 50.0));
    assert!(matches!(
        started.signals.as_slice(),
        [GestureSignal::Started { .. }]
    ));
    assert!(surface.environment().began.len() == 1);
}

#[test]
fn release_without_contact_is_ignored() {
    let (mut surface, _) = surface_with_counter();
    assert!(surface.tick(0, TouchFrame::RELEASED).is_empty());
    assert_eq!(surface.environment().finished, 0);
}

#[test]
fn detach_cancels_without_firing() {
    let (mut surface, fired) = surface_with_counter();

    surface.tick(0, one(300.0, 200.0));
    surface.tick(40, one(150.0, 200.0));
    let output = surface.detach();
    assert!(output.cancelled());

    let after = surface.tick(50, TouchFrame::RELEASED);
    assert!(after.is_empty());
    assert_eq!(fired.get(), 0);
}

#[test]
fn unit_environment_works_as_default() {
    let mut surface = TouchSurface::new(GestureSession::for_surface(SurfaceKind::TimelineRow));

    surface.tick(0, one(10.0, 10.0));
    let output = surface.tick(50, TouchFrame::RELEASED);

    assert_eq!(output.abandoned(), Some(AbandonReason::TapUnregistered));
    assert_eq!(surface.session().origin(), None);
}
