use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;

use super::*;
use crate::types::CommitAction;

type Fired = Rc<RefCell<Vec<GestureReport>>>;

fn recorder() -> Fired {
    Rc::new(RefCell::new(Vec::new()))
}

fn record(fired: &Fired) -> impl FnMut(&GestureReport) + 'static {
    let fired = Rc::clone(fired);
    move |report| fired.borrow_mut().push(*report)
}

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

fn card_with_right(fired: &Fired) -> GestureSession {
    let mut session = GestureSession::for_surface(SurfaceKind::Card);
    session.on_swipe(SwipeDirection::Right, record(fired));
    session
}

fn actions(fired: &Fired) -> Vec<CommitAction> {
    fired.borrow().iter().map(|report| report.action).collect()
}

#[test]
fn long_slow_drag_commits_by_distance() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    session.start(0, p(100.0, 100.0));
    session.update(150, p(190.0, 102.0));
    let output = session.end(150);

    assert_eq!(actions(&fired), vec![CommitAction::Swipe(SwipeDirection::Right)]);
    let report = output.committed().expect("committed report");
    assert_eq!(report.origin, p(100.0, 100.0));
    assert_eq!(report.end, p(190.0, 102.0));
    assert_eq!(report.elapsed_ms, 150);
    assert!((report.distance_px - 90.0).abs() < 1e-4);
    assert!((report.velocity_px_per_ms - 0.6).abs() < 1e-4);
    assert_eq!(session.state(), GestureState::Idle);
}

#[test]
fn short_fast_flick_commits_by_velocity() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    session.start(0, p(100.0, 100.0));
    session.update(40, p(160.0, 101.0));
    session.end(40);

    assert_eq!(actions(&fired), vec![CommitAction::Swipe(SwipeDirection::Right)]);
}

#[test]
fn quick_still_touch_is_a_tap() {
    let fired = recorder();
    let taps = recorder();
    let mut session = card_with_right(&fired);
    session.on_tap(record(&taps));

    session.start(0, p(100.0, 100.0));
    session.update(120, p(103.0, 101.0));
    let output = session.end(120);

    assert!(fired.borrow().is_empty());
    assert_eq!(actions(&taps), vec![CommitAction::Tap]);
    assert_eq!(output.committed().map(|report| report.action), Some(CommitAction::Tap));
    assert!(!session.has_moved());
}

#[test]
fn disabled_direction_never_fires() {
    let fired = recorder();
    let taps = recorder();
    let mut session = card_with_right(&fired);
    session.on_tap(record(&taps));
    session.set_direction_enabled(SwipeDirection::Right, false);

    session.start(0, p(100.0, 100.0));
    let moved = session.update(150, p(190.0, 102.0));
    assert!(moved
        .iter()
        .all(|signal| !matches!(signal, GestureSignal::CandidateChanged { .. })));
    assert_eq!(session.candidate(), None);
    let output = session.end(150);

    assert!(fired.borrow().is_empty());
    assert!(taps.borrow().is_empty());
    assert_eq!(output.abandoned(), Some(AbandonReason::DirectionIneligible));
}

#[test]
fn reenabled_direction_fires_again() {
    let fired = recorder();
    let mut session = card_with_right(&fired);
    session.set_direction_enabled(SwipeDirection::Right, false);
    session.set_direction_enabled(SwipeDirection::Right, true);

    session.start(0, p(0.0, 0.0));
    session.update(100, p(120.0, 0.0));
    session.end(100);

    assert_eq!(fired.borrow().len(), 1);
}

#[test]
fn handler_fires_once_per_gesture() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    session.start(0, p(0.0, 0.0));
    session.update(100, p(120.0, 0.0));
    session.end(100);
    let again = session.end(110);
    session.update(120, p(300.0, 0.0));
    session.end(130);

    assert_eq!(fired.borrow().len(), 1);
    assert!(again.is_empty());
}

#[test]
fn samples_while_idle_are_ignored() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    assert!(session.update(10, p(400.0, 0.0)).is_empty());
    assert!(session.end(20).is_empty());
    assert_eq!(session.state(), GestureState::Idle);
    assert_eq!(session.origin(), None);
    assert!(fired.borrow().is_empty());
}

#[test]
fn cancel_is_idempotent_and_silent() {
    let fired = recorder();
    let taps = recorder();
    let mut session = card_with_right(&fired);
    session.on_tap(record(&taps));

    assert!(session.cancel().is_empty());

    session.start(0, p(100.0, 100.0));
    session.update(50, p(250.0, 100.0));
    let output = session.cancel();
    assert!(output.cancelled());
    assert_eq!(session.state(), GestureState::Idle);
    assert_eq!(session.feedback(), Feedback::REST);
    assert!(session.trace().cancelled);

    assert!(session.cancel().is_empty());
    session.reset();
    session.reset();

    assert!(fired.borrow().is_empty());
    assert!(taps.borrow().is_empty());
    assert!(session.end(60).is_empty());
    assert!(fired.borrow().is_empty());
}

#[test]
fn returning_to_origin_abandons() {
    let fired = recorder();
    let taps = recorder();
    let mut session = card_with_right(&fired);
    session.on_tap(record(&taps));

    session.start(0, p(100.0, 100.0));
    session.update(40, p(190.0, 100.0));
    assert_eq!(session.candidate(), Some(SwipeDirection::Right));
    session.update(80, p(100.0, 100.0));
    assert_eq!(session.candidate(), None);
    assert_eq!(session.feedback().progress, 0.0);
    let output = session.end(90);

    assert!(fired.borrow().is_empty());
    assert!(taps.borrow().is_empty());
    assert_eq!(output.abandoned(), Some(AbandonReason::NoCandidate));
}

#[test]
fn candidate_changes_are_reported() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    let started = session.start(0, p(100.0, 100.0));
    assert_eq!(
        started.signals.as_slice(),
        &[GestureSignal::Started {
            origin: p(100.0, 100.0),
            t_ms: 0
        }]
    );

    assert!(session.update(10, p(130.0, 100.0)).is_empty());

    let revealed = session.update(20, p(150.0, 100.0));
    assert_eq!(
        revealed.signals.as_slice(),
        &[GestureSignal::CandidateChanged {
            from: None,
            to: Some(SwipeDirection::Right)
        }]
    );
    assert_eq!(session.dominant_axis(), Some(Axis::Horizontal));

    assert!(session.update(30, p(170.0, 100.0)).is_empty());

    // Down has no binding, so the vertical turn clears the candidate.
    let cleared = session.update(40, p(100.0, 180.0));
    assert_eq!(
        cleared.signals.as_slice(),
        &[GestureSignal::CandidateChanged {
            from: Some(SwipeDirection::Right),
            to: None
        }]
    );
    assert_eq!(session.dominant_axis(), Some(Axis::Vertical));
}

#[test]
fn feedback_tracks_the_drag() {
    let fired = recorder();
    let mut session = card_with_right(&fired);
    assert_eq!(session.feedback(), Feedback::REST);

    session.start(0, p(0.0, 0.0));
    session.update(50, p(60.0, 0.0));
    let feedback = session.feedback();
    assert!(feedback.active);
    assert_eq!(feedback.candidate, Some(SwipeDirection::Right));
    assert!((feedback.offset.dx - 48.0).abs() < 1e-4);
    assert!((feedback.progress - 0.5).abs() < 1e-4);
    assert!(feedback.overlay_opacity >= session.config().min_visible_opacity);

    session.end(60);
    assert_eq!(session.feedback(), Feedback::REST);
}

#[test]
fn restart_without_release_cancels_previous() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    session.start(0, p(0.0, 0.0));
    session.update(30, p(70.0, 0.0));
    let restarted = session.start(40, p(300.0, 300.0));

    assert_eq!(
        restarted.signals.as_slice(),
        &[
            GestureSignal::Cancelled,
            GestureSignal::Started {
                origin: p(300.0, 300.0),
                t_ms: 40
            }
        ]
    );
    assert_eq!(session.origin(), Some(p(300.0, 300.0)));
    assert_eq!(session.candidate(), None);
    assert!(!session.has_moved());

    session.end(60);
    assert!(fired.borrow().is_empty());
}

#[test]
fn tap_needs_a_handler() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    session.start(0, p(10.0, 10.0));
    let output = session.end(50);

    assert_eq!(output.abandoned(), Some(AbandonReason::TapUnregistered));
}

#[test]
fn slow_press_is_not_a_tap() {
    let taps = recorder();
    let mut session = GestureSession::default();
    session.on_tap(record(&taps));

    session.start(0, p(10.0, 10.0));
    let output = session.end(200);

    assert!(taps.borrow().is_empty());
    assert_eq!(output.abandoned(), Some(AbandonReason::TapTooSlow));
    assert_eq!(session.trace().abandon_reason, AbandonReason::TapTooSlow);
}

#[test]
fn instant_flick_does_not_divide_by_zero() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    session.start(500, p(0.0, 0.0));
    session.update(500, p(100.0, 0.0));
    session.end(500);

    let fired = fired.borrow();
    assert_eq!(fired.len(), 1);
    assert!(fired[0].velocity_px_per_ms.is_finite());
}

#[test]
fn rebinding_replaces_handler() {
    let first = recorder();
    let second = recorder();
    let mut session = card_with_right(&first);
    session.on_swipe(SwipeDirection::Right, record(&second));

    session.start(0, p(0.0, 0.0));
    session.update(100, p(150.0, 0.0));
    session.end(100);

    assert!(first.borrow().is_empty());
    assert_eq!(second.borrow().len(), 1);
}

#[test]
fn unbound_direction_is_not_a_candidate() {
    let fired = recorder();
    let mut session = card_with_right(&fired);
    assert!(session.unbind(SwipeDirection::Right).is_some());
    assert!(session.eligible_directions().is_empty());

    session.start(0, p(0.0, 0.0));
    session.update(100, p(150.0, 0.0));
    assert_eq!(session.candidate(), None);
    let output = session.end(100);

    assert_eq!(output.abandoned(), Some(AbandonReason::DirectionIneligible));
    assert!(fired.borrow().is_empty());
}

#[test]
fn candidate_style_follows_binding() {
    let mut session = GestureSession::for_surface(SurfaceKind::TimelineRow);
    session.bind(
        ActionBinding::new(SwipeDirection::Left, |_| {})
            .with_label("Archive")
            .with_color(Color::from_hex(0x2E7D32)),
    );

    assert_eq!(session.candidate_style(), None);
    session.start(0, p(200.0, 50.0));
    session.update(30, p(150.0, 52.0));

    let style = session.candidate_style().expect("style");
    assert_eq!(style.label.as_deref(), Some("Archive"));
    assert_eq!(style.color, Some(Color::rgb(0x2E, 0x7D, 0x32)));
}

#[test]
fn full_screen_step_commits_earlier_than_card() {
    let card_fired = recorder();
    let mut card = card_with_right(&card_fired);
    let step_fired = recorder();
    let mut step = GestureSession::for_surface(SurfaceKind::FullScreenStep);
    step.on_swipe(SwipeDirection::Right, record(&step_fired));

    for session in [&mut card, &mut step] {
        session.start(0, p(0.0, 0.0));
        session.update(400, p(30.0, 0.0));
        session.end(400);
    }

    assert!(card_fired.borrow().is_empty());
    assert_eq!(step_fired.borrow().len(), 1);
}

#[test]
fn reconfigure_cancels_in_flight_gesture() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    session.start(0, p(0.0, 0.0));
    session.update(20, p(60.0, 0.0));
    let output = session.reconfigure(SwipeConfig::FULL_SCREEN_STEP);

    assert!(output.cancelled());
    assert_eq!(session.config(), &SwipeConfig::FULL_SCREEN_STEP);
    assert_eq!(session.state(), GestureState::Idle);
    assert!(session.end(30).is_empty());
    assert!(fired.borrow().is_empty());
}

#[test]
fn trace_records_last_sample() {
    let fired = recorder();
    let mut session = card_with_right(&fired);

    session.start(1_000, p(0.0, 0.0));
    session.update(1_020, p(20.0, 0.0));
    session.update(1_050, p(55.0, 1.0));
    let trace = session.trace();
    assert_eq!(trace.state_id, GestureState::Tracking);
    assert_eq!(trace.sample_count, 3);
    assert_eq!(trace.elapsed_ms, 50);
    assert_eq!(trace.candidate, Some(SwipeDirection::Right));
    assert!(trace.has_moved);

    session.end(1_060);
    let trace = session.trace();
    assert_eq!(trace.state_id, GestureState::Idle);
    assert_eq!(
        trace.committed,
        Some(CommitAction::Swipe(SwipeDirection::Right))
    );
    assert_eq!(trace.abandon_reason, AbandonReason::None);
}

#[test]
fn try_new_rejects_degenerate_config() {
    let flat = SwipeConfig {
        feedback_saturation_px: 0.0,
        ..SwipeConfig::CARD
    };
    let err = GestureSession::try_new(flat).err().expect("zero saturation must fail");
    assert!(err.to_string().contains("feedback_saturation_px"));

    let tuned = SwipeConfig::CARD.with_commit_thresholds(70.0, 0.25);
    let session = GestureSession::try_new(tuned).expect("tuned card is valid");
    assert_eq!(session.config(), &tuned);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "invalid SwipeConfig")]
fn unvalidated_config_is_caught_in_debug_builds() {
    let _ = GestureSession::new(SwipeConfig::CARD.with_feel(1.5, 0.8));
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "gesture signal buffer overflow")]
fn signal_overflow_is_caught_in_debug_builds() {
    let mut context = DispatchContext::default();
    for _ in 0..=SIGNAL_CAPACITY {
        context.emit(GestureSignal::Cancelled);
    }
}

#[test]
fn longest_call_fits_signal_buffer() {
    let mut context = DispatchContext::default();
    context.emit(GestureSignal::Cancelled);
    context.emit(GestureSignal::Started {
        origin: Point::ZERO,
        t_ms: 0,
    });
    assert_eq!(context.finish().signals.len(), 2);
}
