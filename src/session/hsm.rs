use super::*;
use statig::prelude::*;

mod helpers;

pub(super) struct GestureHsm {
    config: SwipeConfig,
    origin: Option<Point>,
    current: Point,
    start_ms: u64,
    last_ms: u64,
    has_moved: bool,
    axis: Option<Axis>,
    candidate: Option<SwipeDirection>,
    sample_count: u16,
    phase: GestureState,
    last_trace: GestureTrace,
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Start { now_ms, point } => {
                self.begin(context, *now_ms, *point);
                Transition(State::tracking())
            }
            GestureHsmEvent::Move { now_ms, .. } | GestureHsmEvent::Release { now_ms, .. } => {
                log::trace!("gesture: sample at {now_ms}ms ignored while idle");
                Handled
            }
            // Repeated cancel/reset lands here and stays idle.
            GestureHsmEvent::Settle | GestureHsmEvent::Cancel => {
                self.reset();
                Handled
            }
        }
    }

    #[state(superstate = "engaged")]
    fn tracking(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Start { now_ms, point } => {
                // A new contact without a release: the old gesture lost its end.
                self.cancel_gesture(context);
                self.begin(context, *now_ms, *point);
                Handled
            }
            GestureHsmEvent::Move {
                now_ms,
                point,
                eligible,
            } => {
                self.observe(context, *now_ms, *point, *eligible);
                Handled
            }
            GestureHsmEvent::Release {
                now_ms,
                eligible,
                tap_registered,
            } => {
                self.finalize_release(context, *now_ms, *eligible, *tap_registered);
                Transition(State::settling())
            }
            GestureHsmEvent::Settle => Handled,
            GestureHsmEvent::Cancel => Super,
        }
    }

    #[state(superstate = "engaged")]
    fn settling(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Settle | GestureHsmEvent::Cancel => {
                self.reset();
                Transition(State::idle())
            }
            GestureHsmEvent::Start { now_ms, point } => {
                self.reset();
                self.begin(context, *now_ms, *point);
                Transition(State::tracking())
            }
            GestureHsmEvent::Move { .. } | GestureHsmEvent::Release { .. } => Handled,
        }
    }

    #[superstate]
    fn engaged(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Cancel => {
                self.cancel_gesture(context);
                Transition(State::idle())
            }
            _ => Handled,
        }
    }
}
