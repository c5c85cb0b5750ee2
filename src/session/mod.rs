//! Per-surface gesture lifecycle and action dispatch.

use statig::blocking::IntoStateMachineExt as _;

mod bindings;
mod hsm;
#[cfg(test)]
mod tests;

pub use bindings::{ActionBinding, BindingStyle, Bindings, Color, GestureHandler};

use crate::{
    config::{SurfaceKind, SwipeConfig},
    error::ConfigError,
    feedback::Feedback,
    trace::GestureTrace,
    types::{
        AbandonReason, Axis, DirectionSet, GestureReport, GestureSignal, GestureState, Point,
        SwipeDirection,
    },
};
use hsm::GestureHsm;

pub const SIGNAL_CAPACITY: usize = 4;

pub type SignalBuffer = heapless::Vec<GestureSignal, SIGNAL_CAPACITY>;

#[derive(Clone, Copy, Debug)]
enum GestureHsmEvent {
    Start {
        now_ms: u64,
        point: Point,
    },
    Move {
        now_ms: u64,
        point: Point,
        eligible: DirectionSet,
    },
    Release {
        now_ms: u64,
        eligible: DirectionSet,
        tap_registered: bool,
    },
    Settle,
    Cancel,
}

#[derive(Default)]
struct DispatchContext {
    signals: SignalBuffer,
}

impl DispatchContext {
    fn emit(&mut self, signal: GestureSignal) {
        // Capacity covers the longest call (cancel + start).
        let pushed = self.signals.push(signal);
        debug_assert!(pushed.is_ok(), "gesture signal buffer overflow");
    }

    fn committed(&self) -> Option<GestureReport> {
        self.signals.iter().find_map(|signal| match signal {
            GestureSignal::Committed(report) => Some(*report),
            _ => None,
        })
    }

    fn finish(self) -> GestureOutput {
        GestureOutput {
            signals: self.signals,
        }
    }
}

/// Signals produced by one call into a session, in emission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureOutput {
    pub signals: SignalBuffer,
}

impl GestureOutput {
    pub fn iter(&self) -> impl Iterator<Item = &GestureSignal> {
        self.signals.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn committed(&self) -> Option<GestureReport> {
        self.iter().find_map(|signal| match signal {
            GestureSignal::Committed(report) => Some(*report),
            _ => None,
        })
    }

    pub fn abandoned(&self) -> Option<AbandonReason> {
        self.iter().find_map(|signal| match signal {
            GestureSignal::Abandoned(reason) => Some(*reason),
            _ => None,
        })
    }

    pub fn cancelled(&self) -> bool {
        self.iter()
            .any(|signal| matches!(signal, GestureSignal::Cancelled))
    }
}

/// Gesture recognizer owned by one interactive surface.
///
/// Feed it `start`/`update`/`end` samples in arrival order. At release it
/// fires at most one registered handler, synchronously, then returns to
/// idle. `cancel` aborts without firing and is safe to repeat.
pub struct GestureSession {
    machine: statig::blocking::StateMachine<GestureHsm>,
    bindings: Bindings,
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

impl GestureSession {
    /// Builds a session; `config` must pass [`SwipeConfig::validate`].
    pub fn new(config: SwipeConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid SwipeConfig: {:?}",
            config.validate()
        );
        Self {
            machine: GestureHsm::new(config).state_machine(),
            bindings: Bindings::default(),
        }
    }

    /// Like [`GestureSession::new`], but rejects an invalid config.
    pub fn try_new(config: SwipeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn for_surface(kind: SurfaceKind) -> Self {
        Self::new(SwipeConfig::for_surface(kind))
    }

    pub fn config(&self) -> &SwipeConfig {
        self.machine.inner().config()
    }

    /// Swaps the tuning; an in-flight gesture is cancelled first.
    pub fn reconfigure(&mut self, config: SwipeConfig) -> GestureOutput {
        debug_assert!(config.validate().is_ok(), "invalid SwipeConfig");
        let output = self.cancel();
        self.machine = GestureHsm::new(config).state_machine();
        output
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bind(&mut self, binding: ActionBinding) -> Option<ActionBinding> {
        self.bindings.bind(binding)
    }

    pub fn on_swipe<F>(&mut self, direction: SwipeDirection, handler: F) -> &mut Self
    where
        F: FnMut(&GestureReport) + 'static,
    {
        self.bindings.bind(ActionBinding::new(direction, handler));
        self
    }

    pub fn on_tap<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&GestureReport) + 'static,
    {
        self.bindings.set_tap(Box::new(handler));
        self
    }

    pub fn unbind(&mut self, direction: SwipeDirection) -> Option<ActionBinding> {
        self.bindings.unbind(direction)
    }

    pub fn clear_tap(&mut self) {
        self.bindings.clear_tap();
    }

    /// Temporarily blocks a direction without dropping its handler.
    pub fn set_direction_enabled(&mut self, direction: SwipeDirection, enabled: bool) {
        self.bindings.set_enabled(direction, enabled);
    }

    pub fn eligible_directions(&self) -> DirectionSet {
        self.bindings.eligible()
    }

    pub fn start(&mut self, now_ms: u64, point: Point) -> GestureOutput {
        self.dispatch(&GestureHsmEvent::Start { now_ms, point })
    }

    pub fn update(&mut self, now_ms: u64, point: Point) -> GestureOutput {
        let eligible = self.bindings.eligible();
        self.dispatch(&GestureHsmEvent::Move {
            now_ms,
            point,
            eligible,
        })
    }

    /// Releases the gesture, firing the committed handler (if any) once.
    pub fn end(&mut self, now_ms: u64) -> GestureOutput {
        let release = GestureHsmEvent::Release {
            now_ms,
            eligible: self.bindings.eligible(),
            tap_registered: self.bindings.has_tap(),
        };
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&release, &mut context);
        if let Some(report) = context.committed() {
            if !self.bindings.fire(&report) {
                log::warn!("gesture: {} committed without a handler", report.action.label());
            }
        }
        self.machine
            .handle_with_context(&GestureHsmEvent::Settle, &mut context);
        context.finish()
    }

    pub fn cancel(&mut self) -> GestureOutput {
        self.dispatch(&GestureHsmEvent::Cancel)
    }

    pub fn reset(&mut self) {
        let _ = self.cancel();
    }

    pub fn state(&self) -> GestureState {
        self.machine.inner().phase()
    }

    pub fn is_active(&self) -> bool {
        self.state() == GestureState::Tracking
    }

    pub fn origin(&self) -> Option<Point> {
        self.machine.inner().origin()
    }

    pub fn has_moved(&self) -> bool {
        self.machine.inner().has_moved()
    }

    pub fn dominant_axis(&self) -> Option<Axis> {
        self.machine.inner().axis()
    }

    pub fn candidate(&self) -> Option<SwipeDirection> {
        self.machine.inner().candidate()
    }

    /// Label and colour of the current candidate's binding, for tinting.
    pub fn candidate_style(&self) -> Option<&BindingStyle> {
        self.candidate()
            .and_then(|direction| self.bindings.get(direction))
            .map(ActionBinding::style)
    }

    pub fn feedback(&self) -> Feedback {
        self.machine.inner().feedback()
    }

    pub fn trace(&self) -> GestureTrace {
        self.machine.inner().last_trace()
    }

    fn dispatch(&mut self, event: &GestureHsmEvent) -> GestureOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(event, &mut context);
        context.finish()
    }
}
