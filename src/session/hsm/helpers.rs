use super::*;
use crate::{
    classify::classify,
    commit::{evaluate_commit, velocity_px_per_ms, CommitInput},
    feedback::project,
    types::Displacement,
};

impl GestureHsm {
    pub(in super::super) fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            origin: None,
            current: Point::ZERO,
            start_ms: 0,
            last_ms: 0,
            has_moved: false,
            axis: None,
            candidate: None,
            sample_count: 0,
            phase: GestureState::Idle,
            last_trace: GestureTrace::default(),
        }
    }

    pub(in super::super) fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub(in super::super) fn phase(&self) -> GestureState {
        self.phase
    }

    pub(in super::super) fn origin(&self) -> Option<Point> {
        self.origin
    }

    pub(in super::super) fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub(in super::super) fn axis(&self) -> Option<Axis> {
        self.axis
    }

    pub(in super::super) fn candidate(&self) -> Option<SwipeDirection> {
        self.candidate
    }

    pub(in super::super) fn last_trace(&self) -> GestureTrace {
        self.last_trace
    }

    pub(in super::super) fn feedback(&self) -> Feedback {
        project(
            self.displacement(),
            self.candidate,
            self.phase == GestureState::Tracking,
            &self.config,
        )
    }

    fn displacement(&self) -> Displacement {
        match self.origin {
            Some(origin) => self.current - origin,
            None => Displacement::ZERO,
        }
    }

    fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms)
    }

    pub(super) fn begin(&mut self, context: &mut DispatchContext, now_ms: u64, point: Point) {
        self.origin = Some(point);
        self.current = point;
        self.start_ms = now_ms;
        self.last_ms = now_ms;
        self.has_moved = false;
        self.axis = None;
        self.candidate = None;
        self.sample_count = 1;
        self.phase = GestureState::Tracking;
        self.last_trace = GestureTrace {
            t_ms: now_ms,
            state_id: GestureState::Tracking,
            sample_count: 1,
            ..GestureTrace::default()
        };

        log::debug!(
            "gesture: start at ({:.1}, {:.1}) t={now_ms}ms",
            point.x,
            point.y
        );
        context.emit(GestureSignal::Started {
            origin: point,
            t_ms: now_ms,
        });
    }

    pub(super) fn observe(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        point: Point,
        eligible: DirectionSet,
    ) {
        self.current = point;
        self.last_ms = now_ms;
        self.sample_count = self.sample_count.saturating_add(1);

        let displacement = self.displacement();
        if displacement.length() > self.config.noise_threshold_px {
            self.has_moved = true;
        }

        let classification = classify(displacement, eligible, &self.config);
        self.axis = classification.axis;
        if classification.candidate != self.candidate {
            log::trace!(
                "gesture: candidate {:?} -> {:?} at d=({:.1}, {:.1})",
                self.candidate,
                classification.candidate,
                displacement.dx,
                displacement.dy
            );
            context.emit(GestureSignal::CandidateChanged {
                from: self.candidate,
                to: classification.candidate,
            });
            self.candidate = classification.candidate;
        }

        let distance = self
            .candidate
            .map(|direction| displacement.along(direction).max(0.0))
            .unwrap_or_else(|| displacement.length());
        self.last_trace = GestureTrace {
            t_ms: now_ms,
            state_id: GestureState::Tracking,
            axis: self.axis,
            candidate: self.candidate,
            has_moved: self.has_moved,
            sample_count: self.sample_count,
            elapsed_ms: self.elapsed_ms(now_ms),
            distance_px: distance,
            velocity_px_per_ms: velocity_px_per_ms(distance, self.elapsed_ms(now_ms)),
            ..GestureTrace::default()
        };
    }

    pub(super) fn finalize_release(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        eligible: DirectionSet,
        tap_registered: bool,
    ) {
        let Some(origin) = self.origin else {
            return;
        };
        let displacement = self.displacement();
        let elapsed_ms = self.elapsed_ms(now_ms);
        self.last_ms = now_ms;

        let classification = classify(displacement, eligible, &self.config);
        self.axis = classification.axis;
        self.candidate = classification.candidate;

        let decision = evaluate_commit(
            CommitInput {
                displacement,
                elapsed_ms,
                has_moved: self.has_moved,
                eligible,
                tap_registered,
            },
            &self.config,
        );

        self.phase = GestureState::Settling;
        self.last_trace = GestureTrace {
            t_ms: now_ms,
            state_id: GestureState::Settling,
            axis: self.axis,
            candidate: self.candidate,
            has_moved: self.has_moved,
            sample_count: self.sample_count,
            elapsed_ms,
            distance_px: decision.distance_px,
            velocity_px_per_ms: decision.velocity_px_per_ms,
            committed: decision.action,
            abandon_reason: decision.reason,
            cancelled: false,
        };

        match decision.action {
            Some(action) => {
                log::debug!(
                    "gesture: commit {} d={:.1}px v={:.3}px/ms t={elapsed_ms}ms",
                    action.label(),
                    decision.distance_px,
                    decision.velocity_px_per_ms
                );
                context.emit(GestureSignal::Committed(GestureReport {
                    action,
                    origin,
                    end: self.current,
                    start_ms: self.start_ms,
                    elapsed_ms,
                    distance_px: decision.distance_px,
                    velocity_px_per_ms: decision.velocity_px_per_ms,
                }));
            }
            None => {
                log::debug!(
                    "gesture: abandoned ({}) d={:.1}px t={elapsed_ms}ms",
                    decision.reason.label(),
                    decision.distance_px
                );
                context.emit(GestureSignal::Abandoned(decision.reason));
            }
        }
    }

    pub(super) fn cancel_gesture(&mut self, context: &mut DispatchContext) {
        log::debug!("gesture: cancelled after {} samples", self.sample_count);
        context.emit(GestureSignal::Cancelled);
        self.last_trace = GestureTrace {
            t_ms: self.last_ms,
            state_id: GestureState::Idle,
            axis: self.axis,
            candidate: self.candidate,
            has_moved: self.has_moved,
            sample_count: self.sample_count,
            elapsed_ms: self.elapsed_ms(self.last_ms),
            cancelled: true,
            ..GestureTrace::default()
        };
        self.reset();
    }

    pub(super) fn reset(&mut self) {
        self.origin = None;
        self.has_moved = false;
        self.axis = None;
        self.candidate = None;
        self.sample_count = 0;
        self.phase = GestureState::Idle;
        self.last_trace.state_id = GestureState::Idle;
    }
}
