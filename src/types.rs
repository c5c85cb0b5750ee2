use core::ops::{Mul, Sub};

/// Position in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Displacement between two points, in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    pub dx: f32,
    pub dy: f32,
}

impl Displacement {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn length(self) -> f32 {
        self.dx.hypot(self.dy)
    }

    /// Signed travel toward `direction`; negative when moving away from it.
    pub fn along(self, direction: SwipeDirection) -> f32 {
        match direction {
            SwipeDirection::Left => -self.dx,
            SwipeDirection::Right => self.dx,
            SwipeDirection::Up => -self.dy,
            SwipeDirection::Down => self.dy,
        }
    }
}

impl Sub for Point {
    type Output = Displacement;

    fn sub(self, rhs: Self) -> Displacement {
        Displacement {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Displacement {
    type Output = Displacement;

    fn mul(self, rhs: f32) -> Displacement {
        Displacement {
            dx: self.dx * rhs,
            dy: self.dy * rhs,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub const ALL: [SwipeDirection; 4] = [
        SwipeDirection::Up,
        SwipeDirection::Down,
        SwipeDirection::Left,
        SwipeDirection::Right,
    ];

    pub const fn axis(self) -> Axis {
        match self {
            SwipeDirection::Left | SwipeDirection::Right => Axis::Horizontal,
            SwipeDirection::Up | SwipeDirection::Down => Axis::Vertical,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            SwipeDirection::Up => 0,
            SwipeDirection::Down => 1,
            SwipeDirection::Left => 2,
            SwipeDirection::Right => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SwipeDirection::Left => "swipe_left",
            SwipeDirection::Right => "swipe_right",
            SwipeDirection::Up => "swipe_up",
            SwipeDirection::Down => "swipe_down",
        }
    }

    /// Direction along `axis` whose sign matches `component`.
    pub fn from_axis_sign(axis: Axis, component: f32) -> Self {
        match (axis, component >= 0.0) {
            (Axis::Horizontal, true) => SwipeDirection::Right,
            (Axis::Horizontal, false) => SwipeDirection::Left,
            (Axis::Vertical, true) => SwipeDirection::Down,
            (Axis::Vertical, false) => SwipeDirection::Up,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Set of directions, used for the "registered and enabled" eligibility mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b1111);

    pub const fn bit(direction: SwipeDirection) -> u8 {
        1 << direction.index()
    }

    pub const fn with(self, direction: SwipeDirection) -> Self {
        Self(self.0 | Self::bit(direction))
    }

    pub const fn without(self, direction: SwipeDirection) -> Self {
        Self(self.0 & !Self::bit(direction))
    }

    pub const fn contains(self, direction: SwipeDirection) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = SwipeDirection> {
        SwipeDirection::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

impl FromIterator<SwipeDirection> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = SwipeDirection>>(iter: I) -> Self {
        iter.into_iter()
            .fold(DirectionSet::EMPTY, |set, direction| set.with(direction))
    }
}

/// Public lifecycle phase of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum GestureState {
    #[default]
    Idle = 0,
    Tracking = 1,
    Settling = 2,
}

impl GestureState {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// What a gesture committed to at release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitAction {
    Swipe(SwipeDirection),
    Tap,
}

impl CommitAction {
    pub const fn label(self) -> &'static str {
        match self {
            CommitAction::Swipe(direction) => direction.label(),
            CommitAction::Tap => "tap",
        }
    }
}

/// Why a released gesture fired nothing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum AbandonReason {
    #[default]
    None = 0,
    /// Final displacement never revealed a direction and the contact moved.
    NoCandidate = 1,
    /// Candidate axis points at a direction with no enabled handler.
    DirectionIneligible = 2,
    /// Candidate revealed but neither distance nor velocity crossed commit.
    BelowThreshold = 3,
    /// Stationary contact held past the tap ceiling.
    TapTooSlow = 4,
    /// Stationary short contact with no tap handler.
    TapUnregistered = 5,
}

impl AbandonReason {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            AbandonReason::None => "none",
            AbandonReason::NoCandidate => "no_candidate",
            AbandonReason::DirectionIneligible => "direction_ineligible",
            AbandonReason::BelowThreshold => "below_threshold",
            AbandonReason::TapTooSlow => "tap_too_slow",
            AbandonReason::TapUnregistered => "tap_unregistered",
        }
    }
}

/// Facts about a committed gesture, handed to the fired handler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureReport {
    pub action: CommitAction,
    pub origin: Point,
    pub end: Point,
    pub start_ms: u64,
    pub elapsed_ms: u64,
    /// Travel along the committed direction; straight-line length for taps.
    pub distance_px: f32,
    pub velocity_px_per_ms: f32,
}

/// One item of the per-call output stream of a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSignal {
    Started { origin: Point, t_ms: u64 },
    CandidateChanged {
        from: Option<SwipeDirection>,
        to: Option<SwipeDirection>,
    },
    Committed(GestureReport),
    Abandoned(AbandonReason),
    Cancelled,
}
