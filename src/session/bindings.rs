use core::fmt;

use crate::types::{CommitAction, DirectionSet, GestureReport, SwipeDirection};

pub type GestureHandler = Box<dyn FnMut(&GestureReport)>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// Display hints a consumer uses to tint the overlay for a direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingStyle {
    pub label: Option<String>,
    pub color: Option<Color>,
}

pub struct ActionBinding {
    direction: SwipeDirection,
    handler: GestureHandler,
    style: BindingStyle,
}

impl ActionBinding {
    pub fn new<F>(direction: SwipeDirection, handler: F) -> Self
    where
        F: FnMut(&GestureReport) + 'static,
    {
        Self {
            direction,
            handler: Box::new(handler),
            style: BindingStyle::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.style.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.style.color = Some(color);
        self
    }

    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    pub fn style(&self) -> &BindingStyle {
        &self.style
    }
}

impl fmt::Debug for ActionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBinding")
            .field("direction", &self.direction)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Handlers registered on one surface plus the per-direction enable flags.
pub struct Bindings {
    swipes: [Option<ActionBinding>; 4],
    enabled: DirectionSet,
    tap: Option<GestureHandler>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            swipes: Default::default(),
            enabled: DirectionSet::ALL,
            tap: None,
        }
    }
}

impl Bindings {
    /// Replaces any binding for the same direction, returning the old one.
    pub fn bind(&mut self, binding: ActionBinding) -> Option<ActionBinding> {
        let slot = &mut self.swipes[binding.direction.index()];
        slot.replace(binding)
    }

    pub fn unbind(&mut self, direction: SwipeDirection) -> Option<ActionBinding> {
        self.swipes[direction.index()].take()
    }

    pub fn get(&self, direction: SwipeDirection) -> Option<&ActionBinding> {
        self.swipes[direction.index()].as_ref()
    }

    pub fn set_tap(&mut self, handler: GestureHandler) {
        self.tap = Some(handler);
    }

    pub fn clear_tap(&mut self) {
        self.tap = None;
    }

    pub fn has_tap(&self) -> bool {
        self.tap.is_some()
    }

    pub fn set_enabled(&mut self, direction: SwipeDirection, enabled: bool) {
        self.enabled = if enabled {
            self.enabled.with(direction)
        } else {
            self.enabled.without(direction)
        };
    }

    pub fn is_enabled(&self, direction: SwipeDirection) -> bool {
        self.enabled.contains(direction)
    }

    pub fn registered(&self) -> DirectionSet {
        SwipeDirection::ALL
            .into_iter()
            .filter(|direction| self.swipes[direction.index()].is_some())
            .collect()
    }

    /// Directions that may become a candidate: registered and enabled.
    pub fn eligible(&self) -> DirectionSet {
        self.registered()
            .iter()
            .filter(|direction| self.enabled.contains(*direction))
            .collect()
    }

    /// Invokes the handler for `report.action`; false when none is bound.
    pub(crate) fn fire(&mut self, report: &GestureReport) -> bool {
        let handler = match report.action {
            CommitAction::Swipe(direction) => self.swipes[direction.index()]
                .as_mut()
                .map(|binding| &mut binding.handler),
            CommitAction::Tap => self.tap.as_mut(),
        };
        match handler {
            Some(handler) => {
                handler(report);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("registered", &self.registered())
            .field("enabled", &self.enabled)
            .field("tap", &self.tap.is_some())
            .finish()
    }
}
