//! Input primitives fed to the detector and lifecycle signals it emits.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
    /// Additional button 1
    Button4,
    /// Additional button 2
    Button5,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub const fn from_code(code: i16) -> Self {
        match code {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            3 => Self::Button4,
            _ => Self::Button5,
        }
    }

    /// Whether this is the primary (left) button.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Left)
    }
}

/// Input family that opened a gesture attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    /// Touch contacts
    Touch,
    /// Mouse pointer
    Mouse,
}

/// How a press-down primitive arrived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PressSource {
    /// Touch contact.
    Touch {
        /// Number of simultaneous contacts on the surface.
        contacts: u32,
    },
    /// Mouse button press.
    Mouse {
        /// Button that was pressed.
        button: MouseButton,
        /// The press target is a form control whose default action
        /// (focus, dropdown, caret placement) must be left alone.
        keeps_default: bool,
    },
}

impl PressSource {
    /// The input family this press belongs to.
    #[must_use]
    pub const fn modality(&self) -> Modality {
        match self {
            Self::Touch { .. } => Modality::Touch,
            Self::Mouse { .. } => Modality::Mouse,
        }
    }
}

/// One low-level input primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragInput {
    /// Press-down on the source element.
    Press {
        /// Page-relative pointer position.
        position: Point,
        /// Modality-specific press details.
        source: PressSource,
    },
    /// Pointer movement while an attempt is open.
    Move {
        /// Page-relative pointer position.
        position: Point,
        /// Simultaneous contacts (always 1 for mouse).
        contacts: u32,
    },
    /// Pointer release.
    Release {
        /// Page-relative release position.
        position: Point,
    },
    /// Escape key, window focus loss, or platform touch revocation.
    Cancel,
}

/// Lifecycle notification produced by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragSignal {
    /// Movement crossed the drag threshold. Both points are the press
    /// origin; the first qualifying position arrives in the `Move` that
    /// follows in the same reaction.
    Start {
        /// Pointer position at press-down.
        origin: Point,
        /// Position the notification refers to.
        position: Point,
    },
    /// Pointer moved while dragging.
    Move {
        /// Pointer position at press-down.
        origin: Point,
        /// Latest pointer position.
        position: Point,
    },
    /// The drag finished.
    End {
        /// Pointer position at press-down.
        origin: Point,
        /// Release position, or the last known position for a
        /// cancelled end.
        position: Point,
        /// True when raised by escape or focus loss rather than release.
        cancelled: bool,
    },
}

impl DragSignal {
    /// Press-down position of the gesture this signal belongs to.
    #[must_use]
    pub const fn origin(&self) -> Point {
        match self {
            Self::Start { origin, .. } | Self::Move { origin, .. } | Self::End { origin, .. } => {
                *origin
            }
        }
    }

    /// Position the signal refers to.
    #[must_use]
    pub const fn position(&self) -> Point {
        match self {
            Self::Start { position, .. }
            | Self::Move { position, .. }
            | Self::End { position, .. } => *position,
        }
    }
}

/// A drag notification delivered to subscribers, pairing a lifecycle
/// signal's coordinates with the platform event that triggered it.
///
/// `source` is intended for diagnostics and preventDefault-equivalent
/// calls only; consumers should not branch on it.
#[derive(Debug, Clone)]
pub struct DragEvent<S> {
    /// The triggering platform event (press, move, key or focus event).
    pub source: S,
    /// Pointer position at press-down.
    pub origin: Point,
    /// Position the notification refers to.
    pub position: Point,
    /// True when the end was raised by escape or focus loss.
    pub cancelled: bool,
}
