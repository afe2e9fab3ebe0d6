//! The drag gesture state machine.
//!
//! [`DragDetector`] consumes raw [`DragInput`] primitives and decides
//! whether the sequence is a click, a drag, or a scroll attempt. It owns
//! no platform resources: every input produces a [`Reaction`] describing
//! which lifecycle signals to publish and which side effects the wiring
//! layer must apply (suppress the event's default action, install or tear
//! down the transient listener set, arm the click suppressor).

use crate::event::{DragInput, DragSignal, Modality, PressSource};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Restricts drag recognition to one axis, leaving the perpendicular axis
/// to native scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisConstraint {
    /// Drags may move in any direction.
    #[default]
    None,
    /// Horizontal drags only; a primarily-vertical first touch move is a
    /// scroll.
    Horizontal,
    /// Vertical drags only; a primarily-horizontal first touch move is a
    /// scroll.
    Vertical,
}

/// Configuration for drag recognition.
#[derive(Debug, Clone)]
pub struct DragConfig {
    /// Axis restriction for scroll disambiguation.
    pub axis: AxisConstraint,
    /// Observe touch input.
    pub touch: bool,
    /// Observe mouse input.
    pub mouse: bool,
    /// Minimum movement distance before an attempt becomes a drag
    /// (device-independent units). Movement below this is click jitter.
    pub threshold: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            axis: AxisConstraint::None,
            touch: true,
            mouse: true,
            threshold: 1.0,
        }
    }
}

/// Effects requested by the detector in response to one input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reaction {
    /// Lifecycle notifications to publish, in order.
    pub signals: Vec<DragSignal>,
    /// Suppress the input primitive's default action.
    pub consume: bool,
    /// Install the transient move/release/cancel listener set.
    pub begin_capture: bool,
    /// Tear the transient listener set down.
    pub end_capture: bool,
    /// Arm the one-shot click suppressor on the source element.
    pub suppress_click: bool,
}

impl Reaction {
    fn ignore() -> Self {
        Self::default()
    }

    fn abort() -> Self {
        Self {
            end_capture: true,
            ..Self::default()
        }
    }
}

/// State machine deciding whether a pointer sequence is a click, a drag,
/// or a scroll attempt.
///
/// At most one gesture attempt is open at a time; a press arriving while
/// one is open is ignored. The machine never fails: unexpected input
/// (a move with no open attempt, a second finger mid-gesture) is a
/// defined ignore or abort transition.
#[derive(Debug)]
pub struct DragDetector {
    config: DragConfig,
    origin: Option<Point>,
    current: Option<Point>,
    handled: bool,
    dragging: bool,
    modality: Option<Modality>,
}

impl DragDetector {
    /// Create a detector with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DragConfig::default())
    }

    /// Create a detector with a custom config.
    #[must_use]
    pub fn with_config(config: DragConfig) -> Self {
        Self {
            config,
            origin: None,
            current: None,
            handled: false,
            dragging: false,
            modality: None,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Change the axis restriction. Takes effect on the next scroll
    /// disambiguation check.
    pub fn set_axis(&mut self, axis: AxisConstraint) {
        self.config.axis = axis;
    }

    /// Whether a gesture attempt is currently open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.handled
    }

    /// Whether the open attempt has been confirmed as a drag.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed one input primitive and collect the resulting effects.
    pub fn process(&mut self, input: &DragInput) -> Reaction {
        match *input {
            DragInput::Press { position, source } => self.on_press(position, &source),
            DragInput::Move { position, contacts } => self.on_move(position, contacts),
            DragInput::Release { position } => self.on_release(position),
            DragInput::Cancel => self.on_cancel(),
        }
    }

    fn on_press(&mut self, position: Point, source: &PressSource) -> Reaction {
        let enabled = match source.modality() {
            Modality::Touch => self.config.touch,
            Modality::Mouse => self.config.mouse,
        };
        if !enabled || self.handled {
            return Reaction::ignore();
        }
        let consume = match *source {
            PressSource::Touch { contacts } => {
                if contacts != 1 {
                    return Reaction::ignore();
                }
                false
            }
            PressSource::Mouse {
                button,
                keeps_default,
            } => {
                if !button.is_primary() {
                    return Reaction::ignore();
                }
                // Image drag and text selection would fight the gesture,
                // but form controls need their default press behavior.
                !keeps_default
            }
        };
        self.handled = true;
        self.origin = Some(position);
        self.current = Some(position);
        self.modality = Some(source.modality());
        Reaction {
            consume,
            begin_capture: true,
            ..Reaction::default()
        }
    }

    fn on_move(&mut self, position: Point, contacts: u32) -> Reaction {
        if !self.handled {
            return Reaction::ignore();
        }
        let Some(origin) = self.origin else {
            return Reaction::ignore();
        };
        if self.modality == Some(Modality::Touch) {
            if contacts > 1 {
                // A second finger arrived mid-gesture: hard abort with no
                // notification at all (unlike escape/blur, which end a
                // confirmed drag with cancelled=true).
                self.reset();
                return Reaction::abort();
            }
            if !self.dragging && self.is_scroll(origin, position) {
                // The user is scrolling along the free axis; step aside
                // without consuming so the platform scrolls natively.
                self.reset();
                return Reaction::abort();
            }
        }
        let mut signals = Vec::new();
        if !self.dragging {
            if origin.distance(&position) < self.config.threshold {
                // Some browsers fire a stray move on a plain click.
                return Reaction {
                    consume: true,
                    ..Reaction::default()
                };
            }
            signals.push(DragSignal::Start {
                origin,
                position: origin,
            });
            self.dragging = true;
        }
        self.current = Some(position);
        signals.push(DragSignal::Move { origin, position });
        Reaction {
            signals,
            consume: true,
            ..Reaction::default()
        }
    }

    fn is_scroll(&self, origin: Point, position: Point) -> bool {
        let delta = position - origin;
        match self.config.axis {
            AxisConstraint::None => false,
            AxisConstraint::Horizontal => delta.y.abs() > delta.x.abs(),
            AxisConstraint::Vertical => delta.x.abs() > delta.y.abs(),
        }
    }

    fn on_release(&mut self, position: Point) -> Reaction {
        if !self.handled {
            return Reaction::ignore();
        }
        if !self.dragging {
            // Press and release without qualifying movement: a plain
            // click, which must keep its default behavior.
            self.reset();
            return Reaction::abort();
        }
        let Some(origin) = self.origin else {
            self.reset();
            return Reaction::abort();
        };
        let suppress_click = self.modality == Some(Modality::Mouse);
        self.reset();
        Reaction {
            signals: vec![DragSignal::End {
                origin,
                position,
                cancelled: false,
            }],
            consume: true,
            end_capture: true,
            suppress_click,
            ..Reaction::default()
        }
    }

    fn on_cancel(&mut self) -> Reaction {
        if !self.handled {
            return Reaction::ignore();
        }
        if !self.dragging {
            self.reset();
            return Reaction::abort();
        }
        // Key and focus events carry no coordinates; reuse the last
        // recorded position.
        let (Some(origin), Some(position)) = (self.origin, self.current) else {
            self.reset();
            return Reaction::abort();
        };
        self.reset();
        Reaction {
            signals: vec![DragSignal::End {
                origin,
                position,
                cancelled: true,
            }],
            end_capture: true,
            ..Reaction::default()
        }
    }

    /// Return to idle without emitting anything.
    pub fn reset(&mut self) {
        self.origin = None;
        self.current = None;
        self.handled = false;
        self.dragging = false;
        self.modality = None;
    }
}

impl Default for DragDetector {
    fn default() -> Self {
        Self::new()
    }
}
