//! Core types and state machine for Arrastrar drag recognition.
//!
//! This crate is the platform-independent half of Arrastrar:
//! - Geometric primitives: [`Point`]
//! - Input primitives and lifecycle signals: [`DragInput`], [`DragSignal`]
//! - The gesture state machine: [`DragDetector`]
//! - Lazy notification channels: [`Broadcast`]
//!
//! It decides, from a raw stream of press/move/release/cancel primitives,
//! whether movement constitutes a drag (as opposed to click jitter or a
//! native scroll attempt), when the drag officially begins, and how
//! cancellation is handled. The DOM wiring that feeds it lives in the
//! `arrastrar` crate.

mod broadcast;
mod detector;
mod event;
mod geometry;

pub use broadcast::{Broadcast, Subscription};
pub use detector::{AxisConstraint, DragConfig, DragDetector, Reaction};
pub use event::{DragEvent, DragInput, DragSignal, Modality, MouseButton, PressSource};
pub use geometry::Point;
