//! Arrastrar: unified touch/mouse drag-gesture recognition for the
//! browser.
//!
//! Watches one or more elements for press-down, classifies the ensuing
//! pointer stream as click vs. drag vs. native scroll attempt, and
//! publishes start / move / end notifications with one coordinate shape
//! for both input modalities. Consumers implement the resulting visual
//! drag behavior; Arrastrar only detects and reports it.
//!
//! # Browser usage (WASM)
//!
//! ```javascript
//! import init, { Draggable } from './arrastrar.js';
//!
//! async function main() {
//!     await init();
//!     const drag = new Draggable('item');
//!     drag.on_drag((json) => console.log(JSON.parse(json)));
//! }
//! ```
//!
//! Rust consumers use [`browser::DragRecognizer`] directly, or embed the
//! re-exported [`DragDetector`] state machine behind their own event
//! source.

pub use arrastrar_core::*;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{DragNotification, DragOptions, DragRecognizer, Draggable, SourceEvent};
