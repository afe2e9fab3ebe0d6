//! Browser wiring for Arrastrar drag recognition.
//!
//! Bridges DOM input events to the platform-independent detector in
//! `arrastrar-core`: permanent press listeners on the watched element,
//! a transient document/window listener set per gesture attempt, and the
//! post-drag click suppressor.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod js;
#[cfg(target_arch = "wasm32")]
pub mod listener;
#[cfg(target_arch = "wasm32")]
pub mod recognizer;

// Cross-platform modules
pub mod forms;

pub use forms::keeps_native_default;

#[cfg(target_arch = "wasm32")]
pub use js::Draggable;
#[cfg(target_arch = "wasm32")]
pub use listener::ListenerHandle;
#[cfg(target_arch = "wasm32")]
pub use recognizer::{DragNotification, DragOptions, DragRecognizer, SourceEvent};
