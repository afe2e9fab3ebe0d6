//! RAII ownership of one DOM listener registration.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::EventTarget;

/// Owns one `addEventListener` registration and removes it on drop.
///
/// The transient listener set of an open gesture attempt is a
/// `Vec<ListenerHandle>`; clearing the vector tears the whole set down
/// atomically. Permanent press listeners use the same handle and are
/// cleared at disposal.
pub struct ListenerHandle {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
    capture: bool,
}

impl ListenerHandle {
    /// Attach a bubble-phase listener. Attachment failure is fatal for
    /// the caller.
    pub fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<Self, JsValue> {
        Self::attach_with_capture(target, kind, callback, false)
    }

    /// Attach a capture-phase listener.
    pub fn attach_with_capture(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
        capture: bool,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback_and_bool(
            kind,
            callback.as_ref().unchecked_ref(),
            capture,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
            capture,
        })
    }

    /// Event type this handle is registered for.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}
