//! JavaScript-facing facade.
//!
//! Wraps [`DragRecognizer`] for consumption from plain JS: callbacks
//! receive the lifecycle signal serialized as JSON.

use super::recognizer::{DragNotification, DragRecognizer};
use arrastrar_core::{AxisConstraint, DragSignal, Subscription};
use wasm_bindgen::prelude::*;

/// Drag recognition on a DOM element, driven from JavaScript.
#[wasm_bindgen]
pub struct Draggable {
    recognizer: DragRecognizer,
    subscriptions: Vec<Subscription<DragNotification>>,
}

#[wasm_bindgen]
impl Draggable {
    /// Attach to an element by id.
    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str) -> Result<Draggable, JsValue> {
        let document = web_sys::window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;
        let element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| format!("Element '{element_id}' not found"))?;
        let recognizer = DragRecognizer::new(&element)?;
        Ok(Self {
            recognizer,
            subscriptions: Vec::new(),
        })
    }

    /// Restrict recognition to one axis: `"horizontal"`, `"vertical"`,
    /// or anything else for unrestricted.
    pub fn set_axis(&self, axis: &str) {
        let axis = match axis {
            "horizontal" => AxisConstraint::Horizontal,
            "vertical" => AxisConstraint::Vertical,
            _ => AxisConstraint::None,
        };
        self.recognizer.set_axis(axis);
    }

    /// Register a drag-start handler that receives event JSON.
    pub fn on_drag_start(&mut self, callback: js_sys::Function) {
        let sub = self.recognizer.on_drag_start(move |event| {
            call_with_json(
                &callback,
                &DragSignal::Start {
                    origin: event.origin,
                    position: event.position,
                },
            );
        });
        self.subscriptions.push(sub);
    }

    /// Register a drag-move handler that receives event JSON.
    pub fn on_drag(&mut self, callback: js_sys::Function) {
        let sub = self.recognizer.on_drag(move |event| {
            call_with_json(
                &callback,
                &DragSignal::Move {
                    origin: event.origin,
                    position: event.position,
                },
            );
        });
        self.subscriptions.push(sub);
    }

    /// Register a drag-end handler that receives event JSON.
    pub fn on_drag_end(&mut self, callback: js_sys::Function) {
        let sub = self.recognizer.on_drag_end(move |event| {
            call_with_json(
                &callback,
                &DragSignal::End {
                    origin: event.origin,
                    position: event.position,
                    cancelled: event.cancelled,
                },
            );
        });
        self.subscriptions.push(sub);
    }

    /// Detach from the element. Idempotent.
    pub fn dispose(&mut self) {
        for sub in self.subscriptions.drain(..) {
            sub.cancel();
        }
        self.recognizer.dispose();
    }
}

fn call_with_json(callback: &js_sys::Function, signal: &DragSignal) {
    let json = serde_json::to_string(signal).unwrap_or_default();
    let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
}
