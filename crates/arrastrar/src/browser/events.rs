//! DOM event conversion to core input primitives.

use arrastrar_core::{MouseButton, Point};
use web_sys::{KeyboardEvent, MouseEvent, Touch, TouchEvent};

/// Page-relative position of a mouse event.
#[must_use]
pub fn mouse_position(event: &MouseEvent) -> Point {
    Point::new(event.page_x() as f32, event.page_y() as f32)
}

/// Page-relative position of one touch point.
#[must_use]
pub fn touch_position(touch: &Touch) -> Point {
    Point::new(touch.page_x() as f32, touch.page_y() as f32)
}

/// The first active touch of an event.
#[must_use]
pub fn first_touch(event: &TouchEvent) -> Option<Touch> {
    event.touches().get(0)
}

/// The touch that changed in this event.
///
/// `touchend` no longer lists the lifted finger under `touches`; it only
/// appears in `changedTouches`.
#[must_use]
pub fn changed_touch(event: &TouchEvent) -> Option<Touch> {
    event.changed_touches().get(0)
}

/// Number of simultaneous contacts on the surface.
#[must_use]
pub fn contact_count(event: &TouchEvent) -> u32 {
    event.touches().length()
}

/// The pressed mouse button.
#[must_use]
pub fn mouse_button(event: &MouseEvent) -> MouseButton {
    MouseButton::from_code(event.button())
}

/// Whether a key event is the gesture-cancelling escape key.
#[must_use]
pub fn is_escape(event: &KeyboardEvent) -> bool {
    event.key() == "Escape"
}
