//! Browser tests - run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use arrastrar::browser::{DragOptions, DragRecognizer, Draggable};
use arrastrar_core::AxisConstraint;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, EventTarget, KeyboardEvent, KeyboardEventInit, MouseEvent, MouseEventInit, Touch,
    TouchEvent, TouchEventInit, TouchInit,
};

fn body_div() -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn document_target() -> EventTarget {
    web_sys::window().unwrap().document().unwrap().into()
}

fn mouse_event(kind: &str, x: i32, y: i32, button: i16) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_client_x(x);
    init.set_client_y(y);
    init.set_button(button);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

fn touch_at(target: &EventTarget, id: i32, x: f64, y: f64) -> Touch {
    let init = TouchInit::new(id, target);
    init.set_client_x(x);
    init.set_client_y(y);
    init.set_page_x(x);
    init.set_page_y(y);
    Touch::new(&init).unwrap()
}

fn touch_event(kind: &str, active: &[&Touch], changed: &[&Touch]) -> TouchEvent {
    let init = TouchEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let touches = js_sys::Array::new();
    for touch in active {
        touches.push(touch.as_ref());
    }
    let changed_touches = js_sys::Array::new();
    for touch in changed {
        changed_touches.push(touch.as_ref());
    }
    init.set_touches(touches.as_ref());
    init.set_target_touches(touches.as_ref());
    init.set_changed_touches(changed_touches.as_ref());
    TouchEvent::new_with_event_init_dict(kind, &init).unwrap()
}

fn record(recognizer: &DragRecognizer) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let _ = recognizer.on_drag_start(move |e| {
        sink.borrow_mut()
            .push(format!("start {} {}", e.position.x, e.position.y));
    });
    let sink = Rc::clone(&log);
    let _ = recognizer.on_drag(move |e| {
        sink.borrow_mut()
            .push(format!("move {} {}", e.position.x, e.position.y));
    });
    let sink = Rc::clone(&log);
    let _ = recognizer.on_drag_end(move |e| {
        sink.borrow_mut().push(format!(
            "end {} {} cancelled={}",
            e.position.x, e.position.y, e.cancelled
        ));
    });
    log
}

#[wasm_bindgen_test]
fn mouse_drag_emits_lifecycle() {
    let element = body_div();
    let recognizer = DragRecognizer::new(&element).unwrap();
    let log = record(&recognizer);

    element
        .dispatch_event(&mouse_event("mousedown", 10, 10, 0))
        .unwrap();
    let document = document_target();
    document
        .dispatch_event(&mouse_event("mousemove", 30, 10, 0))
        .unwrap();
    document
        .dispatch_event(&mouse_event("mouseup", 30, 10, 0))
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "start 10 10".to_string(),
            "move 30 10".to_string(),
            "end 30 10 cancelled=false".to_string(),
        ]
    );
}

#[wasm_bindgen_test]
fn stationary_click_emits_nothing() {
    let element = body_div();
    let recognizer = DragRecognizer::new(&element).unwrap();
    let log = record(&recognizer);

    element
        .dispatch_event(&mouse_event("mousedown", 10, 10, 0))
        .unwrap();
    let document = document_target();
    document
        .dispatch_event(&mouse_event("mousemove", 10, 10, 0))
        .unwrap();
    document
        .dispatch_event(&mouse_event("mouseup", 10, 10, 0))
        .unwrap();

    assert!(log.borrow().is_empty());
}

#[wasm_bindgen_test]
fn non_primary_button_is_ignored() {
    let element = body_div();
    let recognizer = DragRecognizer::new(&element).unwrap();
    let log = record(&recognizer);

    element
        .dispatch_event(&mouse_event("mousedown", 10, 10, 2))
        .unwrap();
    let document = document_target();
    document
        .dispatch_event(&mouse_event("mousemove", 50, 10, 2))
        .unwrap();
    document
        .dispatch_event(&mouse_event("mouseup", 50, 10, 2))
        .unwrap();

    assert!(log.borrow().is_empty());
}

#[wasm_bindgen_test]
fn escape_cancels_confirmed_drag() {
    let element = body_div();
    let recognizer = DragRecognizer::new(&element).unwrap();
    let log = record(&recognizer);

    element
        .dispatch_event(&mouse_event("mousedown", 10, 10, 0))
        .unwrap();
    let document = document_target();
    document
        .dispatch_event(&mouse_event("mousemove", 25, 25, 0))
        .unwrap();

    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    let escape = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    document.dispatch_event(&escape).unwrap();

    assert_eq!(
        log.borrow().last(),
        Some(&"end 25 25 cancelled=true".to_string())
    );
    // The recognizer is idle again; a fresh gesture works.
    element
        .dispatch_event(&mouse_event("mousedown", 40, 40, 0))
        .unwrap();
    document
        .dispatch_event(&mouse_event("mousemove", 60, 40, 0))
        .unwrap();
    document
        .dispatch_event(&mouse_event("mouseup", 60, 40, 0))
        .unwrap();
    assert_eq!(
        log.borrow().last(),
        Some(&"end 60 40 cancelled=false".to_string())
    );
}

#[wasm_bindgen_test]
fn window_blur_cancels_confirmed_drag() {
    let element = body_div();
    let recognizer = DragRecognizer::new(&element).unwrap();
    let log = record(&recognizer);

    element
        .dispatch_event(&mouse_event("mousedown", 10, 10, 0))
        .unwrap();
    let document = document_target();
    document
        .dispatch_event(&mouse_event("mousemove", 20, 15, 0))
        .unwrap();

    let window = web_sys::window().unwrap();
    let blur = web_sys::Event::new("blur").unwrap();
    window.dispatch_event(&blur).unwrap();

    assert_eq!(
        log.borrow().last(),
        Some(&"end 20 15 cancelled=true".to_string())
    );
}

#[wasm_bindgen_test]
fn dispose_stops_observing_presses() {
    let element = body_div();
    let recognizer = DragRecognizer::new(&element).unwrap();
    let log = record(&recognizer);

    recognizer.dispose();
    recognizer.dispose(); // idempotent

    element
        .dispatch_event(&mouse_event("mousedown", 10, 10, 0))
        .unwrap();
    let document = document_target();
    document
        .dispatch_event(&mouse_event("mousemove", 50, 10, 0))
        .unwrap();
    document
        .dispatch_event(&mouse_event("mouseup", 50, 10, 0))
        .unwrap();

    assert!(log.borrow().is_empty());
}

#[wasm_bindgen_test]
fn second_press_during_gesture_is_ignored() {
    let element = body_div();
    let recognizer = DragRecognizer::new(&element).unwrap();
    let log = record(&recognizer);

    element
        .dispatch_event(&mouse_event("mousedown", 10, 10, 0))
        .unwrap();
    element
        .dispatch_event(&mouse_event("mousedown", 90, 90, 0))
        .unwrap();
    let document = document_target();
    document
        .dispatch_event(&mouse_event("mousemove", 30, 10, 0))
        .unwrap();
    document
        .dispatch_event(&mouse_event("mouseup", 30, 10, 0))
        .unwrap();

    let starts = log.borrow().iter().filter(|l| l.starts_with("start")).count();
    assert_eq!(starts, 1);
    assert_eq!(log.borrow().first(), Some(&"start 10 10".to_string()));
}

#[wasm_bindgen_test]
fn touch_drag_emits_lifecycle() {
    let element = body_div();
    let recognizer = DragRecognizer::new(&element).unwrap();
    let log = record(&recognizer);
    let target: &EventTarget = element.as_ref();

    let down = touch_at(target, 1, 10.0, 10.0);
    element
        .dispatch_event(&touch_event("touchstart", &[&down], &[&down]))
        .unwrap();

    let document = document_target();
    let moved = touch_at(target, 1, 40.0, 10.0);
    document
        .dispatch_event(&touch_event("touchmove", &[&moved], &[&moved]))
        .unwrap();

    let lifted = touch_at(target, 1, 40.0, 10.0);
    document
        .dispatch_event(&touch_event("touchend", &[], &[&lifted]))
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "start 10 10".to_string(),
            "move 40 10".to_string(),
            "end 40 10 cancelled=false".to_string(),
        ]
    );
}

#[wasm_bindgen_test]
fn vertical_touch_on_horizontal_constraint_is_scroll() {
    let element = body_div();
    let recognizer = DragRecognizer::with_options(
        &element,
        DragOptions {
            axis: AxisConstraint::Horizontal,
            ..DragOptions::default()
        },
    )
    .unwrap();
    let log = record(&recognizer);
    let target: &EventTarget = element.as_ref();

    let down = touch_at(target, 1, 10.0, 10.0);
    element
        .dispatch_event(&touch_event("touchstart", &[&down], &[&down]))
        .unwrap();

    let document = document_target();
    let moved = touch_at(target, 1, 12.0, 60.0);
    document
        .dispatch_event(&touch_event("touchmove", &[&moved], &[&moved]))
        .unwrap();
    let lifted = touch_at(target, 1, 12.0, 60.0);
    document
        .dispatch_event(&touch_event("touchend", &[], &[&lifted]))
        .unwrap();

    assert!(log.borrow().is_empty());
}

#[wasm_bindgen_test]
fn two_finger_move_aborts_without_end() {
    let element = body_div();
    let recognizer = DragRecognizer::new(&element).unwrap();
    let log = record(&recognizer);
    let target: &EventTarget = element.as_ref();

    let down = touch_at(target, 1, 10.0, 10.0);
    element
        .dispatch_event(&touch_event("touchstart", &[&down], &[&down]))
        .unwrap();

    let document = document_target();
    let moved = touch_at(target, 1, 30.0, 10.0);
    document
        .dispatch_event(&touch_event("touchmove", &[&moved], &[&moved]))
        .unwrap();

    let finger_one = touch_at(target, 1, 32.0, 10.0);
    let finger_two = touch_at(target, 2, 80.0, 80.0);
    document
        .dispatch_event(&touch_event(
            "touchmove",
            &[&finger_one, &finger_two],
            &[&finger_two],
        ))
        .unwrap();

    let ends = log.borrow().iter().filter(|l| l.starts_with("end")).count();
    assert_eq!(ends, 0);
}

#[wasm_bindgen_test]
fn bound_elements_share_one_gesture() {
    let first = body_div();
    let second = body_div();
    let recognizer =
        DragRecognizer::bind(&[first.clone(), second.clone()], DragOptions::default()).unwrap();
    let log = record(&recognizer);
    let document = document_target();

    // A gesture on the second element works like one on the first.
    second
        .dispatch_event(&mouse_event("mousedown", 10, 10, 0))
        .unwrap();
    // A press on the other element is rejected while the attempt is open.
    first
        .dispatch_event(&mouse_event("mousedown", 70, 70, 0))
        .unwrap();
    document
        .dispatch_event(&mouse_event("mousemove", 30, 10, 0))
        .unwrap();
    document
        .dispatch_event(&mouse_event("mouseup", 30, 10, 0))
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "start 10 10".to_string(),
            "move 30 10".to_string(),
            "end 30 10 cancelled=false".to_string(),
        ]
    );
}

#[wasm_bindgen_test]
fn both_modalities_disabled_is_rejected() {
    let element = body_div();
    let result = DragRecognizer::with_options(
        &element,
        DragOptions {
            disable_touch: true,
            disable_mouse: true,
            ..DragOptions::default()
        },
    );
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn mousedown_on_form_control_keeps_default_action() {
    let document = web_sys::window().unwrap().document().unwrap();
    let input = document.create_element("input").unwrap();
    document.body().unwrap().append_child(&input).unwrap();
    let recognizer = DragRecognizer::new(&input).unwrap();
    let _log = record(&recognizer);

    let press = mouse_event("mousedown", 10, 10, 0);
    input.dispatch_event(&press).unwrap();
    assert!(!press.default_prevented());

    let div = body_div();
    let recognizer = DragRecognizer::new(&div).unwrap();
    let _log = record(&recognizer);
    let press = mouse_event("mousedown", 10, 10, 0);
    div.dispatch_event(&press).unwrap();
    assert!(press.default_prevented());
}

#[wasm_bindgen_test]
fn draggable_facade_delivers_json() {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element("div").unwrap();
    element.set_id("drag-me");
    document.body().unwrap().append_child(&element).unwrap();

    let mut draggable = Draggable::new("drag-me").unwrap();
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&log);
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |json: JsValue| {
        sink.borrow_mut().push(json.as_string().unwrap_or_default());
    });
    draggable.on_drag_start(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());

    element
        .dispatch_event(&mouse_event("mousedown", 10, 10, 0))
        .unwrap();
    let target = document_target();
    target
        .dispatch_event(&mouse_event("mousemove", 30, 10, 0))
        .unwrap();

    let entries = log.borrow();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].contains("\"Start\""));
    assert!(entries[0].contains("\"origin\""));

    draggable.dispose();
}
