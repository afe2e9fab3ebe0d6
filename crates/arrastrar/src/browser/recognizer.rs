//! DOM wiring for the drag recognizer.
//!
//! [`DragRecognizer`] owns the permanent press listeners on the watched
//! element, opens a transient document/window listener set for each
//! gesture attempt, feeds the core [`DragDetector`], and interprets the
//! resulting [`Reaction`]s: default-action suppression, listener
//! teardown, click suppression, and publishing on the three lifecycle
//! channels.

use super::events;
use super::forms;
use super::listener::ListenerHandle;
use arrastrar_core::{
    AxisConstraint, Broadcast, DragConfig, DragDetector, DragEvent, DragInput, DragSignal,
    Modality, PressSource, Reaction, Subscription,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, KeyboardEvent, MouseEvent, TouchEvent};

/// The platform event attached to a notification.
///
/// Diagnostic and default-suppression use only; consumers should not
/// otherwise branch on the variant.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    /// Mouse press, move or release.
    Mouse(MouseEvent),
    /// Touch press, move, release or revocation.
    Touch(TouchEvent),
    /// Escape key press.
    Key(KeyboardEvent),
    /// Focus loss or other generic event.
    Generic(Event),
}

impl SourceEvent {
    /// The underlying DOM event.
    #[must_use]
    pub fn as_event(&self) -> &Event {
        match self {
            Self::Mouse(e) => e,
            Self::Touch(e) => e,
            Self::Key(e) => e,
            Self::Generic(e) => e,
        }
    }

    /// Suppress the event's default action.
    pub fn prevent_default(&self) {
        self.as_event().prevent_default();
    }
}

/// A notification as delivered to subscribers.
pub type DragNotification = DragEvent<SourceEvent>;

/// Construction-time options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragOptions {
    /// Do not observe touch input.
    pub disable_touch: bool,
    /// Do not observe mouse input.
    pub disable_mouse: bool,
    /// Axis restriction for scroll disambiguation.
    pub axis: AxisConstraint,
}

struct Channels {
    start: Broadcast<DragNotification>,
    drag: Broadcast<DragNotification>,
    end: Broadcast<DragNotification>,
}

struct Inner {
    detector: DragDetector,
    permanent: Vec<ListenerHandle>,
    transient: Vec<ListenerHandle>,
    /// Element the open gesture attempt started on; target of the click
    /// suppressor.
    active_source: Option<Element>,
    disposed: bool,
}

/// Watches one or more elements for press-down and reports drags on
/// them.
///
/// One gesture attempt is open at a time across all bound elements; its
/// transient listeners live on `document`/`window` because a drag may
/// leave the source element. Dropping the recognizer disposes it.
pub struct DragRecognizer {
    inner: Rc<RefCell<Inner>>,
    channels: Rc<Channels>,
}

impl DragRecognizer {
    /// Watch a single element with the default options.
    pub fn new(element: &Element) -> Result<Self, JsValue> {
        Self::with_options(element, DragOptions::default())
    }

    /// Watch a single element.
    pub fn with_options(element: &Element, options: DragOptions) -> Result<Self, JsValue> {
        Self::bind(std::slice::from_ref(element), options)
    }

    /// Watch a set of elements.
    ///
    /// Installs the permanent press listeners on every element; a failed
    /// attach fails construction. Disabling both modalities is rejected,
    /// as no drag could ever be detected.
    pub fn bind(elements: &[Element], options: DragOptions) -> Result<Self, JsValue> {
        console_error_panic_hook::set_once();

        if options.disable_touch && options.disable_mouse {
            return Err(JsValue::from_str("both input modalities are disabled"));
        }

        let config = DragConfig {
            axis: options.axis,
            touch: !options.disable_touch,
            mouse: !options.disable_mouse,
            ..DragConfig::default()
        };
        let inner = Rc::new(RefCell::new(Inner {
            detector: DragDetector::with_config(config),
            permanent: Vec::new(),
            transient: Vec::new(),
            active_source: None,
            disposed: false,
        }));
        let channels = Rc::new(Channels {
            start: Broadcast::new(),
            drag: Broadcast::new(),
            end: Broadcast::new(),
        });

        let mut permanent = Vec::new();
        for element in elements {
            if !options.disable_touch {
                let inner_ref = Rc::clone(&inner);
                let channels_ref = Rc::clone(&channels);
                let source = element.clone();
                let callback =
                    Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
                        if let Some(event) = e.dyn_ref::<TouchEvent>() {
                            on_touch_start(&inner_ref, &channels_ref, &source, event);
                        }
                    });
                permanent.push(ListenerHandle::attach(element, "touchstart", callback)?);
            }
            if !options.disable_mouse {
                let inner_ref = Rc::clone(&inner);
                let channels_ref = Rc::clone(&channels);
                let source = element.clone();
                let callback =
                    Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
                        if let Some(event) = e.dyn_ref::<MouseEvent>() {
                            on_mouse_down(&inner_ref, &channels_ref, &source, event);
                        }
                    });
                permanent.push(ListenerHandle::attach(element, "mousedown", callback)?);
            }
        }
        inner.borrow_mut().permanent = permanent;

        Ok(Self { inner, channels })
    }

    /// Subscribe to drag-start notifications.
    pub fn on_drag_start(
        &self,
        callback: impl Fn(&DragNotification) + 'static,
    ) -> Subscription<DragNotification> {
        self.channels.start.subscribe(callback)
    }

    /// Subscribe to drag-move notifications.
    pub fn on_drag(
        &self,
        callback: impl Fn(&DragNotification) + 'static,
    ) -> Subscription<DragNotification> {
        self.channels.drag.subscribe(callback)
    }

    /// Subscribe to drag-end notifications.
    pub fn on_drag_end(
        &self,
        callback: impl Fn(&DragNotification) + 'static,
    ) -> Subscription<DragNotification> {
        self.channels.end.subscribe(callback)
    }

    /// Change the axis restriction.
    pub fn set_axis(&self, axis: AxisConstraint) {
        self.inner.borrow_mut().detector.set_axis(axis);
    }

    /// Whether a confirmed drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().detector.is_dragging()
    }

    /// Remove every listener and return the bound elements to their
    /// pre-attachment state. Idempotent. A gesture open at disposal is
    /// discarded without an end notification.
    pub fn dispose(&self) {
        let mut guard = self.inner.borrow_mut();
        if guard.disposed {
            return;
        }
        guard.disposed = true;
        guard.permanent.clear();
        guard.transient.clear();
        guard.active_source = None;
        guard.detector.reset();
    }
}

impl Drop for DragRecognizer {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn on_touch_start(
    inner: &Rc<RefCell<Inner>>,
    channels: &Rc<Channels>,
    source_element: &Element,
    event: &TouchEvent,
) {
    let Some(touch) = events::first_touch(event) else {
        return;
    };
    let input = DragInput::Press {
        position: events::touch_position(&touch),
        source: PressSource::Touch {
            contacts: events::contact_count(event),
        },
    };
    let reaction = inner.borrow_mut().detector.process(&input);
    if reaction.begin_capture {
        inner.borrow_mut().active_source = Some(source_element.clone());
    }
    apply(
        inner,
        channels,
        reaction,
        &SourceEvent::Touch(event.clone()),
        Modality::Touch,
    );
}

fn on_mouse_down(
    inner: &Rc<RefCell<Inner>>,
    channels: &Rc<Channels>,
    source_element: &Element,
    event: &MouseEvent,
) {
    let keeps_default = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .is_some_and(|element| forms::keeps_native_default(&element.tag_name()));
    let input = DragInput::Press {
        position: events::mouse_position(event),
        source: PressSource::Mouse {
            button: events::mouse_button(event),
            keeps_default,
        },
    };
    let reaction = inner.borrow_mut().detector.process(&input);
    if reaction.begin_capture {
        inner.borrow_mut().active_source = Some(source_element.clone());
    }
    apply(
        inner,
        channels,
        reaction,
        &SourceEvent::Mouse(event.clone()),
        Modality::Mouse,
    );
}

fn on_touch_move(inner: &Rc<RefCell<Inner>>, channels: &Rc<Channels>, event: &TouchEvent) {
    let Some(touch) = events::first_touch(event) else {
        return;
    };
    let input = DragInput::Move {
        position: events::touch_position(&touch),
        contacts: events::contact_count(event),
    };
    let reaction = inner.borrow_mut().detector.process(&input);
    apply(
        inner,
        channels,
        reaction,
        &SourceEvent::Touch(event.clone()),
        Modality::Touch,
    );
}

fn on_touch_end(inner: &Rc<RefCell<Inner>>, channels: &Rc<Channels>, event: &TouchEvent) {
    let Some(touch) = events::changed_touch(event) else {
        return;
    };
    let input = DragInput::Release {
        position: events::touch_position(&touch),
    };
    let reaction = inner.borrow_mut().detector.process(&input);
    apply(
        inner,
        channels,
        reaction,
        &SourceEvent::Touch(event.clone()),
        Modality::Touch,
    );
}

fn on_mouse_move(inner: &Rc<RefCell<Inner>>, channels: &Rc<Channels>, event: &MouseEvent) {
    let input = DragInput::Move {
        position: events::mouse_position(event),
        contacts: 1,
    };
    let reaction = inner.borrow_mut().detector.process(&input);
    apply(
        inner,
        channels,
        reaction,
        &SourceEvent::Mouse(event.clone()),
        Modality::Mouse,
    );
}

fn on_mouse_up(inner: &Rc<RefCell<Inner>>, channels: &Rc<Channels>, event: &MouseEvent) {
    let input = DragInput::Release {
        position: events::mouse_position(event),
    };
    let reaction = inner.borrow_mut().detector.process(&input);
    apply(
        inner,
        channels,
        reaction,
        &SourceEvent::Mouse(event.clone()),
        Modality::Mouse,
    );
}

fn cancel(inner: &Rc<RefCell<Inner>>, channels: &Rc<Channels>, source: &SourceEvent, modality: Modality) {
    let reaction = inner.borrow_mut().detector.process(&DragInput::Cancel);
    apply(inner, channels, reaction, source, modality);
}

/// Interpret one [`Reaction`]: side effects first, notifications last so
/// subscribers observe a settled recognizer and may re-enter it.
fn apply(
    inner: &Rc<RefCell<Inner>>,
    channels: &Rc<Channels>,
    reaction: Reaction,
    source: &SourceEvent,
    modality: Modality,
) {
    if reaction.consume {
        source.prevent_default();
    }
    let mut ended_source = None;
    if reaction.end_capture {
        let mut guard = inner.borrow_mut();
        guard.transient.clear();
        ended_source = guard.active_source.take();
    }
    if reaction.begin_capture {
        if let Err(err) = install_transient(inner, channels, modality) {
            // Without the transient set the attempt can never finish;
            // discard it.
            web_sys::console::error_1(&err);
            let mut guard = inner.borrow_mut();
            guard.transient.clear();
            guard.active_source = None;
            guard.detector.reset();
            return;
        }
    }
    if reaction.suppress_click {
        if let Some(element) = &ended_source {
            suppress_next_click(element);
        }
    }
    for signal in &reaction.signals {
        publish(channels, signal, source);
    }
}

fn publish(channels: &Channels, signal: &DragSignal, source: &SourceEvent) {
    let notification = DragNotification {
        source: source.clone(),
        origin: signal.origin(),
        position: signal.position(),
        cancelled: matches!(
            signal,
            DragSignal::End {
                cancelled: true,
                ..
            }
        ),
    };
    match signal {
        DragSignal::Start { .. } => channels.start.emit(&notification),
        DragSignal::Move { .. } => channels.drag.emit(&notification),
        DragSignal::End { .. } => channels.end.emit(&notification),
    }
}

/// Install the modality-specific move/release listeners plus the shared
/// escape and focus-loss cancellation triggers. Global targets, because
/// a drag may leave the source element.
fn install_transient(
    inner: &Rc<RefCell<Inner>>,
    channels: &Rc<Channels>,
    modality: Modality,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let document: &EventTarget = document.as_ref();

    let mut handles = Vec::new();
    match modality {
        Modality::Touch => {
            let inner_ref = Rc::clone(inner);
            let channels_ref = Rc::clone(channels);
            let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
                if let Some(event) = e.dyn_ref::<TouchEvent>() {
                    on_touch_move(&inner_ref, &channels_ref, event);
                }
            });
            handles.push(ListenerHandle::attach(document, "touchmove", callback)?);

            let inner_ref = Rc::clone(inner);
            let channels_ref = Rc::clone(channels);
            let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
                if let Some(event) = e.dyn_ref::<TouchEvent>() {
                    on_touch_end(&inner_ref, &channels_ref, event);
                }
            });
            handles.push(ListenerHandle::attach(document, "touchend", callback)?);

            // The platform revoking the sequence (palm rejection, OS
            // gesture takeover) cancels like escape does.
            let inner_ref = Rc::clone(inner);
            let channels_ref = Rc::clone(channels);
            let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
                if let Some(event) = e.dyn_ref::<TouchEvent>() {
                    cancel(
                        &inner_ref,
                        &channels_ref,
                        &SourceEvent::Touch(event.clone()),
                        Modality::Touch,
                    );
                }
            });
            handles.push(ListenerHandle::attach(document, "touchcancel", callback)?);
        }
        Modality::Mouse => {
            let inner_ref = Rc::clone(inner);
            let channels_ref = Rc::clone(channels);
            let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
                if let Some(event) = e.dyn_ref::<MouseEvent>() {
                    on_mouse_move(&inner_ref, &channels_ref, event);
                }
            });
            handles.push(ListenerHandle::attach(document, "mousemove", callback)?);

            let inner_ref = Rc::clone(inner);
            let channels_ref = Rc::clone(channels);
            let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
                if let Some(event) = e.dyn_ref::<MouseEvent>() {
                    on_mouse_up(&inner_ref, &channels_ref, event);
                }
            });
            handles.push(ListenerHandle::attach(document, "mouseup", callback)?);
        }
    }

    let inner_ref = Rc::clone(inner);
    let channels_ref = Rc::clone(channels);
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
        if let Some(event) = e.dyn_ref::<KeyboardEvent>() {
            if events::is_escape(event) {
                cancel(
                    &inner_ref,
                    &channels_ref,
                    &SourceEvent::Key(event.clone()),
                    modality,
                );
            }
        }
    });
    handles.push(ListenerHandle::attach(document, "keydown", callback)?);

    let inner_ref = Rc::clone(inner);
    let channels_ref = Rc::clone(channels);
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
        cancel(
            &inner_ref,
            &channels_ref,
            &SourceEvent::Generic(e),
            modality,
        );
    });
    handles.push(ListenerHandle::attach(window.as_ref(), "blur", callback)?);

    inner.borrow_mut().transient = handles;
    Ok(())
}

/// Swallow the click the browser synthesizes after the mouse-up that
/// ended a drag. The listener removes itself once the current microtask
/// queue drains, whether or not a click arrived, so any later unrelated
/// click passes through.
fn suppress_next_click(element: &Element) {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(|e: web_sys::Event| {
        e.stop_propagation();
        e.prevent_default();
    });
    let Ok(handle) = ListenerHandle::attach_with_capture(element.as_ref(), "click", callback, true)
    else {
        return;
    };
    let slot = Rc::new(RefCell::new(Some(handle)));
    let Some(window) = web_sys::window() else {
        return;
    };
    let disarm_slot = Rc::clone(&slot);
    let disarm = Closure::once_into_js(move || {
        disarm_slot.borrow_mut().take();
    });
    let _ = window.queue_microtask(disarm.unchecked_ref());
}
