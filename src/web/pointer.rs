// Pointer event hooks feeding the input sampler.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement, MouseEvent};

use super::Listener;
use crate::input::{ButtonMask, PointerSink};

/// Attach move/down/up/contextmenu handlers to `container`. Dropping the
/// returned listeners detaches them.
pub fn hook(container: &HtmlElement, sink: PointerSink) -> Result<Vec<Listener>, JsValue> {
    let target: &EventTarget = container.as_ref();

    let on_move = {
        let sink = sink.clone();
        let container = container.clone();
        Listener::new(target, "mousemove", move |evt: Event| {
            evt.prevent_default();
            if let Some(m) = evt.dyn_ref::<MouseEvent>() {
                sink.move_to(
                    f64::from(m.page_x() - container.offset_left()),
                    f64::from(m.page_y() - container.offset_top()),
                );
            }
        })?
    };
    let on_down = button_listener(target, "mousedown", sink.clone())?;
    let on_up = button_listener(target, "mouseup", sink)?;
    let on_context_menu = Listener::new(target, "contextmenu", |evt: Event| {
        evt.prevent_default();
    })?;

    Ok(vec![on_move, on_down, on_up, on_context_menu])
}

fn button_listener(
    target: &EventTarget,
    event: &'static str,
    sink: PointerSink,
) -> Result<Listener, JsValue> {
    Listener::new(target, event, move |evt: Event| {
        evt.prevent_default();
        if let Some(m) = evt.dyn_ref::<MouseEvent>() {
            sink.set_buttons(button_mask(m));
        }
    })
}

fn button_mask(evt: &MouseEvent) -> ButtonMask {
    let has_buttons = js_sys::Reflect::get(evt.as_ref(), &JsValue::from_str("buttons"))
        .map(|v| !v.is_undefined())
        .unwrap_or(false);
    let buttons = has_buttons.then(|| evt.buttons());
    ButtonMask::from_event_fields(buttons, evt.which(), evt.button())
}
