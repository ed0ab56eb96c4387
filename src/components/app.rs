use crate::api::Catalog;
use crate::components::audio_manager::{media_clock, AUDIO_ELEMENT_ID};
use crate::components::{Player, PlayerController};
use crate::db::session_store;
use crate::playback::{key_command, FocusTarget, Key, PlayerEvent, WheelLayout};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::window;

/// Below this viewport width only the center record is shown.
#[cfg(target_arch = "wasm32")]
const COMPACT_WIDTH: f64 = 640.0;

#[cfg(target_arch = "wasm32")]
fn initial_layout() -> WheelLayout {
    let width = window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::MAX);
    if width < COMPACT_WIDTH {
        WheelLayout::Compact
    } else {
        WheelLayout::Full
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn initial_layout() -> WheelLayout {
    WheelLayout::Full
}

#[cfg(target_arch = "wasm32")]
fn is_editable_target(event: &web_sys::KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<web_sys::Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element
            .get_attribute("contenteditable")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(false)
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}

/// Document-level listeners: arrow keys anywhere on the page, and drag moves and
/// releases wherever the pointer ends up.
#[cfg(target_arch = "wasm32")]
fn install_document_listeners(controller: PlayerController) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let runtime = Runtime::current();

    let key_cb = {
        let runtime = runtime.clone();
        Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            let _guard = RuntimeGuard::new(runtime.clone());
            if event.default_prevented() || event.is_composing() || is_editable_target(&event) {
                return;
            }
            // Space/Enter are handled by the focused control itself.
            if let Some(command) = key_command(Key::from_dom(&event.key()), FocusTarget::Elsewhere)
            {
                event.prevent_default();
                controller.dispatch(command);
            }
        }) as Box<dyn FnMut(_)>)
    };
    let mouse_move_cb = {
        let runtime = runtime.clone();
        Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            let _guard = RuntimeGuard::new(runtime.clone());
            if controller.is_dragging() {
                controller.seek_from_pointer(event.client_x() as f64, true);
            }
        }) as Box<dyn FnMut(_)>)
    };
    let touch_move_cb = {
        let runtime = runtime.clone();
        Closure::wrap(Box::new(move |event: web_sys::TouchEvent| {
            let _guard = RuntimeGuard::new(runtime.clone());
            if !controller.is_dragging() {
                return;
            }
            if let Some(touch) = event.touches().get(0) {
                controller.seek_from_pointer(touch.client_x() as f64, true);
            }
        }) as Box<dyn FnMut(_)>)
    };
    let release_cb = {
        let runtime = runtime.clone();
        Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let _guard = RuntimeGuard::new(runtime.clone());
            if controller.is_dragging() {
                controller.dispatch(PlayerEvent::DragEnd);
            }
        }) as Box<dyn FnMut(_)>)
    };

    let _ = doc.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
    let _ =
        doc.add_event_listener_with_callback("mousemove", mouse_move_cb.as_ref().unchecked_ref());
    let _ =
        doc.add_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("mouseup", release_cb.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("touchend", release_cb.as_ref().unchecked_ref());

    key_cb.forget();
    mouse_move_cb.forget();
    touch_move_cb.forget();
    release_cb.forget();
}

#[component]
pub fn PlayerShell(catalog: Catalog) -> Element {
    let controller = use_hook(|| PlayerController::new(catalog, session_store(), initial_layout()));
    use_context_provider(|| controller);

    #[cfg(target_arch = "wasm32")]
    use_hook(move || install_document_listeners(controller));

    // On desktop the shell stands in for the document; the web build listens on the
    // document itself.
    let on_mouse_move = move |evt: MouseEvent| {
        if !cfg!(target_arch = "wasm32") && controller.is_dragging() {
            controller.seek_from_pointer(evt.client_coordinates().x, true);
        }
    };
    let on_touch_move = move |evt: TouchEvent| {
        if cfg!(target_arch = "wasm32") || !controller.is_dragging() {
            return;
        }
        if let Some(touch) = evt.touches().first() {
            controller.seek_from_pointer(touch.client_coordinates().x, true);
        }
    };
    let on_release = move || {
        if !cfg!(target_arch = "wasm32") && controller.is_dragging() {
            controller.dispatch(PlayerEvent::DragEnd);
        }
    };
    let on_key_down = move |evt: KeyboardEvent| {
        if cfg!(target_arch = "wasm32") {
            return;
        }
        let key = Key::from_dom(&evt.key().to_string());
        if let Some(command) = key_command(key, FocusTarget::Elsewhere) {
            evt.prevent_default();
            controller.dispatch(command);
        }
    };

    rsx! {
        div {
            class: "player-shell",
            tabindex: "-1",
            onmousemove: on_mouse_move,
            onmouseup: move |_| on_release(),
            ontouchmove: on_touch_move,
            ontouchend: move |_| on_release(),
            onkeydown: on_key_down,
            audio {
                id: AUDIO_ELEMENT_ID,
                preload: "metadata",
                onmounted: move |_| controller.load_current(),
                onplay: move |_| controller.dispatch(PlayerEvent::MediaPlaying),
                onpause: move |_| controller.dispatch(PlayerEvent::MediaPaused),
                onended: move |_| controller.dispatch(PlayerEvent::Ended),
                ontimeupdate: move |_| async move {
                    let clock = media_clock().await;
                    controller.dispatch(PlayerEvent::TimeUpdate {
                        position: clock.position,
                        duration: clock.duration,
                    });
                },
                onloadedmetadata: move |_| async move {
                    let clock = media_clock().await;
                    controller.dispatch(PlayerEvent::MetadataLoaded {
                        duration: clock.duration,
                    });
                },
                ondurationchange: move |_| async move {
                    let clock = media_clock().await;
                    controller.dispatch(PlayerEvent::MetadataLoaded {
                        duration: clock.duration,
                    });
                },
            }
            Player {}
        }
    }
}
