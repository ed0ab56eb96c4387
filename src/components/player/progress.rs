use crate::components::PlayerController;
use crate::playback::PlayerEvent;
use dioxus::prelude::*;

/// Seek track with fill and draggable knob. Moves and releases during a drag are
/// picked up at document level, since the pointer rarely stays on the knob.
#[component]
pub(super) fn ProgressBar() -> Element {
    let controller = use_context::<PlayerController>();
    let progress = controller.progress();
    let percent = progress.css_percent();

    rsx! {
        div { class: "progress-row",
            span { class: "time elapsed", "{progress.elapsed}" }
            div {
                class: "progress-bar",
                onmounted: move |evt: MountedEvent| controller.set_progress_bar(evt.data()),
                onclick: move |evt: MouseEvent| {
                    controller.seek_from_pointer(evt.client_coordinates().x, false);
                },
                div { class: "progress-fill", style: "width: {percent}" }
                div {
                    class: "progress-knob",
                    style: "left: {percent}",
                    onmousedown: move |evt: MouseEvent| {
                        evt.prevent_default();
                        controller.dispatch(PlayerEvent::DragStart);
                    },
                    ontouchstart: move |evt: TouchEvent| {
                        evt.prevent_default();
                        controller.dispatch(PlayerEvent::DragStart);
                    },
                }
            }
            span { class: "time total", "{progress.total}" }
        }
    }
}
