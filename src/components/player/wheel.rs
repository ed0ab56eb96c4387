use super::handle_activation_key;
use crate::components::PlayerController;
use crate::playback::input::{CENTER_RECORD_ID, NEXT_RECORD_ID, PREV_RECORD_ID};
use crate::playback::{FocusTarget, PlayerEvent, RecordSlot};
use dioxus::prelude::*;

/// The record wheel: previous, current and next artwork.
#[component]
pub(super) fn RecordWheel() -> Element {
    let controller = use_context::<PlayerController>();
    let wheel = controller.wheel();
    let spinning = controller.state().read().is_playing;

    rsx! {
        div { class: "wheel",
            if let Some(slot) = wheel.prev {
                Record { slot, focus: FocusTarget::PrevRecord, spinning: false }
            }
            Record { slot: wheel.center, focus: FocusTarget::CenterRecord, spinning }
            if let Some(slot) = wheel.next {
                Record { slot, focus: FocusTarget::NextRecord, spinning: false }
            }
        }
    }
}

#[component]
fn Record(slot: RecordSlot, focus: FocusTarget, spinning: bool) -> Element {
    let controller = use_context::<PlayerController>();
    let (id, position, label) = match focus {
        FocusTarget::PrevRecord => (PREV_RECORD_ID, "prev", format!("Previous: {}", slot.alt)),
        FocusTarget::NextRecord => (NEXT_RECORD_ID, "next", format!("Next: {}", slot.alt)),
        _ => (CENTER_RECORD_ID, "center", format!("Play or pause {}", slot.alt)),
    };
    let class = if spinning {
        format!("record {position} spinning")
    } else {
        format!("record {position}")
    };

    rsx! {
        div {
            id,
            class,
            tabindex: "0",
            role: "button",
            aria_label: label,
            onclick: move |_| match focus {
                FocusTarget::PrevRecord => controller.dispatch(PlayerEvent::PrevTrack),
                FocusTarget::NextRecord => controller.dispatch(PlayerEvent::NextTrack),
                _ => {}
            },
            onkeydown: move |evt: KeyboardEvent| handle_activation_key(controller, focus, evt),
            img {
                src: "{slot.artwork}",
                alt: "{slot.alt}",
                draggable: "false",
            }
        }
    }
}
