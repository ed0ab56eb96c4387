use super::handle_activation_key;
use crate::components::{Icon, PlayerController};
use crate::playback::input::PLAY_BUTTON_ID;
use crate::playback::{play_button_icon, toggle_class, FocusTarget, PlayerEvent};
use dioxus::prelude::*;

/// Play/Pause button - both icons stay mounted, only one is shown
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let controller = use_context::<PlayerController>();
    let icon = play_button_icon(&controller.state().read());
    let playing = icon == "pause";
    let (play_display, pause_display) = if playing {
        ("none", "block")
    } else {
        ("block", "none")
    };

    rsx! {
        button {
            id: PLAY_BUTTON_ID,
            r#type: "button",
            class: "play-pause",
            "data-icon": icon,
            aria_label: if playing { "Pause" } else { "Play" },
            onclick: move |_| controller.dispatch(PlayerEvent::TogglePlay),
            onkeydown: move |evt: KeyboardEvent| {
                handle_activation_key(controller, FocusTarget::PlayButton, evt)
            },
            span { class: "play-icon", style: "display: {play_display}",
                Icon { name: "play", class: "icon" }
            }
            span { class: "pause-icon", style: "display: {pause_display}",
                Icon { name: "pause", class: "icon" }
            }
        }
    }
}

#[component]
pub(super) fn PrevButton() -> Element {
    let controller = use_context::<PlayerController>();

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            class: "prev",
            aria_label: "Previous track",
            onclick: move |_| controller.dispatch(PlayerEvent::PrevTrack),
            Icon { name: "prev", class: "icon" }
        }
    }
}

#[component]
pub(super) fn NextButton() -> Element {
    let controller = use_context::<PlayerController>();

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            class: "next",
            aria_label: "Next track",
            onclick: move |_| controller.dispatch(PlayerEvent::NextTrack),
            Icon { name: "next", class: "icon" }
        }
    }
}

/// Shuffle button - highlighted while shuffle is on
#[component]
pub(super) fn ShuffleButton() -> Element {
    let controller = use_context::<PlayerController>();
    let enabled = controller.state().read().is_shuffle;

    rsx! {
        button {
            id: "shuffle-btn",
            r#type: "button",
            class: toggle_class("shuffle", enabled),
            aria_pressed: enabled,
            aria_label: "Shuffle",
            onclick: move |_| controller.dispatch(PlayerEvent::ToggleShuffle),
            Icon { name: "shuffle", class: "icon" }
        }
    }
}

/// Repeat button - repeats the current track while on
#[component]
pub(super) fn RepeatButton() -> Element {
    let controller = use_context::<PlayerController>();
    let enabled = controller.state().read().is_repeat;

    rsx! {
        button {
            id: "repeat-btn",
            r#type: "button",
            class: toggle_class("repeat", enabled),
            aria_pressed: enabled,
            aria_label: "Repeat",
            onclick: move |_| controller.dispatch(PlayerEvent::ToggleRepeat),
            Icon { name: "repeat", class: "icon" }
        }
    }
}
