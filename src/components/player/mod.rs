use crate::components::PlayerController;
use crate::playback::{key_command, FocusTarget, Key};
use dioxus::prelude::*;

mod controls;
mod progress;
mod wheel;

use controls::{NextButton, PlayPauseButton, PrevButton, RepeatButton, ShuffleButton};
use progress::ProgressBar;
use wheel::RecordWheel;

/// Space/Enter on a focused control. Arrow keys are left to the page-level handler so
/// they fire once no matter where focus is.
fn handle_activation_key(controller: PlayerController, focus: FocusTarget, evt: KeyboardEvent) {
    let key = Key::from_dom(&evt.key().to_string());
    if !key.activates() {
        return;
    }
    if let Some(event) = key_command(key, focus) {
        evt.prevent_default();
        controller.dispatch(event);
    }
}

#[component]
pub fn Player() -> Element {
    let controller = use_context::<PlayerController>();
    let title = controller.wheel().title;

    rsx! {
        RecordWheel {}
        h2 { class: "track-title", "{title}" }
        div { class: "controls",
            ShuffleButton {}
            PrevButton {}
            PlayPauseButton {}
            NextButton {}
            RepeatButton {}
        }
        ProgressBar {}
    }
}
