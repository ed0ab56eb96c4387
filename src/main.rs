use dioxus::prelude::*;
use tracing::error;

mod api;
mod components;
mod db;
mod playback;

use api::Catalog;
use components::PlayerShell;

const PLAYER_CSS: Asset = asset!("/assets/styling/player.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let catalog = use_hook(|| {
        Catalog::builtin().map_err(|err| {
            error!("failed to load track catalog: {err}");
            err.to_string()
        })
    });

    let body = match catalog {
        Ok(catalog) => rsx! {
            PlayerShell { catalog }
        },
        Err(message) => rsx! {
            div { class: "player-error", "Could not load tracks: {message}" }
        },
    };

    rsx! {
        document::Title { "Record Wheel" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Stylesheet { href: PLAYER_CSS }

        {body}
    }
}
