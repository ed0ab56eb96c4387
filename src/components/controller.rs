use std::rc::Rc;

use dioxus::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::api::Catalog;
use crate::components::audio_manager;
use crate::db::{load_player_state, persist_player_state, SessionStore};
use crate::playback::{
    progress_view, wheel_view, Effect, PlayOutcome, PlayerEvent, PlayerState, ProgressView,
    SeekGeometry, WheelLayout, WheelView,
};

/// Owns the player state and carries out the effects its transitions request.
///
/// Handles are `Copy`; every clone drives the same instance.
#[derive(Clone, Copy)]
pub struct PlayerController {
    state: Signal<PlayerState>,
    layout: Signal<WheelLayout>,
    progress_bar: Signal<Option<Rc<MountedData>>>,
    catalog: CopyValue<Catalog>,
    store: CopyValue<Rc<dyn SessionStore>>,
}

impl PlayerController {
    /// Restores the saved session state for `catalog`.
    pub fn new(catalog: Catalog, store: Rc<dyn SessionStore>, layout: WheelLayout) -> Self {
        let saved = load_player_state(store.as_ref(), catalog.len());
        debug!(
            index = saved.current_index,
            shuffle = saved.is_shuffle,
            repeat = saved.is_repeat,
            "restored player state"
        );
        Self {
            state: Signal::new(PlayerState::restore(catalog.len(), saved)),
            layout: Signal::new(layout),
            progress_bar: Signal::new(None),
            catalog: CopyValue::new(catalog),
            store: CopyValue::new(store),
        }
    }

    pub fn state(&self) -> Signal<PlayerState> {
        self.state
    }

    pub fn wheel(&self) -> WheelView {
        let state = self.state.read();
        let layout = *self.layout.read();
        self.catalog.with(|catalog| wheel_view(&state, catalog, layout))
    }

    pub fn progress(&self) -> ProgressView {
        progress_view(&self.state.read())
    }

    pub fn is_dragging(&self) -> bool {
        self.state.peek().is_dragging
    }

    pub fn set_progress_bar(&self, mounted: Rc<MountedData>) {
        let mut progress_bar = self.progress_bar;
        progress_bar.set(Some(mounted));
    }

    /// Seeks to the progress bar position under `client_x`: a plain seek for clicks,
    /// a drag move otherwise.
    #[cfg(target_arch = "wasm32")]
    pub fn seek_from_pointer(&self, client_x: f64, dragging: bool) {
        let geometry = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.query_selector(".progress-bar").ok().flatten())
            .map(|el| {
                let rect = el.get_bounding_client_rect();
                SeekGeometry {
                    left: rect.left(),
                    width: rect.width(),
                }
            });
        if let Some(fraction) = geometry.and_then(|g| g.fraction_at(client_x)) {
            self.dispatch(seek_event(fraction, dragging));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn seek_from_pointer(&self, client_x: f64, dragging: bool) {
        let Some(mounted) = self.progress_bar.peek().clone() else {
            return;
        };
        let controller = *self;
        spawn(async move {
            let Ok(rect) = mounted.get_client_rect().await else {
                return;
            };
            let geometry = SeekGeometry {
                left: rect.origin.x,
                width: rect.size.width,
            };
            if let Some(fraction) = geometry.fraction_at(client_x) {
                controller.dispatch(seek_event(fraction, dragging));
            }
        });
    }

    /// Points the audio element at the current track. Runs once the element exists.
    pub fn load_current(&self) {
        let index = self.state.peek().current_index();
        self.run(Effect::LoadTrack(index));
    }

    pub fn dispatch(&self, event: PlayerEvent) {
        trace!(?event, "player event");
        let mut state = self.state;
        let effects = state.write().apply(event, &mut rand::thread_rng());
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: Effect) {
        match effect {
            Effect::LoadTrack(index) => {
                let (title, source) = self.catalog.with(|catalog| {
                    let track = catalog.track(index);
                    (track.title.clone(), track.source.clone())
                });
                info!(index, title = %title, "loading track");
                audio_manager::set_source(&source);
            }
            Effect::Play(ticket) => {
                let controller = *self;
                spawn(async move {
                    let outcome = audio_manager::request_play().await;
                    if let PlayOutcome::Rejected(reason) = &outcome {
                        warn!(ticket, "playback did not start: {reason}");
                    }
                    controller.dispatch(PlayerEvent::PlayResolved { ticket, outcome });
                });
            }
            Effect::Pause => audio_manager::pause(),
            Effect::SetPosition(seconds) => audio_manager::set_position(seconds),
            Effect::Persist(saved) => {
                self.store
                    .with(|store| persist_player_state(store.as_ref(), saved));
            }
        }
    }
}

fn seek_event(fraction: f64, dragging: bool) -> PlayerEvent {
    if dragging {
        PlayerEvent::DragMove { fraction }
    } else {
        PlayerEvent::Seek { fraction }
    }
}
