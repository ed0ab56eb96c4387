//! Projections from player state to what the widget displays.

use crate::api::{format_clock, Catalog, Track};
use crate::playback::state::PlayerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelLayout {
    /// Previous, center and next records.
    #[default]
    Full,
    /// Center record only.
    Compact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordSlot {
    pub index: usize,
    pub artwork: String,
    /// Image alt text, the track title.
    pub alt: String,
}

impl RecordSlot {
    fn new(index: usize, track: &Track) -> Self {
        Self {
            index,
            artwork: track.artwork.clone(),
            alt: track.title.clone(),
        }
    }
}

/// Everything the record wheel shows for the current track.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelView {
    pub prev: Option<RecordSlot>,
    pub center: RecordSlot,
    pub next: Option<RecordSlot>,
    pub title: String,
    pub source: String,
}

/// Neighbours are always the adjacent tracks, even with shuffle on.
pub fn wheel_view(state: &PlayerState, catalog: &Catalog, layout: WheelLayout) -> WheelView {
    let current = catalog.track(state.current_index());
    let slot = |index: usize| RecordSlot::new(index, catalog.track(index));
    let (prev, next) = match layout {
        WheelLayout::Full => (Some(slot(state.prev_index())), Some(slot(state.next_index()))),
        WheelLayout::Compact => (None, None),
    };

    WheelView {
        prev,
        center: slot(state.current_index()),
        next,
        title: current.title.clone(),
        source: current.source.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// Fill width and knob offset, in percent.
    pub percent: f64,
    pub elapsed: String,
    pub total: String,
}

impl ProgressView {
    pub fn css_percent(&self) -> String {
        format!("{}%", self.percent)
    }
}

pub fn progress_view(state: &PlayerState) -> ProgressView {
    let progress = state.progress;
    ProgressView {
        percent: progress.fraction * 100.0,
        elapsed: format_clock(progress.duration.map(|_| progress.position)),
        total: format_clock(progress.duration),
    }
}

/// Icon name for the play/pause button.
pub fn play_button_icon(state: &PlayerState) -> &'static str {
    if state.is_playing {
        "pause"
    } else {
        "play"
    }
}

/// Appends the `active` modifier when a toggle is on.
pub fn toggle_class(base: &str, active: bool) -> String {
    if active {
        format!("{base} active")
    } else {
        base.to_string()
    }
}
