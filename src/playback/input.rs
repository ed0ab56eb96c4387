//! Translating raw keyboard and pointer input into player events.

use crate::playback::state::PlayerEvent;

pub const PLAY_BUTTON_ID: &str = "play-pause-btn";
pub const PREV_RECORD_ID: &str = "record-prev";
pub const CENTER_RECORD_ID: &str = "record-center";
pub const NEXT_RECORD_ID: &str = "record-next";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            " " | "Spacebar" => Key::Space,
            "Enter" => Key::Enter,
            _ => Key::Other,
        }
    }

    /// Space and Enter activate whatever control has focus.
    pub fn activates(self) -> bool {
        matches!(self, Key::Space | Key::Enter)
    }
}

/// Which of the player's focusable elements holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    PlayButton,
    PrevRecord,
    CenterRecord,
    NextRecord,
    Elsewhere,
}

/// Key binding for the player. Arrows always navigate; Space/Enter only act on the
/// focused play button or record. A returned event means the key's default action
/// must be prevented.
pub fn key_command(key: Key, focus: FocusTarget) -> Option<PlayerEvent> {
    match key {
        Key::ArrowLeft => Some(PlayerEvent::PrevTrack),
        Key::ArrowRight => Some(PlayerEvent::NextTrack),
        key if key.activates() => match focus {
            FocusTarget::PlayButton | FocusTarget::CenterRecord => Some(PlayerEvent::TogglePlay),
            FocusTarget::PrevRecord => Some(PlayerEvent::PrevTrack),
            FocusTarget::NextRecord => Some(PlayerEvent::NextTrack),
            FocusTarget::Elsewhere => None,
        },
        _ => None,
    }
}

/// Horizontal extent of the progress track in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekGeometry {
    pub left: f64,
    pub width: f64,
}

impl SeekGeometry {
    /// Share of the track left of `client_x`, clamped to `0.0..=1.0`.
    /// `None` when the track has no usable width (not laid out yet).
    pub fn fraction_at(&self, client_x: f64) -> Option<f64> {
        if !(self.width.is_finite() && self.width > 0.0) || !client_x.is_finite() {
            return None;
        }
        Some(((client_x - self.left) / self.width).clamp(0.0, 1.0))
    }
}
