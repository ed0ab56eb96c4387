//! Player logic that runs without a document: state transitions, input mapping and
//! display projections.

pub mod input;
pub mod state;
pub mod view;

pub use input::{key_command, FocusTarget, Key, SeekGeometry};
pub use state::{Effect, PlayOutcome, PlayTicket, PlayerEvent, PlayerState};
pub use view::{
    play_button_icon, progress_view, toggle_class, wheel_view, ProgressView, RecordSlot,
    WheelLayout, WheelView,
};
