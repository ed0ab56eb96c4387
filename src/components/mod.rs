//! The components module contains the player UI and the controller behind it.

mod app;
pub mod audio_manager;
mod controller;
mod icons;
mod player;

pub use app::*;
pub use controller::PlayerController;
pub use icons::*;
pub use player::*;
