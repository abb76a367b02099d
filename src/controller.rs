//! The playlist controller: owns the player state and turns user commands
//! and media notifications into playback actions and display updates.

mod command;
mod format;
mod playlist;
mod state;
mod surface;

pub use command::Command;
pub use format::format_time;
pub use playlist::PlaylistController;
pub use state::PlayerState;
pub use surface::Surface;

#[cfg(test)]
mod tests;
