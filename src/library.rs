//! File selection: turns user-picked paths into file handles and playlist
//! entries.
//!
//! Two pickers exist, mirroring a multi-file chooser and a folder chooser.
//! Both yield `FileHandle`s carrying a guessed MIME type; deciding which of
//! them are audio is left to the controller.

mod model;
mod pick;

pub use model::{FileHandle, Track};
pub use pick::{pick_files, pick_folder, pick_paths};
