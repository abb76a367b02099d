use std::path::PathBuf;

use tracing::info;

use crate::app::App;
use crate::config;
use crate::controller::PlaylistController;
use crate::library::pick_paths;
use crate::media::Media;

/// Load whatever was named on the command line, if anything.
pub fn load_initial_selection<M: Media>(
    controller: &mut PlaylistController<M, App>,
    settings: &config::Settings,
    args: &[PathBuf],
) {
    if args.is_empty() {
        info!("no paths given; starting idle");
        return;
    }
    controller.load_selection(pick_paths(args, &settings.library));
}
