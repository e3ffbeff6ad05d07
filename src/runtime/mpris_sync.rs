use crate::app::App;
use crate::audio::PlaybackState;
use crate::mpris::MprisHandle;

/// Index of the track actually bound to the player, if any.
pub fn loaded_index(app: &App) -> Option<usize> {
    if app.player.state().is_loaded() {
        app.library.current_index()
    } else {
        None
    }
}

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let index = loaded_index(app);
    let track = index.and(app.library.current_track());
    mpris.set_track_metadata(index, track);
    mpris.set_playback(app.player.state());
}

/// What was last published, so the loop only pushes real changes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Published {
    pub index: Option<usize>,
    pub playback: PlaybackState,
    pub generation: u64,
}

impl Published {
    pub fn of(app: &App) -> Self {
        Self {
            index: loaded_index(app),
            playback: app.player.state(),
            generation: app.player.generation(),
        }
    }
}
