//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this, but never mutate it. The App event-loop is the only
//! thing that writes to AppState, re-projecting it from the controllers after
//! every change.

use mood_proto::WeatherSnapshot;

use crate::mood_selector::{MoodButton, MoodSelector, SelectionState};
use crate::player::{PlaybackController, TrackListView};

pub struct AppState {
    // ── Mood selector ──────────────────────────────────────────────────────
    pub mood_buttons: Vec<MoodButton>,
    pub selection: SelectionState,
    pub loading: bool,
    pub playlist_title: Option<String>,

    // ── Player ─────────────────────────────────────────────────────────────
    pub track_list: TrackListView,

    // ── Weather ────────────────────────────────────────────────────────────
    /// Latest successful snapshot; `None` until the first one arrives.
    pub weather: Option<WeatherSnapshot>,

    // ── Session ────────────────────────────────────────────────────────────
    pub backend_url: String,
}

impl AppState {
    pub fn new(backend_url: String) -> Self {
        Self {
            mood_buttons: Vec::new(),
            selection: SelectionState::NoMoodSelected,
            loading: false,
            playlist_title: None,
            track_list: TrackListView::default(),
            weather: None,
            backend_url,
        }
    }

    pub fn sync(&mut self, selector: &MoodSelector, player: &PlaybackController) {
        self.mood_buttons = selector.buttons().to_vec();
        self.selection = selector.state();
        self.loading = selector.is_loading();
        self.playlist_title = selector.playlist_title().map(str::to_string);
        self.track_list = player.view().clone();
    }
}
