//! Playback controller — playlist, current index and play/pause flag.
//!
//! Audio output is stubbed: "playing" only changes what the track list and
//! controls show. Every mutating call re-projects the track list view
//! synchronously, so the view never lags behind the state.

use mood_proto::Track;
use tracing::{debug, info};

use crate::bus::PlaylistUpdated;

/// `current_index` is always `< playlist.len()`, or 0 for an empty playlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_playing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub now_playing: bool,
}

/// What the track list draws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackListView {
    pub rows: Vec<TrackRow>,
    pub is_playing: bool,
}

impl TrackListView {
    pub fn project(playlist: &[Track], state: &PlaybackState) -> Self {
        let rows = playlist
            .iter()
            .enumerate()
            .map(|(index, track)| TrackRow {
                index,
                title: track.title.clone(),
                artist: track.artist.clone(),
                now_playing: index == state.current_index,
            })
            .collect();
        Self {
            rows,
            is_playing: state.is_playing,
        }
    }

    pub fn now_playing(&self) -> Option<&TrackRow> {
        self.rows.iter().find(|r| r.now_playing)
    }
}

pub struct PlaybackController {
    playlist: Vec<Track>,
    state: PlaybackState,
    view: TrackListView,
    renders: u64,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self {
            playlist: Vec::new(),
            state: PlaybackState::default(),
            view: TrackListView::default(),
            renders: 0,
        }
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.state.current_index)
    }

    pub fn view(&self) -> &TrackListView {
        &self.view
    }

    /// Number of times the view has been re-projected.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn load_playlist(&mut self, tracks: Vec<Track>) {
        info!("[player] loaded {} tracks", tracks.len());
        self.playlist = tracks;
        self.state = PlaybackState::default();
        self.render();
    }

    /// Start the track at `index`, clamped into range. No-op when empty.
    pub fn play(&mut self, index: usize) {
        if self.playlist.is_empty() {
            return;
        }
        let index = index.min(self.playlist.len() - 1);
        self.state.current_index = index;
        self.state.is_playing = true;
        if let Some(track) = self.playlist.get(index) {
            info!("[player] ▶ {} – {}", track.artist, track.title);
        }
        self.render();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        self.state.is_playing = !self.state.is_playing;
        debug!("[player] playing={}", self.state.is_playing);
        self.render();
    }

    pub fn next(&mut self) {
        let n = self.playlist.len();
        if n == 0 {
            return;
        }
        self.play((self.state.current_index + 1) % n);
    }

    pub fn previous(&mut self) {
        let n = self.playlist.len();
        if n == 0 {
            return;
        }
        self.play((self.state.current_index + n - 1) % n);
    }

    pub fn on_mood_changed(&mut self, update: &PlaylistUpdated) {
        debug!("[player] mood changed to {}", update.mood);
        self.load_playlist(update.tracks.clone());
    }

    fn render(&mut self) {
        self.view = TrackListView::project(&self.playlist, &self.state);
        self.renders += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mood_proto::Mood;

    fn playlist(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new(format!("song {}", i), format!("artist {}", i)))
            .collect()
    }

    #[test]
    fn test_load_resets_position() {
        let mut p = PlaybackController::new();
        p.load_playlist(playlist(3));
        p.play(2);
        p.load_playlist(playlist(4));
        assert_eq!(p.state(), PlaybackState::default());
        assert_eq!(p.view().rows.len(), 4);
        assert!(p.view().rows[0].now_playing);
        assert!(!p.view().is_playing);
    }

    #[test]
    fn test_play_clamps_out_of_range_index() {
        let mut p = PlaybackController::new();
        p.load_playlist(playlist(3));
        p.play(99);
        assert_eq!(p.current_index(), 2);
        assert!(p.is_playing());
        assert_eq!(p.current_track().map(|t| t.title.as_str()), Some("song 2"));
    }

    #[test]
    fn test_toggle_keeps_index() {
        let mut p = PlaybackController::new();
        p.load_playlist(playlist(3));
        p.play(1);
        p.toggle_play_pause();
        assert!(!p.is_playing());
        assert_eq!(p.current_index(), 1);
        p.toggle_play_pause();
        assert!(p.is_playing());
    }

    #[test]
    fn test_next_and_previous_stay_in_range_and_cycle() {
        for n in 1..=6 {
            let mut p = PlaybackController::new();
            p.load_playlist(playlist(n));
            for start in 0..n {
                p.play(start);
                for _ in 0..n {
                    p.next();
                    assert!(p.current_index() < n);
                }
                assert_eq!(p.current_index(), start);
                for _ in 0..n {
                    p.previous();
                    assert!(p.current_index() < n);
                }
                assert_eq!(p.current_index(), start);
            }
        }
    }

    #[test]
    fn test_previous_wraps_to_end() {
        let mut p = PlaybackController::new();
        p.load_playlist(playlist(4));
        p.previous();
        assert_eq!(p.current_index(), 3);
        p.next();
        assert_eq!(p.current_index(), 0);
    }

    #[test]
    fn test_empty_playlist_navigation_is_safe() {
        let mut p = PlaybackController::new();
        p.load_playlist(Vec::new());
        p.next();
        p.previous();
        p.play(5);
        p.toggle_play_pause();
        assert_eq!(p.current_index(), 0);
        assert!(!p.is_playing());
        assert_eq!(p.current_track(), None);
        assert!(p.view().rows.is_empty());
    }

    #[test]
    fn test_every_mutation_rerenders() {
        let mut p = PlaybackController::new();
        assert_eq!(p.render_count(), 0);
        p.load_playlist(playlist(2));
        p.play(1);
        p.toggle_play_pause();
        p.next();
        p.previous();
        assert_eq!(p.render_count(), 5);
        assert_eq!(p.view().now_playing().map(|r| r.index), Some(1));
    }

    #[test]
    fn test_mood_change_swaps_playlist() {
        let mut p = PlaybackController::new();
        p.load_playlist(playlist(3));
        p.play(2);

        let update = PlaylistUpdated {
            mood: Mood::Energetic,
            tracks: vec![
                Track::new("Power Up", "Energy Crew"),
                Track::new("Dynamic Drive", "The Motivators"),
            ],
            seq: 7,
        };
        p.on_mood_changed(&update);

        assert_eq!(p.playlist(), update.tracks.as_slice());
        assert_eq!(p.current_index(), 0);
        assert!(!p.is_playing());
    }
}
