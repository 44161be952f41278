//! Mood selector — owns the mood buttons and the single current mood.
//!
//! Selecting a mood marks exactly one button active, disables every button
//! until the song fetch settles, and yields a [`FetchTicket`]. The App runs
//! the fetch and hands the ticket back through [`MoodSelector::on_fetch_settled`],
//! which produces the [`PlaylistUpdated`] message for the bus.
//!
//! Fetches are not cancelable. If a second selection is made while a first
//! fetch is still pending, both eventually settle; under
//! [`StaleResponsePolicy::LastSettledWins`] whichever settles last is shown,
//! even when it belongs to the older selection.

use mood_proto::config::StaleResponsePolicy;
use mood_proto::protocol::Rgb;
use mood_proto::{Mood, Track};
use tracing::{debug, info, warn};

use crate::bus::PlaylistUpdated;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoMoodSelected,
    MoodSelected(Mood),
}

/// Identifies one in-flight song fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub mood: Mood,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodButton {
    pub mood: Mood,
    pub active: bool,
    pub disabled: bool,
}

impl MoodButton {
    pub fn color(&self) -> Rgb {
        self.mood.color()
    }
}

pub struct MoodSelector {
    buttons: Vec<MoodButton>,
    state: SelectionState,
    policy: StaleResponsePolicy,
    /// Last issued sequence number; 0 means nothing issued yet.
    last_seq: u64,
    displayed: Vec<Track>,
    playlist_title: Option<String>,
}

impl MoodSelector {
    pub fn new(policy: StaleResponsePolicy) -> Self {
        Self {
            buttons: Mood::ALL
                .into_iter()
                .map(|mood| MoodButton {
                    mood,
                    active: false,
                    disabled: false,
                })
                .collect(),
            state: SelectionState::NoMoodSelected,
            policy,
            last_seq: 0,
            displayed: Vec::new(),
            playlist_title: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn current_mood(&self) -> Option<Mood> {
        match self.state {
            SelectionState::MoodSelected(m) => Some(m),
            SelectionState::NoMoodSelected => None,
        }
    }

    pub fn buttons(&self) -> &[MoodButton] {
        &self.buttons
    }

    /// True while a fetch is in flight (all buttons disabled).
    pub fn is_loading(&self) -> bool {
        self.buttons.iter().any(|b| b.disabled)
    }

    pub fn displayed_tracks(&self) -> &[Track] {
        &self.displayed
    }

    pub fn playlist_title(&self) -> Option<&str> {
        self.playlist_title.as_deref()
    }

    /// A button press. Ignored while buttons are disabled.
    pub fn activate(&mut self, mood: Mood) -> Option<FetchTicket> {
        if self.is_loading() {
            debug!("[mood] {} pressed while loading, ignored", mood);
            return None;
        }
        Some(self.select(mood))
    }

    /// Make `mood` the current selection and start loading its playlist.
    pub fn select(&mut self, mood: Mood) -> FetchTicket {
        for button in &mut self.buttons {
            button.active = button.mood == mood;
        }
        self.state = SelectionState::MoodSelected(mood);
        self.set_loading(true);
        self.last_seq += 1;
        info!("[mood] selected {} (fetch #{})", mood, self.last_seq);
        FetchTicket {
            mood,
            seq: self.last_seq,
        }
    }

    /// Settle a fetch. `None` means the fetch itself failed.
    ///
    /// Buttons are re-enabled whatever the outcome. Returns the message to
    /// publish when the displayed playlist changed.
    pub fn on_fetch_settled(
        &mut self,
        ticket: FetchTicket,
        result: Option<Vec<Track>>,
    ) -> Option<PlaylistUpdated> {
        self.set_loading(false);

        if self.policy == StaleResponsePolicy::DiscardStale && ticket.seq < self.last_seq {
            info!(
                "[mood] dropping stale {} playlist (fetch #{}, newest #{})",
                ticket.mood, ticket.seq, self.last_seq
            );
            return None;
        }

        let Some(tracks) = result else {
            warn!("[mood] playlist fetch #{} for {} failed", ticket.seq, ticket.mood);
            return None;
        };

        if self.current_mood() != Some(ticket.mood) {
            warn!(
                "[mood] showing {} playlist while {:?} is selected",
                ticket.mood, self.state
            );
        }

        self.displayed = tracks.clone();
        self.playlist_title = Some(ticket.mood.playlist_title());
        Some(PlaylistUpdated {
            mood: ticket.mood,
            tracks,
            seq: ticket.seq,
        })
    }

    fn set_loading(&mut self, loading: bool) {
        for button in &mut self.buttons {
            button.disabled = loading;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlaybackController;

    fn tracks(prefix: &str, n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new(format!("{} {}", prefix, i), "artist"))
            .collect()
    }

    #[test]
    fn test_starts_unselected() {
        let sel = MoodSelector::new(StaleResponsePolicy::default());
        assert_eq!(sel.state(), SelectionState::NoMoodSelected);
        assert!(sel.buttons().iter().all(|b| !b.active && !b.disabled));
        assert_eq!(sel.playlist_title(), None);
    }

    #[test]
    fn test_exactly_one_button_active_for_every_mood() {
        let mut sel = MoodSelector::new(StaleResponsePolicy::default());
        for mood in Mood::ALL {
            let ticket = sel.select(mood);
            sel.on_fetch_settled(ticket, Some(Vec::new()));

            let active: Vec<Mood> = sel
                .buttons()
                .iter()
                .filter(|b| b.active)
                .map(|b| b.mood)
                .collect();
            assert_eq!(active, vec![mood]);
            assert_eq!(sel.buttons().iter().filter(|b| !b.active).count(), 4);
            assert_eq!(sel.state(), SelectionState::MoodSelected(mood));
        }
    }

    #[test]
    fn test_buttons_disabled_while_loading() {
        let mut sel = MoodSelector::new(StaleResponsePolicy::default());
        let ticket = sel.activate(Mood::Happy).unwrap();
        assert!(sel.is_loading());
        assert!(sel.buttons().iter().all(|b| b.disabled));

        // Presses during the fetch are ignored.
        assert_eq!(sel.activate(Mood::Sad), None);
        assert_eq!(sel.current_mood(), Some(Mood::Happy));

        let update = sel.on_fetch_settled(ticket, Some(tracks("h", 2))).unwrap();
        assert!(!sel.is_loading());
        assert_eq!(update.mood, Mood::Happy);
        assert_eq!(update.tracks.len(), 2);
        assert_eq!(sel.playlist_title(), Some("Happy Vibes"));
    }

    #[test]
    fn test_failure_keeps_selection_and_previous_playlist() {
        let mut sel = MoodSelector::new(StaleResponsePolicy::default());
        let first = sel.select(Mood::Calm);
        sel.on_fetch_settled(first, Some(tracks("c", 3)));

        let second = sel.select(Mood::Angry);
        assert_eq!(sel.on_fetch_settled(second, None), None);

        assert!(!sel.is_loading());
        assert_eq!(sel.state(), SelectionState::MoodSelected(Mood::Angry));
        assert_eq!(sel.displayed_tracks(), tracks("c", 3).as_slice());
        assert_eq!(sel.playlist_title(), Some("Calm Vibes"));
    }

    #[test]
    fn test_last_settled_response_wins() {
        let mut sel = MoodSelector::new(StaleResponsePolicy::LastSettledWins);
        let mut player = PlaybackController::new();

        let sad = sel.select(Mood::Sad);
        let happy = sel.select(Mood::Happy);
        assert!(sad.seq < happy.seq);

        // "happy" renders first, then the older "sad" request settles.
        let happy_update = sel.on_fetch_settled(happy, Some(tracks("happy", 2))).unwrap();
        player.on_mood_changed(&happy_update);
        let sad_update = sel.on_fetch_settled(sad, Some(tracks("sad", 3))).unwrap();
        player.on_mood_changed(&sad_update);

        assert_eq!(sel.state(), SelectionState::MoodSelected(Mood::Happy));
        assert_eq!(sel.displayed_tracks(), tracks("sad", 3).as_slice());
        assert_eq!(sel.playlist_title(), Some("Sad Vibes"));
        assert_eq!(player.playlist(), tracks("sad", 3).as_slice());
    }

    #[test]
    fn test_discard_stale_drops_older_response() {
        let mut sel = MoodSelector::new(StaleResponsePolicy::DiscardStale);

        let sad = sel.select(Mood::Sad);
        let happy = sel.select(Mood::Happy);

        assert!(sel.on_fetch_settled(happy, Some(tracks("happy", 2))).is_some());
        assert_eq!(sel.on_fetch_settled(sad, Some(tracks("sad", 3))), None);

        assert_eq!(sel.displayed_tracks(), tracks("happy", 2).as_slice());
        assert_eq!(sel.playlist_title(), Some("Happy Vibes"));
        assert!(!sel.is_loading());
    }
}
