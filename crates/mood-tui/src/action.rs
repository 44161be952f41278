//! Action enum — all user-initiated intents.

use mood_proto::Mood;

/// Unique identifier for a drawable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    MoodBar,
    WeatherPanel,
    TrackList,
    Controls,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Mood ─────────────────────────────────────────────────────────────────
    /// A mood button was pressed (ignored while a fetch is in flight).
    ActivateMood(Mood),
    /// Reload the current mood blended with the weather.
    WeatherMix,

    // ── Playback ─────────────────────────────────────────────────────────────
    PlayTrack(usize),
    TogglePlayPause,
    Next,
    Prev,

    // ── UI ───────────────────────────────────────────────────────────────────
    ToggleHelp,
    Quit,
}
