//! Domain types shared by the client and the TUI, plus the JSON shapes the
//! MoodTunes backend speaks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB display colour. Kept toolkit-agnostic; the TUI converts it.
pub type Rgb = (u8, u8, u8);

/// The closed set of moods a playlist can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Calm,
    Angry,
}

impl Mood {
    /// Button order in the mood bar.
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Calm,
        Mood::Angry,
    ];

    /// Lowercase name used in URLs (`/songs/{mood}`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Energetic => "energetic",
            Self::Calm => "calm",
            Self::Angry => "angry",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Energetic => "Energetic",
            Self::Calm => "Calm",
            Self::Angry => "Angry",
        }
    }

    /// Heading shown above the track list, e.g. "Happy Vibes".
    pub fn playlist_title(self) -> String {
        format!("{} Vibes", self.title())
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Happy => (0xFF, 0xD7, 0x00),
            Self::Sad => (0x80, 0x80, 0x80),
            Self::Energetic => (0xFF, 0x45, 0x00),
            Self::Calm => (0x46, 0x82, 0xB4),
            Self::Angry => (0x8B, 0x00, 0x00),
        }
    }

    /// Map the backend's weather-derived mood vocabulary onto a playlist mood.
    /// Unrecognised words fall back to `Calm`, as the backend itself does.
    pub fn from_weather_mood(word: &str) -> Mood {
        match word.trim().to_ascii_lowercase().as_str() {
            "mellow" | "calm" | "neutral" => Mood::Calm,
            "intense" | "energetic" => Mood::Energetic,
            "melancholic" => Mood::Sad,
            _ => Mood::Calm,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0:?}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// One playlist entry. Identity is its position in the playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Backend-side audio file path; playback is stubbed so this is display-only.
    pub source_path: Option<String>,
    pub album: Option<String>,
    pub mood_intensity: Option<f64>,
}

impl Track {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            source_path: None,
            album: None,
            mood_intensity: None,
        }
    }
}

// ── Wire format ───────────────────────────────────────────────────────────────

/// One element of `songs` in `/songs/{mood}` and `/playlist/{mood}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SongDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub mood_intensity: Option<f64>,
}

impl From<SongDto> for Track {
    fn from(dto: SongDto) -> Self {
        Track {
            title: dto.title.unwrap_or_else(|| "Unknown Title".to_string()),
            artist: dto.artist.unwrap_or_else(|| "Unknown Artist".to_string()),
            source_path: dto.file_path,
            album: dto.album,
            mood_intensity: dto.mood_intensity,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongsResponse {
    #[serde(default)]
    pub songs: Vec<SongDto>,
}

/// The backend sends the condition either as a string or as a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConditionCode {
    Text(String),
    Number(serde_json::Number),
}

impl ConditionCode {
    pub fn as_code(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            // 4001.0 is still code "4001"
            Self::Number(n) => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && n.as_i64().is_none() && n.as_u64().is_none())
                .map(|f| (f as i64).to_string())
                .unwrap_or_else(|| n.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherDto {
    pub temperature: f64,
    pub condition: ConditionCode,
}

/// `GET /weather`
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    pub weather: WeatherDto,
    #[serde(default)]
    pub recommended_mood: Option<String>,
}

/// `GET /moods`
#[derive(Debug, Clone, Deserialize)]
pub struct MoodsResponse {
    #[serde(default)]
    pub moods: Vec<String>,
}

/// `GET /playlist/{mood}`
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherPlaylistResponse {
    pub weather: WeatherDto,
    pub user_mood: String,
    pub weather_mood: String,
    #[serde(default)]
    pub songs: Vec<SongDto>,
}
