//! Weather condition table and the snapshot type the UI renders.

use crate::protocol::{Mood, Rgb, WeatherResponse};

/// Human-readable form of a condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCondition {
    pub condition: &'static str,
    pub description: &'static str,
}

const fn entry(condition: &'static str, description: &'static str) -> WeatherCondition {
    WeatherCondition {
        condition,
        description,
    }
}

pub const UNKNOWN: WeatherCondition = entry("Unknown", "Weather information unavailable");

const CONDITION_TABLE: &[(&str, WeatherCondition)] = &[
    ("0", UNKNOWN),
    ("1000", entry("Clear", "Clear, Sunny")),
    ("1100", entry("Clear", "Mostly Clear")),
    ("1101", entry("Cloudy", "Partly Cloudy")),
    ("1102", entry("Cloudy", "Mostly Cloudy")),
    ("1001", entry("Cloudy", "Cloudy")),
    ("2000", entry("Foggy", "Fog")),
    ("2100", entry("Foggy", "Light Fog")),
    ("4000", entry("Rainy", "Drizzle")),
    ("4001", entry("Rainy", "Rain")),
    ("4200", entry("Rainy", "Light Rain")),
    ("4201", entry("Rainy", "Heavy Rain")),
    ("5000", entry("Snowy", "Snow")),
    ("5001", entry("Snowy", "Flurries")),
    ("5100", entry("Snowy", "Light Snow")),
    ("5101", entry("Snowy", "Heavy Snow")),
    ("8000", entry("Stormy", "Thunderstorm")),
];

/// Look up a backend condition code. Unknown codes resolve to [`UNKNOWN`].
pub fn map_condition_code(code: &str) -> WeatherCondition {
    let code = code.trim();
    CONDITION_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, w)| *w)
        .unwrap_or(UNKNOWN)
}

/// Swatch colour for a condition label ("Rainy", "Clear", ...).
pub fn condition_color(condition: &str) -> Rgb {
    match condition {
        "Clear" => (0xFF, 0xD7, 0x00),
        "Cloudy" => (0xA9, 0xA9, 0xA9),
        "Foggy" => (0xB8, 0xB8, 0xB8),
        "Rainy" => (0x46, 0x82, 0xB4),
        "Snowy" => (0xFF, 0xFF, 0xFF),
        "Stormy" => (0x4A, 0x4A, 0x4A),
        _ => (0x80, 0x80, 0x80),
    }
}

/// Latest fetched weather. Replaced wholesale on every successful poll.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_celsius: f64,
    pub condition_code: String,
    pub condition: WeatherCondition,
    pub recommended_mood: Option<Mood>,
}

impl WeatherSnapshot {
    pub fn new(temperature_celsius: f64, condition_code: impl Into<String>) -> Self {
        let condition_code = condition_code.into();
        Self {
            temperature_celsius,
            condition: map_condition_code(&condition_code),
            condition_code,
            recommended_mood: None,
        }
    }

    pub fn from_response(resp: WeatherResponse) -> Self {
        let mut snapshot = Self::new(resp.weather.temperature, resp.weather.condition.as_code());
        snapshot.recommended_mood = resp.recommended_mood.as_deref().map(Mood::from_weather_mood);
        snapshot
    }

    pub fn display_color(&self) -> Rgb {
        condition_color(self.condition.condition)
    }

    /// Nearest whole degree; halves round up (-2.5 → -2, 2.5 → 3).
    pub fn rounded_temperature(&self) -> i64 {
        (self.temperature_celsius + 0.5).floor() as i64
    }

    /// "21°"
    pub fn temperature_label(&self) -> String {
        format!("{}°", self.rounded_temperature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_code() {
        let w = map_condition_code("4001");
        assert_eq!(w.condition, "Rainy");
        assert_eq!(w.description, "Rain");
    }

    #[test]
    fn test_unknown_code_uses_default_entry() {
        assert_eq!(map_condition_code("9999"), UNKNOWN);
        assert_eq!(map_condition_code(""), UNKNOWN);
        assert_eq!(map_condition_code("0"), UNKNOWN);
    }

    #[test]
    fn test_every_table_condition_has_a_color() {
        for (_, w) in CONDITION_TABLE {
            if w.condition != "Unknown" {
                assert_ne!(condition_color(w.condition), condition_color("Unknown"));
            }
        }
    }

    #[test]
    fn test_snapshot_from_response() {
        let resp: WeatherResponse = serde_json::from_str(
            r#"{"weather":{"temperature":21.6,"condition":1000},"recommended_mood":"intense"}"#,
        )
        .unwrap();
        let snap = WeatherSnapshot::from_response(resp);
        assert_eq!(snap.condition_code, "1000");
        assert_eq!(snap.condition.description, "Clear, Sunny");
        assert_eq!(snap.temperature_label(), "22°");
        assert_eq!(snap.display_color(), (0xFF, 0xD7, 0x00));
        assert_eq!(snap.recommended_mood, Some(Mood::Energetic));
    }

    #[test]
    fn test_halves_round_up() {
        let snap = WeatherSnapshot::new(-2.5, "5000");
        assert_eq!(snap.rounded_temperature(), -2);
        assert_eq!(snap.temperature_label(), "-2°");
        assert_eq!(snap.condition.condition, "Snowy");

        assert_eq!(WeatherSnapshot::new(2.5, "1000").temperature_label(), "3°");
        assert_eq!(WeatherSnapshot::new(-2.6, "1000").temperature_label(), "-3°");
        assert_eq!(WeatherSnapshot::new(-0.4, "1000").temperature_label(), "0°");
    }
}
