pub mod client;
pub mod config;
pub mod platform;
pub mod protocol;
pub mod weather;

pub use client::{ApiClient, ClientError, WeatherPlaylist};
pub use protocol::{Mood, Track};
pub use weather::{map_condition_code, WeatherCondition, WeatherSnapshot};
