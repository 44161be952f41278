//! HTTP client for the MoodTunes backend.
//!
//! The `try_*` methods surface a [`ClientError`]; the plain `fetch_*` methods
//! are what the UI calls. They log the failure and hand back an empty or
//! `None` result, so no error ever reaches the rendering layer.

use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::BackendConfig;
use crate::protocol::{
    Mood, MoodsResponse, SongsResponse, Track, WeatherPlaylistResponse, WeatherResponse,
};
use crate::weather::WeatherSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),
    /// The backend answered with a non-2xx status.
    #[error("backend returned {status}")]
    BadResponse { status: reqwest::StatusCode },
    /// The body was not the JSON shape we expected.
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Songs plus the weather context returned by `/playlist/{mood}`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPlaylist {
    pub weather: WeatherSnapshot,
    pub user_mood: Mood,
    pub weather_mood: Mood,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Network)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ClientError> {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[api] GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::BadResponse { status });
        }

        response.json::<T>().await.map_err(ClientError::Decode)
    }

    // ── Weather ───────────────────────────────────────────────────────────────

    pub async fn try_fetch_weather(&self) -> Result<WeatherSnapshot, ClientError> {
        let resp: WeatherResponse = self.get_json("/weather", &[]).await?;
        Ok(WeatherSnapshot::from_response(resp))
    }

    /// Current weather, or `None` if the backend could not be reached or
    /// answered badly.
    pub async fn fetch_weather(&self) -> Option<WeatherSnapshot> {
        match self.try_fetch_weather().await {
            Ok(snapshot) => {
                info!(
                    "[api] weather: {:.1}°C code={} ({})",
                    snapshot.temperature_celsius,
                    snapshot.condition_code,
                    snapshot.condition.description
                );
                Some(snapshot)
            }
            Err(e) => {
                warn!("[api] weather fetch failed: {}", e);
                None
            }
        }
    }

    // ── Songs ─────────────────────────────────────────────────────────────────

    pub async fn try_fetch_songs(
        &self,
        mood: Mood,
        limit: usize,
    ) -> Result<Vec<Track>, ClientError> {
        let path = format!("/songs/{}", mood.as_str());
        let resp: SongsResponse = self.get_json(&path, &[("limit", limit.to_string())]).await?;
        Ok(resp.songs.into_iter().map(Track::from).collect())
    }

    /// Songs for `mood`. Any failure yields an empty list.
    pub async fn fetch_songs_by_mood(&self, mood: Mood, limit: usize) -> Vec<Track> {
        match self.try_fetch_songs(mood, limit).await {
            Ok(tracks) => {
                info!("[api] {} songs for mood {}", tracks.len(), mood);
                tracks
            }
            Err(e) => {
                warn!("[api] song fetch for mood {} failed: {}", mood, e);
                Vec::new()
            }
        }
    }

    // ── Misc endpoints ────────────────────────────────────────────────────────

    /// True when `GET /` answers 2xx.
    pub async fn health(&self) -> bool {
        let url = format!("{}/", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!("[api] health check: backend returned {}", response.status());
                false
            }
            Err(e) => {
                warn!("[api] health check failed: {}", e);
                false
            }
        }
    }

    /// Moods the backend advertises. Names outside the known set are skipped.
    pub async fn fetch_moods(&self) -> Vec<Mood> {
        match self.get_json::<MoodsResponse>("/moods", &[]).await {
            Ok(resp) => resp
                .moods
                .iter()
                .filter_map(|name| match name.parse::<Mood>() {
                    Ok(m) => Some(m),
                    Err(e) => {
                        debug!("[api] skipping {}", e);
                        None
                    }
                })
                .collect(),
            Err(e) => {
                warn!("[api] mood list fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_weather_playlist(
        &self,
        mood: Mood,
        limit: usize,
    ) -> Result<WeatherPlaylist, ClientError> {
        let path = format!("/playlist/{}", mood.as_str());
        let resp: WeatherPlaylistResponse =
            self.get_json(&path, &[("limit", limit.to_string())]).await?;

        let weather = WeatherSnapshot::new(resp.weather.temperature, resp.weather.condition.as_code());
        Ok(WeatherPlaylist {
            weather,
            user_mood: resp.user_mood.parse().unwrap_or(mood),
            weather_mood: Mood::from_weather_mood(&resp.weather_mood),
            tracks: resp.songs.into_iter().map(Track::from).collect(),
        })
    }

    /// Playlist blending `mood` with the mood the backend derives from the
    /// current weather.
    pub async fn fetch_weather_playlist(&self, mood: Mood, limit: usize) -> Option<WeatherPlaylist> {
        self.try_fetch_weather_playlist(mood, limit)
            .await
            .map_err(|e| warn!("[api] weather playlist for {} failed: {}", mood, e))
            .ok()
    }
}
