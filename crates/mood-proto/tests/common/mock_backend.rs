#![allow(dead_code)]

//! In-process stand-in for the MoodTunes backend.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const MOODS: [&str; 5] = ["happy", "sad", "energetic", "calm", "angry"];

pub struct Library {
    /// (mood, title, artist)
    pub songs: Vec<(&'static str, String, String)>,
    pub temperature: f64,
    pub condition: Value,
    pub weather_mood: &'static str,
    pub requests: AtomicUsize,
}

impl Library {
    /// Three songs per mood, fog at 12.6°C.
    pub fn seeded() -> Self {
        let songs = MOODS
            .iter()
            .flat_map(|mood| {
                (1..=3).map(move |n| (*mood, format!("{} song {}", mood, n), format!("artist {}", n)))
            })
            .collect();
        Self {
            songs,
            temperature: 12.6,
            condition: json!(2000),
            weather_mood: "mellow",
            requests: AtomicUsize::new(0),
        }
    }

    fn songs_for(&self, mood: &str, limit: usize) -> Vec<Value> {
        self.songs
            .iter()
            .filter(|(m, _, _)| *m == mood)
            .take(limit)
            .map(|(m, title, artist)| {
                json!({
                    "title": title,
                    "artist": artist,
                    "file_path": format!("/music/{}/{}.mp3", m, title.replace(' ', "_")),
                    "mood_intensity": 0.5
                })
            })
            .collect()
    }

    fn weather(&self) -> Value {
        json!({"temperature": self.temperature, "condition": self.condition})
    }
}

type Shared = Arc<Library>;

fn limit_of(q: &HashMap<String, String>) -> usize {
    q.get("limit").and_then(|l| l.parse().ok()).unwrap_or(50)
}

async fn root(State(lib): State<Shared>) -> Json<Value> {
    lib.requests.fetch_add(1, Ordering::SeqCst);
    Json(json!({"message": "MoodTunes API"}))
}

async fn moods(State(lib): State<Shared>) -> Json<Value> {
    lib.requests.fetch_add(1, Ordering::SeqCst);
    Json(json!({"moods": MOODS}))
}

async fn weather(State(lib): State<Shared>) -> Json<Value> {
    lib.requests.fetch_add(1, Ordering::SeqCst);
    Json(json!({"weather": lib.weather(), "recommended_mood": lib.weather_mood}))
}

async fn songs(
    State(lib): State<Shared>,
    Path(mood): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    lib.requests.fetch_add(1, Ordering::SeqCst);
    if !MOODS.contains(&mood.as_str()) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"songs": lib.songs_for(&mood, limit_of(&q))})))
}

async fn playlist(
    State(lib): State<Shared>,
    Path(mood): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    lib.requests.fetch_add(1, Ordering::SeqCst);
    if !MOODS.contains(&mood.as_str()) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "weather": lib.weather(),
        "user_mood": mood,
        "weather_mood": lib.weather_mood,
        "songs": lib.songs_for(&mood, limit_of(&q)),
    })))
}

/// Serve `lib` on an ephemeral port; returns the base URL.
pub async fn spawn(lib: Shared) -> String {
    let app = Router::new()
        .route("/", get(root))
        .route("/moods", get(moods))
        .route("/weather", get(weather))
        .route("/songs/:mood", get(songs))
        .route("/playlist/:mood", get(playlist))
        .with_state(lib);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
