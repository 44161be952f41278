//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns the controllers (`MoodSelector`, `PlaybackController`), the
//!   components, and `AppState` (read-only projection for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks (terminal input, song fetches). The weather poller and the playlist
//!   bus feed their own receivers; `next_event` merges all three.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Everything that touches controller state runs on this loop, one message
//!   at a time.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use mood_proto::config::Config;
use mood_proto::{ApiClient, Mood, Track, WeatherSnapshot};

use crate::{
    action::Action,
    app_state::AppState,
    bus::{PlaylistBus, PlaylistSubscriber, PlaylistUpdated},
    component::Component,
    components::{
        controls::Controls, help_overlay::HelpOverlay, mood_bar::MoodBar, track_list::TrackList,
        weather_panel::WeatherPanel,
    },
    mood_selector::{FetchTicket, MoodSelector, SelectionState},
    player::PlaybackController,
    theme::{rgb, style_muted, C_ACCENT},
    weather_poller::WeatherPoller,
};

// ── Internal event bus ────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum AppMessage {
    Event(Event),
    /// A song fetch settled. `None` when it failed.
    SongsFetched(FetchTicket, Option<Vec<Track>>),
    PlaylistUpdated(PlaylistUpdated),
    WeatherUpdated(WeatherSnapshot),
}

/// Which endpoint a mood fetch goes to.
#[derive(Debug, Clone, Copy)]
enum SongSource {
    /// `/songs/{mood}`
    Mood,
    /// `/playlist/{mood}`: the mood's songs plus the current weather.
    WeatherMix,
}

/// Screen areas from the last draw, for mouse routing.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    mood_bar: Rect,
    tracks: Rect,
    controls: Rect,
}

pub struct App {
    client: ApiClient,
    song_limit: usize,
    weather_interval: Duration,

    selector: MoodSelector,
    player: PlaybackController,
    bus: PlaylistBus,
    playlist_rx: PlaylistSubscriber,

    state: AppState,

    mood_bar: MoodBar,
    weather_panel: WeatherPanel,
    track_list: TrackList,
    controls: Controls,
    help: HelpOverlay,
    areas: PaneAreas,

    tx: mpsc::Sender<AppMessage>,
    rx: mpsc::Receiver<AppMessage>,
    weather_tx: mpsc::Sender<WeatherSnapshot>,
    weather_rx: mpsc::Receiver<WeatherSnapshot>,
    weather_poller: Option<WeatherPoller>,

    should_quit: bool,
}

impl App {
    pub fn new(client: ApiClient, config: &Config) -> Self {
        let (tx, rx) = mpsc::channel(256);
        let (weather_tx, weather_rx) = mpsc::channel(4);
        let bus = PlaylistBus::new(16);
        let playlist_rx = bus.subscribe();

        let selector = MoodSelector::new(config.selector.stale_responses);
        let player = PlaybackController::new();
        let mut state = AppState::new(client.base_url().to_string());
        state.sync(&selector, &player);

        Self {
            client,
            song_limit: config.backend.song_limit,
            weather_interval: config.weather.poll_interval(),
            selector,
            player,
            bus,
            playlist_rx,
            state,
            mood_bar: MoodBar::new(),
            weather_panel: WeatherPanel::new(),
            track_list: TrackList::new(),
            controls: Controls::new(),
            help: HelpOverlay::new(),
            areas: PaneAreas::default(),
            tx,
            rx,
            weather_tx,
            weather_rx,
            weather_poller: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls with a timeout so the thread notices when the App is gone.
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(250)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        self.start_weather();

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        let result = loop {
            if needs_redraw {
                if let Err(e) = terminal.draw(|f| self.draw(f)) {
                    break Err(e.into());
                }
            }

            if self.should_quit {
                break Ok(());
            }

            match self.next_event().await {
                Some(msg) => needs_redraw = self.handle_message(msg),
                None => break Ok(()),
            }
        };

        // ── Teardown ──────────────────────────────────────────────────────────
        if let Some(poller) = self.weather_poller.take() {
            poller.stop().await;
        }
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        info!("moodtunes exiting");
        result
    }

    /// Start polling the weather (fetches once immediately).
    pub fn start_weather(&mut self) {
        if self.weather_poller.is_some() {
            return;
        }
        self.weather_poller = Some(WeatherPoller::spawn(
            self.client.clone(),
            self.weather_interval,
            self.weather_tx.clone(),
        ));
    }

    async fn next_event(&mut self) -> Option<AppMessage> {
        tokio::select! {
            Some(msg) = self.rx.recv() => Some(msg),
            Some(update) = self.playlist_rx.recv() => Some(AppMessage::PlaylistUpdated(update)),
            Some(snapshot) = self.weather_rx.recv() => Some(AppMessage::WeatherUpdated(snapshot)),
            else => None,
        }
    }

    /// Apply one message. Returns whether the screen needs redrawing.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                for action in self.handle_mouse(mouse) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Resize(..)) => {}
            AppMessage::Event(_) => return false,

            AppMessage::SongsFetched(ticket, result) => {
                if let Some(update) = self.selector.on_fetch_settled(ticket, result) {
                    self.bus.publish(update);
                }
            }

            AppMessage::PlaylistUpdated(update) => {
                self.player.on_mood_changed(&update);
                self.track_list.reset_cursor();
            }

            AppMessage::WeatherUpdated(snapshot) => {
                self.state.weather = Some(snapshot);
            }
        }
        self.state.sync(&self.selector, &self.player);
        true
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        // Ctrl+C quits from anywhere, including the help overlay.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }
        if self.help.visible {
            return self.help.handle_key(key, &self.state);
        }
        match key.code {
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Char('?') => vec![Action::ToggleHelp],
            KeyCode::Char(' ') => vec![Action::TogglePlayPause],
            KeyCode::Char('n') => vec![Action::Next],
            KeyCode::Char('p') => vec![Action::Prev],
            KeyCode::Char('w') => vec![Action::WeatherMix],
            _ => {
                let actions = self.mood_bar.handle_key(key, &self.state);
                if !actions.is_empty() {
                    return actions;
                }
                self.track_list.handle_key(key, &self.state)
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Vec<Action> {
        if self.help.visible {
            return vec![];
        }
        let pos = Position::new(mouse.column, mouse.row);
        let areas = self.areas;
        let (component, area): (&mut dyn Component, Rect) = if areas.mood_bar.contains(pos) {
            (&mut self.mood_bar, areas.mood_bar)
        } else if areas.tracks.contains(pos) {
            (&mut self.track_list, areas.tracks)
        } else if areas.controls.contains(pos) {
            (&mut self.controls, areas.controls)
        } else {
            return vec![];
        };
        let actions = component.handle_mouse(mouse, area, &self.state);
        if !actions.is_empty() {
            debug!("mouse on {:?} → {:?}", component.id(), actions);
        }
        actions
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        debug!("dispatch {:?}", action);
        match action {
            Action::ActivateMood(mood) => {
                if let Some(ticket) = self.selector.activate(mood) {
                    self.spawn_song_fetch(ticket, SongSource::Mood);
                }
            }
            Action::WeatherMix => {
                // Current mood, else what the weather suggests.
                let mood = self
                    .selector
                    .current_mood()
                    .or_else(|| self.state.weather.as_ref().and_then(|w| w.recommended_mood))
                    .unwrap_or(Mood::Calm);
                if let Some(ticket) = self.selector.activate(mood) {
                    self.spawn_song_fetch(ticket, SongSource::WeatherMix);
                }
            }
            Action::PlayTrack(idx) => self.player.play(idx),
            Action::TogglePlayPause => self.player.toggle_play_pause(),
            Action::Next => self.player.next(),
            Action::Prev => self.player.previous(),
            Action::ToggleHelp => self.help.toggle(),
            Action::Quit => self.should_quit = true,
        }
        self.state.sync(&self.selector, &self.player);
    }

    /// Run the fetch on its own task; the ticket always comes back, even if
    /// that task panics, so the mood buttons get re-enabled.
    fn spawn_song_fetch(&self, ticket: FetchTicket, source: SongSource) {
        let client = self.client.clone();
        let limit = self.song_limit;
        let tx = self.tx.clone();
        let weather_tx = self.weather_tx.clone();
        tokio::spawn(async move {
            let fetch = tokio::spawn(async move {
                match source {
                    SongSource::Mood => match client.try_fetch_songs(ticket.mood, limit).await {
                        Ok(tracks) => Some(tracks),
                        Err(e) => {
                            warn!("[mood] songs for {} unavailable: {}", ticket.mood, e);
                            None
                        }
                    },
                    SongSource::WeatherMix => {
                        let mix = client.fetch_weather_playlist(ticket.mood, limit).await?;
                        info!(
                            "[mood] weather mix: {} + {} → {} tracks",
                            mix.user_mood,
                            mix.weather_mood,
                            mix.tracks.len()
                        );
                        let mut weather = mix.weather;
                        weather.recommended_mood = Some(mix.weather_mood);
                        if weather_tx.send(weather).await.is_err() {
                            debug!("[mood] app gone, dropping weather from mix");
                        }
                        Some(mix.tracks)
                    }
                }
            });
            let result = fetch.await.unwrap_or_else(|e| {
                error!("[mood] fetch task for {} failed: {}", ticket.mood, e);
                None
            });
            if tx.send(AppMessage::SongsFetched(ticket, result)).await.is_err() {
                debug!("[mood] app gone, dropping fetch #{} result", ticket.seq);
            }
        });
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(f.area());

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(rows[1]);

        self.areas = PaneAreas {
            mood_bar: top[1],
            tracks: rows[2],
            controls: rows[3],
        };

        f.render_widget(Paragraph::new(self.header_line()), rows[0]);
        self.weather_panel.draw(f, top[0], false, &self.state);
        self.mood_bar.draw(f, top[1], false, &self.state);
        self.track_list.draw(f, rows[2], true, &self.state);
        self.controls.draw(f, rows[3], false, &self.state);
        self.help.draw(f, f.area(), true, &self.state);
    }

    fn header_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            " moodtunes ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        )];
        match self.state.selection {
            SelectionState::MoodSelected(mood) => {
                spans.push(Span::styled("mood: ", style_muted()));
                spans.push(Span::styled(
                    mood.as_str(),
                    Style::default().fg(rgb(mood.color())),
                ));
            }
            SelectionState::NoMoodSelected => {
                spans.push(Span::styled("no mood selected", style_muted()));
            }
        }
        Line::from(spans)
    }
}
