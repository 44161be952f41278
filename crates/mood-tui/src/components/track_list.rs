//! TrackList component — the current playlist with the now-playing marker.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    mood_selector::SelectionState,
    theme::{style_muted, style_playing, style_secondary, style_selected, C_LOADING, C_PRIMARY},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct TrackList {
    /// Row under the keyboard cursor. Independent of the playing track.
    pub cursor: usize,
    list_state: ListState,
}

impl TrackList {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            list_state: ListState::default(),
        }
    }

    /// Called when a new playlist arrives.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
        *self.list_state.offset_mut() = 0;
    }

    fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

impl Component for TrackList {
    fn id(&self) -> ComponentId {
        ComponentId::TrackList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = state.track_list.rows.len();
        if len == 0 {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor += 1;
            }
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = len - 1,
            KeyCode::Enter => {
                self.clamp(len);
                return vec![Action::PlayTrack(self.cursor)];
            }
            _ => {}
        }
        self.clamp(len);
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        // Skip the top border.
        if event.row <= area.y || event.row >= area.y + area.height.saturating_sub(1) {
            return vec![];
        }
        let row = (event.row - area.y - 1) as usize + self.list_state.offset();
        if row < state.track_list.rows.len() {
            self.cursor = row;
            return vec![Action::PlayTrack(row)];
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let title = state.playlist_title.as_deref().unwrap_or("Playlist");
        let badge = state.loading.then_some(Badge {
            text: "LOADING",
            color: C_LOADING,
        });
        let block = pane_chrome(title, focused, badge);

        let rows = &state.track_list.rows;
        if rows.is_empty() {
            let hint = match state.selection {
                SelectionState::NoMoodSelected => "pick a mood with 1-5",
                SelectionState::MoodSelected(_) if state.loading => "fetching songs…",
                SelectionState::MoodSelected(_) => "no songs for this mood",
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(format!(" {}", hint), style_muted())))
                    .block(block),
                area,
            );
            return;
        }

        self.clamp(rows.len());
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let marker = match (row.now_playing, state.track_list.is_playing) {
                    (true, true) => Span::styled(" ▶ ", style_playing()),
                    (true, false) => Span::styled(" ❚❚", style_secondary()),
                    _ => Span::raw("   "),
                };
                let title_style = if row.now_playing {
                    style_playing()
                } else {
                    ratatui::style::Style::default().fg(C_PRIMARY)
                };
                ListItem::new(Line::from(vec![
                    marker,
                    Span::raw(" "),
                    Span::styled(row.title.clone(), title_style),
                    Span::styled(format!("  {}", row.artist), style_secondary()),
                ]))
            })
            .collect();

        self.list_state.select(Some(self.cursor));
        frame.render_stateful_widget(
            List::new(items).block(block).highlight_style(style_selected()),
            area,
            &mut self.list_state,
        );
    }
}
