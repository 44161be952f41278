//! MoodBar component — the five mood buttons.

use mood_proto::Mood;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{contrast_fg, rgb, style_border, C_MUTED, C_PRIMARY},
};

pub struct MoodBar {
    /// Button rects from the last draw, for mouse hit-testing.
    button_rects: Vec<(Mood, Rect)>,
}

impl MoodBar {
    pub fn new() -> Self {
        Self {
            button_rects: Vec::new(),
        }
    }

    fn mood_for_key(code: KeyCode) -> Option<Mood> {
        match code {
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                Mood::ALL.get(idx).copied()
            }
            _ => None,
        }
    }
}

impl Component for MoodBar {
    fn id(&self) -> ComponentId {
        ComponentId::MoodBar
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match Self::mood_for_key(key.code) {
            Some(mood) => vec![Action::ActivateMood(mood)],
            None => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let pos = Position::new(event.column, event.row);
        self.button_rects
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(mood, _)| vec![Action::ActivateMood(*mood)])
            .unwrap_or_default()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                state
                    .mood_buttons
                    .iter()
                    .map(|_| Constraint::Ratio(1, state.mood_buttons.len().max(1) as u32)),
            )
            .split(area);

        self.button_rects.clear();
        for (i, (button, rect)) in state.mood_buttons.iter().zip(cols.iter()).enumerate() {
            let color = button.color();
            let label = format!("{} {}", i + 1, button.mood.title());

            let (style, border) = if button.active {
                (
                    Style::default()
                        .bg(rgb(color))
                        .fg(contrast_fg(color))
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(rgb(color)),
                )
            } else if button.disabled {
                (Style::default().fg(C_MUTED), style_border(false))
            } else {
                (Style::default().fg(rgb(color)), style_border(false))
            };
            let style = if button.disabled {
                style.add_modifier(Modifier::DIM)
            } else {
                style
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .style(Style::default().fg(C_PRIMARY));
            frame.render_widget(
                Paragraph::new(label)
                    .style(style)
                    .alignment(Alignment::Center)
                    .block(block),
                *rect,
            );
            self.button_rects.push((button.mood, *rect));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    #[test]
    fn test_digit_keys_follow_button_order() {
        let state = AppState::new(String::new());
        let mut bar = MoodBar::new();
        for (i, mood) in Mood::ALL.into_iter().enumerate() {
            let c = char::from_digit(i as u32 + 1, 10).unwrap();
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            assert_eq!(bar.handle_key(key, &state), vec![Action::ActivateMood(mood)]);
        }
        let key = KeyEvent::new(KeyCode::Char('6'), KeyModifiers::NONE);
        assert!(bar.handle_key(key, &state).is_empty());
    }
}
