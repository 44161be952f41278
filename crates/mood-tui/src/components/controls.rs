//! Controls component — prev / play-pause / next strip and the current track.

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_muted, style_playing, style_secondary, C_ACCENT, C_PRIMARY},
};

const PREV: &str = " ⏮ ";
const NEXT: &str = " ⏭ ";

pub struct Controls;

impl Controls {
    pub fn new() -> Self {
        Self
    }

    /// Glyph on the play button: pause bars while playing.
    pub fn play_glyph(is_playing: bool) -> &'static str {
        if is_playing {
            " ❚❚ "
        } else {
            " ▶ "
        }
    }
}

impl Component for Controls {
    fn id(&self) -> ComponentId {
        ComponentId::Controls
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) || event.row != area.y {
            return vec![];
        }
        // Buttons are laid out left to right from the area origin.
        let x = event.column.saturating_sub(area.x) as usize;
        let prev_end = PREV.chars().count();
        let play_end = prev_end + Self::play_glyph(state.track_list.is_playing).chars().count();
        let next_end = play_end + NEXT.chars().count();
        if x < prev_end {
            vec![Action::Prev]
        } else if x < play_end {
            vec![Action::TogglePlayPause]
        } else if x < next_end {
            vec![Action::Next]
        } else {
            vec![]
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let view = &state.track_list;
        let button = Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled(PREV, button),
            Span::styled(
                Self::play_glyph(view.is_playing),
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(NEXT, button),
            Span::raw("  "),
        ];
        match view.now_playing() {
            Some(row) => {
                spans.push(Span::styled(row.title.clone(), style_playing()));
                spans.push(Span::styled(format!(" – {}", row.artist), style_secondary()));
            }
            None => spans.push(Span::styled("nothing queued", style_muted())),
        }

        let hints = Line::from(Span::styled(
            " 1-5 mood  w weather mix  space play/pause  n/p next/prev  enter play  ? help  q quit",
            style_muted(),
        ));
        frame.render_widget(Paragraph::new(vec![Line::from(spans), hints]), area);
    }
}
