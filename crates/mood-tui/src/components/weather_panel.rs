//! WeatherPanel component — temperature, condition label and description.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::{
    action::ComponentId,
    app_state::AppState,
    component::Component,
    theme::{contrast_fg, rgb, style_muted, style_secondary, C_PRIMARY},
    widgets::pane_chrome::pane_chrome,
};

pub struct WeatherPanel;

impl WeatherPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Component for WeatherPanel {
    fn id(&self) -> ComponentId {
        ComponentId::WeatherPanel
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("weather", focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(weather) = &state.weather else {
            frame.render_widget(
                Paragraph::new(Span::styled(" waiting for weather…", style_muted())),
                inner,
            );
            return;
        };

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(inner);

        // Temperature "circle", tinted by condition
        let swatch = weather.display_color();
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {:>4} ", weather.temperature_label()),
                Style::default()
                    .fg(contrast_fg(swatch))
                    .add_modifier(Modifier::BOLD),
            )))
            .block(Block::default().style(Style::default().bg(rgb(swatch)))),
            cols[0],
        );

        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {}", weather.condition.condition),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}", weather.condition.description),
                style_secondary(),
            )),
        ];
        if let Some(mood) = weather.recommended_mood {
            lines.push(Line::from(vec![
                Span::styled(" suggests ", style_muted()),
                Span::styled(mood.as_str(), Style::default().fg(rgb(mood.color()))),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), cols[1]);
    }
}
