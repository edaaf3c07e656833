use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use scrollkit_core::{Clock, HeaderMode};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render<K: Clock>(frame: &mut Frame, area: Rect, app: &App<K>) {
        let theme = &app.theme;
        let controller = &app.controller;

        let mode_str = if controller.is_resizing() {
            "RESIZE"
        } else if controller.is_fast_scrolling() {
            "FAST"
        } else if controller.is_scrolling() {
            "SCROLL"
        } else {
            "NORMAL"
        };

        let header_str = match controller.header_mode() {
            HeaderMode::Default => "flow",
            HeaderMode::Locking => "locking",
            HeaderMode::Stacking => "stacking",
        };

        let state = controller.scroll_state();
        let extents = controller.content_extents();
        let rows = controller.row_config();

        let (status_text, status_style) = match &app.status_message {
            Some(msg) => (
                format!(" {}", msg),
                theme.status().fg(theme.warning),
            ),
            None => (
                format!(
                    " {} | {} | Rows: {} | y {:.0}/{:.0} | x {:.0}/{:.0}",
                    mode_str,
                    header_str,
                    rows.row_count(),
                    state.vertical_transform,
                    extents.max_vertical_transform,
                    state.horizontal_transform,
                    extents.max_horizontal_transform,
                ),
                theme.status(),
            ),
        };

        let help_hint = " q:quit j/k:scroll gg/G:jump n/p:section m:headers ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(status_text, status_style),
            Span::styled(" ".repeat(padding_len), theme.status()),
            Span::styled(
                help_hint,
                Style::default().fg(theme.muted).bg(theme.status_bg),
            ),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme.status()), area);
    }
}
