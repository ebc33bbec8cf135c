//! Drive selector bar: every enumerated drive in a row, the active one
//! highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

pub struct DriveBarWidget<'a> {
    drives: &'a [String],
    active: usize,
    theme: &'a ThemeColors,
}

impl<'a> DriveBarWidget<'a> {
    pub fn new(drives: &'a [String], active: usize, theme: &'a ThemeColors) -> Self {
        Self {
            drives,
            active,
            theme,
        }
    }
}

impl Widget for DriveBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut spans = vec![Span::styled(
            " DRIVES ",
            Style::default().fg(self.theme.dim_fg),
        )];
        for (index, drive) in self.drives.iter().enumerate() {
            let style = if index == self.active {
                Style::default()
                    .bg(self.theme.drive_active_bg)
                    .fg(self.theme.drive_active_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.drive_fg)
            };
            spans.push(Span::styled(format!(" {} ", drive), style));
            spans.push(Span::raw(" "));
        }

        let line = Line::from(spans).style(Style::default().bg(self.theme.drive_bg));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
