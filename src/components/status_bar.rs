use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Status bar: active-entry information on the left, listing size on the
/// right.
pub struct StatusBarWidget<'a> {
    entry_index: usize,
    is_dir: bool,
    path: Option<&'a str>,
    entry_count: usize,
    theme: &'a ThemeColors,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(
        entry_index: usize,
        is_dir: bool,
        path: Option<&'a str>,
        entry_count: usize,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            entry_index,
            is_dir,
            path,
            entry_count,
            theme,
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let base = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);

        let mut spans = Vec::new();
        if let Some(path) = self.path {
            let kind = if self.is_dir { "DIRECTORY" } else { "FILE" };
            let kind_style = if self.is_dir {
                base.fg(self.theme.list_dir_fg).add_modifier(Modifier::BOLD)
            } else {
                base.add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(
                format!(" ENTRY: {} · ", self.entry_index),
                base,
            ));
            spans.push(Span::styled(kind.to_string(), kind_style));
            spans.push(Span::styled(format!("  {}", path), base.fg(self.theme.dim_fg)));
        } else {
            spans.push(Span::styled(" no entries", base.fg(self.theme.dim_fg)));
        }

        // right-aligned listing size
        let right = format!("{} entries ", self.entry_count);
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let pad = width.saturating_sub(used + right.chars().count());
        spans.push(Span::styled(" ".repeat(pad), base));
        spans.push(Span::styled(right, base));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn row_text(buf: &Buffer, width: u16) -> String {
        (0..width)
            .map(|x| {
                buf.cell((x, 0))
                    .unwrap()
                    .symbol()
                    .chars()
                    .next()
                    .unwrap_or(' ')
            })
            .collect()
    }

    #[test]
    fn shows_directory_entry_info() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(2, true, Some("/home/user/docs"), 14, &tc).render(area, &mut buf);

        let text = row_text(&buf, 60);
        assert!(text.contains("ENTRY: 2"));
        assert!(text.contains("DIRECTORY"));
        assert!(text.contains("/home/user/docs"));
        assert!(text.contains("14 entries"));
    }

    #[test]
    fn shows_file_entry_info() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(5, false, Some("/home/user/a.png"), 9, &tc).render(area, &mut buf);

        let text = row_text(&buf, 60);
        assert!(text.contains("FILE"));
        assert!(!text.contains("DIRECTORY"));
    }

    #[test]
    fn empty_listing_shows_placeholder() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(0, false, None, 0, &tc).render(area, &mut buf);

        assert!(row_text(&buf, 40).contains("no entries"));
    }

    #[test]
    fn zero_area_does_not_panic() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(0, false, None, 0, &tc).render(area, &mut buf);
    }
}
