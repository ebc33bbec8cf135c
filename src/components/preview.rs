use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::preview::PreviewState;
use crate::theme::ThemeColors;

/// Preview widget that renders the probed image metadata, or a placeholder
/// when nothing is loaded.
pub struct PreviewWidget<'a> {
    preview_state: &'a PreviewState,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(preview_state: &'a PreviewState, theme: &'a ThemeColors) -> Self {
        Self {
            preview_state,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }
}

/// `1536` → `"1.5 KiB"`; keeps the pane readable for large images.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

impl Widget for PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let Some(image) = self.preview_state.image() else {
            let line = Line::from(Span::styled(
                "No preview",
                Style::default().fg(self.theme.dim_fg),
            ));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        };

        let lines = [
            Line::from(Span::styled(
                image.name.clone(),
                Style::default()
                    .fg(self.theme.preview_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    image.format.clone(),
                    Style::default().fg(self.theme.accent_fg),
                ),
                Span::styled(
                    format!(" · {}×{}", image.width, image.height),
                    Style::default().fg(self.theme.preview_fg),
                ),
            ]),
            Line::from(Span::styled(
                format_bytes(image.bytes),
                Style::default().fg(self.theme.dim_fg),
            )),
        ];

        for (i, line) in lines.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PreviewImage;
    use crate::theme;
    use ratatui::widgets::Borders;

    fn row_text(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| {
                buf.cell((x, y))
                    .unwrap()
                    .symbol()
                    .chars()
                    .next()
                    .unwrap_or(' ')
            })
            .collect()
    }

    #[test]
    fn empty_preview_shows_placeholder() {
        let state = PreviewState::default();
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&state, &tc)
            .block(Block::default().borders(Borders::ALL).title(" Preview "))
            .render(area, &mut buf);

        assert!(row_text(&buf, 1, 30).contains("No preview"));
    }

    #[test]
    fn loaded_image_shows_metadata() {
        let mut state = PreviewState::default();
        state.show(PreviewImage {
            name: "shot.png".into(),
            format: "Png".into(),
            width: 640,
            height: 480,
            bytes: 2048,
        });
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&state, &tc).render(area, &mut buf);

        assert!(row_text(&buf, 0, 30).contains("shot.png"));
        assert!(row_text(&buf, 1, 30).contains("Png"));
        assert!(row_text(&buf, 1, 30).contains("640×480"));
        assert!(row_text(&buf, 2, 30).contains("2.0 KiB"));
    }

    #[test]
    fn format_bytes_scales_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn zero_area_does_not_panic() {
        let state = PreviewState::default();
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&state, &tc).render(area, &mut buf);
    }
}
