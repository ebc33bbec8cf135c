//! Scrollable directory listing: full-rebuild rows, uniform row geometry,
//! single-row highlight, and scroll-into-view.

use std::path::PathBuf;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::theme::ThemeColors;

/// One rendered row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub is_dir: bool,
}

/// Where a row sits relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowVisibility {
    Above,
    Visible,
    Below,
}

/// State of the visual list. Rebuilt wholesale on every scan — no
/// incremental diffing; directory listings are small.
#[derive(Debug)]
pub struct EntryListState {
    rows: Vec<Row>,
    selected: usize,
    /// Top edge of the viewport, in grid lines.
    scroll_top: usize,
    /// Height of one row, taken from the first built row and applied to
    /// every row.
    row_height: usize,
    /// Last known viewport height, in grid lines.
    viewport_height: usize,
}

impl Default for EntryListState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            scroll_top: 0,
            row_height: 1,
            viewport_height: 0,
        }
    }
}

impl EntryListState {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn row_height(&self) -> usize {
        self.row_height
    }

    /// Replace every row from a fresh entry list. Rows at
    /// `index < sub_dir_count` are tagged as directories; selection and
    /// scroll reset to the top.
    pub fn rebuild(&mut self, entries: &[PathBuf], sub_dir_count: usize) {
        self.rows = (0..entries.len())
            .map(|index| Row {
                label: label_for(entries, index),
                is_dir: index < sub_dir_count,
            })
            .collect();
        self.row_height = self
            .rows
            .first()
            .map(|row| row.label.lines().count().max(1))
            .unwrap_or(1);
        self.selected = 0;
        self.scroll_top = 0;
    }

    /// Move the highlight to `index` and bring it into view. The previous
    /// row loses its highlight when the next frame re-renders.
    pub fn move_selection(&mut self, index: usize) {
        self.selected = index;
        self.scroll_into_view(index);
    }

    /// Record the viewport height for this frame and keep the selected row
    /// visible through resizes.
    pub fn sync_viewport(&mut self, height: usize) {
        self.viewport_height = height;
        self.scroll_into_view(self.selected);
    }

    /// Scroll just far enough that the row at `index` is visible: align it
    /// at the top when it sits above the viewport, at the bottom when it
    /// sits below, otherwise leave the scroll position alone.
    pub fn scroll_into_view(&mut self, index: usize) {
        let row_top = index * self.row_height;
        match self.row_visibility(index) {
            RowVisibility::Above => self.scroll_top = row_top,
            RowVisibility::Below => {
                self.scroll_top = (row_top + self.row_height).saturating_sub(self.viewport_height);
            }
            RowVisibility::Visible => {}
        }
    }

    fn row_visibility(&self, index: usize) -> RowVisibility {
        if self.viewport_height == 0 || index >= self.rows.len() {
            // nothing laid out yet
            return RowVisibility::Visible;
        }
        let row_top = index * self.row_height;
        let area_top = self.scroll_top;
        let area_bottom = area_top + self.viewport_height - 1;
        if row_top < area_top {
            RowVisibility::Above
        } else if row_top > area_bottom {
            RowVisibility::Below
        } else {
            RowVisibility::Visible
        }
    }
}

/// Display label for the entry at `index`.
///
/// Index 0 is the synthetic parent: `"/"` when the listing is a drive root
/// (the entry after it contains exactly one path separator), `".."` in any
/// deeper directory. Every other label is the final path segment.
pub fn label_for(entries: &[PathBuf], index: usize) -> String {
    if index == 0 {
        return match entries.get(1) {
            Some(next) if separator_count(&next.to_string_lossy()) == 1 => "/".to_string(),
            _ => "..".to_string(),
        };
    }
    let raw = entries
        .get(index)
        .map(|path| path.to_string_lossy().to_string())
        .unwrap_or_default();
    match raw.rfind(['/', '\\']) {
        Some(pos) => raw[pos + 1..].to_string(),
        None => raw,
    }
}

fn separator_count(path: &str) -> usize {
    path.chars().filter(|c| *c == '/' || *c == '\\').count()
}

/// Widget that renders the listing from its state.
pub struct EntryListWidget<'a> {
    state: &'a EntryListState,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> EntryListWidget<'a> {
    pub fn new(state: &'a EntryListState, theme: &'a ThemeColors) -> Self {
        Self {
            state,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }
}

impl Widget for EntryListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let visible = inner.height as usize;
        if self.state.rows.is_empty() || visible == 0 || inner.width == 0 {
            return;
        }

        for (index, row) in self.state.rows.iter().enumerate() {
            let row_top = index * self.state.row_height;
            if row_top < self.state.scroll_top {
                continue;
            }
            let offset = row_top - self.state.scroll_top;
            if offset >= visible {
                break;
            }

            let style = if index == self.state.selected {
                Style::default()
                    .bg(self.theme.list_selected_bg)
                    .fg(self.theme.list_selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else if row.is_dir {
                Style::default()
                    .fg(self.theme.list_dir_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.list_file_fg)
            };

            let marker = if row.is_dir { "▸ " } else { "  " };
            let line = Line::from(Span::styled(format!("{}{}", marker, row.label), style));
            buf.set_line(inner.x, inner.y + offset as u16, &line, inner.width);
        }
    }
}
