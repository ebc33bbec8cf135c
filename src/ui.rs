use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::components::drive_bar::DriveBarWidget;
use crate::components::entry_list::EntryListWidget;
use crate::components::preview::PreviewWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::theme::ThemeColors;

/// Render the application UI.
pub fn render(app: &mut App, theme: &ThemeColors, frame: &mut Frame) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(
        DriveBarWidget::new(app.drives(), app.active_drive(), theme),
        rows[0],
    );

    let (list_area, preview_area): (Rect, Option<Rect>) = if app.preview_enabled() {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);
        (halves[0], Some(halves[1]))
    } else {
        (rows[1], None)
    };

    // Keep the selected row visible; the border eats two lines.
    let visible_height = list_area.height.saturating_sub(2) as usize;
    app.list.sync_viewport(visible_height);

    let list_block = Block::default()
        .title(" Entries ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg));
    frame.render_widget(
        EntryListWidget::new(&app.list, theme).block(list_block),
        list_area,
    );

    if let Some(area) = preview_area {
        let preview_block = Block::default()
            .title(" Preview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_fg));
        frame.render_widget(
            PreviewWidget::new(&app.preview, theme).block(preview_block),
            area,
        );
    }

    let path = app.selected_path();
    frame.render_widget(
        StatusBarWidget::new(
            app.active_entry(),
            app.selected_is_dir(),
            path.as_deref(),
            app.entry_count(),
            theme,
        ),
        rows[2],
    );
}
