//! Screen layout

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen areas, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub title: Rect,
    pub table: Rect,
    pub pagination: Option<Rect>,
    pub status: Rect,
    pub help: Rect,
}

/// Popup of at most `width` x `height` centered in `area`
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn calculate_main_layout(area: Rect, show_pagination: bool) -> MainLayout {
    let mut constraints = vec![Constraint::Length(1), Constraint::Min(3)];
    if show_pagination {
        constraints.push(Constraint::Length(1));
    }
    constraints.extend([Constraint::Length(1), Constraint::Length(1)]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (pagination, rest) = if show_pagination {
        (Some(chunks[2]), 3)
    } else {
        (None, 2)
    };

    MainLayout {
        title: chunks[0],
        table: chunks[1],
        pagination,
        status: chunks[rest],
        help: chunks[rest + 1],
    }
}
