//! Pagination bar
//!
//! "Showing 1-25 of 40 items" on the left, the page size selector and page
//! controls on the right. Hidden entirely when there is nothing to page through.

use crate::action::Action;
use crate::component::Component;
use crate::model::Pagination;
use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;

const PREVIOUS_LABEL: &str = "‹ Prev";
const NEXT_LABEL: &str = "Next ›";
const GAP: &str = "  ";

/// Row and column span of a clickable label
type Hit = Option<(u16, Range<u16>)>;

#[derive(Debug, Default)]
pub struct PaginationBar {
    pagination: Pagination,
    page_size_hit: Hit,
    previous_hit: Hit,
    next_hit: Hit,
}

impl PaginationBar {
    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = pagination;
    }

    pub fn is_visible(&self) -> bool {
        self.pagination.total_items() > 0
    }

    fn page_size_label(&self) -> String {
        format!("{} per page", self.pagination.page_size())
    }

    fn controls(&self) -> Line<'static> {
        let enabled = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray);
        let p = &self.pagination;

        Line::from(vec![
            Span::styled(self.page_size_label(), Style::default().fg(Color::Magenta)),
            Span::raw(GAP),
            Span::styled(
                PREVIOUS_LABEL,
                if p.has_previous() { enabled } else { disabled },
            ),
            Span::raw(format!(
                "  Page {} of {}  ",
                p.current_page(),
                p.total_pages()
            )),
            Span::styled(NEXT_LABEL, if p.has_next() { enabled } else { disabled }),
        ])
    }
}

impl Component for PaginationBar {
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let hit = |region: &Hit| {
            region
                .as_ref()
                .is_some_and(|(y, xs)| *y == mouse.row && xs.contains(&mouse.column))
        };

        let action = if hit(&self.page_size_hit) {
            Some(Action::CyclePageSize)
        } else if hit(&self.previous_hit) && self.pagination.has_previous() {
            Some(Action::PrevPage)
        } else if hit(&self.next_hit) && self.pagination.has_next() {
            Some(Action::NextPage)
        } else {
            None
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.page_size_hit = None;
        self.previous_hit = None;
        self.next_hit = None;
        let Some(summary) = self.pagination.summary() else {
            return Ok(());
        };

        let controls = self.controls();
        let controls_width = controls.width() as u16;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(controls_width + 1)])
            .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", summary),
                Style::default().fg(Color::Gray),
            ))),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(controls).alignment(Alignment::Right),
            chunks[1],
        );

        // Controls are right-aligned to the edge of their chunk
        let right = chunks[1].x + chunks[1].width;
        let start = right.saturating_sub(controls_width);
        let size_width = self.page_size_label().chars().count() as u16;
        let previous_start = start + size_width + GAP.len() as u16;
        let previous_width = PREVIOUS_LABEL.chars().count() as u16;
        let next_width = NEXT_LABEL.chars().count() as u16;
        self.page_size_hit = Some((area.y, start..start + size_width));
        self.previous_hit = Some((area.y, previous_start..previous_start + previous_width));
        self.next_hit = Some((area.y, right.saturating_sub(next_width)..right));

        Ok(())
    }
}
