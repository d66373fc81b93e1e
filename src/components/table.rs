//! Table component
//!
//! Paints the engine's view model as aligned lines and routes focus,
//! keyboard activation and mouse clicks back into the engine. Rows arrive
//! already sorted and paged from the App; the component never reorders them.

use crate::action::Action;
use crate::component::Component;
use crate::table::{
    is_activation_key, Align, DataTable, HeaderCell, Row, RowKey, SortState, TableView,
    ViewModel,
};
use crate::table::view::{BodyItem, StatusView};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

const SEPARATOR: &str = " │ ";
const SEPARATOR_WIDTH: usize = 3;
/// Width of the expand pseudo-column (one glyph)
const EXPAND_WIDTH: usize = 1;
/// Cap for columns sized by their content
const MAX_NATURAL_WIDTH: usize = 40;
/// Pixels per terminal cell when a width hint is given in `px`
const CELL_PX: f64 = 8.0;
const TRUNCATION_MARK: &str = "…";

/// Which part of the table holds keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    Header,
    Body,
}

/// Screen geometry recorded by the last draw, used for mouse hit testing
#[derive(Debug, Default)]
struct HitMap {
    header_y: Option<u16>,
    header_cells: Vec<(Range<u16>, String)>,
    rows: Vec<(u16, RowKey)>,
}

/// Lines produced for one paint of a [`TableView`]
#[derive(Debug, Default)]
pub struct PaintedTable {
    /// Header row and separator
    pub header: Vec<Line<'static>>,
    pub body: Vec<Line<'static>>,
    /// Horizontal span of each header cell, by column key
    pub header_cells: Vec<(Range<usize>, String)>,
    /// Body line index of each data row
    pub row_lines: Vec<(usize, RowKey)>,
    pub focused_line: Option<usize>,
}

pub struct TableComponent {
    engine: DataTable,
    /// Current page, in display order
    rows: Vec<Row>,
    sort: SortState,
    area: FocusArea,
    header_index: usize,
    row_index: usize,
    scroll: usize,
    hits: HitMap,
}

impl TableComponent {
    pub fn new(engine: DataTable) -> Self {
        Self {
            engine,
            rows: Vec::new(),
            sort: SortState::unsorted(),
            area: FocusArea::Body,
            header_index: 0,
            row_index: 0,
            scroll: 0,
            hits: HitMap::default(),
        }
    }

    pub fn engine(&self) -> &DataTable {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DataTable {
        &mut self.engine
    }

    /// Replace the rows and sort descriptor shown by the table
    pub fn set_props(&mut self, rows: Vec<Row>, sort: SortState) {
        self.rows = rows;
        self.sort = sort;
        self.row_index = self.row_index.min(self.rows.len().saturating_sub(1));
        self.header_index = self
            .header_index
            .min(self.focusable_headers().len().saturating_sub(1));
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn focus_area(&self) -> FocusArea {
        self.area
    }

    /// Move row focus back to the top, e.g. after a page change
    pub fn reset_row_focus(&mut self) {
        self.row_index = 0;
        self.scroll = 0;
    }

    pub fn view(&self) -> ViewModel {
        self.engine.build(&self.rows, &self.sort)
    }

    /// Headers and rows only exist while the view is a table; loading and
    /// empty states have nothing to focus or activate
    fn shows_table(&self) -> bool {
        !self.engine.config().is_loading && !self.rows.is_empty()
    }

    /// Keys of the headers that take keyboard focus
    fn focusable_headers(&self) -> Vec<String> {
        self.engine
            .columns()
            .iter()
            .filter(|column| column.sortable)
            .map(|column| column.key.clone())
            .collect()
    }

    fn focused_header(&self) -> Option<String> {
        match self.area {
            FocusArea::Header => self.focusable_headers().get(self.header_index).cloned(),
            FocusArea::Body => None,
        }
    }

    fn focused_row(&self) -> Option<usize> {
        match self.area {
            FocusArea::Body if self.row_index < self.rows.len() => Some(self.row_index),
            _ => None,
        }
    }

    /// One-line description of the focused element and its accessibility state
    pub fn describe_focus(&self) -> Option<String> {
        let view = self.view();
        let table = view.as_table()?;
        match self.area {
            FocusArea::Header => {
                let key = self.focused_header()?;
                let cell = table.header.cells.iter().find(|cell| cell.key == key)?;
                let state = match cell.aria_sort {
                    Some(sort) => format!("sorted {}", sort.token()),
                    None => "not sorted".to_string(),
                };
                Some(format!("{} ({}, {})", cell.label, cell.role, state))
            }
            FocusArea::Body => {
                let row = table.rows().nth(self.focused_row()?)?;
                Some(match row.aria_expanded {
                    Some(expanded) => format!(
                        "Row {} ({}, {})",
                        row.key,
                        row.role,
                        if expanded { "expanded" } else { "collapsed" }
                    ),
                    None => format!("Row {} ({})", row.key, row.role),
                })
            }
        }
    }

    /// Route Enter/Space on the focused header or row through the engine
    fn activate_focused(&mut self, key: KeyEvent) -> Option<Action> {
        if !self.shows_table() {
            return None;
        }
        match self.area {
            FocusArea::Header => {
                let column = self.focused_header()?;
                let response = self.engine.handle_header_key(&column, key, &self.sort);
                response.sort.map(Action::Sort)
            }
            FocusArea::Body => {
                let row_key = self.rows.get(self.row_index).map(|row| self.engine.key_of(row))?;
                self.engine.handle_row_key(&row_key, key);
                None
            }
        }
    }

    fn move_row(&mut self, forward: bool) {
        match (self.area, forward) {
            (FocusArea::Header, true) => self.area = FocusArea::Body,
            (FocusArea::Header, false) => {}
            (FocusArea::Body, true) => {
                self.row_index = (self.row_index + 1).min(self.rows.len().saturating_sub(1));
            }
            (FocusArea::Body, false) => {
                if self.row_index == 0 {
                    if !self.focusable_headers().is_empty() {
                        self.area = FocusArea::Header;
                    }
                } else {
                    self.row_index -= 1;
                }
            }
        }
    }

    fn move_column(&mut self, forward: bool) {
        let count = self.focusable_headers().len();
        if count == 0 {
            return;
        }
        self.area = FocusArea::Header;
        self.header_index = if forward {
            (self.header_index + 1).min(count - 1)
        } else {
            self.header_index.saturating_sub(1)
        };
    }

    /// Keep the focused line inside a body viewport of `height` lines
    fn scroll_to(&mut self, focused_line: Option<usize>, total: usize, height: usize) {
        if let Some(line) = focused_line {
            if line < self.scroll {
                self.scroll = line;
            } else if height > 0 && line >= self.scroll + height {
                self.scroll = line + 1 - height;
            }
        }
        self.scroll = self.scroll.min(total.saturating_sub(height));
    }
}

impl Component for TableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Activation keys never fall through to scrolling
        if is_activation_key(&key) {
            return Ok(self.activate_focused(key));
        }

        let action = match key.code {
            KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleFocus),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevColumn),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextColumn),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.hits.header_y == Some(mouse.row) {
                    self.hits
                        .header_cells
                        .iter()
                        .find(|(span, _)| span.contains(&mouse.column))
                        .map(|(_, key)| Action::ActivateHeader(key.clone()))
                } else {
                    self.hits
                        .rows
                        .iter()
                        .find(|(y, _)| *y == mouse.row)
                        .map(|(_, key)| Action::ActivateRow(key.clone()))
                }
            }
            MouseEventKind::ScrollDown => Some(Action::NextRow),
            MouseEventKind::ScrollUp => Some(Action::PrevRow),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let focus_action = matches!(
            action,
            Action::ToggleFocus
                | Action::NextColumn
                | Action::PrevColumn
                | Action::ActivateHeader(_)
                | Action::ActivateRow(_)
        );
        if focus_action && !self.shows_table() {
            return Ok(None);
        }

        match action {
            Action::ToggleFocus => {
                self.area = match self.area {
                    FocusArea::Body if !self.focusable_headers().is_empty() => FocusArea::Header,
                    _ => FocusArea::Body,
                };
            }
            Action::NextColumn => self.move_column(true),
            Action::PrevColumn => self.move_column(false),
            Action::NextRow => self.move_row(true),
            Action::PrevRow => self.move_row(false),
            Action::FirstRow => {
                self.area = FocusArea::Body;
                self.row_index = 0;
            }
            Action::LastRow => {
                self.area = FocusArea::Body;
                self.row_index = self.rows.len().saturating_sub(1);
            }
            Action::ActivateHeader(column) => {
                if let Some(index) = self.focusable_headers().iter().position(|k| *k == column) {
                    self.area = FocusArea::Header;
                    self.header_index = index;
                }
                return Ok(self.engine.activate_header(&column, &self.sort).map(Action::Sort));
            }
            Action::ActivateRow(key) => {
                let index = self.rows.iter().position(|row| self.engine.key_of(row) == key);
                if let Some(index) = index {
                    self.area = FocusArea::Body;
                    self.row_index = index;
                }
                self.engine.activate_row(&key);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.hits = HitMap::default();
        let view = self.view();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.engine.config().aria_label))
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let table = match &view {
            ViewModel::Loading(status) => {
                draw_status(frame, inner, status, Color::Yellow);
                return Ok(());
            }
            ViewModel::Empty(status) => {
                draw_status(frame, inner, status, Color::DarkGray);
                return Ok(());
            }
            ViewModel::Table(table) => table,
        };

        let focused_header = self.focused_header();
        let painted = paint_table(
            table,
            inner.width as usize,
            focused_header.as_deref(),
            self.focused_row(),
        );

        let header_height = (painted.header.len() as u16).min(inner.height);
        let header_area = Rect::new(inner.x, inner.y, inner.width, header_height);
        let body_area = Rect::new(
            inner.x,
            inner.y + header_height,
            inner.width,
            inner.height.saturating_sub(header_height),
        );
        let visible_height = body_area.height as usize;
        self.scroll_to(painted.focused_line, painted.body.len(), visible_height);

        frame.render_widget(Paragraph::new(painted.header.clone()), header_area);
        frame.render_widget(
            Paragraph::new(painted.body.clone()).scroll((self.scroll as u16, 0)),
            body_area,
        );

        if header_height > 0 {
            self.hits.header_y = Some(header_area.y);
            self.hits.header_cells = painted
                .header_cells
                .iter()
                .map(|(span, key)| {
                    let start = inner.x.saturating_add(span.start as u16);
                    let end = inner.x.saturating_add(span.end as u16);
                    (start..end, key.clone())
                })
                .collect();
        }
        self.hits.rows = painted
            .row_lines
            .iter()
            .filter(|(line, _)| *line >= self.scroll && *line < self.scroll + visible_height)
            .map(|(line, key)| (body_area.y + (line - self.scroll) as u16, key.clone()))
            .collect();

        let total = painted.body.len();
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

fn draw_status(frame: &mut Frame, area: Rect, status: &StatusView, color: Color) {
    let top_padding = area.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..top_padding).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        status.message.clone(),
        Style::default().fg(color).add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Painting
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve a width hint to terminal cells: `"12"`, `"20%"` of `available`,
/// or `"160px"` at eight pixels per cell
pub fn parse_width(hint: &str, available: usize) -> Option<usize> {
    let hint = hint.trim();
    let cells = if let Some(percent) = hint.strip_suffix('%') {
        let percent: f64 = percent.trim().parse().ok()?;
        (available as f64 * percent / 100.0).floor()
    } else if let Some(px) = hint.strip_suffix("px") {
        let px: f64 = px.trim().parse().ok()?;
        (px / CELL_PX).round()
    } else {
        hint.parse::<f64>().ok()?.round()
    };
    let cells = cells as usize;
    (cells > 0).then_some(cells)
}

fn header_text(cell: &HeaderCell) -> String {
    match cell.indicator {
        Some(indicator) => format!("{} {}", cell.label, indicator),
        None => cell.label.clone(),
    }
}

fn column_widths(view: &TableView, available: usize) -> Vec<usize> {
    view.header
        .cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            if let Some(width) = cell.width.as_deref().and_then(|w| parse_width(w, available)) {
                return width;
            }
            let content = view
                .rows()
                .filter_map(|row| row.cells.get(index))
                .map(|cell| cell.content.width())
                .max()
                .unwrap_or(0);
            header_text(cell)
                .chars()
                .map(|c| c.width().unwrap_or(0))
                .sum::<usize>()
                .max(content)
                .clamp(1, MAX_NATURAL_WIDTH)
        })
        .collect()
}

/// Truncate or pad `content` to exactly `width` cells
fn fit(content: &Line<'static>, width: usize, align: Align) -> Vec<Span<'static>> {
    let total = content.width();
    let overflow = total > width;
    let budget = if overflow { width.saturating_sub(1) } else { width };

    let mut spans = Vec::new();
    let mut used = 0;
    'spans: for span in &content.spans {
        let style = content.style.patch(span.style);
        let mut text = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                if !text.is_empty() {
                    spans.push(Span::styled(text, style));
                }
                break 'spans;
            }
            text.push(ch);
            used += w;
        }
        if !text.is_empty() {
            spans.push(Span::styled(text, style));
        }
    }
    if overflow && width > 0 {
        spans.push(Span::styled(TRUNCATION_MARK, Style::default().fg(Color::DarkGray)));
        used += 1;
    }

    let pad = width.saturating_sub(used);
    let (left, right) = match align {
        Align::Left => (0, pad),
        Align::Right => (pad, 0),
        Align::Center => (pad / 2, pad - pad / 2),
    };
    if left > 0 {
        spans.insert(0, Span::raw(" ".repeat(left)));
    }
    if right > 0 {
        spans.push(Span::raw(" ".repeat(right)));
    }
    spans
}

fn separator() -> Span<'static> {
    Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray))
}

/// Lay out a table view into lines `width` cells wide
pub fn paint_table(
    view: &TableView,
    width: usize,
    focused_header: Option<&str>,
    focused_row: Option<usize>,
) -> PaintedTable {
    let widths = column_widths(view, width);
    let expand = view.header.expand.is_some();
    let mut painted = PaintedTable::default();

    // Header
    let mut spans = Vec::new();
    let mut x = 0;
    if expand {
        spans.push(Span::raw(" ".repeat(EXPAND_WIDTH)));
        spans.push(separator());
        x += EXPAND_WIDTH + SEPARATOR_WIDTH;
    }
    for (index, cell) in view.header.cells.iter().enumerate() {
        if index > 0 {
            spans.push(separator());
            x += SEPARATOR_WIDTH;
        }
        let mut style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        if cell.aria_sort.is_some() {
            style = style.fg(Color::Yellow);
        }
        if focused_header == Some(cell.key.as_str()) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let label = Line::from(Span::styled(header_text(cell), style));
        spans.extend(fit(&label, widths[index], cell.align.unwrap_or(Align::Left)));
        painted
            .header_cells
            .push((x..x + widths[index], cell.key.clone()));
        x += widths[index];
    }
    painted.header.push(Line::from(spans));

    let mut rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    if expand {
        rule.insert(0, "─".repeat(EXPAND_WIDTH));
    }
    painted.header.push(Line::from(Span::styled(
        rule.join("─┼─"),
        Style::default().fg(Color::DarkGray),
    )));

    // Body
    let indent = if expand { EXPAND_WIDTH + SEPARATOR_WIDTH } else { 0 };
    let mut row_number = 0;
    for item in &view.body {
        match item {
            BodyItem::Row(row) => {
                let mut spans = Vec::new();
                if expand {
                    let glyph = row.indicator.unwrap_or(" ");
                    spans.push(Span::styled(glyph, Style::default().fg(Color::Cyan)));
                    spans.push(separator());
                }
                for (index, cell) in row.cells.iter().enumerate() {
                    if index > 0 {
                        spans.push(separator());
                    }
                    let width = widths.get(index).copied().unwrap_or(1);
                    spans.extend(fit(&cell.content, width, cell.align.unwrap_or(Align::Left)));
                }

                let mut line = Line::from(spans);
                if focused_row == Some(row_number) {
                    line = line.patch_style(Style::default().bg(Color::DarkGray));
                    painted.focused_line = Some(painted.body.len());
                }
                painted
                    .row_lines
                    .push((painted.body.len(), row.key.clone()));
                painted.body.push(line);
                row_number += 1;
            }
            BodyItem::Expanded(detail) => {
                for content in &detail.content.lines {
                    let mut spans = vec![
                        Span::raw(" ".repeat(indent)),
                        Span::styled("┆ ", Style::default().fg(Color::DarkGray)),
                    ];
                    spans.extend(content.spans.iter().cloned());
                    let mut line = Line::from(spans);
                    line.style = detail.content.style.patch(content.style);
                    painted.body.push(line);
                }
            }
        }
    }

    painted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, SortOrder, SortRequest, TableConfig};
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::text::Text;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        json!([
            { "id": 1, "name": "John Doe", "email": "john@example.com" },
            { "id": 2, "name": "Jane Smith", "email": "jane@example.com" },
            { "id": 3, "name": "Bob Wilson", "email": "bob@example.com" },
        ])
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r.as_object().cloned()).collect())
        .unwrap_or_default()
    }

    fn component(expandable: bool) -> TableComponent {
        let engine = DataTable::new(
            vec![
                Column::new("name", "Name").sortable(),
                Column::new("email", "Email").sortable(),
            ],
            TableConfig::new("id").expandable(expandable),
        )
        .with_detail(|row| {
            let email = row.get("email").and_then(|v| v.as_str()).unwrap_or_default();
            Text::from(format!("Contact: {}", email))
        });
        let mut table = TableComponent::new(engine);
        table.set_props(rows(), SortState::unsorted());
        table
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn table_view(table: &TableComponent) -> TableView {
        match table.view() {
            ViewModel::Table(view) => view,
            other => panic!("expected table view, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_width() {
        assert_eq!(parse_width("12", 100), Some(12));
        assert_eq!(parse_width("25%", 80), Some(20));
        assert_eq!(parse_width("160px", 80), Some(20));
        assert_eq!(parse_width("0", 80), None);
        assert_eq!(parse_width("wide", 80), None);
    }

    #[test]
    fn test_fit_pads_by_alignment() {
        let line = Line::from("ab");
        let text = |spans: Vec<Span<'static>>| Line::from(spans).to_string();

        assert_eq!(text(fit(&line, 5, Align::Left)), "ab   ");
        assert_eq!(text(fit(&line, 5, Align::Right)), "   ab");
        assert_eq!(text(fit(&line, 5, Align::Center)), " ab  ");
    }

    #[test]
    fn test_fit_truncates_with_mark() {
        let line = Line::from(vec![Span::raw("john"), Span::raw("@example.com")]);
        let fitted = Line::from(fit(&line, 8, Align::Left)).to_string();
        assert_eq!(fitted, "john@ex…");
    }

    #[test]
    fn test_paint_header_and_rows() {
        let table = component(false);
        let painted = paint_table(&table_view(&table), 80, None, None);

        assert_eq!(painted.header.len(), 2);
        let header = painted.header[0].to_string();
        assert!(header.starts_with("Name ⇅"));
        assert!(header.contains("Email ⇅"));
        assert_eq!(painted.body.len(), 3);
        assert!(painted.body[1].to_string().starts_with("Jane Smith"));
        assert_eq!(painted.header_cells[0].1, "name");
        assert_eq!(painted.header_cells[0].0.start, 0);
    }

    #[test]
    fn test_paint_expanded_row_follows_its_row() {
        let mut table = component(true);
        table.engine_mut().activate_row(&RowKey::from(2));
        let painted = paint_table(&table_view(&table), 80, None, Some(1));

        assert_eq!(painted.body.len(), 4);
        assert!(painted.body[0].to_string().starts_with("▶"));
        assert!(painted.body[1].to_string().starts_with("▼"));
        assert!(painted.body[2].to_string().contains("Contact: jane@example.com"));
        assert_eq!(painted.focused_line, Some(1));
        let lines: Vec<usize> = painted.row_lines.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![0, 1, 3]);
    }

    #[test]
    fn test_space_on_row_toggles_expansion() {
        let mut table = component(true);
        table.update(Action::NextRow).expect("update");

        let action = table
            .handle_key_event(press(KeyCode::Char(' ')))
            .expect("key");
        assert_eq!(action, None);
        assert!(table.engine().is_expanded(&RowKey::from(2)));

        table.handle_key_event(press(KeyCode::Enter)).expect("key");
        assert!(!table.engine().is_expanded(&RowKey::from(2)));
    }

    #[test]
    fn test_space_is_consumed_on_non_expandable_table() {
        let mut table = component(false);
        let action = table
            .handle_key_event(press(KeyCode::Char(' ')))
            .expect("key");
        assert_eq!(action, None);
        assert!(table.engine().expansion().is_empty());
    }

    #[test]
    fn test_enter_on_header_requests_sort() {
        let mut table = component(false);
        table.update(Action::ToggleFocus).expect("update");
        table.update(Action::NextColumn).expect("update");
        assert_eq!(table.focus_area(), FocusArea::Header);

        let action = table.handle_key_event(press(KeyCode::Enter)).expect("key");
        assert_eq!(
            action,
            Some(Action::Sort(SortRequest {
                column: "email".to_string(),
                order: SortOrder::Asc
            }))
        );
    }

    #[test]
    fn test_header_activation_uses_current_sort() {
        let mut table = component(false);
        table.set_props(rows(), SortState::new("name", SortOrder::Asc));

        let action = table
            .update(Action::ActivateHeader("name".to_string()))
            .expect("update");
        assert_eq!(
            action,
            Some(Action::Sort(SortRequest {
                column: "name".to_string(),
                order: SortOrder::Desc
            }))
        );
        assert_eq!(
            table.describe_focus().as_deref(),
            Some("Name (columnheader button, sorted ascending)")
        );
    }

    #[test]
    fn test_focus_moves_between_header_and_body() {
        let mut table = component(true);
        table.update(Action::PrevRow).expect("update");
        assert_eq!(table.focus_area(), FocusArea::Header);

        table.update(Action::NextRow).expect("update");
        assert_eq!(table.focus_area(), FocusArea::Body);
        table.update(Action::LastRow).expect("update");
        table.update(Action::NextRow).expect("update");
        assert_eq!(
            table.describe_focus().as_deref(),
            Some("Row 3 (row button, collapsed)")
        );
    }

    #[test]
    fn test_mouse_clicks_follow_drawn_geometry() {
        let mut table = component(true);
        table.hits = HitMap {
            header_y: Some(1),
            header_cells: vec![(5..15, "name".to_string())],
            rows: vec![(3, RowKey::from(1)), (4, RowKey::from(2))],
        };

        assert_eq!(
            table.handle_mouse_event(click(6, 1)).expect("mouse"),
            Some(Action::ActivateHeader("name".to_string()))
        );
        assert_eq!(table.handle_mouse_event(click(20, 1)).expect("mouse"), None);
        assert_eq!(
            table.handle_mouse_event(click(30, 4)).expect("mouse"),
            Some(Action::ActivateRow(RowKey::from(2)))
        );

        table.update(Action::ActivateRow(RowKey::from(2))).expect("update");
        assert!(table.engine().is_expanded(&RowKey::from(2)));
    }

    #[test]
    fn test_draw_records_hit_regions() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut table = component(true);
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                table.draw(frame, area).expect("draw");
            })
            .expect("draw");

        assert_eq!(table.hits.header_y, Some(1));
        assert_eq!(table.hits.rows.len(), 3);
        assert_eq!(table.hits.rows[0], (3, RowKey::from(1)));
    }

    #[test]
    fn test_loading_state_draws_no_hit_regions() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut table = component(false);
        table.engine_mut().set_loading(true);
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                table.draw(frame, area).expect("draw");
            })
            .expect("draw");

        assert!(table.hits.header_y.is_none());
        assert!(table.hits.rows.is_empty());
        assert!(table.view().is_loading());
    }

    #[test]
    fn test_empty_state_ignores_header_activation() {
        let mut table = component(false);
        table.set_props(Vec::new(), SortState::unsorted());
        assert!(table.view().is_empty());

        table.update(Action::ToggleFocus).expect("update");
        table.update(Action::NextColumn).expect("update");
        assert_eq!(table.focus_area(), FocusArea::Body);

        let action = table.handle_key_event(press(KeyCode::Enter)).expect("key");
        assert_eq!(action, None);
        let action = table
            .update(Action::ActivateHeader("name".to_string()))
            .expect("update");
        assert_eq!(action, None);
    }

    #[test]
    fn test_loading_state_ignores_row_and_header_activation() {
        let mut table = component(true);
        table.update(Action::ToggleFocus).expect("update");
        assert_eq!(table.focus_area(), FocusArea::Header);
        table.engine_mut().set_loading(true);

        let action = table.handle_key_event(press(KeyCode::Enter)).expect("key");
        assert_eq!(action, None);

        table.update(Action::ToggleFocus).expect("update");
        assert_eq!(table.focus_area(), FocusArea::Header);
        table.update(Action::NextRow).expect("update");
        let action = table
            .handle_key_event(press(KeyCode::Char(' ')))
            .expect("key");
        assert_eq!(action, None);
        table.update(Action::ActivateRow(RowKey::from(1))).expect("update");
        assert!(table.engine().expansion().is_empty());

        table.engine_mut().set_loading(false);
        table.handle_key_event(press(KeyCode::Char(' '))).expect("key");
        assert!(table.engine().is_expanded(&RowKey::from(1)));
    }
}
