//! Built-in sample datasets
//!
//! Used when no configuration file is present, so the table has something
//! to show out of the box: a flat user list and a nested HTTP event log
//! with expandable details.

use crate::table::{display_text, Align, Column, DetailRenderer, Row};
use chrono::{DateTime, Utc};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Which sample to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sample {
    #[default]
    Users,
    Events,
}

impl Sample {
    pub fn title(&self) -> &'static str {
        match self {
            Sample::Users => "Users",
            Sample::Events => "HTTP events",
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        match self {
            Sample::Users => users(),
            Sample::Events => events(),
        }
    }

    pub fn columns(&self) -> Vec<Column> {
        match self {
            Sample::Users => user_columns(),
            Sample::Events => event_columns(),
        }
    }

    pub fn key_field(&self) -> &'static str {
        "id"
    }

    pub fn expandable(&self) -> bool {
        matches!(self, Sample::Events)
    }

    pub fn detail(&self) -> Option<DetailRenderer> {
        match self {
            Sample::Users => None,
            Sample::Events => Some(Arc::new(event_detail)),
        }
    }
}

fn rows_of(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn badge(text: String, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {} ", text),
        Style::default().fg(Color::Black).bg(color),
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

fn users() -> Vec<Row> {
    rows_of(json!([
        { "id": 1, "name": "John Doe", "email": "john@example.com", "role": "Admin", "status": "active", "createdAt": "2024-01-15" },
        { "id": 2, "name": "Jane Smith", "email": "jane@example.com", "role": "Editor", "status": "active", "createdAt": "2024-02-20" },
        { "id": 3, "name": "Bob Wilson", "email": "bob@example.com", "role": "Viewer", "status": "inactive", "createdAt": "2024-03-10" },
        { "id": 4, "name": "Alice Brown", "email": "alice@example.com", "role": "Editor", "status": "pending", "createdAt": "2024-04-05" },
        { "id": 5, "name": "Charlie Davis", "email": "charlie@example.com", "role": "Admin", "status": "active", "createdAt": "2024-05-12" },
    ]))
}

fn user_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email").sortable(),
        Column::new("role", "Role").sortable(),
        Column::new("status", "Status")
            .sortable()
            .align(Align::Center)
            .render(|value, _row| {
                let color = match value.and_then(Value::as_str) {
                    Some("active") => Color::Green,
                    Some("inactive") => Color::Red,
                    _ => Color::Yellow,
                };
                badge(display_text(value), color)
            }),
        Column::new("createdAt", "Created").sortable().align(Align::Right),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP events
// ─────────────────────────────────────────────────────────────────────────────

fn events() -> Vec<Row> {
    rows_of(json!([
        { "id": "evt-001", "timestamp": "2024-12-09T10:30:00Z", "method": "GET", "endpoint": "/api/users", "statusCode": 200, "responseTime": 45, "details": { "userAgent": "Mozilla/5.0", "ip": "192.168.1.1" } },
        { "id": "evt-002", "timestamp": "2024-12-09T10:31:00Z", "method": "POST", "endpoint": "/api/users", "statusCode": 201, "responseTime": 120, "details": { "userAgent": "Mozilla/5.0", "ip": "192.168.1.2" } },
        { "id": "evt-003", "timestamp": "2024-12-09T10:32:00Z", "method": "GET", "endpoint": "/api/users/1", "statusCode": 404, "responseTime": 15, "details": { "userAgent": "Chrome/120.0", "ip": "192.168.1.3" } },
        { "id": "evt-004", "timestamp": "2024-12-09T10:33:00Z", "method": "PUT", "endpoint": "/api/users/2", "statusCode": 500, "responseTime": 250, "details": { "userAgent": "Safari/17.0", "ip": "192.168.1.4" } },
        { "id": "evt-005", "timestamp": "2024-12-09T10:34:00Z", "method": "DELETE", "endpoint": "/api/users/3", "statusCode": 204, "responseTime": 80, "details": { "userAgent": "Firefox/120.0", "ip": "192.168.1.5" } },
    ]))
}

/// RFC 3339 timestamp as `HH:MM:SS`; anything else is shown verbatim
fn time_of_day(value: Option<&Value>) -> String {
    let text = display_text(value);
    DateTime::parse_from_rfc3339(&text)
        .map(|t| t.with_timezone(&Utc).format("%H:%M:%S").to_string())
        .unwrap_or(text)
}

fn status_color(code: u64) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Yellow,
        500.. => Color::Red,
        _ => Color::Gray,
    }
}

fn event_columns() -> Vec<Column> {
    vec![
        Column::new("timestamp", "Time")
            .sortable()
            .render(|value, _row| Line::from(time_of_day(value))),
        Column::new("method", "Method")
            .sortable()
            .render(|value, _row| badge(display_text(value), Color::Blue)),
        Column::new("endpoint", "Endpoint").sortable(),
        Column::new("statusCode", "Status")
            .sortable()
            .align(Align::Center)
            .render(|value, _row| {
                let color = value.and_then(Value::as_u64).map_or(Color::Gray, status_color);
                Line::from(Span::styled(
                    display_text(value),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
            }),
        Column::new("responseTime", "Duration")
            .sortable()
            .align(Align::Right)
            .render(|value, _row| match value {
                Some(v) if !v.is_null() => Line::from(format!("{} ms", display_text(value))),
                _ => Line::from(""),
            }),
        Column::new("details.ip", "Client IP").width("16"),
    ]
}

fn event_detail(row: &Row) -> Text<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let field = |name: &str, path: &str| {
        Line::from(vec![
            Span::styled(format!("{:<12}", name), label),
            Span::raw(display_text(crate::table::resolve(row, path))),
        ])
    };

    Text::from(vec![
        field("Event", "id"),
        field("Timestamp", "timestamp"),
        field("User agent", "details.userAgent"),
        field("IP address", "details.ip"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{DataTable, RowKey, SortState, TableConfig};

    #[test]
    fn test_only_events_are_expandable() {
        assert!(!Sample::Users.expandable());
        assert!(Sample::Users.detail().is_none());
        assert!(Sample::Events.expandable());
        assert!(Sample::Events.detail().is_some());
    }

    #[test]
    fn test_status_badge_is_rendered_not_literal() {
        let rows = Sample::Users.rows();
        let columns = Sample::Users.columns();
        let status = columns
            .iter()
            .find(|c| c.key == "status")
            .expect("status column");

        assert!(status.has_renderer());
        let cell = status.cell(&rows[0]);
        assert_ne!(cell, Line::from("active"));
        assert_eq!(cell.to_string(), " active ");
    }

    #[test]
    fn test_event_columns_resolve_nested_paths() {
        let rows = Sample::Events.rows();
        let columns = Sample::Events.columns();
        let ip = columns
            .iter()
            .find(|c| c.key == "details.ip")
            .expect("ip column");

        assert_eq!(ip.cell(&rows[2]).to_string(), "192.168.1.3");
    }

    #[test]
    fn test_time_of_day() {
        assert_eq!(time_of_day(Some(&json!("2024-12-09T10:30:00Z"))), "10:30:00");
        assert_eq!(time_of_day(Some(&json!("yesterday"))), "yesterday");
        assert_eq!(time_of_day(None), "");
    }

    #[test]
    fn test_event_detail_in_expanded_view() {
        let sample = Sample::Events;
        let mut table = DataTable::new(
            sample.columns(),
            TableConfig::new(sample.key_field()).expandable(sample.expandable()),
        )
        .with_detail_renderer(sample.detail());
        table.activate_row(&RowKey::from("evt-004"));

        let view = table.build(&sample.rows(), &SortState::unsorted());
        let table_view = view.as_table().expect("table view");
        assert_eq!(table_view.body.len(), 6);

        let detail = table_view
            .body
            .iter()
            .find_map(|item| match item {
                crate::table::BodyItem::Expanded(e) => Some(e),
                _ => None,
            })
            .expect("expanded row");
        assert_eq!(detail.content.lines.len(), 4);
        assert!(detail.content.lines[3].to_string().contains("192.168.1.4"));
    }
}
