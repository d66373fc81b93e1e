//! Host configuration
//!
//! Stored under `$HOME/.datagrid/`. JSON by default; `.yaml`/`.yml` files
//! passed on the command line are read as YAML.

use crate::model::pagination::DEFAULT_PAGE_SIZE;
use crate::table::{
    display_text, resolve, Column, ColumnSpec, DetailRenderer, Row, SortOrder, SortState,
    TableConfig,
};
use anyhow::{Context, Result};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span, Text},
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset file (`.json` or `.csv`), relative to the config file
    pub data_path: Option<String>,
    pub key_field: String,
    /// Column definitions; inferred from the first row when empty
    pub columns: Vec<ColumnSpec>,
    pub expandable: bool,
    /// Fields listed in the detail view of an expanded row
    pub detail_fields: Vec<String>,
    pub empty_message: Option<String>,
    pub aria_label: Option<String>,
    pub page_size: usize,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            key_field: "id".to_string(),
            columns: Vec::new(),
            expandable: false,
            detail_fields: Vec::new(),
            empty_message: None,
            aria_label: None,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_order: SortOrder::Asc,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".datagrid"))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config at `$HOME/.datagrid/config.json`, if there is one
    pub fn load() -> Result<Option<Config>> {
        let Some(path) = Self::default_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&contents, is_yaml(path))
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    fn parse(contents: &str, yaml: bool) -> Result<Config> {
        let config = if yaml {
            serde_yaml::from_str(contents)?
        } else {
            serde_json::from_str(contents)?
        };
        Ok(config)
    }

    /// Dataset path, resolved against the directory holding the config file
    pub fn data_path_from(&self, config_path: Option<&Path>) -> Option<PathBuf> {
        let data_path = PathBuf::from(self.data_path.as_ref()?);
        if data_path.is_absolute() {
            return Some(data_path);
        }
        match config_path.and_then(Path::parent) {
            Some(dir) => Some(dir.join(data_path)),
            None => Some(data_path),
        }
    }

    pub fn table_config(&self) -> TableConfig {
        let mut table = TableConfig::new(self.key_field.clone()).expandable(self.expandable);
        if let Some(message) = &self.empty_message {
            table = table.empty_message(message.clone());
        }
        if let Some(label) = &self.aria_label {
            table = table.aria_label(label.clone());
        }
        table
    }

    /// Configured columns, or one sortable column per field of the first row
    pub fn columns(&self, rows: &[Row]) -> Vec<Column> {
        if !self.columns.is_empty() {
            return self.columns.iter().cloned().map(Column::from).collect();
        }
        rows.first()
            .map(|row| {
                row.keys()
                    .map(|key| Column::new(key.clone(), key.clone()).sortable())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Detail view for expanded rows: the listed fields, or the whole row
    /// as pretty-printed JSON
    pub fn detail_renderer(&self) -> Option<DetailRenderer> {
        if !self.expandable {
            return None;
        }
        if self.detail_fields.is_empty() {
            return Some(Arc::new(|row: &Row| {
                let json = serde_json::to_string_pretty(row).unwrap_or_default();
                Text::from(json)
            }));
        }

        let fields = self.detail_fields.clone();
        let width = fields.iter().map(|f| f.len()).max().unwrap_or(0) + 2;
        Some(Arc::new(move |row: &Row| {
            let label = Style::default().fg(Color::DarkGray);
            let lines: Vec<Line<'static>> = fields
                .iter()
                .map(|field| {
                    Line::from(vec![
                        Span::styled(format!("{:<width$}", field, width = width), label),
                        Span::raw(display_text(resolve(row, field))),
                    ])
                })
                .collect();
            Text::from(lines)
        }))
    }

    pub fn initial_sort(&self) -> SortState {
        match &self.sort_by {
            Some(column) => SortState::new(column.clone(), self.sort_order),
            None => SortState::unsorted(),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Align;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("{}", false).expect("valid config");
        assert_eq!(config, Config::default());
        assert_eq!(config.key_field, "id");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.initial_sort(), SortState::unsorted());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
data_path: events.json
key_field: eventId
expandable: true
sort_by: timestamp
sort_order: desc
columns:
  - key: timestamp
    header: Time
    sortable: true
  - key: details.ip
    align: right
    width: 20%
"#;
        let config = Config::parse(yaml, true).expect("valid yaml");

        assert_eq!(config.key_field, "eventId");
        assert_eq!(
            config.initial_sort(),
            SortState::new("timestamp", SortOrder::Desc)
        );

        let columns = config.columns(&[]);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].header, "Time");
        assert!(columns[0].sortable);
        assert_eq!(columns[1].header, "details.ip");
        assert_eq!(columns[1].align, Some(Align::Right));
        assert_eq!(columns[1].width.as_deref(), Some("20%"));
    }

    #[test]
    fn test_table_config_applies_overrides() {
        let config = Config {
            expandable: true,
            empty_message: Some("Nothing here".to_string()),
            aria_label: Some("Events".to_string()),
            ..Config::default()
        };
        let table = config.table_config();

        assert!(table.expandable);
        assert_eq!(table.empty_message, "Nothing here");
        assert_eq!(table.aria_label, "Events");
        assert!(!table.is_loading);
    }

    #[test]
    fn test_columns_inferred_from_first_row() {
        let rows = vec![row(json!({ "id": 1, "name": "Ann", "email": "ann@example.com" }))];
        let columns = Config::default().columns(&rows);

        let keys: Vec<_> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["id", "name", "email"]);
        assert!(columns.iter().all(|c| c.sortable));
        assert!(Config::default().columns(&[]).is_empty());
    }

    #[test]
    fn test_detail_renderer_lists_fields() {
        let config = Config {
            expandable: true,
            detail_fields: vec!["details.ip".to_string(), "missing".to_string()],
            ..Config::default()
        };
        let render = config.detail_renderer().expect("renderer");
        let text = render(&row(json!({ "details": { "ip": "10.0.0.1" } })));

        assert_eq!(text.lines.len(), 2);
        assert!(text.lines[0].to_string().ends_with("10.0.0.1"));
        assert!(text.lines[1].to_string().starts_with("missing"));
    }

    #[test]
    fn test_detail_renderer_only_when_expandable() {
        assert!(Config::default().detail_renderer().is_none());

        let config = Config {
            expandable: true,
            ..Config::default()
        };
        let render = config.detail_renderer().expect("renderer");
        let text = render(&row(json!({ "id": 7 })));
        assert!(text.lines.iter().any(|line| line.to_string().contains("\"id\": 7")));
    }

    #[test]
    fn test_data_path_relative_to_config() {
        let config = Config {
            data_path: Some("data/users.csv".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.data_path_from(Some(Path::new("/tmp/grid/config.yaml"))),
            Some(PathBuf::from("/tmp/grid/data/users.csv"))
        );
        assert_eq!(
            config.data_path_from(None),
            Some(PathBuf::from("data/users.csv"))
        );
        assert_eq!(Config::default().data_path_from(None), None);
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join(format!("datagrid-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "key_field": "uuid", "page_size": 10 }"#).expect("write config");

        let config = Config::load_from(&path).expect("load config");
        let _ = fs::remove_file(&path);

        assert_eq!(config.key_field, "uuid");
        assert_eq!(config.page_size, 10);
        assert!(!config.expandable);
    }
}
