//! Root application component
//!
//! The App owns the dataset and the sort descriptor, so it is the caller the
//! table engine reports to: sort requests come back as `Action::Sort`, get
//! applied to the full dataset here, and the current page is handed to the
//! table component again. Expansion state lives in the engine.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, HelpDialog, PaginationBar, QuitDialog, TableComponent,
};
use crate::config::Config;
use crate::model::{sort_rows, Dataset, Modal, ModalStack, Pagination, Sample};
use crate::table::{is_activation_key, DataTable, SortState, TableConfig};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use log::{error, info};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════════════════
// App State
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    pub should_quit: bool,
    title: String,
    dataset: Dataset,
    sort: SortState,
    pagination: Pagination,
    /// Columns are re-inferred from the data on reload
    infer_columns: Option<Config>,
    pending_reload: bool,

    // Components
    table: TableComponent,
    pagination_bar: PaginationBar,
    help_dialog: HelpDialog,
    quit_dialog: QuitDialog,
    modals: ModalStack,

    pub status_message: Option<String>,
    pub error: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(
        title: impl Into<String>,
        dataset: Dataset,
        engine: DataTable,
        sort: SortState,
        page_size: usize,
    ) -> App {
        let mut app = App {
            should_quit: false,
            title: title.into(),
            pagination: Pagination::new(page_size, dataset.len()),
            dataset,
            sort,
            infer_columns: None,
            pending_reload: false,
            table: TableComponent::new(engine),
            pagination_bar: PaginationBar::default(),
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
            modals: ModalStack::new(),
            status_message: None,
            error: None,
        };
        sort_rows(&mut app.dataset.rows, &app.sort);
        app.refresh_table();
        app
    }

    /// Build the app from a config file. A dataset that fails to load leaves
    /// the table empty and the error in the status line.
    pub fn from_config(config: Config, config_path: Option<&Path>) -> App {
        let (dataset, load_error) = match config.data_path_from(config_path) {
            Some(path) => match Dataset::load(&path) {
                Ok(dataset) => (dataset, None),
                Err(e) => {
                    error!("{:#}", e);
                    let dataset = Dataset {
                        source: Some(path),
                        rows: Vec::new(),
                    };
                    (dataset, Some(format!("{:#}", e)))
                }
            },
            None => (
                Dataset::default(),
                Some("No data_path configured".to_string()),
            ),
        };

        let mut engine = DataTable::new(config.columns(&dataset.rows), config.table_config())
            .with_detail_renderer(config.detail_renderer());
        if load_error.is_some() {
            engine.set_empty_message("No data loaded");
        }
        let title = config
            .aria_label
            .clone()
            .unwrap_or_else(|| "datagrid".to_string());

        let mut app = App::new(
            title,
            dataset,
            engine,
            config.initial_sort(),
            config.page_size,
        );
        app.error = load_error;
        if config.columns.is_empty() {
            app.infer_columns = Some(config);
        }
        app
    }

    pub fn from_sample(sample: Sample) -> App {
        let config = TableConfig::new(sample.key_field())
            .expandable(sample.expandable())
            .aria_label(sample.title());
        let engine = DataTable::new(sample.columns(), config).with_detail_renderer(sample.detail());

        App::new(
            sample.title(),
            Dataset::new(sample.rows()),
            engine,
            SortState::unsorted(),
            crate::model::pagination::DEFAULT_PAGE_SIZE,
        )
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn table(&self) -> &TableComponent {
        &self.table
    }

    /// Hand the current page to the table component
    fn refresh_table(&mut self) {
        self.pagination.set_total_items(self.dataset.len());
        let page = self.pagination.page_slice(&self.dataset.rows).to_vec();
        self.table.set_props(page, self.sort.clone());
        self.pagination_bar.set_pagination(self.pagination);
    }

    fn reload(&mut self) {
        match self.dataset.reload() {
            Ok(()) => {
                if let Some(config) = &self.infer_columns {
                    let columns = config.columns(&self.dataset.rows);
                    self.table.engine_mut().set_columns(columns);
                }
                sort_rows(&mut self.dataset.rows, &self.sort);
                self.error = None;
                self.status_message = Some(format!("Loaded {} rows", self.dataset.len()));
            }
            Err(e) => {
                error!("reload failed: {:#}", e);
                self.error = Some(format!("{:#}", e));
            }
        }
        self.table.engine_mut().set_loading(false);
        self.refresh_table();
    }

    fn column_header(&self, key: &str) -> String {
        self.table
            .engine()
            .columns()
            .iter()
            .find(|column| column.key == key)
            .map(|column| column.header.clone())
            .unwrap_or_else(|| key.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        // Enter and Space belong to the focused header or row
        if is_activation_key(&key) {
            return self.table.handle_key_event(key);
        }

        let action = match key.code {
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('n') | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('p') | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char('s') => Some(Action::CyclePageSize),
            KeyCode::Char('r') => Some(Action::Reload),
            _ => return self.table.handle_key_event(key),
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        if let Some(action) = self.pagination_bar.handle_mouse_event(mouse)? {
            return Ok(Some(action));
        }
        self.table.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.pending_reload {
                    self.pending_reload = false;
                    self.reload();
                }
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                info!("quitting");
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Sorting (caller side)
            // ─────────────────────────────────────────────────────────────────
            Action::Sort(request) => {
                info!("sorting by {} {}", request.column, request.order);
                self.status_message = Some(format!(
                    "Sorted by {} ({})",
                    self.column_header(&request.column),
                    request.order
                ));
                self.sort = request.into();
                sort_rows(&mut self.dataset.rows, &self.sort);
                self.pagination.reset();
                self.table.reset_row_focus();
                self.refresh_table();
            }

            // ─────────────────────────────────────────────────────────────────
            // Data
            // ─────────────────────────────────────────────────────────────────
            Action::NextPage | Action::PrevPage => {
                let moved = if action == Action::NextPage {
                    self.pagination.next()
                } else {
                    self.pagination.previous()
                };
                if moved {
                    self.table.reset_row_focus();
                    self.refresh_table();
                }
            }
            Action::CyclePageSize => {
                let page_size = self.pagination.next_page_size();
                self.pagination.set_page_size(page_size);
                info!("page size {}", self.pagination.page_size());
                self.status_message = Some(format!("{} per page", self.pagination.page_size()));
                self.table.reset_row_focus();
                self.refresh_table();
            }
            Action::Reload => {
                info!("reloading {}", self.dataset.source_label());
                self.table.engine_mut().set_loading(true);
                self.pending_reload = true;
                self.status_message = Some("Reloading...".to_string());
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ScrollUp | Action::ScrollDown => {
                if self.modals.top() == Some(&Modal::Help) {
                    return self.help_dialog.update(action);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Table focus and activation
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleFocus
            | Action::NextColumn
            | Action::PrevColumn
            | Action::NextRow
            | Action::PrevRow
            | Action::FirstRow
            | Action::LastRow
            | Action::ActivateHeader(_)
            | Action::ActivateRow(_) => return self.table.update(action),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area, self.pagination_bar.is_visible());

        self.draw_title_bar(frame, layout.title);
        self.table.draw(frame, layout.table)?;
        if let Some(pagination_area) = layout.pagination {
            self.pagination_bar.draw(frame, pagination_area)?;
        }
        self.draw_status_bar(frame, layout.status);
        draw_help_bar(frame, layout.help);

        for modal in self.modals.iter().cloned().collect::<Vec<_>>() {
            match modal {
                Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
                Modal::Help => self.help_dialog.draw(frame, area)?,
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_title_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                self.dataset.source_label(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("  {} rows", self.dataset.len()),
                Style::default().fg(Color::White),
            ),
        ];

        if let Some(column) = &self.sort.column {
            spans.push(Span::styled(
                format!("  sorted by {} {}", self.column_header(column), self.sort.order),
                Style::default().fg(Color::Yellow),
            ));
        }
        let expanded = self.table.engine().expansion().len();
        if expanded > 0 {
            spans.push(Span::styled(
                format!("  {} expanded", expanded),
                Style::default().fg(Color::Magenta),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(error) = &self.error {
            Line::from(Span::styled(
                format!(" Error: {} ", error),
                Style::default().fg(Color::Red),
            ))
        } else {
            let mut spans = Vec::new();
            if let Some(status) = &self.status_message {
                spans.push(Span::styled(
                    format!(" {} ", status),
                    Style::default().fg(Color::Yellow),
                ));
            }
            if let Some(focus) = self.table.describe_focus() {
                spans.push(Span::styled(
                    format!(" {} ", focus),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn draw_help_bar(frame: &mut Frame, area: Rect) {
    let key = |label: &'static str, color: Color| {
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let help_spans = vec![
        key(" q ", Color::Yellow),
        Span::raw("Quit "),
        key(" Tab ", Color::Cyan),
        Span::raw("Header/Rows "),
        key(" Enter/Space ", Color::Green),
        Span::raw("Sort/Expand "),
        key(" n/p ", Color::Cyan),
        Span::raw("Page "),
        key(" s ", Color::Cyan),
        Span::raw("Per page "),
        key(" r ", Color::Magenta),
        Span::raw("Reload "),
        key(" ? ", Color::White),
        Span::raw("Help"),
    ];

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}
