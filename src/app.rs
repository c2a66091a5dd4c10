//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that delegates event handling and rendering to child
//! components. App owns the table document and the modal stack; the
//! filter and layout decisions themselves live in the model layer.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, AboutDialog, CopyDialog, DeleteDialog, FileDialog, FileDialogMode,
    FilterBar, HeaderDialog, HelpDialog, QuitDialog, RowDialog, TableComponent,
};
use crate::config::Config;
use crate::model::{visible_rows, Modal, ModalStack, TableDocument};
use crate::services;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::path::Path;

/// Main application state - coordinates between components
pub struct App {
    /// The loaded table
    pub doc: TableDocument,

    /// Indices of rows passing the current filter
    pub visible: Vec<usize>,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub table: TableComponent,
    pub filter_bar: FilterBar,
    pub row_dialog: RowDialog,
    pub header_dialog: HeaderDialog,
    pub quit_dialog: QuitDialog,
    pub delete_dialog: DeleteDialog,
    pub file_dialog: FileDialog,
    pub copy_dialog: CopyDialog,
    pub help_dialog: HelpDialog,
    pub about_dialog: AboutDialog,

    /// Current config (for remembering the last file)
    pub config: Option<Config>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(None)
    }
}

impl App {
    /// Create a new App instance
    ///
    /// Opens the path given on the command line, or falls back to the
    /// last file remembered in the config.
    pub fn new(initial_path: Option<String>) -> App {
        let config = Config::load();
        let path = initial_path.or_else(|| config.as_ref().and_then(|c| c.last_file.clone()));

        let mut app = App {
            doc: TableDocument::default(),
            visible: Vec::new(),
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            table: TableComponent::new(),
            filter_bar: FilterBar::new(),
            row_dialog: RowDialog::new(),
            header_dialog: HeaderDialog::new(),
            quit_dialog: QuitDialog,
            delete_dialog: DeleteDialog::default(),
            file_dialog: FileDialog::new(),
            copy_dialog: CopyDialog::default(),
            help_dialog: HelpDialog::default(),
            about_dialog: AboutDialog,
            config,
        };

        if let Some(path) = path {
            app.load_file(&path);
        }
        app.refresh();
        app
    }

    /// Recompute row visibility after any query or row-set change
    pub fn refresh(&mut self) {
        self.doc.normalize();
        self.visible = visible_rows(&self.doc.rows, &self.filter_bar.query);
        self.table.clamp_selection(self.visible.len());
    }

    /// Document index of the currently selected row
    pub fn selected_row_index(&self) -> Option<usize> {
        self.visible.get(self.table.selected).copied()
    }

    fn load_file(&mut self, path: &str) {
        match services::load_table(path) {
            Ok(doc) => {
                self.doc = doc;
                self.error = None;
                self.status_message = Some(format!("Loaded {}", path));
                self.remember_file(Path::new(path));
            }
            Err(e) => {
                self.error = Some(format!("{:#}", e));
            }
        }
        self.refresh();
    }

    fn save_file(&mut self, path: &Path) {
        match services::save_table(&self.doc, path) {
            Ok(()) => {
                self.doc.path = Some(path.to_path_buf());
                self.doc.dirty = false;
                self.error = None;
                self.status_message = Some(format!("Saved {}", path.display()));
                self.remember_file(path);
            }
            Err(e) => {
                self.error = Some(format!("{:#}", e));
            }
        }
    }

    fn remember_file(&mut self, path: &Path) {
        let mut config = self
            .config
            .take()
            .or_else(Config::load)
            .unwrap_or_default();
        config.last_file = Some(path.display().to_string());
        let _ = config.save();
        self.config = Some(config);
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::DeleteConfirm { .. } => self.delete_dialog.handle_key_event(key),
            Modal::RowEdit { .. } => self.row_dialog.handle_key_event(key),
            Modal::HeaderEdit => self.header_dialog.handle_key_event(key),
            Modal::OpenFile | Modal::SaveAs => self.file_dialog.handle_key_event(key),
            Modal::CopyRows { .. } => self.copy_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::About => self.about_dialog.handle_key_event(key),
        }
    }

    fn handle_table_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('q') => {
                if self.doc.dirty {
                    Some(Action::OpenQuitDialog)
                } else {
                    Some(Action::ForceQuit)
                }
            }
            KeyCode::Char('/') => Some(Action::EnterFilterMode),
            KeyCode::Char('x') => Some(Action::ToggleExclusion),
            KeyCode::Char('c') => Some(Action::ClearFilter),
            KeyCode::Char('a') => Some(Action::AddRow),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::EditRow),
            KeyCode::Char('d') if key.modifiers.is_empty() => Some(Action::OpenDeleteConfirm),
            KeyCode::Char('p') => Some(Action::CopyRows),
            KeyCode::Char('t') => Some(Action::EditHeader),
            KeyCode::Char('C') => Some(Action::ClearTable),
            KeyCode::Char('o') => Some(Action::OpenFilePrompt),
            KeyCode::Char('s') => Some(Action::Save),
            KeyCode::Char('S') => Some(Action::OpenSaveAsPrompt),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('i') => Some(Action::OpenAbout),
            _ => return self.table.handle_key_event(key),
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::DeleteConfirm { .. } => self.delete_dialog.draw(frame, area)?,
            Modal::RowEdit { .. } => self.row_dialog.draw(frame, area)?,
            Modal::HeaderEdit => self.header_dialog.draw(frame, area)?,
            Modal::OpenFile | Modal::SaveAs => self.file_dialog.draw(frame, area)?,
            Modal::CopyRows { text } => {
                let text = text.clone();
                self.copy_dialog.draw_with_text(frame, area, &text)?;
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
            Modal::About => self.about_dialog.draw(frame, area)?,
        }
        Ok(())
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(ref error) = self.error {
            Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(Color::Red),
            ))
        } else if let Some(ref message) = self.status_message {
            Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from(Span::styled(
                format!(" {} of {} rows", self.visible.len(), self.doc.rows.len()),
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let spans = if self.filter_bar.active {
            vec![
                Span::styled(" Esc/Enter ", Style::default().fg(Color::Yellow)),
                Span::raw("Done  "),
                Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
                Span::raw("Field  "),
                Span::styled(" Ctrl+x ", Style::default().fg(Color::Cyan)),
                Span::raw("Exclude filter"),
            ]
        } else {
            vec![
                Span::styled(" a ", Style::default().fg(Color::Green)),
                Span::raw("Add  "),
                Span::styled(" e ", Style::default().fg(Color::Cyan)),
                Span::raw("Edit  "),
                Span::styled(" d ", Style::default().fg(Color::Red)),
                Span::raw("Delete  "),
                Span::styled(" / ", Style::default().fg(Color::Magenta)),
                Span::raw("Filter  "),
                Span::styled(" t ", Style::default().fg(Color::Cyan)),
                Span::raw("Header  "),
                Span::styled(" s ", Style::default().fg(Color::Cyan)),
                Span::raw("Save  "),
                Span::styled(" ? ", Style::default().fg(Color::Yellow)),
                Span::raw("Help  "),
                Span::styled(" q ", Style::default().fg(Color::Yellow)),
                Span::raw("Quit"),
            ]
        };

        let help = Paragraph::new(Line::from(spans))
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                ratatui::widgets::Block::default()
                    .borders(ratatui::widgets::Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(help, area);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else if self.filter_bar.active {
            self.filter_bar.handle_key_event(key)
        } else {
            self.handle_table_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::NextRow),
            MouseEventKind::ScrollUp => Some(Action::PrevRow),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {}
            Action::Resize(_, _) => {
                // Widths are derived from the area on every draw
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to TableComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => self.table.select_next(self.visible.len()),
            Action::PrevRow => self.table.select_prev(),
            Action::FirstRow => self.table.select_first(),
            Action::LastRow => self.table.select_last(self.visible.len()),
            Action::PageDown => self.table.page_down(self.visible.len()),
            Action::PageUp => self.table.page_up(),

            // ─────────────────────────────────────────────────────────────────
            // Filter Bar
            // ─────────────────────────────────────────────────────────────────
            Action::EnterFilterMode => self.filter_bar.enter(),
            Action::ExitFilterMode => self.filter_bar.exit(),
            Action::FilterInput(c) => {
                self.filter_bar.input(c);
                self.refresh();
            }
            Action::FilterBackspace => {
                self.filter_bar.backspace();
                self.refresh();
            }
            Action::FilterNextField => self.filter_bar.next_field(),
            Action::ToggleExclusion => {
                self.filter_bar.toggle_exclusion();
                self.refresh();
            }
            Action::ClearFilter => {
                self.filter_bar.clear();
                self.refresh();
            }

            // ─────────────────────────────────────────────────────────────────
            // Row Operations
            // ─────────────────────────────────────────────────────────────────
            Action::AddRow => {
                let row_index = self.doc.add_row();
                let cells = self.doc.row_cells(row_index).unwrap_or(&[]).to_vec();
                let headers = self.doc.headers.clone();
                self.row_dialog.open("New entry", &headers, &cells);
                self.modals.push(Modal::RowEdit {
                    row_index,
                    is_new: true,
                });
            }
            Action::EditRow => {
                if let Some(row_index) = self.selected_row_index() {
                    let cells = self.doc.row_cells(row_index).unwrap_or(&[]).to_vec();
                    let headers = self.doc.headers.clone();
                    self.row_dialog.open("Edit entry", &headers, &cells);
                    self.modals.push(Modal::RowEdit {
                        row_index,
                        is_new: false,
                    });
                }
            }
            Action::ConfirmRowEdit => {
                if let Some(Modal::RowEdit { row_index, .. }) = self.modals.top().cloned() {
                    self.doc.set_row_cells(row_index, self.row_dialog.get_cells());
                    self.modals.pop();
                    self.refresh();
                }
            }
            Action::OpenDeleteConfirm => {
                if let Some(row_index) = self.selected_row_index() {
                    self.delete_dialog.row_index = row_index;
                    self.modals.push(Modal::DeleteConfirm { row_index });
                }
            }
            Action::DeleteRow(row_index) => {
                self.doc.delete_row(row_index);
                self.modals.pop();
                self.refresh();
            }
            Action::CopyRows => {
                if let Some(row_index) = self.selected_row_index() {
                    let text = self
                        .doc
                        .row_cells(row_index)
                        .unwrap_or(&[])
                        .join(", ");
                    self.copy_dialog.scroll_offset = 0;
                    self.modals.push(Modal::CopyRows { text });
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Table Operations
            // ─────────────────────────────────────────────────────────────────
            Action::EditHeader => {
                self.header_dialog.open(&self.doc.headers, &self.doc.widths);
                self.modals.push(Modal::HeaderEdit);
            }
            Action::ConfirmHeaderEdit => {
                // A rejected commit keeps the dialog open with the raw
                // inputs intact for correction
                match self.header_dialog.editor.commit() {
                    Ok((names, widths)) => {
                        self.doc.apply_header(names, widths);
                        self.modals.pop();
                        self.refresh();
                    }
                    Err(e) => self.header_dialog.set_error(&e),
                }
            }
            Action::ClearTable => {
                self.doc.clear_rows();
                self.status_message = Some("Table cleared".to_string());
                self.refresh();
            }

            // ─────────────────────────────────────────────────────────────────
            // File Operations
            // ─────────────────────────────────────────────────────────────────
            Action::OpenFilePrompt => {
                self.file_dialog.open(FileDialogMode::Open, "");
                self.modals.push(Modal::OpenFile);
            }
            Action::LoadFile(path) => {
                self.modals.pop();
                self.load_file(&path);
            }
            Action::Save => match self.doc.path.clone() {
                Some(path) => self.save_file(&path),
                None => return Ok(Some(Action::OpenSaveAsPrompt)),
            },
            Action::OpenSaveAsPrompt => {
                let initial = self
                    .doc
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.file_dialog.open(FileDialogMode::SaveAs, &initial);
                self.modals.push(Modal::SaveAs);
            }
            Action::SaveFile(path) => {
                self.modals.pop();
                let path = services::ensure_csv_extension(&path);
                self.save_file(&path);
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenAbout => {
                self.modals.push(Modal::About);
            }
            Action::CloseModal => {
                if let Some(Modal::RowEdit { is_new: true, .. }) = self.modals.top() {
                    // Cancelled add: take the appended row out again
                    self.doc.remove_last_row();
                }
                self.modals.pop();
                self.refresh();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area, true);

        self.filter_bar.draw(frame, layout.filter)?;
        self.table
            .draw_with_table(frame, layout.table, &self.doc, &self.visible)?;
        if let Some(status) = layout.status {
            self.draw_status(frame, status);
        }
        self.draw_help_bar(frame, layout.help);

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}
