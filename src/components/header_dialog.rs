//! Header edit dialog component
//!
//! Edits column names and width percentages as one edit set. Columns can
//! be added and removed (never below two), and the percentages must sum
//! to exactly 100 before the dialog accepts. A rejected commit keeps the
//! edit set on screen for correction.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{HeaderEditor, LayoutError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Percentage inputs never need more digits than "100"
const MAX_SIZE_DIGITS: usize = 3;

/// Header editor dialog
pub struct HeaderDialog {
    /// Edit set, separate from the document until committed
    pub editor: HeaderEditor,
    /// Focused field: name and size alternate per column
    pub focus: usize,
    /// Validation message from the last rejected commit
    pub error: Option<String>,
}

impl Default for HeaderDialog {
    fn default() -> Self {
        Self {
            editor: HeaderEditor::new(&[], &[]),
            focus: 0,
            error: None,
        }
    }
}

impl HeaderDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the current header into a fresh edit set
    pub fn open(&mut self, names: &[String], widths: &[u16]) {
        self.editor = HeaderEditor::new(names, widths);
        self.focus = 0;
        self.error = None;
    }

    pub fn set_error(&mut self, error: &LayoutError) {
        self.error = Some(error.to_string());
    }

    fn field_count(&self) -> usize {
        self.editor.column_count() * 2
    }

    fn focused_is_size(&self) -> bool {
        self.focus % 2 == 1
    }

    fn focus_next(&mut self) {
        if self.field_count() > 0 {
            self.focus = (self.focus + 1) % self.field_count();
        }
    }

    fn focus_prev(&mut self) {
        if self.field_count() > 0 {
            self.focus = (self.focus + self.field_count() - 1) % self.field_count();
        }
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        let column = self.focus / 2;
        if self.focused_is_size() {
            self.editor.sizes.get_mut(column)
        } else {
            self.editor.names.get_mut(column)
        }
    }

    fn add_column(&mut self) {
        self.editor.add_column();
        self.error = None;
    }

    fn remove_column(&mut self) {
        match self.editor.remove_column() {
            Ok(()) => {
                self.error = None;
                let max = self.field_count().saturating_sub(1);
                if self.focus > max {
                    self.focus = max;
                }
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl Component for HeaderDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmHeaderEdit),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                None
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.add_column();
                None
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.remove_column();
                None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input() {
                    input.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                let is_size = self.focused_is_size();
                if let Some(input) = self.focused_input() {
                    if is_size {
                        // Percentage fields take digits only
                        if c.is_ascii_digit() && input.len() < MAX_SIZE_DIGITS {
                            input.push(c);
                        }
                    } else {
                        input.push(c);
                    }
                }
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = (self.editor.column_count() as u16 + 8).min(area.height.saturating_sub(2));
        let popup_area = centered_popup(area, 56, height);

        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from("")];
        for (i, (name, size)) in self.editor.names.iter().zip(&self.editor.sizes).enumerate() {
            let name_focused = self.focus == i * 2;
            let size_focused = self.focus == i * 2 + 1;

            let field_style = |focused: bool| {
                if focused {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                }
            };

            lines.push(Line::from(vec![
                Span::styled(
                    format!(" Column {}: ", i + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:20}", format!("{}{}", name, if name_focused { "_" } else { "" })),
                    field_style(name_focused),
                ),
                Span::styled("  % ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}{}", size, if size_focused { "_" } else { "" }),
                    field_style(size_focused),
                ),
            ]));
        }

        lines.push(Line::from(""));
        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!(" Error: {}", error),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                " Column sizes must add up to 100",
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("OK  "),
            Span::styled(
                " Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cancel  "),
            Span::styled(
                " Ctrl+n ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Add  "),
            Span::styled(
                " Ctrl+r ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Remove"),
        ]));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Edit Header ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn dialog() -> HeaderDialog {
        let mut d = HeaderDialog::new();
        d.open(&strings(&["a", "b"]), &[50, 50]);
        d
    }

    #[test]
    fn test_focus_alternates_name_and_size() {
        let mut d = dialog();
        assert!(!d.focused_is_size());
        d.focus_next();
        assert!(d.focused_is_size());
        d.focus_next();
        assert!(!d.focused_is_size());
        assert_eq!(d.focus, 2);
    }

    #[test]
    fn test_size_field_accepts_digits_only() {
        let mut d = dialog();
        d.focus = 1;
        for c in ['4', 'x', '2', '1', '9'] {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            d.handle_key_event(key).unwrap();
        }
        // "50" + digits up to three chars, letters dropped
        assert_eq!(d.editor.sizes[0], "504");
    }

    #[test]
    fn test_remove_at_floor_sets_error_and_keeps_columns() {
        let mut d = dialog();
        d.remove_column();
        assert!(d.error.is_some());
        assert_eq!(d.editor.column_count(), 2);
    }

    #[test]
    fn test_add_column_extends_fields() {
        let mut d = dialog();
        d.add_column();
        assert_eq!(d.editor.column_count(), 3);
        assert_eq!(d.editor.sizes[2], "5");
    }

    #[test]
    fn test_remove_clamps_focus() {
        let mut d = HeaderDialog::new();
        d.open(&strings(&["a", "b", "c"]), &[40, 30, 30]);
        d.focus = 5;
        d.remove_column();
        assert_eq!(d.focus, 3);
    }
}
