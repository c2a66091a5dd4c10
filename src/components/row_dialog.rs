//! Row add/edit dialog component
//!
//! One text input per declared column. Ctrl+D drops the current date
//! into an empty focused field.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Row form state
#[derive(Default)]
pub struct RowDialog {
    /// Dialog title ("New entry" / "Edit entry")
    pub title: String,
    /// Column names shown as field labels
    pub labels: Vec<String>,
    /// One input buffer per column
    pub inputs: Vec<String>,
    /// Focused input index
    pub focus: usize,
}

impl RowDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the form for a row's data cells
    pub fn open(&mut self, title: &str, labels: &[String], cells: &[String]) {
        self.title = title.to_string();
        self.labels = labels.to_vec();
        self.inputs = cells.to_vec();
        self.inputs.resize(labels.len(), String::new());
        self.focus = 0;
    }

    /// The edited cell values
    pub fn get_cells(&self) -> Vec<String> {
        self.inputs.clone()
    }

    fn focus_next(&mut self) {
        if !self.inputs.is_empty() {
            self.focus = (self.focus + 1) % self.inputs.len();
        }
    }

    fn focus_prev(&mut self) {
        if !self.inputs.is_empty() {
            self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
        }
    }

    /// Insert today's date into the focused field if it is empty
    fn fill_date(&mut self) {
        if let Some(input) = self.inputs.get_mut(self.focus) {
            if input.is_empty() {
                *input = Local::now().format("%d.%m.%y").to_string();
            }
        }
    }
}

impl Component for RowDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmRowEdit),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                None
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.fill_date();
                None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.inputs.get_mut(self.focus) {
                    input.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.inputs.get_mut(self.focus) {
                    input.push(c);
                }
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = (self.labels.len() as u16 + 6).min(area.height.saturating_sub(2));
        let popup_area = centered_popup(area, 60, height);

        frame.render_widget(Clear, popup_area);

        let label_width = self
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = vec![Line::from("")];
        for (i, (label, value)) in self.labels.iter().zip(&self.inputs).enumerate() {
            let focused = i == self.focus;
            let cursor = if focused { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:>width$}: ", label, width = label_width),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{}{}", value, cursor),
                    if focused {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ),
            ]));
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
                " Tab ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Next field  "),
            Span::styled(
                " Ctrl+d ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Today"),
        ]));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", self.title))
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

    #[test]
    fn test_open_pads_inputs_to_label_count() {
        let mut dialog = RowDialog::new();
        dialog.open("Edit entry", &strings(&["a", "b", "c"]), &strings(&["x"]));
        assert_eq!(dialog.inputs, strings(&["x", "", ""]));
        assert_eq!(dialog.focus, 0);
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut dialog = RowDialog::new();
        dialog.open("Edit entry", &strings(&["a", "b"]), &strings(&["", ""]));
        dialog.focus_next();
        assert_eq!(dialog.focus, 1);
        dialog.focus_next();
        assert_eq!(dialog.focus, 0);
        dialog.focus_prev();
        assert_eq!(dialog.focus, 1);
    }

    #[test]
    fn test_fill_date_only_when_empty() {
        let mut dialog = RowDialog::new();
        dialog.open("Edit entry", &strings(&["a"]), &strings(&["kept"]));
        dialog.fill_date();
        assert_eq!(dialog.inputs[0], "kept");

        dialog.inputs[0].clear();
        dialog.fill_date();
        // dd.mm.yy
        assert_eq!(dialog.inputs[0].len(), 8);
        assert_eq!(dialog.inputs[0].matches('.').count(), 2);
    }
}
