//! File path prompt component
//!
//! A single-line path input used for both opening and saving.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// What the entered path will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileDialogMode {
    #[default]
    Open,
    SaveAs,
}

/// File path prompt
#[derive(Default)]
pub struct FileDialog {
    pub mode: FileDialogMode,
    pub input: String,
}

impl FileDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the prompt, pre-filled with the current path if any
    pub fn open(&mut self, mode: FileDialogMode, initial: &str) {
        self.mode = mode;
        self.input = initial.to_string();
    }
}

impl Component for FileDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => {
                if self.input.is_empty() {
                    None
                } else {
                    match self.mode {
                        FileDialogMode::Open => Some(Action::LoadFile(self.input.clone())),
                        FileDialogMode::SaveAs => Some(Action::SaveFile(self.input.clone())),
                    }
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 60, 8);

        frame.render_widget(Clear, popup_area);

        let (title, prompt) = match self.mode {
            FileDialogMode::Open => (" Open File ", "Enter the path of the CSV file to open:"),
            FileDialogMode::SaveAs => (" Save As ", "Enter the path to save to (.csv is added):"),
        };

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                prompt,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("> {}_", self.input),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Confirm  "),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .title(title)
                    .title_style(
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_enter_emits_mode_specific_action() {
        let mut dialog = FileDialog::new();
        dialog.open(FileDialogMode::Open, "list.csv");
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            dialog.handle_key_event(enter).unwrap(),
            Some(Action::LoadFile("list.csv".to_string()))
        );

        dialog.open(FileDialogMode::SaveAs, "out");
        assert_eq!(
            dialog.handle_key_event(enter).unwrap(),
            Some(Action::SaveFile("out".to_string()))
        );
    }

    #[test]
    fn test_enter_ignored_on_empty_input() {
        let mut dialog = FileDialog::new();
        dialog.open(FileDialogMode::Open, "");
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(enter).unwrap(), None);
    }
}
