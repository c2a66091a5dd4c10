//! Filter bar component
//!
//! Owns the include/exclude query state. The include field is always
//! shown; the exclude field only appears once exclusion is toggled on.

use crate::action::Action;
use crate::component::Component;
use crate::model::Query;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Which filter field has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Include,
    Exclude,
}

/// Filter bar with include/exclude text fields
#[derive(Default)]
pub struct FilterBar {
    /// Current query state, read by the app on every refresh
    pub query: Query,
    /// Whether keystrokes go to the filter fields
    pub active: bool,
    pub focus: FilterField,
}

impl FilterBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self) {
        self.active = true;
    }

    pub fn exit(&mut self) {
        self.active = false;
    }

    pub fn input(&mut self, c: char) {
        match self.focus {
            FilterField::Include => self.query.include.push(c),
            FilterField::Exclude => self.query.exclude.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FilterField::Include => self.query.include.pop(),
            FilterField::Exclude => self.query.exclude.pop(),
        };
    }

    /// Move focus to the other field, if the exclude field is shown
    pub fn next_field(&mut self) {
        if self.query.exclusion_enabled {
            self.focus = match self.focus {
                FilterField::Include => FilterField::Exclude,
                FilterField::Exclude => FilterField::Include,
            };
        }
    }

    /// Toggle the exclude filter; hiding it pulls focus back
    pub fn toggle_exclusion(&mut self) {
        self.query.exclusion_enabled = !self.query.exclusion_enabled;
        if !self.query.exclusion_enabled {
            self.focus = FilterField::Include;
        }
    }

    pub fn clear(&mut self) {
        self.query.include.clear();
        self.query.exclude.clear();
    }

    fn field_spans(&self, label: &str, text: &str, focused: bool) -> Vec<Span<'static>> {
        let cursor = if focused && self.active { "_" } else { "" };
        vec![
            Span::styled(
                format!("{}: ", label),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{}{}", text, cursor),
                if focused && self.active {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                },
            ),
        ]
    }
}

impl Component for FilterBar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitFilterMode),
            KeyCode::Tab => Some(Action::FilterNextField),
            KeyCode::Backspace => Some(Action::FilterBackspace),
            KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ToggleExclusion)
            }
            KeyCode::Char(c) => Some(Action::FilterInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let title = if self.active {
            " Filter (editing) "
        } else {
            " Filter "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .border_style(if self.active {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::DarkGray)
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.query.exclusion_enabled {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(inner);

            let include = Paragraph::new(Line::from(self.field_spans(
                "may contain",
                &self.query.include,
                self.focus == FilterField::Include,
            )));
            frame.render_widget(include, chunks[0]);

            let exclude = Paragraph::new(Line::from(self.field_spans(
                "must not contain",
                &self.query.exclude,
                self.focus == FilterField::Exclude,
            )));
            frame.render_widget(exclude, chunks[1]);
        } else {
            let include = Paragraph::new(Line::from(self.field_spans(
                "may contain",
                &self.query.include,
                true,
            )));
            frame.render_widget(include, inner);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_goes_to_focused_field() {
        let mut bar = FilterBar::new();
        bar.toggle_exclusion();
        bar.input('a');
        bar.next_field();
        bar.input('b');
        assert_eq!(bar.query.include, "a");
        assert_eq!(bar.query.exclude, "b");
    }

    #[test]
    fn test_next_field_requires_exclusion_enabled() {
        let mut bar = FilterBar::new();
        bar.next_field();
        assert_eq!(bar.focus, FilterField::Include);

        bar.toggle_exclusion();
        bar.next_field();
        assert_eq!(bar.focus, FilterField::Exclude);
    }

    #[test]
    fn test_disabling_exclusion_resets_focus() {
        let mut bar = FilterBar::new();
        bar.toggle_exclusion();
        bar.next_field();
        bar.toggle_exclusion();
        assert_eq!(bar.focus, FilterField::Include);
        assert!(!bar.query.exclusion_enabled);
    }

    #[test]
    fn test_clear_keeps_exclusion_toggle() {
        let mut bar = FilterBar::new();
        bar.toggle_exclusion();
        bar.input('a');
        bar.next_field();
        bar.input('b');
        bar.clear();
        assert!(bar.query.include.is_empty());
        assert!(bar.query.exclude.is_empty());
        assert!(bar.query.exclusion_enabled);
    }
}
