//! Table component for the main row display
//!
//! Renders the data rows that pass the current filter, with cell widths
//! derived from the stored percentage allocations against the available
//! terminal width.

use crate::action::Action;
use crate::component::Component;
use crate::model::{compute_widths, TableDocument};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Lines used by borders and the header/separator rows
const CHROME_HEIGHT: u16 = 4;

/// Table component for displaying the filtered rows
#[derive(Default)]
pub struct TableComponent {
    /// Position within the visible row list
    pub selected: usize,
    /// First visible-list entry currently on screen
    pub scroll: usize,
    /// Rows that fit on screen, updated on every draw
    page_size: usize,
}

/// Truncate or pad a cell to an exact display width
fn fit_cell(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}

impl TableComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection inside the visible list after a filter change
    pub fn clamp_selection(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.selected = 0;
            self.scroll = 0;
        } else if self.selected >= visible_len {
            self.selected = visible_len - 1;
        }
    }

    pub fn select_next(&mut self, visible_len: usize) {
        if self.selected + 1 < visible_len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self, visible_len: usize) {
        self.selected = visible_len.saturating_sub(1);
    }

    pub fn page_down(&mut self, visible_len: usize) {
        let step = self.page_size.max(1);
        self.selected = (self.selected + step).min(visible_len.saturating_sub(1));
    }

    pub fn page_up(&mut self) {
        let step = self.page_size.max(1);
        self.selected = self.selected.saturating_sub(step);
    }

    /// Render the table with the given visible row indices
    pub fn draw_with_table(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        doc: &TableDocument,
        visible: &[usize],
    ) -> Result<()> {
        let title = match doc.file_name() {
            Some(name) if doc.dirty => format!(" {} [+] ", name),
            Some(name) => format!(" {} ", name),
            None => " (no file) ".to_string(),
        };

        let content_width = area.width.saturating_sub(2);
        let widths = compute_widths(&doc.widths, content_width);

        // Header line, one styled span per column
        let header_spans: Vec<Span> = doc
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| {
                Span::styled(
                    fit_cell(h, *w as usize),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();

        let separator: String = widths
            .iter()
            .map(|w| "─".repeat(*w as usize))
            .collect::<Vec<_>>()
            .join("");

        let visible_height = area.height.saturating_sub(CHROME_HEIGHT) as usize;
        self.page_size = visible_height;

        // Keep the selected row on screen
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if visible_height > 0 && self.selected >= self.scroll + visible_height {
            self.scroll = self.selected + 1 - visible_height;
        }

        let mut lines = vec![
            Line::from(header_spans),
            Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
        ];

        for (pos, row_index) in visible
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible_height)
        {
            let cells = doc.row_cells(*row_index).unwrap_or(&[]);
            let style = if pos == self.selected {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let spans: Vec<Span> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| Span::styled(fit_cell(cell, *w as usize), style))
                .collect();
            lines.push(Line::from(spans));
        }

        if visible.is_empty() {
            lines.push(Line::from(Span::styled(
                if doc.rows.is_empty() {
                    "Table is empty"
                } else {
                    "No rows match the current filter"
                },
                Style::default().fg(Color::DarkGray),
            )));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);

        // Scrollbar when the visible rows overflow the area
        if visible.len() > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(visible.len().saturating_sub(visible_height))
                    .position(self.scroll);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

impl Component for TableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rendering needs the document; see draw_with_table
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_cell_pads_and_truncates() {
        assert_eq!(fit_cell("ab", 4), "ab  ");
        assert_eq!(fit_cell("abcdef", 4), "abcd");
        assert_eq!(fit_cell("", 3), "   ");
    }

    #[test]
    fn test_fit_cell_respects_wide_chars() {
        // A full-width char occupies two cells and never splits
        assert_eq!(fit_cell("日本", 3), "日 ");
    }

    #[test]
    fn test_clamp_selection_after_filter_shrink() {
        let mut table = TableComponent::new();
        table.selected = 5;
        table.clamp_selection(3);
        assert_eq!(table.selected, 2);

        table.clamp_selection(0);
        assert_eq!(table.selected, 0);
    }

    #[test]
    fn test_selection_navigation_bounds() {
        let mut table = TableComponent::new();
        table.select_next(3);
        table.select_next(3);
        table.select_next(3);
        assert_eq!(table.selected, 2);

        table.select_prev();
        table.select_prev();
        table.select_prev();
        assert_eq!(table.selected, 0);

        table.select_last(3);
        assert_eq!(table.selected, 2);
        table.select_first();
        assert_eq!(table.selected, 0);
    }
}
