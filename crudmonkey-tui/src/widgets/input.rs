//! Single-line labeled text input.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows a [`TextInput`] occupies: bordered line plus the error line.
pub const INPUT_HEIGHT: u16 = 4;

pub struct TextInput<'a> {
    pub label: String,
    pub hint: &'a str,
    pub text: &'a str,
    /// Cursor position in chars.
    pub cursor: usize,
    pub focused: bool,
    pub error: Option<&'a str>,
    pub label_style: Style,
    pub border_style: Style,
    pub error_style: Style,
}

impl<'a> TextInput<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let box_area = Rect {
            height: area.height.min(3),
            ..area
        };
        let title = Line::from(vec![
            Span::styled(self.label.clone(), self.label_style),
            Span::styled(format!(" ({})", self.hint), self.border_style),
        ]);
        let widget = Paragraph::new(self.visible_text(box_area.width)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(widget, box_area);

        if area.height > 3 {
            if let Some(error) = self.error {
                let error_area = Rect {
                    y: area.y + 3,
                    height: 1,
                    ..area
                };
                f.render_widget(
                    Paragraph::new(format!("  {}", error)).style(self.error_style),
                    error_area,
                );
            }
        }

        if self.focused && box_area.width > 2 && box_area.height > 2 {
            let offset = self.scroll_offset(box_area.width);
            let column = (self.cursor - offset) as u16;
            f.set_cursor(box_area.x + 1 + column, box_area.y + 1);
        }
    }

    /// First visible char so the cursor stays inside the box.
    fn scroll_offset(&self, width: u16) -> usize {
        let inner = width.saturating_sub(3) as usize;
        self.cursor.saturating_sub(inner)
    }

    fn visible_text(&self, width: u16) -> String {
        let offset = self.scroll_offset(width);
        self.text
            .chars()
            .skip(offset)
            .take(width.saturating_sub(2) as usize)
            .collect()
    }
}
