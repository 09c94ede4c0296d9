//! Main menu view.

use crate::state::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .menu
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let key = match (entry.shortcut, index) {
                (Some(c), _) => format!("({}) ", c),
                (None, i) if i < 9 => format!("[{}] ", i + 1),
                (None, _) => "    ".to_string(),
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(key, Style::default().fg(app.theme.text_dim)),
                    Span::styled(
                        entry.label.clone(),
                        Style::default().fg(app.theme.text),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("    {}", entry.description),
                    Style::default().fg(app.theme.text_muted),
                )),
            ])
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.menu.selected()));

    let list = List::new(items)
        .block(Block::default().title(" Main Menu ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut state);
}
