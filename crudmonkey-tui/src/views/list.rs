//! Record list view.

use crate::list::{row_details, ListView, ID_HEADER};
use crate::state::App;
use crate::views::helpers::two_column;
use crate::widgets::DetailPanel;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

/// Width of a hyphenated UUID.
const ID_WIDTH: u16 = 36;

pub fn render(f: &mut Frame<'_>, app: &App, view: &ListView, area: Rect) {
    let (table_area, detail_area) = two_column(area, 65);

    let header = Row::new(view.headers.iter().map(|h| {
        Cell::from(h.clone()).style(
            Style::default()
                .fg(app.theme.secondary)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| Row::new(row.cells.iter().cloned()))
        .collect();

    let widths: Vec<Constraint> = view
        .headers
        .iter()
        .map(|h| {
            if h == ID_HEADER {
                Constraint::Length(ID_WIDTH)
            } else {
                Constraint::Min(8)
            }
        })
        .collect();

    let title = format!(
        " {} ({}) loaded {} ",
        view.title,
        view.rows.len(),
        view.loaded_at.format("%H:%M:%S")
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.bg_highlight),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(view.selected);
    f.render_stateful_widget(table, table_area, &mut state);

    let fields = view
        .selected_row()
        .map(|row| row_details(view, row))
        .unwrap_or_default();
    let detail = DetailPanel {
        title: "Details",
        fields,
        style: Style::default().fg(app.theme.secondary),
    };
    detail.render(f, detail_area);
}
