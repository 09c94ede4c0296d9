//! Create/edit form view.

use crate::form::{FormFocus, FormMode, FormView};
use crate::state::App;
use crate::theme::type_tag_color;
use crate::widgets::input::INPUT_HEIGHT;
use crate::widgets::{StatusIndicator, TextInput};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, form: &FormView, area: Rect) {
    let border_color = match form.mode {
        FormMode::Create => app.theme.success,
        FormMode::Edit(_) => app.theme.tertiary,
    };
    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let banner_height = if form.store_error.is_some() { 3 } else { 0 };
    let mut constraints = vec![Constraint::Length(banner_height)];
    constraints.extend(form.inputs.iter().map(|_| Constraint::Length(INPUT_HEIGHT)));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    if let Some(error) = &form.store_error {
        StatusIndicator {
            title: "Store error".to_string(),
            status: error.clone(),
            style: Style::default().fg(app.theme.error),
        }
        .render(f, chunks[0]);
    }

    for (index, input) in form.inputs.iter().enumerate() {
        let focused = form.focus == FormFocus::Input(index);
        let border_style = if focused {
            Style::default().fg(app.theme.border_focus)
        } else if input.error.is_some() {
            Style::default().fg(app.theme.error)
        } else {
            Style::default().fg(app.theme.border)
        };
        let hint = if input.descriptor.nullable {
            format!("{}, optional", input.descriptor.semantic_type)
        } else {
            input.descriptor.semantic_type.to_string()
        };
        TextInput {
            label: input.label(),
            hint: &hint,
            text: &input.text,
            cursor: input.cursor,
            focused,
            error: input.error.as_deref(),
            label_style: Style::default()
                .fg(type_tag_color(&input.descriptor.semantic_type, &app.theme)),
            border_style,
            error_style: Style::default().fg(app.theme.error),
        }
        .render(f, chunks[index + 1]);
    }

    let buttons_area = chunks[form.inputs.len() + 1];
    let button = |label: &str, focus: FormFocus| {
        let style = if form.focus == focus {
            Style::default()
                .fg(app.theme.bg)
                .bg(app.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.primary)
        };
        Span::styled(format!(" {} ", label), style)
    };
    let buttons = Line::from(vec![
        button("Save", FormFocus::Save),
        Span::raw("  "),
        button("Cancel", FormFocus::Cancel),
    ]);
    f.render_widget(Paragraph::new(buttons), buttons_area);
}
