//! View rendering dispatch.

pub mod form;
pub mod helpers;
pub mod list;
pub mod menu;

use crate::keys::InputMode;
use crate::notifications::NotificationLevel;
use crate::pages::Page;
use crate::state::App;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_page() {
        Page::Menu => menu::render(f, app, layout[1]),
        Page::List(view) => list::render(f, app, view, layout[1]),
        Page::Form(form) => form::render(f, app, form, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if app.modal.is_some() {
        render_modal(f, app);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        "CRUDMONKEY | {} | Resources: {}",
        app.pages.active_name(),
        app.registry.len()
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match (app.input_mode(), app.active_page()) {
        (InputMode::Edit, _) => "Tab next field • Enter activate • Ctrl-S save • Esc cancel",
        (InputMode::Browse, Page::List(_)) => {
            "j/k move • Enter edit • n new • r refresh • Esc back • ? help"
        }
        (InputMode::Browse, _) => "j/k move • Enter select • n new • ? help • q quit",
    };
    let (text, style) = if let Some(note) = app.latest_notification() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "SUCCESS",
        };
        (
            format!("{}: {}  |  {}", label, note.message, help),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_modal(f: &mut Frame<'_>, app: &App) {
    let Some(modal) = &app.modal else {
        return;
    };
    let area = helpers::centered_rect(60, 30, f.size());
    f.render_widget(Clear, area);
    let widget = Paragraph::new(format!("{}\n\nPress any key to close.", modal.message))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title(modal.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(widget, area);
}
