//! Rendering. Pure functions from app state to the frame; no state lives
//! here.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::{App, Focus, Screen};
use crate::auth_view::SignUpField;

/// Draw the active screen.
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::SignIn => render_sign_in(frame, app),
        Screen::SignUp => render_sign_up(frame, app),
        Screen::Tasks => render_tasks(frame, app),
    }
}

fn focused_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn input_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focused_style(focused))
}

// ── Auth screens ─────────────────────────────────────────────────────────────

fn render_sign_in(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 12, frame.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new("traq — sign in").block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(mask(&app.sign_in.token)).block(input_block("Access token", true)),
        chunks[1],
    );
    let hint = app
        .sign_in
        .notice
        .as_deref()
        .unwrap_or("Enter: sign in · Tab: sign up · Esc: quit");
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn render_sign_up(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 16, frame.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new("traq — create account").block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );
    let form = &app.sign_up;
    frame.render_widget(
        Paragraph::new(form.name.as_str())
            .block(input_block("Name", form.focus == SignUpField::Name)),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(form.email.as_str())
            .block(input_block("Email", form.focus == SignUpField::Email)),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(mask(&form.password))
            .block(input_block("Password", form.focus == SignUpField::Password)),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new("Enter: register · Tab: next field · Esc: back")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );

    if let Some(notice) = form.notice.as_deref() {
        render_modal(frame, notice);
    }
}

// ── Task screen ──────────────────────────────────────────────────────────────

fn render_tasks(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_top_bar(frame, app, chunks[0]);
    frame.render_widget(
        Paragraph::new(app.view.search_title.as_str())
            .block(input_block("Search by title", app.focus == Focus::Search)),
        chunks[1],
    );
    render_draft(frame, app, chunks[2]);
    render_list(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

fn render_top_bar(frame: &mut Frame, app: &App, area: Rect) {
    let tracking = match app.view.tracking_task_id() {
        Some(id) => {
            let title = app
                .view
                .tasks
                .iter()
                .find(|t| t.id == id)
                .map_or("?", |t| t.title.as_str());
            format!("tracking {title}: {}", app.view.elapsed_display())
        }
        None => format!("time spent: {}", app.view.time_spent_display()),
    };
    let line = Line::from(vec![
        Span::styled("traq", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(tracking, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            app.user_label.as_str(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_draft(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = match &app.view.editing {
        Some(task) => format!("Edit task #{}", task.id),
        None => "New task".to_string(),
    };
    frame.render_widget(
        Paragraph::new(app.view.draft.title.as_str())
            .block(input_block(&title, app.focus == Focus::DraftTitle)),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(app.view.draft.status.as_str())
            .block(input_block("Status", app.focus == Focus::DraftStatus)),
        halves[1],
    );
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .view
        .tasks
        .iter()
        .map(|task| {
            let marker = if app.view.tracking_task_id() == Some(task.id) {
                "⏱ "
            } else {
                "  "
            };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::raw(format!("#{} ", task.id)),
                Span::styled(
                    task.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{}]", task.status),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Tasks")
                .borders(Borders::ALL)
                .border_style(focused_style(app.focus == Focus::List)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !app.view.tasks.is_empty() {
        state.select(Some(app.view.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.view.last_error {
        Some(error) => Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            "n: new · e: edit · d: delete · t: track · /: search · r: refresh · o: sign out · q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(text), area);
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn render_modal(frame: &mut Frame, text: &str) {
    let area = centered_rect(40, 5, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .title("Notice (Enter to dismiss)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}

fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_hides_every_character() {
        assert_eq!(mask("hunter2"), "•••••••");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 12, area);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 12);
        assert!(rect.x + rect.width <= area.width);
        assert!(rect.y + rect.height <= area.height);
    }

    #[test]
    fn centered_rect_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(60, 12, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }
}
