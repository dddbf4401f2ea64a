use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::console::{DangerEvent, DangerStep, PURGE_CONFIRM_TEXT};

use super::app::App;
use super::fields::Field;
use super::input::Input;
use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum DangerFocus {
    ConfirmId,
    ConfirmText,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ModalKind {
    Search,
    EditField(Field),
    Danger { focus: DangerFocus },
}

#[derive(Debug)]
pub(super) struct Modal {
    pub(super) kind: ModalKind,
    pub(super) input: Input,
}

impl Modal {
    pub(super) fn new(kind: ModalKind, initial: &str) -> Self {
        Self {
            kind,
            input: Input::with_text(initial),
        }
    }
}

pub(super) fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let Some(kind) = app.modal.as_ref().map(|m| m.kind) else {
        return;
    };
    match kind {
        ModalKind::Danger { focus } => handle_danger_key(app, focus, key),
        ModalKind::Search | ModalKind::EditField(_) => handle_text_key(app, kind, key),
    }
}

fn handle_text_key(app: &mut App, kind: ModalKind, key: KeyEvent) {
    let Some(modal) = app.modal.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => app.modal = None,
        KeyCode::Enter => {
            let text = std::mem::take(&mut modal.input.buf);
            app.modal = None;
            match kind {
                ModalKind::Search => app.apply_search(&text),
                ModalKind::EditField(field) => app.commit_field(field, &text),
                ModalKind::Danger { .. } => {}
            }
        }
        KeyCode::Left => modal.input.move_left(),
        KeyCode::Right => modal.input.move_right(),
        KeyCode::Backspace => modal.input.backspace(),
        KeyCode::Delete => modal.input.delete(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            modal.input.clear()
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            modal.input.insert_char(c)
        }
        _ => {}
    }
}

fn handle_danger_key(app: &mut App, focus: DangerFocus, key: KeyEvent) {
    let step = app.danger_step();
    match key.code {
        KeyCode::Esc => app.danger_event(DangerEvent::Cancel),
        KeyCode::Left => app.danger_event(DangerEvent::Back),
        KeyCode::Enter => {
            let needs_confirm = app
                .console
                .workspace
                .as_ref()
                .and_then(|w| w.danger.action())
                .map(|a| a.needs_typed_confirmation())
                .unwrap_or(false);
            let event = match step {
                DangerStep::Impact => DangerEvent::Next,
                DangerStep::Reason if needs_confirm => DangerEvent::Next,
                _ => DangerEvent::Submit,
            };
            app.danger_event(event);
        }
        KeyCode::Tab if step == DangerStep::Confirm => {
            let next = match focus {
                DangerFocus::ConfirmId => DangerFocus::ConfirmText,
                DangerFocus::ConfirmText => DangerFocus::ConfirmId,
            };
            if let Some(m) = app.modal.as_mut() {
                m.kind = ModalKind::Danger { focus: next };
            }
        }
        KeyCode::Backspace => {
            let empty = match app.danger_text_mut(focus) {
                Some(text) => text.pop().is_none(),
                None => true,
            };
            if empty {
                app.danger_event(DangerEvent::Back);
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(text) = app.danger_text_mut(focus) {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn centered(area: Rect, max_w: u16, max_h: u16) -> Rect {
    let w = area.width.saturating_sub(6).clamp(20, max_w);
    let h = area.height.saturating_sub(6).clamp(6, max_h);
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, app: &App, modal: &Modal) {
    match modal.kind {
        ModalKind::Search => draw_text_modal(frame, "Search businesses", "name or id", modal),
        ModalKind::EditField(field) => draw_text_modal(frame, field.label(), field.label(), modal),
        ModalKind::Danger { focus } => draw_danger(frame, app, focus),
    }
}

fn draw_text_modal(frame: &mut ratatui::Frame, title: &str, prompt: &str, modal: &Modal) {
    let area = centered(frame.area(), 70, 7);
    frame.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(modal.input.buf.as_str())
            .block(Block::default().borders(Borders::ALL).title(prompt.to_string())),
        parts[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Enter: apply  Esc: cancel",
            Style::default().fg(Color::DarkGray),
        ))),
        parts[1],
    );
    frame.set_cursor_position((parts[0].x + 1 + modal.input.cursor as u16, parts[0].y + 1));
}

fn draw_danger(frame: &mut ratatui::Frame, app: &App, focus: DangerFocus) {
    let Some(ws) = app.console.workspace.as_ref() else {
        return;
    };
    let flow = &ws.danger;
    let Some(action) = flow.action() else {
        return;
    };

    let area = centered(frame.area(), 80, 16);
    frame.render_widget(Clear, area);
    let step_no = match flow.step() {
        DangerStep::Impact => 1,
        DangerStep::Reason => 2,
        _ => 3,
    };
    let steps = if action.needs_typed_confirmation() { 3 } else { 2 };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(format!("{} ({}/{})", action.label(), step_no, steps));
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let field = |label: &str, value: &str, active: bool| {
        let style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{}: ", label), style),
            Span::raw(value.to_string()),
        ])
    };

    let mut lines = vec![
        Line::from(format!("Business: {}", flow.business_id())),
        Line::from(""),
    ];
    match flow.step() {
        DangerStep::Impact => {
            lines.push(Line::from(action.impact()));
            lines.push(Line::from(""));
            lines.push(Line::from("Enter: continue  Esc: cancel"));
        }
        DangerStep::Reason => {
            lines.push(field("Reason", &flow.reason, true));
            lines.push(Line::from(""));
            let enter = if action.needs_typed_confirmation() {
                "continue"
            } else {
                "submit"
            };
            lines.push(Line::from(format!(
                "Enter: {}  Left: back  Esc: cancel",
                enter
            )));
        }
        DangerStep::Confirm => {
            lines.push(Line::from(format!(
                "Type the business ID and {} to confirm.",
                PURGE_CONFIRM_TEXT
            )));
            lines.push(field(
                "Business ID",
                &flow.confirm_business_id,
                focus == DangerFocus::ConfirmId,
            ));
            lines.push(field(
                "Confirmation",
                &flow.confirm_text,
                focus == DangerFocus::ConfirmText,
            ));
            lines.push(Line::from(""));
            lines.push(Line::from("Tab: switch field  Enter: purge  Left: back  Esc: cancel"));
        }
        DangerStep::Closed => {}
    }
    if let Some(b) = app.console.banner() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            b.text.clone(),
            Style::default().fg(super::render::banner_color(b.kind)),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
