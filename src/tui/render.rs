use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Tabs, Wrap};

use crate::console::{DangerAction, WorkspaceTab, WorkspaceView};
use crate::cursor_list::ListPhase;
use crate::error::BannerKind;
use crate::model::{Business, BusinessStatus};

use super::app::{App, Screen};
use super::fields::fields_for;

pub(super) fn banner_color(kind: BannerKind) -> Color {
    match kind {
        BannerKind::Info => Color::Cyan,
        BannerKind::Success => Color::Green,
        BannerKind::Error => Color::Red,
    }
}

fn status_color(status: BusinessStatus) -> Color {
    match status {
        BusinessStatus::Active => Color::Green,
        BusinessStatus::Grace => Color::Yellow,
        BusinessStatus::Expired | BusinessStatus::Suspended => Color::Red,
        BusinessStatus::Archived | BusinessStatus::Deleted => Color::DarkGray,
    }
}

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.screen {
        Screen::Businesses => draw_businesses(frame, app, chunks[1]),
        Screen::Workspace => match &app.console.workspace {
            Some(ws) => draw_workspace(frame, app, ws, chunks[1]),
            None => frame.render_widget(Paragraph::new("No business open."), chunks[1]),
        },
    }

    // Banner
    let banner = match app.console.banner() {
        Some(b) => Line::from(Span::styled(
            b.text.clone(),
            Style::default().fg(banner_color(b.kind)),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(banner), chunks[2]);

    let hints = match app.screen {
        Screen::Businesses => "j/k move  Enter open  / search  m more  r refresh  p pin  q quit",
        Screen::Workspace => {
            "Tab switch  j/k field  Enter edit  s save  d danger  m more  r reload  Esc back"
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[3],
    );

    if let Some(modal) = &app.modal {
        super::modal::draw_modal(frame, app, modal);
    }
}

fn draw_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " NVI Platform ",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::raw(app.console.client().base_url().to_string()),
    ];
    if let Some(c) = &app.claims {
        spans.push(Span::raw("  "));
        let color = if c.is_platform_admin() {
            Color::Green
        } else {
            Color::Red
        };
        spans.push(Span::styled(c.label(), Style::default().fg(color)));
    }
    let busy = app.console.actions.in_flight();
    if !busy.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("working: {}", busy.join(", ")),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn business_row<'a>(app: &App, b: &'a Business) -> Row<'a> {
    let pinned = if app.console.pins().contains(&b.id) {
        "*"
    } else {
        ""
    };
    let tier = b
        .subscription
        .as_ref()
        .map(|s| s.tier.as_str())
        .unwrap_or("-");
    let review = if b.under_review {
        b.review_severity.map(|s| s.as_str()).unwrap_or("yes")
    } else {
        ""
    };
    let read_only = if b.read_only_enabled() { "RO" } else { "" };
    Row::new(vec![
        Span::styled(pinned, Style::default().fg(Color::Yellow)),
        Span::raw(b.name.as_str()),
        Span::raw(b.id.as_str()),
        Span::styled(b.status.as_str(), Style::default().fg(status_color(b.status))),
        Span::raw(tier),
        Span::styled(review, Style::default().fg(Color::Red)),
        Span::raw(read_only),
    ])
}

fn draw_businesses(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(38)])
        .split(area);

    let list = &app.console.businesses.list;
    let rows: Vec<Row> = app.rows().into_iter().map(|b| business_row(app, b)).collect();
    let mut title = format!("Businesses ({})", list.items().len());
    let search = &app.console.businesses.query.search;
    if !search.is_empty() {
        title.push_str(&format!(" search={}", search));
    }
    match list.phase() {
        ListPhase::Loading => title.push_str(" loading..."),
        ListPhase::LoadingMore => title.push_str(" loading more..."),
        ListPhase::Failed => title.push_str(" failed"),
        _ if list.next_cursor().is_some() => title.push_str(" [m: more]"),
        _ => {}
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(7),
            Constraint::Length(3),
        ],
    )
    .header(
        Row::new(vec!["", "Name", "ID", "Status", "Tier", "Review", "RO"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = TableState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(table, parts[0], &mut state);

    // Pending subscription requests alongside the list.
    let requests = app.console.queues.subscription_requests.items();
    let mut lines: Vec<Line> = requests
        .iter()
        .take(parts[1].height.saturating_sub(2) as usize)
        .map(|r| {
            Line::from(format!(
                "{} -> {}",
                r.business_name.as_deref().unwrap_or(&r.business_id),
                r.requested_tier.as_str()
            ))
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "none",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Subscription requests ({})", requests.len())),
        ),
        parts[1],
    );
}

fn draw_workspace(frame: &mut ratatui::Frame, app: &App, ws: &WorkspaceView, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let name = ws
        .aggregate
        .as_ref()
        .map(|a| a.business.name.clone())
        .unwrap_or_else(|| ws.business_id.clone());
    let title = if ws.is_loading() {
        format!("{} loading...", name)
    } else {
        name
    };
    let titles: Vec<&str> = WorkspaceTab::ALL.iter().map(|t| t.title()).collect();
    let selected = WorkspaceTab::ALL
        .iter()
        .position(|t| *t == ws.tab)
        .unwrap_or(0);
    frame.render_widget(
        Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title(title)),
        parts[0],
    );

    let lines = match ws.tab {
        WorkspaceTab::Summary => summary_lines(app, ws),
        WorkspaceTab::Devices => device_lines(ws),
        WorkspaceTab::Danger => danger_lines(app),
        tab => form_lines(app, ws, tab),
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL)),
        parts[1],
    );
}

fn summary_lines<'a>(app: &'a App, ws: &'a WorkspaceView) -> Vec<Line<'a>> {
    let Some(agg) = ws.aggregate.as_ref() else {
        return vec![Line::from("Loading...")];
    };
    let b = agg.merged_business();
    let mut lines = vec![
        Line::from(format!("ID: {}", b.id)),
        Line::from(vec![
            Span::raw("Status: "),
            Span::styled(
                b.status.as_str(),
                Style::default().fg(status_color(b.status)),
            ),
        ]),
    ];
    if let Some(sub) = &b.subscription {
        let deadline = sub.next_deadline().unwrap_or("-");
        lines.push(Line::from(format!(
            "Subscription: {} {} (until {})",
            sub.tier.as_str(),
            sub.status.as_str(),
            deadline
        )));
    }
    if b.under_review {
        lines.push(Line::from(Span::styled(
            format!(
                "Under review: {} {}",
                b.review_severity.map(|s| s.as_str()).unwrap_or("-"),
                b.review_reason.as_deref().unwrap_or("")
            ),
            Style::default().fg(Color::Red),
        )));
    }
    if b.read_only_enabled() {
        lines.push(Line::from(Span::styled(
            "Read-only mode is on",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(h) = &agg.health {
        lines.push(Line::from(format!(
            "Health: {} {}",
            h.score,
            h.status.as_deref().unwrap_or("")
        )));
        for r in &h.reasons {
            lines.push(Line::from(format!("  - {}", r)));
        }
    }
    if let Some(c) = &b.counts {
        let n = |v: Option<u64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
        lines.push(Line::from(format!(
            "Users {}  Branches {}  Products {}  Devices {}",
            n(c.users),
            n(c.branches),
            n(c.products),
            n(c.devices)
        )));
    }
    if let Some(note) = app.console.notes().get(&b.id) {
        lines.push(Line::from(format!("Note: {}", note)));
    }
    if !agg.recent_actions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Recent actions",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for a in &agg.recent_actions {
            lines.push(Line::from(format!(
                "{} {} {}",
                a.created_at,
                a.action,
                a.reason.as_deref().unwrap_or("")
            )));
        }
    }
    lines
}

fn form_lines<'a>(app: &'a App, ws: &'a WorkspaceView, tab: WorkspaceTab) -> Vec<Line<'a>> {
    let Some(drafts) = ws.drafts.as_ref() else {
        return vec![Line::from("Loading...")];
    };
    let mut lines = Vec::new();
    for (i, f) in fields_for(tab).iter().enumerate() {
        let style = if i == app.field {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<24}", f.label()), style),
            Span::raw(" "),
            Span::raw(f.value(drafts)),
        ]));
    }
    if tab == WorkspaceTab::Subscription {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "History",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for e in ws.history.items() {
            lines.push(Line::from(format!(
                "{} {} -> {} {}",
                e.created_at,
                e.previous_tier.map(|t| t.as_str()).unwrap_or("-"),
                e.next_tier.map(|t| t.as_str()).unwrap_or("-"),
                e.reason.as_deref().unwrap_or("")
            )));
        }
    }
    lines
}

fn device_lines(ws: &WorkspaceView) -> Vec<Line<'_>> {
    let mut lines: Vec<Line> = ws
        .devices
        .items()
        .iter()
        .map(|d| {
            Line::from(format!(
                "{}  {}  {}  {}",
                d.id,
                d.name.as_deref().unwrap_or("-"),
                d.status.as_deref().unwrap_or("-"),
                d.last_seen_at.as_deref().unwrap_or("-")
            ))
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from("No devices."));
    }
    if ws.devices.next_cursor().is_some() {
        lines.push(Line::from(Span::styled(
            "m: load more",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn danger_lines(app: &App) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for (i, a) in DangerAction::ALL.iter().enumerate() {
        let selected = i == app.danger_sel;
        let style = if selected {
            Style::default().fg(Color::Red).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Red)
        };
        lines.push(Line::from(Span::styled(a.label(), style)));
        if selected {
            lines.push(Line::from(format!("  {}", a.impact())));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Enter or d: start"));
    lines
}
