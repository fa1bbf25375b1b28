use super::*;

use super::panes::{
    activity_line, document_lines, stats_lines, status_color, tab_label, tree_row_label,
};

const PROMPT: &str = "docdesk> ";

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(if app.suggestions.is_empty() { 0 } else { 9 }),
            Constraint::Length(3),
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
        ts_mode: app.ts_mode,
    };
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(44),
            Constraint::Percentage(28),
        ])
        .split(chunks[1]);
    draw_tree(frame, app, panes[0]);
    draw_tabs(frame, app, panes[1]);
    draw_dashboard(frame, app, panes[2], &ctx);

    draw_last(frame, app, chunks[2]);
    if !app.suggestions.is_empty() {
        draw_suggestions(frame, app, chunks[3]);
    }
    draw_input(frame, app, chunks[4]);
}

fn pane_block(app: &App, focus: Focus, title: String) -> Block<'static> {
    let style = if app.focus == focus {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

/// First row to show so `cursor` stays inside a window of `height` rows.
fn window_start(cursor: usize, total: usize, height: usize) -> usize {
    if height == 0 || total <= height {
        return 0;
    }
    cursor.saturating_sub(height - 1).min(total - height)
}

fn draw_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let remote = app.console.remote().remote();
    let mut spans = vec![
        Span::styled("DocDesk", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw("  "),
        Span::raw(format!("bucket={}", remote.bucket)),
        Span::raw("  "),
        Span::styled(
            format!("focus={}", app.focus.label()),
            Style::default().fg(Color::Cyan),
        ),
    ];
    match app.console.identity() {
        Some(id) => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{} ({})", id.user_id, id.user_role),
                Style::default().fg(Color::Green),
            ));
        }
        None => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled("no identity", Style::default().fg(Color::Red)));
        }
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_tree(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let tree = app.console.tree();
    let mut title = "Files".to_string();
    if tree.is_loading() {
        title.push_str(" (loading)");
    }
    let block = pane_block(app, Focus::Tree, title);
    let inner_h = area.height.saturating_sub(2) as usize;

    let mut lines = Vec::new();
    if let Some(err) = tree.error() {
        lines.push(Line::from(Span::styled(
            format!("error: {}", err),
            Style::default().fg(Color::Red),
        )));
    }

    let rows = app.visible_tree();
    if rows.is_empty() && tree.error().is_none() {
        lines.push(Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::Gray),
        )));
    }
    let selected = tree.selected();
    let start = window_start(app.tree_cursor, rows.len(), inner_h.saturating_sub(lines.len()));
    for (i, row) in rows.iter().enumerate().skip(start) {
        let mut style = if row.node.is_folder() {
            Style::default().fg(Color::Blue)
        } else {
            Style::default()
        };
        if selected == Some(row.node.path.as_str()) {
            style = style.add_modifier(Modifier::BOLD);
        }
        if i == app.tree_cursor && app.focus == Focus::Tree {
            style = style.bg(Color::DarkGray);
        }
        lines.push(Line::from(Span::styled(tree_row_label(row), style)));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_tabs(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let session = app.console.session();
    let title = match app.console.tree().breadcrumb() {
        crumbs if crumbs.is_empty() => "Documents".to_string(),
        crumbs => crumbs.join(" / "),
    };
    let block = pane_block(app, Focus::Tabs, title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let active = session.active_index();
    let mut tabs = Vec::new();
    for (i, doc) in session.documents().iter().enumerate() {
        let style = if Some(i) == active {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        tabs.push(Span::styled(tab_label(i, doc), style));
        tabs.push(Span::raw(" "));
    }
    if tabs.is_empty() {
        tabs.push(Span::styled("no open documents", Style::default().fg(Color::Gray)));
    }
    frame.render_widget(Paragraph::new(Line::from(tabs)), parts[0]);

    let body: Vec<Line> = match session.active() {
        Some(doc) => document_lines(doc).into_iter().map(Line::from).collect(),
        None => vec![Line::from(Span::styled(
            "Select a file and press Enter, or `ask <question>`",
            Style::default().fg(Color::Gray),
        ))],
    };
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), parts[1]);
}

fn draw_dashboard(frame: &mut ratatui::Frame, app: &App, area: Rect, ctx: &RenderCtx) {
    let dash = app.console.dashboard();
    let mut title = "Ingestion".to_string();
    if dash.is_loading() {
        title.push_str(" (loading)");
    }
    let block = pane_block(app, Focus::Dashboard, title);
    let inner_h = area.height.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = stats_lines(dash.stats(), ctx)
        .into_iter()
        .map(Line::from)
        .collect();
    if let Some(err) = dash.error() {
        lines.push(Line::from(Span::styled(
            format!("error: {}", err),
            Style::default().fg(Color::Red),
        )));
    }

    for action in [BulkAction::Sync, BulkAction::Wipe] {
        let busy = if dash.is_busy(action) { " (running)" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{: <5}", action.as_str()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(dash.selector(action).summary()),
            Span::styled(busy, Style::default().fg(Color::Magenta)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "Recent activity",
        Style::default().add_modifier(Modifier::UNDERLINED),
    )));

    let activity = dash.activity();
    let room = inner_h.saturating_sub(lines.len());
    let start = window_start(app.activity_cursor, activity.len(), room);
    for (i, row) in activity.iter().enumerate().skip(start).take(room) {
        let mut style = Style::default().fg(status_color(&row.status));
        if i == app.activity_cursor && app.focus == Focus::Dashboard {
            style = style.bg(Color::DarkGray);
        }
        lines.push(Line::from(Span::styled(activity_line(row, ctx), style)));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_last(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if let Some(cmd) = &app.last_command {
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(cmd.as_str()),
        ]));
    }
    if let Some(r) = &app.last_result {
        let style = match r.kind {
            EntryKind::Output => Style::default().fg(Color::White),
            EntryKind::Error => Style::default().fg(Color::Red),
        };
        for (i, l) in r.lines.iter().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ", fmt_ts_ui(&r.ts)),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(l.as_str(), style),
                ]));
            } else {
                lines.push(Line::from(Span::styled(l.as_str(), style)));
            }
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).title("Last")),
        area,
    );
}

fn draw_suggestions(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let total = app.suggestions.len();
    let sel_idx = app.suggestion_selected.min(total.saturating_sub(1));
    let mut lines = vec![Line::from(Span::styled(
        format!("Suggestions {}/{}", sel_idx + 1, total),
        Style::default().fg(Color::Gray),
    ))];

    let max_items = (area.height.saturating_sub(2) as usize).saturating_sub(1).max(1);
    let start = window_start(sel_idx, total, max_items);
    for (i, s) in app.suggestions.iter().enumerate().skip(start).take(max_items) {
        let style = if i == sel_idx {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{: <28}", s.usage), style.fg(Color::Yellow)),
            Span::styled(s.help, style.fg(Color::White)),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP | Borders::BOTTOM)),
        area,
    );
}

fn draw_input(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(Color::Yellow)),
        Span::raw(app.input.buf.as_str()),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
    if app.modal.is_none() {
        let x = PROMPT.chars().count() as u16 + app.input.cursor as u16;
        frame.set_cursor_position((area.x + 1 + x, area.y + 1));
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/app/render_tests.rs"]
mod tests;
