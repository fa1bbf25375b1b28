use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Input;

#[derive(Debug)]
pub(super) struct Modal {
    pub(super) title: String,
    pub(super) lines: Vec<String>,
    pub(super) scroll: usize,
    pub(super) input: Input,
    pub(super) kind: ModalKind,
}

#[derive(Debug)]
pub(super) enum ModalKind {
    Viewer,
    Confirm { action: PendingAction },
    TextInput { action: TextInputAction, prompt: String },
}

/// Destructive commands held until the user confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PendingAction {
    Delete { path: String },
    Wipe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TextInputAction {
    NewFolder { parent: String },
    NewFile { parent: String },
    Rename { from: String },
    Ask,
}

impl Modal {
    pub(super) fn viewer(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
            scroll: 0,
            input: Input::default(),
            kind: ModalKind::Viewer,
        }
    }

    pub(super) fn confirm(title: impl Into<String>, lines: Vec<String>, action: PendingAction) -> Self {
        Self {
            title: title.into(),
            lines,
            scroll: 0,
            input: Input::default(),
            kind: ModalKind::Confirm { action },
        }
    }

    pub(super) fn text_input(
        title: impl Into<String>,
        lines: Vec<String>,
        prompt: &str,
        initial: &str,
        action: TextInputAction,
    ) -> Self {
        let mut input = Input::default();
        input.set(initial.to_string());
        Self {
            title: title.into(),
            lines,
            scroll: 0,
            input,
            kind: ModalKind::TextInput {
                action,
                prompt: prompt.to_string(),
            },
        }
    }
}

/// What a key press inside a modal asks the app to do.
pub(super) enum ModalOutcome {
    None,
    Close,
    Confirm(PendingAction),
    Submit {
        action: TextInputAction,
        value: String,
    },
}

pub(super) fn handle_modal_key(m: &mut Modal, key: KeyEvent) -> ModalOutcome {
    match &m.kind {
        ModalKind::Viewer => {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => return ModalOutcome::Close,
                KeyCode::Up => m.scroll = m.scroll.saturating_sub(1),
                KeyCode::Down => m.scroll = (m.scroll + 1).min(m.lines.len().saturating_sub(1)),
                KeyCode::PageUp => m.scroll = m.scroll.saturating_sub(10),
                KeyCode::PageDown => {
                    m.scroll = (m.scroll + 10).min(m.lines.len().saturating_sub(1))
                }
                _ => {}
            }
            ModalOutcome::None
        }

        ModalKind::Confirm { action } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                ModalOutcome::Confirm(action.clone())
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ModalOutcome::Close,
            _ => ModalOutcome::None,
        },

        ModalKind::TextInput { action, .. } => {
            match key.code {
                KeyCode::Esc => return ModalOutcome::Close,
                KeyCode::Enter => {
                    let value = m.input.buf.trim().to_string();
                    if value.is_empty() {
                        m.lines.retain(|l| !l.starts_with("error:"));
                        m.lines.push("error: value required".to_string());
                        return ModalOutcome::None;
                    }
                    return ModalOutcome::Submit {
                        action: action.clone(),
                        value,
                    };
                }
                KeyCode::Backspace => m.input.backspace(),
                KeyCode::Delete => m.input.delete(),
                KeyCode::Left => m.input.move_left(),
                KeyCode::Right => m.input.move_right(),
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    m.input.insert_char(c)
                }
                _ => {}
            }
            ModalOutcome::None
        }
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 90);
    let h = area.height.saturating_sub(6).clamp(8, 22);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = ratatui::layout::Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let title = match &modal.kind {
        ModalKind::Confirm { .. } => format!("{} (y/n)", modal.title),
        _ => modal.title.clone(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    let scroll = modal.scroll.min(modal.lines.len().saturating_sub(1)) as u16;

    match &modal.kind {
        ModalKind::Viewer | ModalKind::Confirm { .. } => {
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0)),
                inner,
            );
        }

        ModalKind::TextInput { prompt, .. } => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(inner);

            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0)),
                parts[0],
            );

            let input_line = Line::from(vec![
                Span::styled(prompt.as_str(), Style::default().fg(Color::Yellow)),
                Span::raw(modal.input.buf.as_str()),
            ]);
            frame.render_widget(
                Paragraph::new(input_line)
                    .block(Block::default().borders(Borders::ALL).title("Edit")),
                parts[1],
            );

            let x = prompt.chars().count() as u16 + modal.input.cursor as u16;
            let y = parts[1].y + 1;
            frame.set_cursor_position((parts[1].x + 1 + x, y));
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/modal_tests.rs"]
mod tests;
