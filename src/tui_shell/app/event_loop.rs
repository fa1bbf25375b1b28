use super::*;

use crate::tui_shell::modal::{ModalOutcome, draw_modal, handle_modal_key};

pub(in crate::tui_shell) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| {
                super::render::draw(f, app);
                if let Some(m) = &app.modal {
                    draw_modal(f, m);
                }
            })
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if let Some(m) = app.modal.as_mut() {
        match handle_modal_key(m, key) {
            ModalOutcome::None => {}
            ModalOutcome::Close => app.modal = None,
            ModalOutcome::Confirm(action) => {
                app.modal = None;
                app.run_pending(action);
            }
            ModalOutcome::Submit { action, value } => {
                app.modal = None;
                app.run_text_input(action, &value);
            }
        }
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => app.quit = true,
        KeyCode::Char('w') if ctrl => app.close_active_tab(),
        KeyCode::Char('a') if ctrl => app.toggle_assistant(),
        KeyCode::Char('p') if ctrl => {
            app.input.history_up();
            app.recompute_suggestions();
        }
        KeyCode::Char('n') if ctrl => {
            app.input.history_down();
            app.recompute_suggestions();
        }
        KeyCode::Char('q') if app.input.buf.is_empty() => app.quit = true,
        KeyCode::F(2) => app.prompt_rename(),
        KeyCode::Delete if app.input.buf.is_empty() => app.confirm_delete(),

        KeyCode::Esc => {
            app.input.clear();
            app.recompute_suggestions();
        }
        KeyCode::Tab => {
            if app.input.buf.is_empty() {
                app.focus = app.focus.next();
            } else {
                app.accept_suggestion();
            }
        }
        KeyCode::Enter => {
            if app.input.buf.trim().is_empty() {
                app.input.clear();
                app.default_action();
            } else {
                let line = app.input.submit();
                app.suggestions.clear();
                app.suggestion_selected = 0;
                app.run_command(line.trim());
            }
        }

        KeyCode::Up if !app.suggestions.is_empty() => {
            app.suggestion_selected = app.suggestion_selected.saturating_sub(1);
        }
        KeyCode::Down if !app.suggestions.is_empty() => {
            app.suggestion_selected =
                (app.suggestion_selected + 1).min(app.suggestions.len().saturating_sub(1));
        }
        KeyCode::Up => app.move_focus_cursor(-1),
        KeyCode::Down => app.move_focus_cursor(1),

        KeyCode::Left if app.input.buf.is_empty() => app.move_focus_sideways(-1),
        KeyCode::Right if app.input.buf.is_empty() => app.move_focus_sideways(1),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),

        KeyCode::Backspace => {
            app.input.backspace();
            app.recompute_suggestions();
        }
        KeyCode::Delete => {
            app.input.delete();
            app.recompute_suggestions();
        }
        KeyCode::Char(c) if !ctrl => {
            app.input.insert_char(c);
            app.recompute_suggestions();
        }
        _ => {}
    }
}

impl App {
    /// Enter with an empty input line acts on the focused pane.
    fn default_action(&mut self) {
        match self.focus {
            Focus::Tree => {
                let Some(path) = self.cursor_path() else {
                    return;
                };
                let is_folder = self
                    .console
                    .tree()
                    .find(&path)
                    .is_some_and(TreeNode::is_folder);
                if is_folder {
                    if !self.expanded.remove(&path) {
                        self.expanded.insert(path);
                    }
                    self.clamp_tree_cursor();
                } else {
                    self.open_path(&path);
                }
            }
            Focus::Tabs => {
                let Some(doc) = self.console.session().active() else {
                    return;
                };
                let lines = vec![
                    format!("path: {}", doc.path),
                    format!("folder: {}", doc.folder_label()),
                    format!("type: {}", doc.type_label()),
                ];
                self.push_output(lines);
            }
            Focus::Dashboard => {
                let Some(id) = self
                    .console
                    .dashboard()
                    .activity()
                    .get(self.activity_cursor)
                    .map(|r| r.document_id.clone())
                else {
                    return;
                };
                self.pick(BulkAction::Sync, &id);
            }
        }
    }

    fn move_focus_cursor(&mut self, delta: isize) {
        match self.focus {
            Focus::Tree => self.move_tree_cursor(delta),
            Focus::Tabs => self.move_focus_sideways(delta),
            Focus::Dashboard => {
                let len = self.console.dashboard().activity().len();
                if len == 0 {
                    return;
                }
                let next = (self.activity_cursor as isize + delta).clamp(0, len as isize - 1);
                self.activity_cursor = next as usize;
            }
        }
    }

    /// Left/Right cycle tabs from any pane; in the tree they also fold folders.
    fn move_focus_sideways(&mut self, delta: isize) {
        if self.focus == Focus::Tree {
            if let Some(path) = self.cursor_path() {
                let is_folder = self
                    .console
                    .tree()
                    .find(&path)
                    .is_some_and(TreeNode::is_folder);
                if is_folder {
                    if delta < 0 {
                        self.expanded.remove(&path);
                    } else {
                        self.expanded.insert(path);
                    }
                    self.clamp_tree_cursor();
                    return;
                }
            }
        }

        let session = self.console.session();
        let len = session.len();
        let Some(active) = session.active_index() else {
            return;
        };
        let next = (active as isize + delta).rem_euclid(len as isize) as usize;
        if let Err(e) = self.console.set_active(next) {
            self.push_error(e.to_string());
        }
    }
}
