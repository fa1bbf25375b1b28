use super::*;

use std::path::Path;

use serde_json::Value;

use crate::tree::TreeSynchronizer;
use crate::tui_shell::commands::{resolve, split_args};

impl App {
    pub(super) fn run_command(&mut self, line: &str) {
        self.last_command = Some(line.to_string());
        let args = split_args(line);
        let Some((word, rest)) = args.split_first() else {
            return;
        };
        let Some(cmd) = resolve(word) else {
            self.push_error(format!("unknown command '{}' (try `help`)", word));
            return;
        };
        tracing::debug!(command = cmd, args = rest.len(), "run command");

        match cmd {
            "help" => match help_lines(rest.first().map(String::as_str)) {
                Ok(lines) => self.modal = Some(Modal::viewer("Help", lines)),
                Err(e) => self.push_error(e),
            },
            "refresh" => self.refresh_all(),
            "open" => match rest.first().cloned().or_else(|| self.cursor_path()) {
                Some(path) => self.open_path(&path),
                None => self.push_error("usage: open <path>".to_string()),
            },
            "close" => self.close_active_tab(),
            "tab" => self.cmd_tab(rest),
            "mkdir" => self.cmd_create(rest, true),
            "touch" => self.cmd_create(rest, false),
            "mv" => match rest {
                [from, to] => self.rename(from, to),
                [] => self.prompt_rename(),
                _ => self.push_error("usage: mv <old> <new>".to_string()),
            },
            "rm" => match rest.first() {
                Some(path) => self.confirm_delete_path(path.clone()),
                None => self.confirm_delete(),
            },
            "upload" => self.cmd_upload(rest),
            "url" => {
                let Some(path) = rest.first().cloned().or_else(|| self.cursor_path()) else {
                    self.push_error("usage: url <path>".to_string());
                    return;
                };
                match self.console.download_url(&path) {
                    Ok(url) => self.push_output(vec![url]),
                    Err(e) => self.push_error(e.to_string()),
                }
            }
            "ask" => {
                let question = rest.join(" ");
                if question.trim().is_empty() {
                    self.modal = Some(Modal::text_input(
                        "Ask the assistant",
                        vec!["Answers are added to the AI Playground tab.".to_string()],
                        "question: ",
                        "",
                        TextInputAction::Ask,
                    ));
                } else {
                    self.ask(&question);
                }
            }
            "chat" => self.toggle_assistant(),
            "pick" => match rest {
                [action, id] => match parse_bulk_action(action) {
                    Ok(action) => self.pick(action, id),
                    Err(e) => self.push_error(e),
                },
                _ => self.push_error("usage: pick <sync|wipe> <id|ALL>".to_string()),
            },
            "clear" => match rest.first().map(|a| parse_bulk_action(a)) {
                Some(Ok(action)) => {
                    self.console.clear_targets(action);
                    self.push_output(vec![format!("{} selection cleared", action.as_str())]);
                }
                Some(Err(e)) => self.push_error(e),
                None => self.push_error("usage: clear <sync|wipe>".to_string()),
            },
            "candidates" => match rest.first().map(|a| parse_bulk_action(a)) {
                Some(Ok(action)) => self.show_candidates(action),
                Some(Err(e)) => self.push_error(e),
                None => self.push_error("usage: candidates <sync|wipe>".to_string()),
            },
            "sync" => self.cmd_sync(rest),
            "wipe" => {
                let summary = self.console.dashboard().selector(BulkAction::Wipe).summary();
                self.modal = Some(Modal::confirm(
                    "Wipe",
                    vec![
                        format!("Remove {} from the knowledge base?", summary),
                        "Wiped documents return to the uploaded state.".to_string(),
                    ],
                    PendingAction::Wipe,
                ));
            }
            "status" => match rest.first() {
                Some(id) => match self.console.file_status(id) {
                    Ok(v) => {
                        self.modal = Some(Modal::viewer(format!("Status {}", id), json_lines(&v)))
                    }
                    Err(e) => self.push_error(e.to_string()),
                },
                None => self.push_error("usage: status <document-id>".to_string()),
            },
            "time" => {
                self.ts_mode = self.ts_mode.toggle();
                self.push_output(vec![format!("timestamps: {}", self.ts_mode.label())]);
            }
            "quit" => self.quit = true,
            _ => self.push_error(format!("unhandled command '{}'", cmd)),
        }
    }

    pub(super) fn run_pending(&mut self, action: PendingAction) {
        match action {
            PendingAction::Delete { path } => match self.console.delete_item(&path) {
                Ok(closed) => {
                    self.clamp_tree_cursor();
                    let mut lines = vec![format!("deleted {}", path)];
                    if closed > 0 {
                        lines.push(format!("closed {} open tab(s)", closed));
                    }
                    self.push_output(lines);
                }
                Err(e) => self.push_error(e.to_string()),
            },
            PendingAction::Wipe => match self.console.submit_wipe() {
                Ok(notice) => self.push_output(vec![notice]),
                Err(e) => self.push_error(e.to_string()),
            },
        }
    }

    pub(super) fn run_text_input(&mut self, action: TextInputAction, value: &str) {
        match action {
            TextInputAction::NewFolder { parent } => self.create(&join_child(&parent, value), true),
            TextInputAction::NewFile { parent } => self.create(&join_child(&parent, value), false),
            TextInputAction::Rename { from } => self.rename(&from, value),
            TextInputAction::Ask => self.ask(value),
        }
    }

    pub(super) fn open_path(&mut self, path: &str) {
        match self.console.open_file(path) {
            Ok(()) => self.push_output(vec![format!("opened {}", path)]),
            Err(e) => self.push_error(e.to_string()),
        }
    }

    pub(super) fn close_active_tab(&mut self) {
        match self.console.close_active() {
            Some(doc) => self.push_output(vec![format!("closed {}", doc.name)]),
            None => self.push_error("no open tab".to_string()),
        }
    }

    pub(super) fn toggle_assistant(&mut self) {
        let open = self.console.toggle_playground();
        let state = if open { "opened" } else { "closed" };
        self.push_output(vec![format!("assistant {}", state)]);
    }

    pub(super) fn pick(&mut self, action: BulkAction, id: &str) {
        match self.console.toggle_target(action, id) {
            Ok(()) => {
                let summary = self.console.dashboard().selector(action).summary();
                self.push_output(vec![format!("{}: {}", action.as_str(), summary)]);
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    pub(super) fn prompt_rename(&mut self) {
        let Some(from) = self.target_path() else {
            self.push_error("select an item to rename".to_string());
            return;
        };
        self.modal = Some(Modal::text_input(
            "Rename",
            vec![format!("from: {}", from)],
            "to: ",
            &from,
            TextInputAction::Rename { from: from.clone() },
        ));
    }

    pub(super) fn confirm_delete(&mut self) {
        match self.target_path() {
            Some(path) => self.confirm_delete_path(path),
            None => self.push_error("select an item to delete".to_string()),
        }
    }

    fn confirm_delete_path(&mut self, path: String) {
        let kind = self.console.tree().classify(&path);
        self.modal = Some(Modal::confirm(
            "Delete",
            vec![format!("Delete {} {}?", kind.as_str(), path)],
            PendingAction::Delete { path },
        ));
    }

    /// The tree cursor when the tree has focus, else the selection.
    fn target_path(&self) -> Option<String> {
        if self.focus == Focus::Tree {
            if let Some(p) = self.cursor_path() {
                return Some(p);
            }
        }
        self.console.tree().selected().map(str::to_string)
    }

    fn cmd_tab(&mut self, rest: &[String]) {
        let Some(n) = rest.first().and_then(|s| s.parse::<usize>().ok()) else {
            self.push_error("usage: tab <n>".to_string());
            return;
        };
        if let Err(e) = self.console.set_active(n.saturating_sub(1)) {
            self.push_error(e.to_string());
        }
    }

    fn cmd_create(&mut self, rest: &[String], folder: bool) {
        if let Some(path) = rest.first() {
            self.create(path, folder);
            return;
        }
        let parent = upload_parent(self.console.tree(), None).unwrap_or_default();
        let (title, action) = if folder {
            ("New folder", TextInputAction::NewFolder { parent: parent.clone() })
        } else {
            ("New file", TextInputAction::NewFile { parent: parent.clone() })
        };
        self.modal = Some(Modal::text_input(
            title,
            vec![format!("in: {}", if parent.is_empty() { "/" } else { &parent })],
            "name: ",
            "",
            action,
        ));
    }

    fn create(&mut self, path: &str, folder: bool) {
        let res = if folder {
            self.console.create_folder(path)
        } else {
            self.console.create_file(path)
        };
        match res {
            Ok(()) => {
                self.clamp_tree_cursor();
                self.push_output(vec![format!("created {}", path)]);
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn rename(&mut self, from: &str, to: &str) {
        match self.console.rename_item(from, to) {
            Ok(moved) => {
                self.clamp_tree_cursor();
                let mut lines = vec![format!("renamed {} -> {}", from, to)];
                if moved > 0 {
                    lines.push(format!("relinked {} open tab(s)", moved));
                }
                self.push_output(lines);
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn cmd_upload(&mut self, rest: &[String]) {
        let Some(local) = rest.first() else {
            self.push_error("usage: upload <local-file> [folder]".to_string());
            return;
        };
        let Some(parent) = upload_parent(self.console.tree(), rest.get(1).map(String::as_str))
        else {
            self.push_error("select a destination folder first".to_string());
            return;
        };
        let local = Path::new(local);
        let Some(name) = local.file_name().and_then(|n| n.to_str()) else {
            self.push_error(format!("not a file path: {}", local.display()));
            return;
        };
        let bytes = match std::fs::read(local) {
            Ok(b) => b,
            Err(e) => {
                self.push_error(format!("read {}: {}", local.display(), e));
                return;
            }
        };
        match self.console.upload_file(&parent, name, &bytes) {
            Ok(key) => {
                self.clamp_tree_cursor();
                self.push_output(vec![format!("uploaded {} ({} bytes)", key, bytes.len())]);
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn ask(&mut self, question: &str) {
        match self.console.ask(question) {
            Ok(turn) => {
                let summary = turn
                    .answer
                    .lines()
                    .last()
                    .unwrap_or_default()
                    .to_string();
                self.push_output(vec![summary, "see the AI Playground tab".to_string()]);
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn show_candidates(&mut self, action: BulkAction) {
        match self.console.candidates(action) {
            Ok(ids) if ids.is_empty() => {
                self.push_output(vec![format!("no documents eligible to {}", action.as_str())])
            }
            Ok(ids) => {
                let title = format!("Eligible to {} ({})", action.as_str(), ids.len());
                self.modal = Some(Modal::viewer(title, ids));
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn cmd_sync(&mut self, rest: &[String]) {
        let action = match rest.first().map(|s| s.parse::<SyncAction>()) {
            None => None,
            Some(Ok(a)) => Some(a),
            Some(Err(e)) => {
                self.push_error(e);
                return;
            }
        };
        match self.console.submit_sync(action) {
            Ok(notice) => self.push_output(vec![notice]),
            Err(e) => self.push_error(e.to_string()),
        }
    }
}

fn parse_bulk_action(word: &str) -> Result<BulkAction, String> {
    match word.to_ascii_lowercase().as_str() {
        "sync" => Ok(BulkAction::Sync),
        "wipe" => Ok(BulkAction::Wipe),
        other => Err(format!("unknown selection '{}' (expected sync or wipe)", other)),
    }
}

/// Folder a new item lands in: the explicit path, else the selected folder,
/// else the selected file's folder.
fn upload_parent(tree: &TreeSynchronizer, explicit: Option<&str>) -> Option<String> {
    if let Some(p) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
        return Some(p.trim_end_matches('/').to_string());
    }
    let selected = tree.selected()?;
    match tree.find(selected) {
        Some(node) if node.is_folder() => Some(node.path.clone()),
        _ => selected.rsplit_once('/').map(|(parent, _)| parent.to_string()),
    }
}

fn join_child(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name.trim_start_matches('/'))
    }
}

fn help_lines(topic: Option<&str>) -> Result<Vec<String>, String> {
    let defs = command_defs();
    if let Some(topic) = topic {
        let name = resolve(topic).ok_or_else(|| format!("unknown command '{}'", topic))?;
        let Some(def) = defs.into_iter().find(|d| d.name == name) else {
            return Err(format!("unknown command '{}'", topic));
        };
        let mut lines = vec![def.usage.to_string(), String::new(), def.help.to_string()];
        if !def.aliases.is_empty() {
            lines.push(format!("aliases: {}", def.aliases.join(", ")));
        }
        return Ok(lines);
    }

    let mut lines: Vec<String> = defs
        .iter()
        .map(|d| format!("{: <30} {}", d.usage, d.help))
        .collect();
    lines.push(String::new());
    lines.push("Tab: next pane  Enter: open/expand  F2: rename  Del: delete".to_string());
    lines.push("Ctrl+W: close tab  Ctrl+A: assistant  Ctrl+P/N: history  q: quit".to_string());
    Ok(lines)
}

fn json_lines(v: &Value) -> Vec<String> {
    serde_json::to_string_pretty(v)
        .unwrap_or_else(|_| v.to_string())
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/tui_shell/app/dispatch_tests.rs"]
mod tests;
