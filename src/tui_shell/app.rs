use super::*;

mod dispatch;
mod event_loop;
mod panes;
mod render;
mod time_utils;

pub(super) use event_loop::run_loop;
use panes::{TreeRow, tree_rows};
use time_utils::{fmt_ts_list, fmt_ts_ui, now_ts};

pub(super) struct App {
    pub(super) console: Console<RemoteClient>,

    pub(super) focus: Focus,
    pub(super) ts_mode: TimestampMode,

    /// Folder paths currently expanded in the tree pane.
    pub(super) expanded: BTreeSet<String>,
    pub(super) tree_cursor: usize,
    pub(super) activity_cursor: usize,

    pub(super) input: Input,
    pub(super) suggestions: Vec<CommandDef>,
    pub(super) suggestion_selected: usize,

    pub(super) last_command: Option<String>,
    pub(super) last_result: Option<ScrollEntry>,

    pub(super) modal: Option<Modal>,
    pub(super) quit: bool,
}

impl App {
    pub(super) fn new(console: Console<RemoteClient>) -> Self {
        Self {
            console,
            focus: Focus::Tree,
            ts_mode: TimestampMode::Relative,
            expanded: BTreeSet::new(),
            tree_cursor: 0,
            activity_cursor: 0,
            input: Input::default(),
            suggestions: Vec::new(),
            suggestion_selected: 0,
            last_command: None,
            last_result: None,
            modal: None,
            quit: false,
        }
    }

    /// Re-fetches the tree and the dashboard, reporting each failure separately.
    pub(super) fn refresh_all(&mut self) {
        let mut notes = Vec::new();
        match self.console.refresh_tree() {
            Ok(()) => {
                // Top-level folders start expanded.
                for n in self.console.tree().nodes() {
                    if n.is_folder() {
                        self.expanded.insert(n.path.clone());
                    }
                }
                self.clamp_tree_cursor();
            }
            Err(e) => notes.push(format!("tree: {}", e)),
        }
        if let Err(e) = self.console.load_dashboard() {
            notes.push(format!("ingestion: {}", e));
        }
        if notes.is_empty() {
            let n = self.console.tree().flatten().len();
            let rows = self.console.dashboard().activity().len();
            self.push_output(vec![format!("refreshed: {} tree items, {} status rows", n, rows)]);
        } else {
            self.push_entry(EntryKind::Error, notes);
        }
    }

    fn visible_tree(&self) -> Vec<TreeRow<'_>> {
        tree_rows(self.console.tree().nodes(), &self.expanded)
    }

    pub(super) fn clamp_tree_cursor(&mut self) {
        let len = self.visible_tree().len();
        self.tree_cursor = self.tree_cursor.min(len.saturating_sub(1));
    }

    /// Moves the tree cursor and mirrors it into the tree selection.
    pub(super) fn move_tree_cursor(&mut self, delta: isize) {
        let rows = self.visible_tree();
        if rows.is_empty() {
            return;
        }
        let max = rows.len() - 1;
        let next = (self.tree_cursor as isize + delta).clamp(0, max as isize) as usize;
        let path = rows[next].node.path.clone();
        self.tree_cursor = next;
        self.console.select(Some(&path));
    }

    pub(super) fn cursor_path(&self) -> Option<String> {
        self.visible_tree()
            .get(self.tree_cursor)
            .map(|r| r.node.path.clone())
    }

    fn push_entry(&mut self, kind: EntryKind, lines: Vec<String>) {
        self.last_result = Some(ScrollEntry {
            ts: now_ts(),
            kind,
            lines,
        });
    }

    pub(super) fn push_output(&mut self, lines: Vec<String>) {
        self.push_entry(EntryKind::Output, lines);
    }

    pub(super) fn push_error(&mut self, msg: String) {
        tracing::debug!(error = %msg, "command failed");
        self.push_entry(EntryKind::Error, vec![msg]);
    }

    pub(super) fn recompute_suggestions(&mut self) {
        let buf = self.input.buf.trim_start();
        let q = buf.trim_start_matches('/');
        if q.is_empty() || q.contains(char::is_whitespace) {
            self.suggestions.clear();
            self.suggestion_selected = 0;
            return;
        }

        let mut scored: Vec<(i32, CommandDef)> = command_defs()
            .into_iter()
            .map(|d| (score_command(q, &d), d))
            .filter(|(s, _)| *s > 0)
            .collect();
        sort_scored_suggestions(&mut scored);
        self.suggestions = scored.into_iter().map(|(_, d)| d).collect();
        self.suggestion_selected = self
            .suggestion_selected
            .min(self.suggestions.len().saturating_sub(1));
    }

    /// Replaces the typed word with the selected suggestion.
    pub(super) fn accept_suggestion(&mut self) -> bool {
        let Some(def) = self.suggestions.get(self.suggestion_selected) else {
            return false;
        };
        self.input.set(format!("{} ", def.name));
        self.suggestions.clear();
        self.suggestion_selected = 0;
        true
    }
}
