use std::collections::BTreeSet;
use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use crate::console::Console;
use crate::dashboard::BulkAction;
use crate::model::{DocStatus, DocumentKind, SyncAction, TreeNode};
use crate::remote::RemoteClient;

mod commands;
use commands::{CommandDef, command_defs};

mod input;
use input::Input;

mod suggest;
use suggest::{score_command, sort_scored_suggestions};

mod modal;
use modal::{Modal, PendingAction, TextInputAction};

mod app;
use app::App;

pub fn run(console: Console<RemoteClient>) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("the console requires an interactive terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::new(console);
    app.refresh_all();
    let res = app::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// Which pane arrow keys and Enter act on when the input line is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Tree,
    Tabs,
    Dashboard,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Tree => Focus::Tabs,
            Focus::Tabs => Focus::Dashboard,
            Focus::Dashboard => Focus::Tree,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Focus::Tree => "tree",
            Focus::Tabs => "tabs",
            Focus::Dashboard => "ingestion",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimestampMode {
    Relative,
    Absolute,
}

impl TimestampMode {
    fn toggle(self) -> Self {
        match self {
            TimestampMode::Relative => TimestampMode::Absolute,
            TimestampMode::Absolute => TimestampMode::Relative,
        }
    }

    fn label(self) -> &'static str {
        match self {
            TimestampMode::Relative => "relative",
            TimestampMode::Absolute => "absolute",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryKind {
    Output,
    Error,
}

#[derive(Clone, Debug)]
struct ScrollEntry {
    ts: String,
    kind: EntryKind,
    lines: Vec<String>,
}

struct RenderCtx {
    now: OffsetDateTime,
    ts_mode: TimestampMode,
}
