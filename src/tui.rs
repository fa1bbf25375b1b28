use anyhow::Result;

use crate::console::Console;
use crate::remote::RemoteClient;

/// Runs the full-screen console until the user quits.
pub fn run(console: Console<RemoteClient>) -> Result<()> {
    crate::tui_shell::run(console)
}
