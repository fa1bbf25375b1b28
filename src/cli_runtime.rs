use anyhow::{Context, Result};
use clap::Parser;

use docdesk::config::DeskHome;
use docdesk::console::Console;
use docdesk::remote::RemoteClient;

use crate::cli_commands::Commands;

#[derive(Parser)]
#[command(name = "docdesk")]
#[command(about = "Document desk: browse, read and ingest a remote document store", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let home = discover_home()?;
            docdesk::logging::init_file(&home.log_path())?;
            tracing::info!(root = %home.root.display(), "console starting");
            let console = open_console(&home)?;
            docdesk::tui::run(console)?;
        }
        Some(command) => {
            docdesk::logging::init_stderr();
            crate::cli_exec::handle_command(command)?
        }
    }

    Ok(())
}

pub(crate) fn discover_home() -> Result<DeskHome> {
    DeskHome::discover(&std::env::current_dir().context("get current dir")?)
}

/// Console over the configured backend; nothing is fetched yet.
pub(crate) fn open_console(home: &DeskHome) -> Result<Console<RemoteClient>> {
    let cfg = home.load_config()?;
    let client = RemoteClient::new(cfg.remote).context("create remote client")?;
    Ok(Console::new(client, cfg.identity, &cfg.dashboard))
}
