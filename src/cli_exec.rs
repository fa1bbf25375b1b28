use anyhow::{Context, Result};

use docdesk::config::DeskHome;
use docdesk::console::Console;
use docdesk::remote::RemoteClient;

use crate::cli_commands::Commands;
use crate::cli_runtime::{discover_home, open_console};

mod files;
mod ingestion;

pub(super) fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Init(args) => files::handle_init_command(args)?,
        Commands::Tree(args) => with_console(|c| files::handle_tree_command(c, args.json))?,
        Commands::Mkdir(args) => with_console(|c| files::handle_mkdir_command(c, &args.path))?,
        Commands::Touch(args) => with_console(|c| files::handle_touch_command(c, &args.path))?,
        Commands::Mv(args) => {
            with_console(|c| files::handle_mv_command(c, &args.from, &args.to))?
        }
        Commands::Rm(args) => with_console(|c| files::handle_rm_command(c, &args.path))?,
        Commands::Upload(args) => with_console(|c| {
            files::handle_upload_command(c, &args.file, &args.folder, args.name.as_deref())
        })?,
        Commands::Cat(args) => with_console(|c| files::handle_cat_command(c, &args.path))?,
        Commands::DownloadUrl(args) => {
            with_console(|c| files::handle_download_url_command(c, &args.path))?
        }
        Commands::Status(args) => with_console(|c| {
            ingestion::handle_status_command(c, args.limit, args.status.as_deref(), args.json)
        })?,
        Commands::FileStatus(args) => {
            with_console(|c| ingestion::handle_file_status_command(c, &args.document_id))?
        }
        Commands::Sync(args) => with_console(|c| {
            ingestion::handle_sync_command(c, &args.ids, args.all, args.action.as_deref())
        })?,
        Commands::Wipe(args) => {
            with_console(|c| ingestion::handle_wipe_command(c, &args.ids, args.all))?
        }
        Commands::Ask(args) => {
            with_console(|c| ingestion::handle_ask_command(c, &args.question.join(" "), args.json))?
        }
    }
    Ok(())
}

fn with_console<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut Console<RemoteClient>) -> Result<()>,
{
    let home: DeskHome = discover_home()?;
    let mut console = open_console(&home)?;
    f(&mut console)
}

fn print_json<T: serde::Serialize>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}
