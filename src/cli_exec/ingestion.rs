use docdesk::dashboard::BulkAction;
use docdesk::model::{ALL_SENTINEL, DocStatus, StatusRow, SyncAction};
use docdesk::remote::{AssistantRemote, IngestionRemote};

use super::*;

pub(super) fn handle_status_command(
    console: &mut Console<RemoteClient>,
    limit: Option<usize>,
    status: Option<&str>,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(docdesk::model::DEFAULT_ACTIVITY_LIMIT);
    let status = status.map(DocStatus::from);
    let listing = console.remote().list_status(limit, status.as_ref())?;
    if json {
        return print_json(&listing, "status listing");
    }

    let stats = listing.stats();
    println!(
        "uploaded {}  learned {}  failed {}  last upload {}  last failure {}",
        stats.total_uploaded, stats.learned, stats.failed, stats.last_upload, stats.last_failed
    );
    for row in listing.rows() {
        println!("{}", row_line(row));
    }
    Ok(())
}

pub(super) fn row_line(row: &StatusRow) -> String {
    match &row.last_modified {
        Some(ts) => format!("{: <10} {} {}", row.status.as_str(), row.document_id, ts),
        None => format!("{: <10} {}", row.status.as_str(), row.document_id),
    }
}

pub(super) fn handle_file_status_command(
    console: &mut Console<RemoteClient>,
    document_id: &str,
) -> Result<()> {
    let value = console.file_status(document_id)?;
    print_json(&value, "file status")
}

pub(super) fn handle_sync_command(
    console: &mut Console<RemoteClient>,
    ids: &[String],
    all: bool,
    action: Option<&str>,
) -> Result<()> {
    let action = action
        .map(|a| a.parse::<SyncAction>())
        .transpose()
        .map_err(anyhow::Error::msg)?;
    select(console, BulkAction::Sync, ids, all)?;
    println!("{}", console.submit_sync(action)?);
    Ok(())
}

pub(super) fn handle_wipe_command(
    console: &mut Console<RemoteClient>,
    ids: &[String],
    all: bool,
) -> Result<()> {
    select(console, BulkAction::Wipe, ids, all)?;
    println!("{}", console.submit_wipe()?);
    Ok(())
}

/// Fills the selection the same way the dashboard does, eligibility included.
fn select(
    console: &mut Console<RemoteClient>,
    action: BulkAction,
    ids: &[String],
    all: bool,
) -> Result<()> {
    if all {
        console.toggle_target(action, ALL_SENTINEL)?;
        return Ok(());
    }
    if ids.is_empty() {
        anyhow::bail!("pass document ids or --all");
    }
    for id in ids {
        console
            .toggle_target(action, id)
            .with_context(|| format!("select {} for {}", id, action.as_str()))?;
    }
    Ok(())
}

pub(super) fn handle_ask_command(
    console: &mut Console<RemoteClient>,
    question: &str,
    json: bool,
) -> Result<()> {
    if json {
        let answer = console.remote().ask(question)?;
        return print_json(&answer, "answer");
    }
    let turn = console.ask(question)?;
    println!("{}", turn.answer);
    Ok(())
}
