use std::path::{Path, PathBuf};

use docdesk::config::new_config;
use docdesk::model::{Identity, RemoteConfig, TreeNode};

use crate::cli_commands::InitArgs;

use super::*;

pub(super) fn handle_init_command(args: InitArgs) -> Result<()> {
    let mut remote = match (args.url, args.tree_url, args.api_url) {
        (Some(url), _, _) => RemoteConfig::single(&url, &args.bucket),
        (None, Some(tree_url), Some(api_url)) => RemoteConfig {
            tree_url,
            api_url,
            bucket: args.bucket.clone(),
            token: None,
            timeout_secs: None,
        },
        _ => anyhow::bail!("pass --url, or both --tree-url and --api-url"),
    };
    remote.token = args.token;
    remote.timeout_secs = args.timeout_secs;
    let identity = args
        .user_id
        .map(|id| Identity::new(&id, &args.user_role));

    let root: PathBuf = match args.path {
        Some(p) => p,
        None => std::env::current_dir().context("get current dir")?,
    };
    let home = DeskHome::init(&root, &new_config(remote, identity), args.force)?;
    println!("Initialized docdesk at {}", home.config_path().display());
    Ok(())
}

pub(super) fn handle_tree_command(console: &mut Console<RemoteClient>, json: bool) -> Result<()> {
    console.refresh_tree()?;
    let nodes = console.tree().nodes();
    if json {
        return print_json(&nodes, "tree");
    }
    for line in tree_lines(nodes) {
        println!("{}", line);
    }
    Ok(())
}

/// Indented listing; folders end with `/`.
pub(super) fn tree_lines(nodes: &[TreeNode]) -> Vec<String> {
    fn walk(nodes: &[TreeNode], depth: usize, out: &mut Vec<String>) {
        for n in nodes {
            let suffix = if n.is_folder() { "/" } else { "" };
            out.push(format!("{}{}{}", "  ".repeat(depth), n.name, suffix));
            walk(n.children(), depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(nodes, 0, &mut out);
    out
}

pub(super) fn handle_mkdir_command(console: &mut Console<RemoteClient>, path: &str) -> Result<()> {
    console.create_folder(path)?;
    println!("Created folder {}", path);
    Ok(())
}

pub(super) fn handle_touch_command(console: &mut Console<RemoteClient>, path: &str) -> Result<()> {
    console.create_file(path)?;
    println!("Created file {}", path);
    Ok(())
}

pub(super) fn handle_mv_command(
    console: &mut Console<RemoteClient>,
    from: &str,
    to: &str,
) -> Result<()> {
    // File vs folder is decided from the current tree.
    console.refresh_tree()?;
    console.rename_item(from, to)?;
    println!("Renamed {} -> {}", from, to);
    Ok(())
}

pub(super) fn handle_rm_command(console: &mut Console<RemoteClient>, path: &str) -> Result<()> {
    console.refresh_tree()?;
    let kind = console.tree().classify(path);
    console.delete_item(path)?;
    println!("Deleted {} {}", kind.as_str(), path);
    Ok(())
}

pub(super) fn handle_upload_command(
    console: &mut Console<RemoteClient>,
    file: &Path,
    folder: &str,
    name: Option<&str>,
) -> Result<()> {
    let name = match name {
        Some(n) => n.to_string(),
        None => file
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .with_context(|| format!("no file name in {}", file.display()))?,
    };
    let bytes = std::fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let key = console.upload_file(folder, &name, &bytes)?;
    println!("Uploaded {} ({} bytes)", key, bytes.len());
    Ok(())
}

pub(super) fn handle_cat_command(console: &mut Console<RemoteClient>, path: &str) -> Result<()> {
    console.refresh_tree()?;
    console.open_file(path)?;
    let content = console
        .session()
        .active()
        .and_then(|d| d.content.as_deref())
        .unwrap_or_default();
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
    Ok(())
}

pub(super) fn handle_download_url_command(
    console: &mut Console<RemoteClient>,
    path: &str,
) -> Result<()> {
    println!("{}", console.download_url(path)?);
    Ok(())
}

#[cfg(test)]
#[path = "../tests/cli_exec/files_tests.rs"]
mod tests;
