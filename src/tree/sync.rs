use super::*;
use crate::remote::{join_key, split_parent};

fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        return Err(DeskError::validation(format!("{} is required", what)));
    }
    Ok(v)
}

/// Only plain-text formats can be created empty.
fn creatable_type(path: &str) -> Option<&'static str> {
    if path.ends_with(".json") {
        Some("json")
    } else if path.ends_with(".txt") {
        Some("txt")
    } else {
        None
    }
}

impl TreeSynchronizer {
    /// Refetches after a mutation the remote already accepted.
    fn refresh_after<R: TreeRemote + ?Sized>(&mut self, remote: &R, applied: String) -> Result<()> {
        self.fetch_tree(remote).map_err(|e| DeskError::StaleTree {
            applied,
            source: Box::new(e),
        })
    }

    pub fn create_folder<R: TreeRemote + ?Sized>(
        &mut self,
        remote: &R,
        full_path: &str,
    ) -> Result<()> {
        let full_path = non_empty(full_path, "Folder path")?;
        let (parent, name) = split_parent(full_path)
            .ok_or_else(|| DeskError::validation("Folder path is required"))?;

        remote.create_folder(&parent, &name)?;
        info!(parent = %parent, name = %name, "folder created");
        self.refresh_after(remote, format!("Folder {} created", full_path))
    }

    pub fn create_file<R: TreeRemote + ?Sized>(
        &mut self,
        remote: &R,
        path: &str,
        identity: Option<&Identity>,
    ) -> Result<()> {
        let path = non_empty(path, "File path")?;
        let file_type = creatable_type(path).ok_or_else(|| {
            DeskError::validation("Only .json and .txt files can be created empty")
        })?;
        let identity = require_identity(identity, "create a file")?;

        remote.create_file(path, file_type, identity)?;
        info!(key = %path, file_type, "file created");
        self.refresh_after(remote, format!("File {} created", path))
    }

    pub fn rename_item<R: TreeRemote + ?Sized>(
        &mut self,
        remote: &R,
        old_path: &str,
        new_path: &str,
        identity: Option<&Identity>,
    ) -> Result<()> {
        let old_path = old_path.trim();
        let new_path = new_path.trim();
        if old_path.is_empty() || new_path.is_empty() || old_path == new_path {
            return Err(DeskError::validation("Invalid rename paths"));
        }

        match self.classify(old_path) {
            ItemKind::Folder => {
                remote.rename_folder(old_path, new_path)?;
            }
            ItemKind::File => {
                let identity = require_identity(identity, "rename a file")?;
                remote.rename_file(old_path, new_path, identity)?;
            }
        }
        info!(from = %old_path, to = %new_path, "item renamed");
        self.refresh_after(remote, format!("Renamed {} to {}", old_path, new_path))
    }

    pub fn delete_item<R: TreeRemote + ?Sized>(
        &mut self,
        remote: &R,
        path: &str,
        identity: Option<&Identity>,
    ) -> Result<()> {
        let path = non_empty(path, "Delete path")?;

        match self.classify(path) {
            ItemKind::Folder => {
                remote.delete_folder(path.trim_end_matches('/'))?;
            }
            ItemKind::File => {
                let identity = require_identity(identity, "delete a file")?;
                remote.delete_file(path, identity)?;
            }
        }
        info!(path = %path, "item deleted");
        self.refresh_after(remote, format!("Deleted {}", path))
    }

    /// Uploads `content` as `parent_path/file_name`; returns the object key.
    pub fn upload_file<R: TreeRemote + ?Sized>(
        &mut self,
        remote: &R,
        parent_path: &str,
        file_name: &str,
        content: &[u8],
        identity: Option<&Identity>,
    ) -> Result<String> {
        let file_name = non_empty(file_name, "File name")?;
        let identity = require_identity(identity, "upload a file")?;
        let key = join_key(parent_path.trim(), file_name)
            .trim_start_matches('/')
            .to_string();

        remote.upload_file(&key, content, identity)?;
        info!(key = %key, bytes = content.len(), "file uploaded");
        self.refresh_after(remote, format!("Uploaded {}", key))?;
        Ok(key)
    }
}
