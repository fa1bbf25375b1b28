//! DTOs and payload types for remote API requests/responses.

use serde::{Deserialize, Serialize};

use crate::model::{ALL_SENTINEL, SyncTarget, WipeTarget};

pub(super) const ROUTE_TREE: &str = "/get-s3-tree";
pub(super) const ROUTE_FOLDER: &str = "/Folder_Handler";
pub(super) const ROUTE_FILE_CREATE: &str = "/File_Create_file";
pub(super) const ROUTE_FILE_RENAME: &str = "/File_Rename_file";
pub(super) const ROUTE_FILE_DELETE: &str = "/File_Delete_file";
pub(super) const ROUTE_FILE_UPLOAD: &str = "/file/upload";
pub(super) const ROUTE_FILE_READ: &str = "/file/read";
pub(super) const ROUTE_DOWNLOAD_URL: &str = "/file/download-url";
pub(super) const ROUTE_STATUS_LIST: &str = "/status/list";
pub(super) const ROUTE_FILE_STATUS: &str = "/filestatus_DB/Get";
pub(super) const ROUTE_SYNC: &str = "/NeuroSync";
pub(super) const ROUTE_WIPE: &str = "/NeuroWipe";
pub(super) const ROUTE_ASSISTANT: &str = "/Neruoforge_RAG";

#[derive(Debug, Serialize, Deserialize)]
pub struct FolderRequest<P> {
    pub action: String,
    pub bucket: String,
    pub payload: P,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderPayload {
    pub path: String,
    pub folder_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameFolderPayload {
    pub old_path: String,
    pub new_path: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFolderPayload {
    pub path: String,
    pub folder_path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFileRequest {
    pub file_type: String,
    pub key: String,
    pub user_id: String,
    pub user_role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenameFileRequest {
    pub old_key: String,
    pub new_key: String,
    pub user_id: String,
    pub user_role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteFileRequest {
    pub key: String,
    pub user_id: String,
    pub user_role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadRequest {
    pub key: String,
    /// Base64 of the whole file.
    pub content: String,
    pub user_id: String,
    pub user_role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantAnswer {
    pub matches: Vec<AssistantMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantMatch {
    pub text: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub doc_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MatchMetadata>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchMetadata {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub page: Option<serde_json::Value>,
}

pub fn sync_body(target: &SyncTarget) -> serde_json::Value {
    match target {
        SyncTarget::All { action: None } => serde_json::json!({ "scope": ALL_SENTINEL }),
        SyncTarget::All { action: Some(action) } => {
            serde_json::json!({ "scope": ALL_SENTINEL, "action": action })
        }
        SyncTarget::Single(id) => serde_json::json!({ "scope": "SINGLE", "document_id": id }),
        SyncTarget::Many(ids) => serde_json::json!({ "document_ids": ids }),
    }
}

/// One id goes out as `document_id`; ALL travels as that same single id.
pub fn wipe_body(target: &WipeTarget) -> serde_json::Value {
    match target {
        WipeTarget::All => serde_json::json!({ "document_id": ALL_SENTINEL }),
        WipeTarget::Ids(ids) if ids.len() == 1 => serde_json::json!({ "document_id": ids[0] }),
        WipeTarget::Ids(ids) => serde_json::json!({ "document_ids": ids }),
    }
}

/// Splits `a/b/c` into (`a/b`, `c`); empty segments are dropped.
pub fn split_parent(full_path: &str) -> Option<(String, String)> {
    let mut parts: Vec<&str> = full_path.split('/').filter(|s| !s.is_empty()).collect();
    let leaf = parts.pop()?;
    Some((parts.join("/"), leaf.to_string()))
}

/// `parent/name` with runs of `/` collapsed.
pub fn join_key(parent: &str, name: &str) -> String {
    let joined = format!("{}/{}", parent, name);
    let mut out = String::with_capacity(joined.len());
    let mut prev_slash = false;
    for c in joined.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../tests/remote/types_tests.rs"]
mod tests;
