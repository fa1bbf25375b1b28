//! In-memory bucket: folders, file bytes and per-document ingestion status.
//!
//! Keys never carry a leading `/`. Folders exist explicitly (created empty) or
//! implicitly (an ancestor of some key).

use super::*;

pub(super) const STATUS_UPLOADED: &str = "uploaded";
pub(super) const STATUS_LEARNED: &str = "learned";
pub(super) const STATUS_FAILED: &str = "failed";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(super) struct Store {
    #[serde(default)]
    folders: BTreeSet<String>,

    /// Key to base64 content.
    #[serde(default)]
    files: BTreeMap<String, String>,

    #[serde(default)]
    statuses: BTreeMap<String, StatusRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct StatusRecord {
    pub(super) status: String,
    pub(super) last_modified: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) error: Option<String>,
}

/// Which documents a sync request names.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum SyncScope {
    All { action: Option<String> },
    Ids(Vec<String>),
}

/// Which documents a wipe request names.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum WipeScope {
    All,
    Ids(Vec<String>),
}

pub(super) fn normalize_key(raw: &str) -> String {
    raw.split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn parent_of(key: &str) -> &str {
    key.rsplit_once('/').map(|(p, _)| p).unwrap_or("")
}

fn leaf_of(key: &str) -> &str {
    key.rsplit_once('/').map(|(_, l)| l).unwrap_or(key)
}

fn under(key: &str, prefix: &str) -> bool {
    key == prefix
        || key
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn moved(key: &str, from: &str, to: &str) -> String {
    format!("{}{}", to, &key[from.len()..])
}

impl Store {
    fn folder_exists(&self, path: &str) -> bool {
        path.is_empty()
            || self.folders.iter().any(|f| under(f, path))
            || self
                .files
                .keys()
                .any(|k| k.len() > path.len() && under(k, path))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path) || self.folder_exists(path)
    }

    /// Nested `{name, type, children}` listing, folders before files.
    pub(super) fn tree(&self) -> Vec<Value> {
        let mut folders: BTreeSet<String> = BTreeSet::new();
        for path in self.folders.iter().chain(self.files.keys()) {
            let mut p = parent_of(path);
            while !p.is_empty() {
                folders.insert(p.to_string());
                p = parent_of(p);
            }
        }
        folders.extend(self.folders.iter().cloned());
        self.children("", &folders)
    }

    fn children(&self, parent: &str, folders: &BTreeSet<String>) -> Vec<Value> {
        let mut out: Vec<Value> = folders
            .iter()
            .filter(|f| parent_of(f) == parent)
            .map(|f| {
                json!({
                    "name": leaf_of(f),
                    "type": "folder",
                    "children": self.children(f, folders),
                })
            })
            .collect();
        out.extend(
            self.files
                .keys()
                .filter(|k| parent_of(k) == parent)
                .map(|k| json!({ "name": leaf_of(k), "type": "file" })),
        );
        out
    }

    pub(super) fn create_folder(&mut self, parent: &str, name: &str) -> Result<String, Rejection> {
        let name = normalize_key(name);
        if name.is_empty() {
            return Err(Rejection::bad_request("folderName is required"));
        }
        let path = normalize_key(&format!("{}/{}", parent, name));
        if self.exists(&path) {
            return Err(Rejection::conflict(format!("{} already exists", path)));
        }
        self.folders.insert(path.clone());
        Ok(path)
    }

    pub(super) fn rename_folder(&mut self, old: &str, new: &str) -> Result<usize, Rejection> {
        let (old, new) = (normalize_key(old), normalize_key(new));
        if old.is_empty() || new.is_empty() {
            return Err(Rejection::bad_request("oldPath and newPath are required"));
        }
        if !self.folder_exists(&old) {
            return Err(Rejection::not_found(format!("folder {} not found", old)));
        }
        if self.exists(&new) {
            return Err(Rejection::conflict(format!("{} already exists", new)));
        }
        if under(&new, &old) {
            return Err(Rejection::bad_request("cannot move a folder into itself"));
        }

        let folders: Vec<String> = self.folders.iter().filter(|f| under(f, &old)).cloned().collect();
        for f in folders {
            self.folders.remove(&f);
            self.folders.insert(moved(&f, &old, &new));
        }
        let keys: Vec<String> = self.files.keys().filter(|k| under(k, &old)).cloned().collect();
        let count = keys.len();
        for k in keys {
            self.move_file(&k, &moved(&k, &old, &new));
        }
        Ok(count)
    }

    pub(super) fn delete_folder(&mut self, path: &str) -> Result<usize, Rejection> {
        let path = normalize_key(path);
        if path.is_empty() {
            return Err(Rejection::bad_request("folderPath is required"));
        }
        if !self.folder_exists(&path) {
            return Err(Rejection::not_found(format!("folder {} not found", path)));
        }
        self.folders.retain(|f| !under(f, &path));
        let keys: Vec<String> = self.files.keys().filter(|k| under(k, &path)).cloned().collect();
        for k in &keys {
            self.files.remove(k);
            self.statuses.remove(k);
        }
        Ok(keys.len())
    }

    /// New files start empty; `json` files start as `{}`.
    pub(super) fn create_file(&mut self, key: &str, file_type: &str) -> Result<String, Rejection> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(Rejection::bad_request("key is required"));
        }
        if self.exists(&key) {
            return Err(Rejection::conflict(format!("{} already exists", key)));
        }
        let initial = if file_type.eq_ignore_ascii_case("json") { "{}" } else { "" };
        self.files.insert(key.clone(), STANDARD.encode(initial));
        Ok(key)
    }

    fn move_file(&mut self, from: &str, to: &str) {
        if let Some(content) = self.files.remove(from) {
            self.files.insert(to.to_string(), content);
        }
        if let Some(status) = self.statuses.remove(from) {
            self.statuses.insert(to.to_string(), status);
        }
    }

    pub(super) fn rename_file(&mut self, old: &str, new: &str) -> Result<String, Rejection> {
        let (old, new) = (normalize_key(old), normalize_key(new));
        if !self.files.contains_key(&old) {
            return Err(Rejection::not_found(format!("file {} not found", old)));
        }
        if new.is_empty() {
            return Err(Rejection::bad_request("new_key is required"));
        }
        if self.exists(&new) {
            return Err(Rejection::conflict(format!("{} already exists", new)));
        }
        self.move_file(&old, &new);
        Ok(new)
    }

    pub(super) fn delete_file(&mut self, key: &str) -> Result<(), Rejection> {
        let key = normalize_key(key);
        if self.files.remove(&key).is_none() {
            return Err(Rejection::not_found(format!("file {} not found", key)));
        }
        self.statuses.remove(&key);
        Ok(())
    }

    /// Overwrites any existing content and marks the document uploaded.
    pub(super) fn upload(&mut self, key: &str, content_b64: &str, now: &str) -> Result<String, Rejection> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(Rejection::bad_request("key is required"));
        }
        if self.folder_exists(&key) {
            return Err(Rejection::conflict(format!("{} is a folder", key)));
        }
        STANDARD
            .decode(content_b64)
            .map_err(|_| Rejection::bad_request("content is not valid base64"))?;
        self.files.insert(key.clone(), content_b64.to_string());
        self.statuses.insert(
            key.clone(),
            StatusRecord {
                status: STATUS_UPLOADED.to_string(),
                last_modified: now.to_string(),
                error: None,
            },
        );
        Ok(key)
    }

    pub(super) fn read(&self, key: &str) -> Result<Vec<u8>, Rejection> {
        let key = normalize_key(key);
        let content = self
            .files
            .get(&key)
            .ok_or_else(|| Rejection::not_found(format!("file {} not found", key)))?;
        STANDARD
            .decode(content)
            .map_err(|_| Rejection::bad_request(format!("file {} is corrupt", key)))
    }

    pub(super) fn contains_file(&self, key: &str) -> bool {
        self.files.contains_key(&normalize_key(key))
    }

    /// Newest first, optionally filtered by status.
    pub(super) fn list_status(&self, limit: usize, status: Option<&str>) -> Vec<Value> {
        let mut rows: Vec<(&String, &StatusRecord)> = self
            .statuses
            .iter()
            .filter(|(_, r)| status.is_none_or(|s| r.status.eq_ignore_ascii_case(s)))
            .collect();
        rows.sort_by(|a, b| b.1.last_modified.cmp(&a.1.last_modified).then(a.0.cmp(b.0)));
        rows.into_iter()
            .take(limit)
            .map(|(id, r)| status_json(id, r))
            .collect()
    }

    pub(super) fn file_status(&self, document_id: &str) -> Option<Value> {
        self.statuses
            .get_key_value(document_id)
            .map(|(id, r)| status_json(id, r))
    }

    /// Ingests the named documents. Empty documents fail instead of learning.
    pub(super) fn sync(&mut self, scope: &SyncScope, now: &str) -> Result<Vec<String>, Rejection> {
        let ids: Vec<String> = match scope {
            SyncScope::All { action } => {
                let wanted: &[&str] = match action.as_deref() {
                    Some("RETRY") => &[STATUS_FAILED],
                    _ => &[STATUS_UPLOADED, STATUS_FAILED],
                };
                self.statuses
                    .iter()
                    .filter(|(_, r)| wanted.contains(&r.status.as_str()))
                    .map(|(id, _)| id.clone())
                    .collect()
            }
            SyncScope::Ids(ids) => {
                if let Some(missing) = ids.iter().find(|id| !self.statuses.contains_key(*id)) {
                    return Err(Rejection::not_found(format!("document {} not found", missing)));
                }
                ids.clone()
            }
        };

        for id in &ids {
            let empty = self.files.get(id).is_none_or(|c| c.is_empty());
            let record = StatusRecord {
                status: if empty { STATUS_FAILED } else { STATUS_LEARNED }.to_string(),
                last_modified: now.to_string(),
                error: empty.then(|| "document is empty".to_string()),
            };
            self.statuses.insert(id.clone(), record);
        }
        Ok(ids)
    }

    /// Forgets learned knowledge; wiped documents go back to uploaded.
    pub(super) fn wipe(&mut self, scope: &WipeScope, now: &str) -> Result<Vec<String>, Rejection> {
        let ids: Vec<String> = match scope {
            WipeScope::All => self
                .statuses
                .iter()
                .filter(|(_, r)| r.status != STATUS_UPLOADED)
                .map(|(id, _)| id.clone())
                .collect(),
            WipeScope::Ids(ids) => {
                if let Some(missing) = ids.iter().find(|id| !self.statuses.contains_key(*id)) {
                    return Err(Rejection::not_found(format!("document {} not found", missing)));
                }
                ids.clone()
            }
        };
        for id in &ids {
            self.statuses.insert(
                id.clone(),
                StatusRecord {
                    status: STATUS_UPLOADED.to_string(),
                    last_modified: now.to_string(),
                    error: None,
                },
            );
        }
        Ok(ids)
    }

    /// Keyword overlap over learned documents, best first.
    pub(super) fn search(&self, question: &str, limit: usize) -> Vec<Value> {
        let terms: Vec<String> = question
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() >= 3)
            .map(str::to_lowercase)
            .collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(f64, &String, String)> = Vec::new();
        for (id, record) in &self.statuses {
            if record.status != STATUS_LEARNED {
                continue;
            }
            let Some(text) = self
                .files
                .get(id)
                .and_then(|c| STANDARD.decode(c).ok())
                .map(|b| String::from_utf8_lossy(&b).into_owned())
            else {
                continue;
            };
            let lower = text.to_lowercase();
            let found = terms.iter().filter(|t| lower.contains(t.as_str())).count();
            if found == 0 {
                continue;
            }
            let score = found as f64 / terms.len() as f64;
            hits.push((score, id, excerpt(&text, 200)));
        }
        hits.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(b.1)));
        hits.into_iter()
            .take(limit)
            .map(|(score, id, text)| {
                json!({
                    "text": text,
                    "score": score,
                    "doc_id": id,
                    "metadata": { "source": id, "page": 1 },
                })
            })
            .collect()
    }
}

fn status_json(id: &str, r: &StatusRecord) -> Value {
    let mut v = json!({
        "document_id": id,
        "status": r.status,
        "last_modified": r.last_modified,
    });
    if let Some(err) = &r.error {
        v["error"] = json!(err);
    }
    v
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// `{scope:"ALL"[,action]}`, `{scope:"SINGLE", document_id}` or `{document_ids}`.
pub(super) fn parse_sync_scope(body: &Value) -> Result<SyncScope, Rejection> {
    if let Some(ids) = string_list(body, "document_ids")? {
        return Ok(SyncScope::Ids(ids));
    }
    match body.get("scope").and_then(Value::as_str) {
        Some(ALL_SENTINEL) => Ok(SyncScope::All {
            action: body
                .get("action")
                .and_then(Value::as_str)
                .map(str::to_ascii_uppercase),
        }),
        Some("SINGLE") => match body.get("document_id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => Ok(SyncScope::Ids(vec![id.to_string()])),
            _ => Err(Rejection::bad_request("document_id is required")),
        },
        _ => Err(Rejection::bad_request("scope or document_ids is required")),
    }
}

/// `{document_id}` (a single id or ALL) or `{document_ids}`.
pub(super) fn parse_wipe_scope(body: &Value) -> Result<WipeScope, Rejection> {
    if let Some(ids) = string_list(body, "document_ids")? {
        return Ok(WipeScope::Ids(ids));
    }
    match body.get("document_id").and_then(Value::as_str) {
        Some(ALL_SENTINEL) => Ok(WipeScope::All),
        Some(id) if !id.is_empty() => Ok(WipeScope::Ids(vec![id.to_string()])),
        _ => Err(Rejection::bad_request("document_id or document_ids is required")),
    }
}

fn string_list(body: &Value, field: &str) -> Result<Option<Vec<String>>, Rejection> {
    let Some(v) = body.get(field) else {
        return Ok(None);
    };
    let ids: Option<Vec<String>> = v
        .as_array()
        .map(|a| a.iter().map(|x| x.as_str().map(str::to_string)).collect())
        .unwrap_or(None);
    match ids {
        Some(ids) if !ids.is_empty() => Ok(Some(ids)),
        _ => Err(Rejection::bad_request(format!(
            "{} must be a non-empty list of ids",
            field
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/bin/docdesk_devserver/store_tests.rs"]
mod tests;
