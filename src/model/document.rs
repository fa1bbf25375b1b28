use serde::{Deserialize, Serialize};

pub const PLAYGROUND_NAME: &str = "AI Playground";
pub const PLAYGROUND_PATH: &str = "playground://ai-chat";
pub const PLAYGROUND_TYPE: &str = "playground";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocumentKind {
    File { extension: String },
    Playground,
}

/// What makes two open documents "the same tab".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    Path(String),
    Playground,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDocument {
    pub name: String,
    pub path: String,
    pub kind: DocumentKind,
    pub content: Option<String>,
}

impl OpenDocument {
    /// A file tab for `path`; content arrives later.
    pub fn file(path: &str) -> Self {
        let name = leaf_name(path).to_string();
        let extension = extension_of(&name);
        Self {
            name,
            path: path.to_string(),
            kind: DocumentKind::File { extension },
            content: None,
        }
    }

    pub fn playground() -> Self {
        Self {
            name: PLAYGROUND_NAME.to_string(),
            path: PLAYGROUND_PATH.to_string(),
            kind: DocumentKind::Playground,
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn key(&self) -> DocumentKey {
        match self.kind {
            DocumentKind::Playground => DocumentKey::Playground,
            DocumentKind::File { .. } => DocumentKey::Path(self.path.clone()),
        }
    }

    /// File extension, or `playground` for the assistant pane.
    pub fn type_label(&self) -> &str {
        match &self.kind {
            DocumentKind::File { extension } => extension,
            DocumentKind::Playground => PLAYGROUND_TYPE,
        }
    }

    /// Parent folder shown next to the tab name.
    pub fn folder_label(&self) -> &str {
        if self.kind == DocumentKind::Playground {
            return "assistant";
        }
        match self.path.rfind('/') {
            Some(i) if i > 0 => &self.path[..i],
            _ => "/",
        }
    }

    pub(crate) fn retarget(&mut self, new_path: String) {
        self.name = leaf_name(&new_path).to_string();
        self.kind = DocumentKind::File {
            extension: extension_of(&self.name),
        };
        self.path = new_path;
    }
}

pub(crate) fn leaf_name(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}
