//! Narrow seams between the stores and the HTTP client.

use super::*;

pub trait TreeRemote {
    fn fetch_tree(&self) -> Result<Vec<RawNode>>;
    fn create_folder(&self, parent_path: &str, folder_name: &str) -> Result<Value>;
    fn create_file(&self, key: &str, file_type: &str, identity: &Identity) -> Result<Value>;
    fn rename_folder(&self, old_path: &str, new_path: &str) -> Result<Value>;
    fn rename_file(&self, old_key: &str, new_key: &str, identity: &Identity) -> Result<Value>;
    fn delete_folder(&self, path: &str) -> Result<Value>;
    fn delete_file(&self, key: &str, identity: &Identity) -> Result<Value>;
    fn upload_file(&self, key: &str, content: &[u8], identity: &Identity) -> Result<Value>;
}

pub trait ContentRemote {
    fn read_file(&self, key: &str, identity: &Identity) -> Result<String>;
    fn download_url(&self, key: &str, identity: &Identity) -> Result<String>;
}

pub trait IngestionRemote {
    fn list_status(&self, limit: usize, status: Option<&DocStatus>) -> Result<StatusListing>;
    fn file_status(&self, document_id: &str) -> Result<Value>;
    fn sync(&self, target: &SyncTarget) -> Result<Value>;
    fn wipe(&self, target: &WipeTarget) -> Result<Value>;
}

pub trait AssistantRemote {
    fn ask(&self, question: &str) -> Result<AssistantAnswer>;
}

/// Everything the console needs from one backend.
pub trait DeskRemote: TreeRemote + ContentRemote + IngestionRemote + AssistantRemote {}

impl<T> DeskRemote for T where T: TreeRemote + ContentRemote + IngestionRemote + AssistantRemote {}
