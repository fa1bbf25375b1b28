use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::*;

impl RemoteClient {
    fn post_folder<P: serde::Serialize>(
        &self,
        action: &str,
        payload: P,
        label: &str,
        fallback: &str,
    ) -> Result<Value> {
        let body = FolderRequest {
            action: action.to_string(),
            bucket: self.remote.bucket.clone(),
            payload,
        };
        let resp = self.send(
            self.client.post(self.tree_url(ROUTE_FOLDER)).json(&body),
            label,
        )?;
        self.read_json(resp, label, fallback)
    }
}

impl TreeRemote for RemoteClient {
    fn fetch_tree(&self) -> Result<Vec<RawNode>> {
        let resp = self.send(self.client.get(self.tree_url(ROUTE_TREE)), "fetch tree")?;
        self.read_typed(resp, "fetch tree", "Failed to fetch S3 tree")
    }

    fn create_folder(&self, parent_path: &str, folder_name: &str) -> Result<Value> {
        self.post_folder(
            "createFolder",
            CreateFolderPayload {
                path: parent_path.to_string(),
                folder_name: folder_name.to_string(),
            },
            "create folder",
            "Folder creation failed",
        )
    }

    fn create_file(&self, key: &str, file_type: &str, identity: &Identity) -> Result<Value> {
        let body = CreateFileRequest {
            file_type: file_type.to_string(),
            key: key.to_string(),
            user_id: identity.user_id.clone(),
            user_role: identity.user_role.clone(),
        };
        let resp = self.send(
            self.client.post(self.tree_url(ROUTE_FILE_CREATE)).json(&body),
            "create file",
        )?;
        self.read_json(resp, "create file", "Failed to create file")
    }

    fn rename_folder(&self, old_path: &str, new_path: &str) -> Result<Value> {
        self.post_folder(
            "renameFolder",
            RenameFolderPayload {
                old_path: old_path.to_string(),
                new_path: new_path.to_string(),
            },
            "rename folder",
            "Rename failed",
        )
    }

    fn rename_file(&self, old_key: &str, new_key: &str, identity: &Identity) -> Result<Value> {
        let body = RenameFileRequest {
            old_key: old_key.to_string(),
            new_key: new_key.to_string(),
            user_id: identity.user_id.clone(),
            user_role: identity.user_role.clone(),
        };
        let resp = self.send(
            self.client.post(self.tree_url(ROUTE_FILE_RENAME)).json(&body),
            "rename file",
        )?;
        self.read_json(resp, "rename file", "Rename failed")
    }

    fn delete_folder(&self, path: &str) -> Result<Value> {
        self.post_folder(
            "deleteFolder",
            DeleteFolderPayload {
                path: path.to_string(),
                folder_path: path.to_string(),
            },
            "delete folder",
            "Deletion failed",
        )
    }

    fn delete_file(&self, key: &str, identity: &Identity) -> Result<Value> {
        let body = DeleteFileRequest {
            key: key.to_string(),
            user_id: identity.user_id.clone(),
            user_role: identity.user_role.clone(),
        };
        let resp = self.send(
            self.client.post(self.tree_url(ROUTE_FILE_DELETE)).json(&body),
            "delete file",
        )?;
        self.read_json(resp, "delete file", "Failed to delete file")
    }

    fn upload_file(&self, key: &str, content: &[u8], identity: &Identity) -> Result<Value> {
        let label = "upload file";
        let body = UploadRequest {
            key: key.to_string(),
            content: STANDARD.encode(content),
            user_id: identity.user_id.clone(),
            user_role: identity.user_role.clone(),
        };
        let resp = self.send(
            self.client.post(self.api_url(ROUTE_FILE_UPLOAD)).json(&body),
            label,
        )?;

        // The upload endpoint reports failures as plain text.
        let status = resp.status();
        let text = resp.text().map_err(|e| DeskError::transport(label, e))?;
        if !status.is_success() {
            let message = match text.trim() {
                "" => format!("Upload failed ({})", status.as_u16()),
                t => super::http_client::body_message(t).unwrap_or_else(|| t.to_string()),
            };
            return Err(DeskError::Remote {
                label: label.to_string(),
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_str(&text).map_err(|e| DeskError::decode(label, e.to_string()))
    }
}
