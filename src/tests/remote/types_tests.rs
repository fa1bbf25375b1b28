use super::*;
use crate::model::SyncAction;

#[test]
fn sync_body_shapes() {
    assert_eq!(
        sync_body(&SyncTarget::All { action: None }),
        serde_json::json!({"scope": "ALL"})
    );
    assert_eq!(
        sync_body(&SyncTarget::All {
            action: Some(SyncAction::Retry)
        }),
        serde_json::json!({"scope": "ALL", "action": "RETRY"})
    );
    assert_eq!(
        sync_body(&SyncTarget::Single("d1".to_string())),
        serde_json::json!({"scope": "SINGLE", "document_id": "d1"})
    );
    assert_eq!(
        sync_body(&SyncTarget::Many(vec!["a".to_string(), "b".to_string()])),
        serde_json::json!({"document_ids": ["a", "b"]})
    );
}

#[test]
fn wipe_body_uses_single_id_field_for_one_target() {
    assert_eq!(
        wipe_body(&WipeTarget::Ids(vec!["a".to_string()])),
        serde_json::json!({"document_id": "a"})
    );
    assert_eq!(
        wipe_body(&WipeTarget::Ids(vec!["a".to_string(), "b".to_string()])),
        serde_json::json!({"document_ids": ["a", "b"]})
    );
    assert_eq!(
        wipe_body(&WipeTarget::All),
        serde_json::json!({"document_id": "ALL"})
    );
}

#[test]
fn split_parent_drops_empty_segments() {
    assert_eq!(
        split_parent("/root//reports/2024/"),
        Some(("root/reports".to_string(), "2024".to_string()))
    );
    assert_eq!(split_parent("top"), Some((String::new(), "top".to_string())));
    assert_eq!(split_parent("///"), None);
}

#[test]
fn join_key_collapses_slashes() {
    assert_eq!(join_key("root/", "/a.pdf"), "root/a.pdf");
    assert_eq!(join_key("", "a.pdf"), "/a.pdf");
    assert_eq!(join_key("x//y", "z.txt"), "x/y/z.txt");
    assert_eq!(join_key("/root/", "a.txt"), "/root/a.txt");
}

#[test]
fn folder_request_uses_camel_case_payload() {
    let req = FolderRequest {
        action: "createFolder".to_string(),
        bucket: "docs".to_string(),
        payload: CreateFolderPayload {
            path: "root".to_string(),
            folder_name: "new".to_string(),
        },
    };
    let v = serde_json::to_value(&req).expect("serialize");
    assert_eq!(v["payload"]["folderName"], "new");
    assert_eq!(v["action"], "createFolder");
}

#[test]
fn assistant_answer_requires_matches() {
    assert!(serde_json::from_str::<AssistantAnswer>(r#"{"used_url":"x"}"#).is_err());
    let a: AssistantAnswer =
        serde_json::from_str(r#"{"matches":[{"text":"hi","score":0.5,"doc_id":"d"}]}"#)
            .expect("parse");
    assert_eq!(a.matches.len(), 1);
}
