use super::*;

const T0: &str = "2026-01-01T00:00:00Z";
const T1: &str = "2026-01-02T00:00:00Z";

fn b64(text: &str) -> String {
    STANDARD.encode(text)
}

fn seeded() -> Store {
    let mut s = Store::default();
    s.upload("docs/a.txt", &b64("alpha rust notes"), T0).expect("upload a");
    s.upload("docs/sub/b.txt", &b64("beta"), T1).expect("upload b");
    s.create_folder("", "empty").expect("mkdir empty");
    s
}

#[test]
fn tree_nests_implicit_and_explicit_folders() {
    let tree = seeded().tree();
    assert_eq!(
        tree,
        vec![
            json!({"name": "docs", "type": "folder", "children": [
                {"name": "sub", "type": "folder", "children": [
                    {"name": "b.txt", "type": "file"}
                ]},
                {"name": "a.txt", "type": "file"}
            ]}),
            json!({"name": "empty", "type": "folder", "children": []}),
        ]
    );
}

#[test]
fn create_folder_rejects_existing_paths() {
    let mut s = seeded();
    let err = s.create_folder("/docs/", "sub").unwrap_err();
    assert_eq!(err.status, StatusCode::CONFLICT);
    assert_eq!(s.create_folder("docs", "new").unwrap(), "docs/new");
}

#[test]
fn rename_folder_moves_files_and_statuses() {
    let mut s = seeded();
    assert_eq!(s.rename_folder("docs", "papers").unwrap(), 2);
    assert!(s.contains_file("papers/sub/b.txt"));
    assert!(!s.contains_file("docs/a.txt"));
    assert!(s.file_status("papers/a.txt").is_some());
    assert!(s.file_status("docs/a.txt").is_none());
}

#[test]
fn rename_folder_into_itself_is_refused() {
    let mut s = seeded();
    let err = s.rename_folder("docs", "docs/inner").unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[test]
fn delete_folder_removes_descendants() {
    let mut s = seeded();
    assert_eq!(s.delete_folder("docs/").unwrap(), 2);
    assert!(s.list_status(10, None).is_empty());
    assert_eq!(
        s.delete_folder("docs").unwrap_err().status,
        StatusCode::NOT_FOUND
    );
}

#[test]
fn create_file_seeds_json_with_empty_object() {
    let mut s = Store::default();
    s.create_file("/cfg.json", "json").unwrap();
    assert_eq!(s.read("cfg.json").unwrap(), b"{}");
    s.create_file("notes.txt", "txt").unwrap();
    assert!(s.read("notes.txt").unwrap().is_empty());
    assert_eq!(
        s.create_file("notes.txt", "txt").unwrap_err().status,
        StatusCode::CONFLICT
    );
}

#[test]
fn rename_and_delete_file() {
    let mut s = seeded();
    s.rename_file("docs/a.txt", "docs/c.txt").unwrap();
    assert_eq!(s.read("docs/c.txt").unwrap(), b"alpha rust notes");
    assert_eq!(
        s.rename_file("docs/a.txt", "x.txt").unwrap_err().status,
        StatusCode::NOT_FOUND
    );
    s.delete_file("docs/c.txt").unwrap();
    assert!(s.file_status("docs/c.txt").is_none());
}

#[test]
fn upload_rejects_bad_base64() {
    let mut s = Store::default();
    let err = s.upload("a.txt", "***", T0).unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[test]
fn list_status_is_newest_first_and_filtered() {
    let mut s = seeded();
    let rows = s.list_status(10, None);
    assert_eq!(rows[0]["document_id"], "docs/sub/b.txt");
    assert_eq!(rows[1]["document_id"], "docs/a.txt");
    assert_eq!(s.list_status(1, None).len(), 1);

    s.sync(&SyncScope::Ids(vec!["docs/a.txt".to_string()]), T1)
        .unwrap();
    let learned = s.list_status(10, Some("LEARNED"));
    assert_eq!(learned.len(), 1);
    assert_eq!(learned[0]["status"], "learned");
}

#[test]
fn sync_all_fails_empty_documents() {
    let mut s = seeded();
    s.upload("blank.txt", "", T0).unwrap();
    let ids = s.sync(&SyncScope::All { action: None }, T1).unwrap();
    assert_eq!(ids.len(), 3);

    let blank = s.file_status("blank.txt").unwrap();
    assert_eq!(blank["status"], "failed");
    assert_eq!(blank["error"], "document is empty");

    s.upload("blank.txt", &b64("now filled"), T1).unwrap();
    s.sync(&SyncScope::All { action: None }, T1).unwrap();
    let retried = s
        .sync(&SyncScope::All { action: Some("RETRY".to_string()) }, T1)
        .unwrap();
    assert!(retried.is_empty());
}

#[test]
fn sync_unknown_id_is_not_found() {
    let mut s = seeded();
    let err = s
        .sync(&SyncScope::Ids(vec!["nope".to_string()]), T1)
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[test]
fn wipe_all_resets_learned_documents() {
    let mut s = seeded();
    s.sync(&SyncScope::All { action: None }, T1).unwrap();
    let wiped = s.wipe(&WipeScope::All, T1).unwrap();
    assert_eq!(wiped.len(), 2);
    assert!(s.list_status(10, Some("learned")).is_empty());
}

#[test]
fn search_only_sees_learned_documents() {
    let mut s = seeded();
    assert!(s.search("rust notes", 5).is_empty());

    s.sync(&SyncScope::All { action: None }, T1).unwrap();
    let hits = s.search("Rust notes?", 5);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["doc_id"], "docs/a.txt");
    assert_eq!(hits[0]["score"], 1.0);
    assert_eq!(hits[0]["metadata"]["source"], "docs/a.txt");
}

#[test]
fn parses_sync_and_wipe_bodies() {
    assert_eq!(
        parse_sync_scope(&json!({"scope": "ALL", "action": "retry"})).unwrap(),
        SyncScope::All { action: Some("RETRY".to_string()) }
    );
    assert_eq!(
        parse_sync_scope(&json!({"scope": "SINGLE", "document_id": "a"})).unwrap(),
        SyncScope::Ids(vec!["a".to_string()])
    );
    assert!(parse_sync_scope(&json!({"document_ids": []})).is_err());
    assert!(parse_sync_scope(&json!({})).is_err());

    assert_eq!(
        parse_wipe_scope(&json!({"document_id": "ALL"})).unwrap(),
        WipeScope::All
    );
    assert_eq!(
        parse_wipe_scope(&json!({"document_ids": ["a", "b"]})).unwrap(),
        WipeScope::Ids(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn normalize_key_drops_empty_segments() {
    assert_eq!(normalize_key("//a///b/"), "a/b");
    assert_eq!(normalize_key("/"), "");
}
