use super::*;

#[test]
fn body_message_prefers_message_then_error() {
    assert_eq!(
        body_message(r#"{"message":"folder exists","error":"x"}"#).as_deref(),
        Some("folder exists")
    );
    assert_eq!(body_message(r#"{"error":"denied"}"#).as_deref(), Some("denied"));
    assert_eq!(body_message(r#"{"message":""}"#), None);
    assert_eq!(body_message("<html>bad gateway</html>"), None);
}

#[test]
fn remote_error_falls_back_to_label_and_status() {
    let err = remote_error(
        "create folder",
        StatusCode::INTERNAL_SERVER_ERROR,
        "",
        "Folder creation failed",
    );
    assert_eq!(err.to_string(), "Folder creation failed (500)");
    match err {
        DeskError::Remote { status, label, .. } => {
            assert_eq!(status, 500);
            assert_eq!(label, "create folder");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn remote_error_hints_on_unauthorized() {
    let err = remote_error("fetch tree", StatusCode::UNAUTHORIZED, "", "Failed to fetch tree");
    assert!(err.to_string().starts_with("unauthorized"));
}

#[test]
fn remote_message_beats_status_hint() {
    let err = remote_error(
        "delete file",
        StatusCode::FORBIDDEN,
        r#"{"message":"Editors only"}"#,
        "Failed to delete file",
    );
    assert_eq!(err.to_string(), "Editors only");
}
