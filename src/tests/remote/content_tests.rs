use super::*;

#[test]
fn unwrap_body_decodes_nested_json_string() {
    let wrapped = serde_json::json!({
        "body": "{\"status\":\"success\",\"content\":\"hello\"}"
    });
    let v = unwrap_body("read file", wrapped).expect("unwrap");
    assert_eq!(v["content"], "hello");
}

#[test]
fn unwrap_body_passes_plain_objects_through() {
    let plain = serde_json::json!({"status": "success", "content": "x"});
    let v = unwrap_body("read file", plain.clone()).expect("unwrap");
    assert_eq!(v, plain);
}

#[test]
fn unwrap_body_rejects_garbage_inner_string() {
    let err = unwrap_body("read file", serde_json::json!({"body": "not json"})).unwrap_err();
    assert!(matches!(err, DeskError::Decode { .. }));
    assert!(err.to_string().contains("Failed to parse response body"));
}
