use super::*;

fn answer(matches: Vec<AssistantMatch>, used_url: Option<&str>) -> AssistantAnswer {
    AssistantAnswer {
        matches,
        used_url: used_url.map(|s| s.to_string()),
    }
}

#[test]
fn empty_answer_mentions_question() {
    let text = format_answer(&answer(vec![], None), "where is x?");
    assert!(text.contains("couldn't find"));
    assert!(text.contains("\"where is x?\""));
}

#[test]
fn formats_matches_with_metadata_and_footer() {
    let a = answer(
        vec![
            AssistantMatch {
                text: "alpha".to_string(),
                score: 0.876,
                doc_id: "doc-1".to_string(),
                metadata: Some(MatchMetadata {
                    source: Some("report.pdf".to_string()),
                    page: Some(serde_json::json!(3)),
                }),
            },
            AssistantMatch {
                text: "beta".to_string(),
                score: 0.5,
                doc_id: "doc-2".to_string(),
                metadata: None,
            },
        ],
        Some("https://rag.local/q"),
    );
    let text = format_answer(&a, "q");
    assert!(text.contains("Result 1 (88% relevance):\nalpha"));
    assert!(text.contains("Source: report.pdf (Page 3)"));
    assert!(text.contains("Document ID: doc-1"));
    assert!(text.contains("Result 2 (50% relevance):\nbeta"));
    assert!(!text.contains("Document ID: doc-2"));
    assert!(text.contains("Query processed via: https://rag.local/q"));
    assert!(text.ends_with("Found 2 relevant results from your document collection."));
}

#[test]
fn single_match_footer_is_singular() {
    let a = answer(
        vec![AssistantMatch {
            text: "only".to_string(),
            score: 1.0,
            doc_id: "d".to_string(),
            metadata: Some(MatchMetadata {
                source: None,
                page: Some(serde_json::json!("iv")),
            }),
        }],
        None,
    );
    let text = format_answer(&a, "q");
    assert!(text.contains("Source: Unknown document (Page iv)"));
    assert!(text.ends_with("Found 1 relevant result from your document collection."));
}

#[test]
fn status_messages_cover_common_codes() {
    assert!(status_message(StatusCode::TOO_MANY_REQUESTS).starts_with("Too many requests"));
    assert_eq!(status_message(StatusCode::IM_A_TEAPOT), "Request failed with status 418");
}
