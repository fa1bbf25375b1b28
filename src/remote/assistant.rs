use reqwest::StatusCode;

use super::*;

fn status_message(status: StatusCode) -> String {
    match status.as_u16() {
        400 => "Invalid question format. Please check your input.".to_string(),
        401 => "Authentication required. Please log in again.".to_string(),
        403 => "Access denied. You do not have permission to use this service.".to_string(),
        404 => "Assistant service not found.".to_string(),
        429 => "Too many requests. Please wait a moment and try again.".to_string(),
        500 => "Server error. Please try again later.".to_string(),
        503 => "Assistant service is temporarily unavailable. Please try again later.".to_string(),
        other => format!("Request failed with status {}", other),
    }
}

impl AssistantRemote for RemoteClient {
    fn ask(&self, question: &str) -> Result<AssistantAnswer> {
        let label = "assistant";
        let question = question.trim();
        if question.is_empty() {
            return Err(DeskError::validation("question is required"));
        }

        let resp = self.send(
            self.client
                .post(self.tree_url(ROUTE_ASSISTANT))
                .json(&AskRequest {
                    question: question.to_string(),
                }),
            label,
        )?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DeskError::Remote {
                label: label.to_string(),
                status: status.as_u16(),
                message: status_message(status),
            });
        }
        let body = resp.text().map_err(|e| DeskError::transport(label, e))?;
        serde_json::from_str(&body).map_err(|_| {
            DeskError::decode(label, "Invalid response: missing or invalid matches array")
        })
    }
}

/// Renders an answer as plain text for the transcript.
pub fn format_answer(answer: &AssistantAnswer, question: &str) -> String {
    if answer.matches.is_empty() {
        return format!(
            "I couldn't find any relevant information for \"{}\". Try rephrasing the question.",
            question
        );
    }

    let mut out = format!("Based on your question \"{}\", here's what I found:\n\n", question);
    for (i, m) in answer.matches.iter().enumerate() {
        let confidence = (m.score * 100.0).round() as i64;
        out.push_str(&format!("Result {} ({}% relevance):\n{}\n\n", i + 1, confidence, m.text));
        if let Some(meta) = &m.metadata {
            out.push_str(&format!(
                "Source: {}",
                meta.source.as_deref().unwrap_or("Unknown document")
            ));
            match &meta.page {
                Some(Value::Null) | None => {}
                Some(Value::String(p)) => out.push_str(&format!(" (Page {})", p)),
                Some(p) => out.push_str(&format!(" (Page {})", p)),
            }
            out.push('\n');
            out.push_str(&format!("Document ID: {}\n\n", m.doc_id));
        }
        out.push_str("---\n\n");
    }

    if let Some(url) = &answer.used_url {
        out.push_str(&format!("Query processed via: {}\n", url));
    }
    let n = answer.matches.len();
    out.push_str(&format!(
        "Found {} relevant result{} from your document collection.",
        n,
        if n == 1 { "" } else { "s" }
    ));
    out
}

#[cfg(test)]
#[path = "../tests/remote/assistant_tests.rs"]
mod tests;
