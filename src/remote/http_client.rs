use reqwest::StatusCode;
use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::*;

impl RemoteClient {
    pub(super) fn tree_url(&self, route: &str) -> String {
        format!("{}{}", self.remote.tree_url.trim_end_matches('/'), route)
    }

    pub(super) fn api_url(&self, route: &str) -> String {
        format!("{}{}", self.remote.api_url.trim_end_matches('/'), route)
    }

    pub(super) fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match self.remote.token.as_deref() {
            Some(token) => req.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token)),
            None => req,
        }
    }

    pub(super) fn send(&self, req: RequestBuilder, label: &str) -> Result<Response> {
        debug!(op = label, "remote request");
        self.authed(req)
            .send()
            .map_err(|e| DeskError::transport(label, e))
    }

    /// Reads the body; non-2xx becomes `Remote` with the best message available.
    pub(super) fn read_body(&self, resp: Response, label: &str, fallback: &str) -> Result<String> {
        let status = resp.status();
        let body = resp.text().map_err(|e| DeskError::transport(label, e))?;
        if !status.is_success() {
            return Err(remote_error(label, status, &body, fallback));
        }
        Ok(body)
    }

    pub(super) fn read_json(&self, resp: Response, label: &str, fallback: &str) -> Result<Value> {
        let body = self.read_body(resp, label, fallback)?;
        serde_json::from_str(&body).map_err(|e| DeskError::decode(label, e.to_string()))
    }

    pub(super) fn read_typed<T: DeserializeOwned>(
        &self,
        resp: Response,
        label: &str,
        fallback: &str,
    ) -> Result<T> {
        let body = self.read_body(resp, label, fallback)?;
        serde_json::from_str(&body).map_err(|e| DeskError::decode(label, e.to_string()))
    }

    /// Like `read_json`, but an unparsable success body counts as `{}`.
    pub(super) fn read_json_lenient(
        &self,
        resp: Response,
        label: &str,
        fallback: &str,
    ) -> Result<Value> {
        let body = self.read_body(resp, label, fallback)?;
        Ok(serde_json::from_str(&body).unwrap_or_else(|_| Value::Object(Default::default())))
    }
}

pub(super) fn remote_error(label: &str, status: StatusCode, body: &str, fallback: &str) -> DeskError {
    let message = body_message(body).unwrap_or_else(|| match status {
        StatusCode::UNAUTHORIZED => {
            "unauthorized (token invalid/expired; check remote.token or DOCDESK_TOKEN)".to_string()
        }
        StatusCode::FORBIDDEN => {
            "forbidden (insufficient permissions for this user role)".to_string()
        }
        _ => format!("{} ({})", fallback, status.as_u16()),
    });
    DeskError::Remote {
        label: label.to_string(),
        status: status.as_u16(),
        message,
    }
}

/// `message`, then `error`, from a JSON error body.
pub(super) fn body_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|k| v.get(*k).and_then(|m| m.as_str()))
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
