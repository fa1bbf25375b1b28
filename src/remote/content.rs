use serde::Deserialize;

use super::*;

#[derive(Debug, Deserialize)]
struct ContentEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Some gateways wrap the payload as `{ "body": "<json string>" }`.
pub(super) fn unwrap_body(label: &str, v: Value) -> Result<Value> {
    match v.get("body").and_then(|b| b.as_str()) {
        Some(inner) => serde_json::from_str(inner)
            .map_err(|_| DeskError::decode(label, "Failed to parse response body")),
        None => Ok(v),
    }
}

fn envelope(label: &str, v: Value) -> Result<ContentEnvelope> {
    serde_json::from_value(v).map_err(|e| DeskError::decode(label, e.to_string()))
}

impl RemoteClient {
    fn identity_query<'a>(key: &'a str, identity: &'a Identity) -> [(&'static str, &'a str); 3] {
        [
            ("key", key),
            ("user_id", identity.user_id.as_str()),
            ("user_role", identity.user_role.as_str()),
        ]
    }
}

impl ContentRemote for RemoteClient {
    fn read_file(&self, key: &str, identity: &Identity) -> Result<String> {
        let label = "read file";
        let req = self
            .client
            .get(self.api_url(ROUTE_FILE_READ))
            .query(&Self::identity_query(key, identity));
        let resp = self.send(req, label)?;
        let raw = self.read_json(resp, label, "File read failed")?;
        let env = envelope(label, unwrap_body(label, raw)?)?;

        match (env.status.as_deref(), env.content) {
            (Some("success"), Some(content)) if !content.is_empty() => Ok(content),
            _ => Err(DeskError::decode(
                label,
                env.message.unwrap_or_else(|| "File content missing".to_string()),
            )),
        }
    }

    fn download_url(&self, key: &str, identity: &Identity) -> Result<String> {
        let label = "download url";
        let req = self
            .client
            .get(self.api_url(ROUTE_DOWNLOAD_URL))
            .query(&Self::identity_query(key, identity));
        let resp = self.send(req, label)?;
        let env = envelope(label, self.read_json(resp, label, "Download URL not returned")?)?;

        match (env.status.as_deref(), env.download_url) {
            (Some("success"), Some(url)) if !url.is_empty() => Ok(url),
            _ => Err(DeskError::decode(
                label,
                env.message
                    .unwrap_or_else(|| "Download URL not returned".to_string()),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../tests/remote/content_tests.rs"]
mod tests;
