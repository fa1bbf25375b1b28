use super::*;

impl IngestionRemote for RemoteClient {
    fn list_status(&self, limit: usize, status: Option<&DocStatus>) -> Result<StatusListing> {
        let label = "status listing";
        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(s) = status {
            query.push(("status", s.as_str().to_string()));
        }
        let req = self
            .client
            .get(self.api_url(ROUTE_STATUS_LIST))
            .query(&query);
        let resp = self.send(req, label)?;
        self.read_typed(resp, label, "Failed to load statuses")
    }

    fn file_status(&self, document_id: &str) -> Result<Value> {
        let label = "file status";
        let req = self
            .client
            .get(self.api_url(ROUTE_FILE_STATUS))
            .query(&[("document_id", document_id)]);
        let resp = self.send(req, label)?;
        self.read_json(resp, label, "Failed to load file status")
    }

    fn sync(&self, target: &SyncTarget) -> Result<Value> {
        let label = "sync";
        debug!(target = %target.describe(), "sync request");
        let resp = self.send(
            self.client
                .post(self.api_url(ROUTE_SYNC))
                .json(&sync_body(target)),
            label,
        )?;
        self.read_json(resp, label, "NeuroSync failed")
    }

    fn wipe(&self, target: &WipeTarget) -> Result<Value> {
        let label = "wipe";
        debug!(target = %target.describe(), "wipe request");
        let resp = self.send(
            self.client
                .post(self.api_url(ROUTE_WIPE))
                .json(&wipe_body(target)),
            label,
        )?;
        self.read_json_lenient(resp, label, "NeuroWipe failed")
    }
}
