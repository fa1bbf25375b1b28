use super::*;
use crate::fakes::FakeRemote;
use crate::model::NO_TIMESTAMP;

fn remote() -> FakeRemote {
    FakeRemote::new()
        .with_status("a", "learned")
        .with_status("b", "failed")
        .with_status("c", "uploaded")
}

fn dashboard() -> IngestionDashboard {
    IngestionDashboard::new(&DashboardConfig::default())
}

#[test]
fn load_derives_stats_from_rows() {
    let r = remote();
    let mut d = dashboard();
    d.load(&r).expect("load");
    assert_eq!(d.activity().len(), 3);
    assert_eq!(d.stats().learned, 1);
    assert_eq!(d.stats().failed, 1);
    assert_eq!(d.stats().total_uploaded, 3);
    assert_eq!(d.stats().last_upload, NO_TIMESTAMP);
    assert_eq!(r.calls(), vec!["list_status 25"]);
}

#[test]
fn load_failure_keeps_previous_activity() {
    let r = remote();
    let mut d = dashboard();
    d.load(&r).expect("load");
    r.fail("list_status", "Failed to load statuses (500)");
    assert!(d.load(&r).is_err());
    assert_eq!(d.activity().len(), 3);
    assert_eq!(d.error(), Some("Failed to load statuses (500)"));
}

#[test]
fn candidates_follow_each_selector_filter() {
    let r = remote();
    let mut d = dashboard();
    assert_eq!(d.candidates(&r, BulkAction::Sync).expect("sync"), vec!["b", "c"]);
    assert_eq!(d.candidates(&r, BulkAction::Wipe).expect("wipe"), vec!["a"]);
    assert_eq!(r.count("list_status"), 1);
}

#[test]
fn toggle_rejects_ineligible_ids() {
    let r = remote();
    let mut d = dashboard();
    let err = d.toggle_sync(&r, "a").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "document a is not eligible to sync");
    assert!(d.toggle_wipe(&r, "b").unwrap_err().is_validation());
    assert!(d.toggle_sync(&r, "unknown").is_err());

    d.toggle_sync(&r, "b").expect("b is syncable");
    d.toggle_wipe(&r, "a").expect("a is wipeable");
    assert_eq!(d.selector(BulkAction::Sync).summary(), "1 doc to sync");
    assert_eq!(d.selector(BulkAction::Wipe).summary(), "1 doc to wipe");
}

#[test]
fn all_sentinel_toggles_without_status_lookup() {
    let r = remote();
    let mut d = dashboard();
    d.toggle_sync(&r, "ALL").expect("all");
    assert!(d.selector(BulkAction::Sync).selection().is_all());
    assert!(r.calls().is_empty());
}

#[test]
fn submit_sync_sends_ids_then_clears_and_reloads() {
    let r = remote();
    let mut d = dashboard();
    d.toggle_sync(&r, "b").expect("b");
    d.toggle_sync(&r, "c").expect("c");

    let notice = d.submit_sync(&r, None).expect("submit");
    assert_eq!(notice, "2 docs queued for ingestion");
    assert!(d.selector(BulkAction::Sync).selection().is_empty());
    assert_eq!(r.status_of("b"), Some(DocStatus::Learned));
    assert_eq!(d.stats().learned, 3);

    // Status map was invalidated: the next lookup refetches.
    let before = r.count("list_status");
    d.candidates(&r, BulkAction::Wipe).expect("wipe candidates");
    assert_eq!(r.count("list_status"), before + 1);
}

#[test]
fn submit_with_empty_selection_sends_nothing() {
    let r = remote();
    let mut d = dashboard();
    assert!(d.submit_sync(&r, None).unwrap_err().is_validation());
    assert!(d.submit_wipe(&r).unwrap_err().is_validation());
    assert!(r.calls().is_empty());
}

#[test]
fn submit_is_rejected_while_in_flight() {
    let r = remote();
    let mut d = dashboard();
    d.toggle_sync(&r, "ALL").expect("all");
    d.syncing = true;
    assert!(d.is_busy(BulkAction::Sync));
    assert!(d.submit_sync(&r, None).unwrap_err().is_validation());
    assert!(d.sync_document(&r, "c").unwrap_err().is_validation());
    assert_eq!(r.count("sync"), 0);
    assert!(d.selector(BulkAction::Sync).selection().is_all());
}

#[test]
fn failed_submit_keeps_selection() {
    let r = remote();
    let mut d = dashboard();
    d.toggle_wipe(&r, "a").expect("a");
    r.fail("wipe", "NeuroWipe failed (500)");
    assert_eq!(d.submit_wipe(&r).unwrap_err().to_string(), "NeuroWipe failed (500)");
    assert!(d.selector(BulkAction::Wipe).selection().contains("a"));
    assert!(!d.is_busy(BulkAction::Wipe));
}

#[test]
fn wipe_all_resets_learned_documents() {
    let r = remote();
    let mut d = dashboard();
    d.toggle_wipe(&r, "ALL").expect("all");
    assert_eq!(
        d.submit_wipe(&r).expect("wipe"),
        "All documents scheduled for deletion"
    );
    assert_eq!(r.status_of("a"), Some(DocStatus::Uploaded));
    assert!(r.calls().contains(&"wipe All".to_string()));
}

#[test]
fn refresh_prunes_selection_after_status_change() {
    let r = remote();
    let mut d = dashboard();
    d.toggle_sync(&r, "b").expect("b");
    d.toggle_sync(&r, "c").expect("c");
    d.sync_document(&r, "c").expect("single");
    d.refresh_statuses(&r).expect("refresh");
    assert_eq!(d.selector(BulkAction::Sync).selection().ids(), vec!["b"]);
}

#[test]
fn file_status_requires_an_id() {
    let r = remote();
    let d = dashboard();
    assert!(d.file_status(&r, " ").unwrap_err().is_validation());
    let v = d.file_status(&r, "a").expect("status");
    assert_eq!(v["status"], "learned");
}
