use cloud_accounts::fetch::PageFetcher;
use cloud_accounts::source::{AccountSource, SourceError};
use cloud_accounts::trace::DiagnosticTrace;
use serde_json::{Value, json};
use std::cell::RefCell;

/// In-memory listing of `total` accounts that records every page request
struct ListingSource {
    total: usize,
    reported_total: Option<Value>,
    nested: bool,
    requests: RefCell<Vec<(usize, usize)>>,
}

impl ListingSource {
    fn new(total: usize) -> Self {
        Self {
            total,
            reported_total: Some(json!(total)),
            nested: false,
            requests: RefCell::new(Vec::new()),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl AccountSource for ListingSource {
    fn fetch_page(
        &self,
        _instance_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Value, SourceError> {
        self.requests.borrow_mut().push((offset, limit));

        let end = (offset + limit).min(self.total);
        let data: Vec<Value> = (offset.min(end)..end)
            .map(|i| json!({ "cloud_account_id": format!("acc-{i}"), "account_name": format!("name-{i}") }))
            .collect();

        let mut reply = json!({ "DATA": data });
        if let Some(total) = &self.reported_total {
            reply["TOTAL_COUNT"] = total.clone();
        }

        Ok(if self.nested {
            json!({ "response": { "reply": reply } })
        } else {
            json!({ "reply": reply })
        })
    }
}

fn fetch(source: &ListingSource, page_size: usize) -> Vec<String> {
    let mut trace = DiagnosticTrace::new();
    PageFetcher::new()
        .page_size(page_size)
        .fetch_all(source, "i1", &mut trace)
        .expect("fetch succeeds")
        .iter()
        .filter_map(|a| a.cloud_account_id().map(|id| id.into_owned()))
        .collect()
}

#[test]
fn test_request_count_matches_page_math() {
    let page_size = 100;
    for total in [0, 1, page_size, page_size + 1, page_size * 3] {
        let source = ListingSource::new(total);
        let ids = fetch(&source, page_size);

        assert_eq!(ids.len(), total, "total {total}");
        let expected_requests = total.div_ceil(page_size).max(1);
        assert_eq!(
            source.request_count(),
            expected_requests,
            "total {total} should need {expected_requests} request(s)"
        );
    }
}

#[test]
fn test_pages_are_requested_in_order() {
    let source = ListingSource::new(25);
    let ids = fetch(&source, 10);

    assert_eq!(
        *source.requests.borrow(),
        vec![(0, 10), (10, 10), (20, 10)]
    );
    assert_eq!(ids.first().map(String::as_str), Some("acc-0"));
    assert_eq!(ids.last().map(String::as_str), Some("acc-24"));
}

#[test]
fn test_nested_envelope_is_paginated_the_same() {
    let mut source = ListingSource::new(250);
    source.nested = true;
    assert_eq!(fetch(&source, 100).len(), 250);
    assert_eq!(source.request_count(), 3);
}

#[test]
fn test_missing_total_relies_on_short_page() {
    let mut source = ListingSource::new(200);
    source.reported_total = None;

    assert_eq!(fetch(&source, 100).len(), 200);
    // two full pages and an empty one
    assert_eq!(source.request_count(), 3);
}

#[test]
fn test_zero_total_does_not_truncate_full_pages() {
    let mut source = ListingSource::new(150);
    source.reported_total = Some(json!(0));

    assert_eq!(fetch(&source, 100).len(), 150);
    assert_eq!(source.request_count(), 2);
}

#[test]
fn test_stale_small_total_stops_early() {
    let mut source = ListingSource::new(300);
    source.reported_total = Some(json!(150));

    assert_eq!(fetch(&source, 100).len(), 200);
    assert_eq!(source.request_count(), 2);
}

struct BrokenShapeSource;

impl AccountSource for BrokenShapeSource {
    fn fetch_page(&self, _: &str, _: usize, _: usize) -> Result<Value, SourceError> {
        Ok(json!({ "error": "maintenance" }))
    }
}

#[test]
fn test_unexpected_shape_is_an_empty_page() {
    let mut trace = DiagnosticTrace::new();
    let accounts = PageFetcher::new()
        .fetch_all(&BrokenShapeSource, "i1", &mut trace)
        .expect("shape problems are not fatal");

    assert!(accounts.is_empty());
    assert!(trace.mentions("Unexpected reply shape"));
    assert!(trace.mentions("Pagination complete: fetched 0 accounts in 1 page(s)"));
}

struct FailingSource;

impl AccountSource for FailingSource {
    fn fetch_page(&self, instance_id: &str, _: usize, _: usize) -> Result<Value, SourceError> {
        Err(SourceError::Unavailable {
            instance_id: instance_id.to_string(),
            message: "connection refused".to_string(),
        })
    }
}

#[test]
fn test_source_failure_propagates_from_fetch_all() {
    let mut trace = DiagnosticTrace::new();
    let err = PageFetcher::new()
        .fetch_all(&FailingSource, "i9", &mut trace)
        .expect_err("source error surfaces");
    assert!(err.to_string().contains("i9"));
    assert!(err.to_string().contains("connection refused"));
}
