//! Integration tests for the public wire types.

use orchestra_core::{ChatRequest, Provider, QuotaReport, RequestState, RequestStatus};

#[test]
fn test_status_lifecycle_terminal_states() {
    for state in [RequestState::Pending, RequestState::Queued, RequestState::Processing] {
        assert!(!state.is_terminal(), "{state} should not be terminal");
    }
    assert!(RequestState::Completed.is_terminal());
    assert!(RequestState::Failed.is_terminal());
}

#[test]
fn test_failed_status_has_no_response() {
    let status = RequestStatus::failed("boom");
    assert!(status.to_response().is_none());
}

#[test]
fn test_empty_quota_report() {
    let report: QuotaReport = serde_json::from_str("{}").unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_custom_provider_roundtrip() {
    let request = ChatRequest::new("hi").with_provider("qwen".parse().unwrap());
    let json = serde_json::to_string(&request).unwrap();
    let parsed: ChatRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.provider, Provider::Custom("qwen".to_string()));
}
