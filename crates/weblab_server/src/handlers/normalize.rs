//! Shared normalization helpers for request inputs.

use hyper::HeaderMap;
use weblab_core::constants::{ACCOUNT_HEADER, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use weblab_core::models::AccountRef;

/// The caller's account from the account header. Missing, blank, or
/// non-UTF-8 values mean an anonymous caller.
pub(crate) fn caller_account(headers: &HeaderMap) -> Option<AccountRef> {
    headers
        .get(ACCOUNT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(AccountRef::parse)
}

/// Clamp a requested page size into `1..=MAX_LIST_LIMIT`.
pub(crate) fn clamp_list_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn caller_account_reads_trimmed_header() {
        let mut headers = HeaderMap::new();
        assert!(caller_account(&headers).is_none());

        headers.insert(ACCOUNT_HEADER, HeaderValue::from_static("  alice "));
        assert_eq!(caller_account(&headers), AccountRef::parse("alice"));

        headers.insert(ACCOUNT_HEADER, HeaderValue::from_static("   "));
        assert!(caller_account(&headers).is_none());
    }

    #[test]
    fn list_limit_is_clamped() {
        assert_eq!(clamp_list_limit(None), DEFAULT_LIST_LIMIT);
        assert_eq!(clamp_list_limit(Some(0)), 1);
        assert_eq!(clamp_list_limit(Some(10_000)), MAX_LIST_LIMIT);
        assert_eq!(clamp_list_limit(Some(7)), 7);
    }
}
