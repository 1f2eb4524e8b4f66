//! Admission decisions and the rate-limit header contract.

use serde::Serialize;

/// Header carrying the configured window limit.
pub const LIMIT_HEADER: &str = "X-RateLimit-Limit";
/// Header carrying the remaining quota in the current window.
pub const REMAINING_HEADER: &str = "X-RateLimit-Remaining";
/// Header carrying the seconds until the current window resets.
pub const RESET_HEADER: &str = "X-RateLimit-Reset";
/// Advisory header attached only to rejected requests.
pub const RETRY_AFTER_HEADER: &str = "Retry-After";

/// Sentinel client identifier for requests with no derivable address.
///
/// Deriving the identifier (forwarded-address header first, then the
/// connection address) is the caller's concern; this constant is exported
/// so all callers fall back to the same bucket.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// The outcome of an admission check.
///
/// Carries the values the request-handling layer writes onto the
/// rate-limit response headers. On rejection the caller responds with
/// HTTP 429; `Serialize` is derived so the numeric fields can be embedded
/// in a structured rejection body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Whether the request is admitted
    pub admitted: bool,
    /// The configured window limit
    pub limit: u64,
    /// Requests remaining in the current window
    pub remaining: u64,
    /// Seconds until the current window resets
    pub reset_secs: u64,
    /// Advisory retry delay, present only on rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

impl Decision {
    /// Header name/value pairs to attach to the response.
    ///
    /// `Retry-After` is included only when the request was rejected.
    pub fn header_pairs(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            (LIMIT_HEADER, self.limit.to_string()),
            (REMAINING_HEADER, self.remaining.to_string()),
            (RESET_HEADER, self.reset_secs.to_string()),
        ];

        if let Some(retry_after) = self.retry_after_secs {
            headers.push((RETRY_AFTER_HEADER, retry_after.to_string()));
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admitted_headers_omit_retry_after() {
        let decision = Decision {
            admitted: true,
            limit: 100,
            remaining: 99,
            reset_secs: 60,
            retry_after_secs: None,
        };

        let headers = decision.header_pairs();
        assert_eq!(
            headers,
            vec![
                (LIMIT_HEADER, "100".to_string()),
                (REMAINING_HEADER, "99".to_string()),
                (RESET_HEADER, "60".to_string()),
            ]
        );
    }

    #[test]
    fn test_rejected_headers_include_retry_after() {
        let decision = Decision {
            admitted: false,
            limit: 100,
            remaining: 0,
            reset_secs: 12,
            retry_after_secs: Some(30),
        };

        let headers = decision.header_pairs();
        assert_eq!(headers.len(), 4);
        assert_eq!(headers[3], (RETRY_AFTER_HEADER, "30".to_string()));
    }

    #[test]
    fn test_serialized_body_shape() {
        let admitted = Decision {
            admitted: true,
            limit: 10,
            remaining: 9,
            reset_secs: 60,
            retry_after_secs: None,
        };
        let body = serde_json::to_value(&admitted).unwrap();
        assert_eq!(body["limit"], 10);
        assert!(body.get("retry_after_secs").is_none());

        let rejected = Decision {
            admitted: false,
            limit: 10,
            remaining: 0,
            reset_secs: 42,
            retry_after_secs: Some(60),
        };
        let body = serde_json::to_value(&rejected).unwrap();
        assert_eq!(body["admitted"], false);
        assert_eq!(body["retry_after_secs"], 60);
    }
}
