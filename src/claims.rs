//! Bearer credential inspection.
//!
//! Pure functions over an opaque token string: decode its self-describing
//! claims and answer point-in-time questions about expiry. No side effects,
//! no retained state, and no panics - a credential that cannot be decoded is
//! reported as expired with zero time remaining, never as valid.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;

/// Safety margin subtracted from the literal expiry instant.
/// Absorbs clock skew and network latency for the next authenticated call.
const EXPIRY_BUFFER_SECONDS: i64 = 30;

/// Decoded claims of a bearer credential.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    #[serde(rename = "sub")]
    pub subject: Option<String>,
    #[serde(rename = "iat")]
    pub issued_at: Option<i64>,
    #[serde(rename = "exp")]
    pub expires_at: Option<i64>,
}

impl Claims {
    /// Expiry instant as a UTC timestamp, if the claim is present and in range.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }
}

/// Decode the claims segment of a three-part token.
///
/// Returns `None` on a wrong segment count, bad base64url encoding, or a
/// non-JSON payload. The signature segment is never examined - this is an
/// advisory client-side read, not verification.
pub fn decode(token: &str) -> Option<Claims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    serde_json::from_slice(&payload).ok()
}

/// Whether the credential is expired at `now`.
///
/// True if the token cannot be decoded, carries no expiry claim, or `now` is
/// within [`EXPIRY_BUFFER_SECONDS`] of the literal expiry instant.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode(token).and_then(|claims| claims.expires_at_utc()) {
        Some(expires_at) => now >= expires_at - Duration::seconds(EXPIRY_BUFFER_SECONDS),
        None => true,
    }
}

/// Raw time remaining until the literal expiry instant, floored at zero.
///
/// The expiry buffer does not apply here; this is the figure shown to users.
pub fn time_remaining(token: &str, now: DateTime<Utc>) -> Duration {
    match decode(token).and_then(|claims| claims.expires_at_utc()) {
        Some(expires_at) => (expires_at - now).max(Duration::zero()),
        None => Duration::zero(),
    }
}

/// The `sub` claim, if the token decodes and carries one.
pub fn subject_of(token: &str) -> Option<String> {
    decode(token).and_then(|claims| claims.subject)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed whole-second instant so duration assertions are exact
    /// (token expiry claims only carry second precision).
    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{}.{}.sig", header, body)
    }

    fn token_expiring_at(expires_at: DateTime<Utc>) -> String {
        token_with_payload(&format!(
            r#"{{"sub":"user@example.com","iat":{},"exp":{}}}"#,
            expires_at.timestamp() - 3600,
            expires_at.timestamp()
        ))
    }

    #[test]
    fn test_decode_valid_token() {
        let now = fixed_now();
        let claims = decode(&token_expiring_at(now + Duration::hours(1))).unwrap();
        assert_eq!(claims.subject.as_deref(), Some("user@example.com"));
        assert!(claims.issued_at.is_some());
        assert!(claims.expires_at.is_some());
    }

    #[test]
    fn test_decode_wrong_segment_count() {
        assert!(decode("only-one-segment").is_none());
        assert!(decode("two.segments").is_none());
        assert!(decode("a.b.c.d").is_none());
        assert!(decode("").is_none());
    }

    #[test]
    fn test_decode_bad_base64_payload() {
        assert!(decode("header.!!!not-base64!!!.sig").is_none());
    }

    #[test]
    fn test_decode_non_json_payload() {
        let body = URL_SAFE_NO_PAD.encode(b"not json at all");
        assert!(decode(&format!("header.{}.sig", body)).is_none());
    }

    #[test]
    fn test_is_expired_past_expiry() {
        let now = fixed_now();
        assert!(is_expired(&token_expiring_at(now - Duration::seconds(1)), now));
    }

    #[test]
    fn test_is_expired_far_future() {
        let now = fixed_now();
        assert!(!is_expired(&token_expiring_at(now + Duration::hours(1)), now));
    }

    #[test]
    fn test_is_expired_within_buffer() {
        let now = fixed_now();
        // 20s remaining falls inside the 30s safety buffer
        assert!(is_expired(&token_expiring_at(now + Duration::seconds(20)), now));
        assert!(!is_expired(&token_expiring_at(now + Duration::seconds(40)), now));
    }

    #[test]
    fn test_is_expired_missing_exp_claim() {
        let now = fixed_now();
        let token = token_with_payload(r#"{"sub":"user@example.com"}"#);
        assert!(is_expired(&token, now));
    }

    #[test]
    fn test_is_expired_undecodable() {
        assert!(is_expired("garbage", Utc::now()));
    }

    #[test]
    fn test_time_remaining_non_increasing() {
        let now = fixed_now();
        let token = token_expiring_at(now + Duration::minutes(10));
        let at_start = time_remaining(&token, now);
        let later = time_remaining(&token, now + Duration::minutes(4));
        assert!(later < at_start);
        assert_eq!(at_start, Duration::minutes(10));
        assert_eq!(later, Duration::minutes(6));
    }

    #[test]
    fn test_time_remaining_floored_at_zero() {
        let now = fixed_now();
        let token = token_expiring_at(now - Duration::minutes(5));
        assert_eq!(time_remaining(&token, now), Duration::zero());
    }

    #[test]
    fn test_time_remaining_undecodable_is_zero() {
        assert_eq!(time_remaining("not.a-token", Utc::now()), Duration::zero());
    }

    #[test]
    fn test_subject_of() {
        let now = fixed_now();
        let token = token_expiring_at(now + Duration::hours(1));
        assert_eq!(subject_of(&token).as_deref(), Some("user@example.com"));
        assert!(subject_of("garbage").is_none());
    }
}
