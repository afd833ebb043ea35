//! Cache key builders for all Notify cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. The provider applies the
//! configured global prefix (`cpn:` by default); builders only encode
//! the namespace.

/// Prefix under which event snapshots are cached for periodic re-sync.
pub const SNAPSHOT_PREFIX: &str = "sync:snapshot:";

// ── Inbox keys ─────────────────────────────────────────────

/// Cache key for an account's unread notification count.
pub fn unread_notification_count(account: &str) -> String {
    format!("notif:unread:{account}")
}

// ── Sync keys ──────────────────────────────────────────────

/// Cache key for an account's last ingested event snapshot.
pub fn event_snapshot(account: &str) -> String {
    format!("{SNAPSHOT_PREFIX}{account}")
}

/// Recover the account from a snapshot key listed by prefix scan.
pub fn account_from_snapshot_key(key: &str) -> Option<&str> {
    key.strip_prefix(SNAPSHOT_PREFIX)
}

// ── Push channel keys (background context namespace) ───────

/// Key for the remote notification backend base URL. Written by the
/// foreground at subscribe time, read by the background sync job.
pub fn push_api_url() -> String {
    "push:api_url".to_string()
}

/// Key for the platform's live push subscription, as last handed over by
/// a subscribing client.
pub fn push_subscription() -> String {
    "push:subscription".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_key() {
        assert_eq!(
            unread_notification_count("0xabc"),
            "notif:unread:0xabc"
        );
    }

    #[test]
    fn test_snapshot_key_round_trip() {
        let key = event_snapshot("0xabc");
        assert_eq!(account_from_snapshot_key(&key), Some("0xabc"));
    }
}
