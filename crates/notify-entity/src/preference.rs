//! Notification preference flags.

use serde::{Deserialize, Serialize};

use notify_core::AppResult;

/// Per-account notification preferences.
///
/// Two master switches gate whole delivery channels; the per-category
/// flags gate individual notification types. Most categories default to
/// enabled; milestone chatter, accepted-invite echoes, and the 1-hour
/// late-payment nag default to disabled.
///
/// Disabling a category never consumes dedup keys, so a one-time event
/// suppressed while a flag was off can still surface after re-enabling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    // Master switches
    /// In-app notification creation enabled at all.
    pub in_app_enabled: bool,
    /// Push delivery enabled at all.
    pub push_enabled: bool,

    // Circle lifecycle
    pub circle_started: bool,
    pub circle_completed: bool,
    pub contribution_due: bool,
    pub circle_round_started: bool,
    pub circle_member_joined: bool,
    pub circle_member_left: bool,
    pub circle_invite: bool,
    pub circle_invite_accepted: bool,
    pub circle_payout_sent: bool,
    pub circle_late_payment: bool,

    // Goal lifecycle
    pub goal_created: bool,
    pub goal_completed: bool,
    pub goal_deadline_reminder: bool,
    pub goal_milestone_25: bool,
    pub goal_milestone_50: bool,
    pub goal_milestone_75: bool,
    pub goal_contribution: bool,

    // Financial
    pub payout_received: bool,
    pub contribution_confirmed: bool,
    pub late_payment: bool,
    /// Reminder 24 hours before a contribution deadline. Flag exists for
    /// the settings surface; no schedule is currently driven by it.
    pub late_payment_reminder_24h: bool,
    /// Reminder 1 hour before a contribution deadline. Same status as the
    /// 24-hour flag.
    pub late_payment_reminder_1h: bool,
    pub referral_reward: bool,
    pub vault_yield: bool,

    // Social
    pub reputation_increase: bool,
    pub reputation_decrease: bool,
    pub category_promotion: bool,
    pub category_changed: bool,
    pub referral_joined: bool,

    // System
    pub system_announcement: bool,
    pub security_alert: bool,
    pub app_update: bool,
    pub maintenance: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            in_app_enabled: true,
            push_enabled: true,
            circle_started: true,
            circle_completed: true,
            contribution_due: true,
            circle_round_started: true,
            circle_member_joined: true,
            circle_member_left: true,
            circle_invite: true,
            circle_invite_accepted: false,
            circle_payout_sent: true,
            circle_late_payment: true,
            goal_created: true,
            goal_completed: true,
            goal_deadline_reminder: true,
            goal_milestone_25: false,
            goal_milestone_50: false,
            goal_milestone_75: false,
            goal_contribution: true,
            payout_received: true,
            contribution_confirmed: true,
            late_payment: true,
            late_payment_reminder_24h: true,
            late_payment_reminder_1h: false,
            referral_reward: true,
            vault_yield: true,
            reputation_increase: true,
            reputation_decrease: true,
            category_promotion: true,
            category_changed: true,
            referral_joined: true,
            system_announcement: true,
            security_alert: true,
            app_update: true,
            maintenance: true,
        }
    }
}

impl NotificationPreferences {
    /// Decode a persisted JSON value, falling back to defaults when the
    /// stored blob is corrupt. Availability over alerting: a bad
    /// preferences row should never take the inbox down.
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Apply a partial update with merge semantics: only keys present in
    /// the patch change, everything else keeps its current value. Unknown
    /// keys are ignored.
    pub fn merge(&self, patch: &serde_json::Value) -> AppResult<Self> {
        let mut current = serde_json::to_value(self)?;
        if let (Some(obj), Some(patch_obj)) = (current.as_object_mut(), patch.as_object()) {
            for (key, value) in patch_obj {
                if obj.contains_key(key) && value.is_boolean() {
                    obj.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(serde_json::from_value(current)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = NotificationPreferences::default();
        assert!(prefs.in_app_enabled);
        assert!(prefs.circle_started);
        assert!(!prefs.circle_invite_accepted);
        assert!(!prefs.goal_milestone_50);
        assert!(!prefs.late_payment_reminder_1h);
    }

    #[test]
    fn test_merge_keeps_unpatched_fields() {
        let prefs = NotificationPreferences::default();
        let merged = prefs
            .merge(&serde_json::json!({"circle_started": false}))
            .unwrap();
        assert!(!merged.circle_started);
        assert!(merged.goal_completed);
    }

    #[test]
    fn test_merge_ignores_unknown_and_non_bool() {
        let prefs = NotificationPreferences::default();
        let merged = prefs
            .merge(&serde_json::json!({"no_such_flag": false, "push_enabled": "nope"}))
            .unwrap();
        assert_eq!(merged, prefs);
    }

    #[test]
    fn test_corrupt_value_decodes_to_defaults() {
        let prefs = NotificationPreferences::from_value(&serde_json::json!("garbage"));
        assert_eq!(prefs, NotificationPreferences::default());
    }
}
