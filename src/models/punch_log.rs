use super::log_type::{JustificationKind, LogType};
use crate::utils::time::{millis_to_local, now_millis};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single punch event: a clock-in, a clock-out, or a justified interval.
///
/// `date` is the local calendar day the event is attributed to. It is fixed
/// when the event is created and only recomputed when an admin edits the
/// timestamp; it is never re-derived from `ts` at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PunchLog {
    pub id: String,
    pub user_id: String,
    /// Event instant, unix millis.
    pub ts: i64,
    /// End instant (unix millis); present only for `Justified` logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_ts: Option<i64>,
    pub kind: LogType,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification_kind: Option<JustificationKind>,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl PunchLog {
    /// Build a punch (IN/OUT) attributed to the local calendar day of `ts`.
    pub fn punch(user_id: &str, kind: LogType, ts: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            ts,
            end_ts: None,
            kind,
            date: millis_to_local(ts).date_naive(),
            justification: None,
            justification_kind: None,
            created_at: now_millis(),
            updated_at: None,
        }
    }

    /// Build a justified interval with an explicit end.
    pub fn justified(
        user_id: &str,
        ts: i64,
        end_ts: i64,
        reason: &str,
        kind: JustificationKind,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            ts,
            end_ts: Some(end_ts),
            kind: LogType::Justified,
            date: millis_to_local(ts).date_naive(),
            justification: Some(reason.to_string()),
            justification_kind: Some(kind),
            created_at: now_millis(),
            updated_at: None,
        }
    }

    pub fn time_str(&self) -> String {
        millis_to_local(self.ts).format("%H:%M").to_string()
    }

    pub fn end_time_str(&self) -> Option<String> {
        self.end_ts
            .map(|e| millis_to_local(e).format("%H:%M").to_string())
    }

    /// Duration in minutes of a justified interval; 0 when the end is
    /// missing or not after the start.
    pub fn justified_minutes(&self) -> i64 {
        match self.end_ts {
            Some(end) if end > self.ts => (end - self.ts) / 60_000,
            _ => 0,
        }
    }

    /// Timestamp used for last-write-wins reconciliation: `updated_at`,
    /// falling back to `created_at`, then to the event instant itself.
    pub fn merge_stamp(&self) -> i64 {
        self.updated_at.unwrap_or(if self.created_at > 0 {
            self.created_at
        } else {
            self.ts
        })
    }
}
