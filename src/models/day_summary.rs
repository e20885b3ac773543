use super::punch_log::PunchLog;
use chrono::NaiveDate;

/// Derived daily aggregate: worked vs. expected minutes and goal status.
/// Never persisted; rebuilt from the logs on demand.
#[derive(Debug, Clone)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Worked minutes (paired punches) plus justified minutes.
    pub total_minutes: i64,
    /// 0 on weekends and exempt days, otherwise the user's daily quota.
    pub expected_minutes: i64,
    pub goal_met: bool,
    pub logs: Vec<PunchLog>,
}
