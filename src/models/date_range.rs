use crate::utils::time::now_millis;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive range of exempt days, owned by one user.
/// Used for both vacations and holidays/recesses; any date inside the
/// range carries no work expectation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub id: String,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl DateRange {
    pub fn new(user_id: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            start_date,
            end_date,
            created_at: now_millis(),
            updated_at: None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    pub fn merge_stamp(&self) -> i64 {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// True when any range in the slice covers `date`.
pub fn covers(ranges: &[DateRange], date: NaiveDate) -> bool {
    ranges.iter().any(|r| r.contains(date))
}
