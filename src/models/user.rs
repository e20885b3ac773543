use crate::utils::time::now_millis;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weekday ids use the 0=Sunday .. 6=Saturday convention, which is also
/// the on-disk and snapshot format (comma-separated list).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WorkDays(pub BTreeSet<u8>);

impl Default for WorkDays {
    /// Monday through Friday.
    fn default() -> Self {
        Self([1, 2, 3, 4, 5].into_iter().collect())
    }
}

impl WorkDays {
    pub fn parse(s: &str) -> Option<Self> {
        let mut days = BTreeSet::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let d: u8 = part.parse().ok()?;
            if d > 6 {
                return None;
            }
            days.insert(d);
        }
        Some(Self(days))
    }

    pub fn to_db_str(&self) -> String {
        self.0
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        let id = date.weekday().num_days_from_sunday() as u8;
        self.0.contains(&id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn to_db_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// An employee (or admin) account.
///
/// The PIN is a local 4-digit convenience attribute only; it is never used
/// to derive credentials for any external system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub pin: String,
    pub role: Role,
    pub is_master: bool,
    /// Expected hours per configured work day.
    pub daily_hours: f64,
    pub work_days: WorkDays,
    pub email_verified: bool,
    /// Local date awaiting an explanation; blocks punching until resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_justification: Option<NaiveDate>,
    /// One-shot flag: set once the overwork notice has been shown.
    pub relax_notice: bool,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl User {
    pub fn new(name: &str, email: &str, cpf: &str, pin: &str, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            cpf: cpf.to_string(),
            pin: pin.to_string(),
            role,
            is_master: false,
            daily_hours: 8.0,
            work_days: WorkDays::default(),
            email_verified: false,
            pending_justification: None,
            relax_notice: false,
            created_at: now_millis(),
            updated_at: None,
        }
    }

    /// Expected working minutes on a regular work day.
    pub fn daily_minutes(&self) -> i64 {
        (self.daily_hours * 60.0).round() as i64
    }

    pub fn merge_stamp(&self) -> i64 {
        self.updated_at.unwrap_or(self.created_at)
    }
}
