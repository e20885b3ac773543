use super::{date_range::DateRange, punch_log::PunchLog, user::User};
use serde::{Deserialize, Serialize};

/// Full state of the four collections, as exchanged between installations.
/// This is the unit the merge engine reconciles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub logs: Vec<PunchLog>,
    #[serde(default)]
    pub vacations: Vec<DateRange>,
    #[serde(default)]
    pub holidays: Vec<DateRange>,
}
