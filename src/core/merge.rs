//! Snapshot reconciliation: last-write-wins per record id, union across
//! sides, plus a stable signature used to skip redundant write-backs.

use crate::models::snapshot::Snapshot;
use std::collections::HashMap;

/// Merge one collection keyed by id.
///
/// When both sides carry a record, the one with the greater merge stamp
/// wins (local wins ties). A record present on only one side is kept:
/// union, not intersection, so offline-created records survive the merge.
fn merge_collection<T, I, S>(local: &[T], remote: &[T], id_of: I, stamp_of: S) -> Vec<T>
where
    T: Clone,
    I: Fn(&T) -> &str,
    S: Fn(&T) -> i64,
{
    let mut merged: HashMap<String, T> = HashMap::new();

    for rec in local {
        merged.insert(id_of(rec).to_string(), rec.clone());
    }
    for rec in remote {
        let key = id_of(rec).to_string();
        match merged.get(&key) {
            Some(existing) if stamp_of(existing) >= stamp_of(rec) => {}
            _ => {
                merged.insert(key, rec.clone());
            }
        }
    }

    let mut out: Vec<T> = merged.into_values().collect();
    out.sort_by(|a, b| id_of(a).cmp(id_of(b)));
    out
}

/// Reconcile two snapshots of the four collections.
pub fn merge_snapshots(local: &Snapshot, remote: &Snapshot) -> Snapshot {
    Snapshot {
        users: merge_collection(&local.users, &remote.users, |u| &u.id, |u| u.merge_stamp()),
        logs: merge_collection(&local.logs, &remote.logs, |l| &l.id, |l| l.merge_stamp()),
        vacations: merge_collection(
            &local.vacations,
            &remote.vacations,
            |v| &v.id,
            |v| v.merge_stamp(),
        ),
        holidays: merge_collection(
            &local.holidays,
            &remote.holidays,
            |h| &h.id,
            |h| h.merge_stamp(),
        ),
    }
}

/// Stable digest of a snapshot: sorted `id:stamp` pairs per collection.
/// Two snapshots with equal signatures hold the same record versions, so
/// the write-back can be skipped.
pub fn signature(snap: &Snapshot) -> String {
    fn section<T, I, S>(items: &[T], id_of: I, stamp_of: S) -> String
    where
        I: Fn(&T) -> &str,
        S: Fn(&T) -> i64,
    {
        let mut pairs: Vec<String> = items
            .iter()
            .map(|r| format!("{}:{}", id_of(r), stamp_of(r)))
            .collect();
        pairs.sort();
        pairs.join(",")
    }

    format!(
        "u={}|l={}|v={}|h={}",
        section(&snap.users, |u| &u.id, |u| u.merge_stamp()),
        section(&snap.logs, |l| &l.id, |l| l.merge_stamp()),
        section(&snap.vacations, |v| &v.id, |v| v.merge_stamp()),
        section(&snap.holidays, |h| &h.id, |h| h.merge_stamp()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::date_range::DateRange;
    use crate::models::user::{Role, User};

    fn user(id: &str, updated_at: i64) -> User {
        let mut u = User::new(id, &format!("{}@x.com", id), "", "0000", Role::User);
        u.id = id.to_string();
        u.created_at = 1;
        u.updated_at = Some(updated_at);
        u
    }

    #[test]
    fn newer_remote_wins() {
        let local = Snapshot {
            users: vec![user("a", 100)],
            ..Default::default()
        };
        let remote = Snapshot {
            users: vec![user("a", 200)],
            ..Default::default()
        };
        let merged = merge_snapshots(&local, &remote);
        assert_eq!(merged.users.len(), 1);
        assert_eq!(merged.users[0].updated_at, Some(200));
    }

    #[test]
    fn newer_local_survives() {
        let local = Snapshot {
            users: vec![user("a", 300)],
            ..Default::default()
        };
        let remote = Snapshot {
            users: vec![user("a", 200)],
            ..Default::default()
        };
        let merged = merge_snapshots(&local, &remote);
        assert_eq!(merged.users[0].updated_at, Some(300));
    }

    #[test]
    fn one_sided_records_are_kept() {
        let local = Snapshot {
            users: vec![user("a", 100), user("b", 50)],
            ..Default::default()
        };
        let remote = Snapshot {
            users: vec![user("a", 200)],
            ..Default::default()
        };
        let merged = merge_snapshots(&local, &remote);
        assert_eq!(merged.users.len(), 2);
        let b = merged.users.iter().find(|u| u.id == "b").unwrap();
        assert_eq!(b.updated_at, Some(50));
    }

    #[test]
    fn signature_stable_under_ordering() {
        let a = Snapshot {
            vacations: vec![
                DateRange {
                    id: "r1".into(),
                    user_id: "u".into(),
                    start_date: "2024-01-01".parse().unwrap(),
                    end_date: "2024-01-05".parse().unwrap(),
                    created_at: 10,
                    updated_at: None,
                },
                DateRange {
                    id: "r2".into(),
                    user_id: "u".into(),
                    start_date: "2024-02-01".parse().unwrap(),
                    end_date: "2024-02-05".parse().unwrap(),
                    created_at: 20,
                    updated_at: None,
                },
            ],
            ..Default::default()
        };
        let mut b = a.clone();
        b.vacations.reverse();
        assert_eq!(signature(&a), signature(&b));
    }

    #[test]
    fn signature_changes_with_stamps() {
        let a = Snapshot {
            users: vec![user("a", 100)],
            ..Default::default()
        };
        let b = Snapshot {
            users: vec![user("a", 101)],
            ..Default::default()
        };
        assert_ne!(signature(&a), signature(&b));
    }

    #[test]
    fn merged_snapshot_signature_matches_re_merge() {
        let local = Snapshot {
            users: vec![user("a", 100), user("b", 50)],
            ..Default::default()
        };
        let remote = Snapshot {
            users: vec![user("a", 200), user("c", 10)],
            ..Default::default()
        };
        let merged = merge_snapshots(&local, &remote);
        let again = merge_snapshots(&merged, &remote);
        assert_eq!(signature(&merged), signature(&again));
    }
}
