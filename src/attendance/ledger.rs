use std::collections::VecDeque;

use crate::model::{AttendanceRecord, UserId};

/// Append-only attendance history, most recent record first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: VecDeque<AttendanceRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// One user's slice of a seed pool. The pool is already most-recent-first.
    pub fn seeded<'a>(
        user_id: &UserId,
        pool: impl IntoIterator<Item = &'a AttendanceRecord>,
    ) -> Self {
        let records = pool
            .into_iter()
            .filter(|record| record.user_id() == user_id)
            .cloned()
            .collect();
        Self { records }
    }

    pub fn append(&mut self, record: AttendanceRecord) {
        self.records.push_front(record);
    }

    pub fn records_for_user(&self, user_id: &UserId) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| record.user_id() == user_id)
            .collect()
    }

    /// The `n` most recent records, oldest first.
    pub fn recent_n(&self, n: usize) -> Vec<&AttendanceRecord> {
        let mut recent: Vec<_> = self.records.iter().take(n).collect();
        recent.reverse();
        recent
    }

    /// A copy holding only the records `keep` accepts, order preserved.
    pub fn filtered(&self, keep: impl Fn(&AttendanceRecord) -> bool) -> Ledger {
        Self {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record;
    use chrono::Datelike;

    fn ids(records: &[&AttendanceRecord]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn append_keeps_most_recent_first() {
        let mut ledger = Ledger::new();
        ledger.append(record("r1", "2", 1));
        ledger.append(record("r2", "2", 2));
        ledger.append(record("r3", "2", 3));

        let user = UserId::from("2");
        assert_eq!(ids(&ledger.records_for_user(&user)), ["r3", "r2", "r1"]);
        assert_eq!(ids(&ledger.recent_n(2)), ["r2", "r3"]);
    }

    #[test]
    fn recent_n_larger_than_ledger_returns_everything() {
        let mut ledger = Ledger::new();
        ledger.append(record("r1", "2", 1));
        ledger.append(record("r2", "2", 2));

        assert_eq!(ids(&ledger.recent_n(7)), ["r1", "r2"]);
        assert!(ledger.recent_n(0).is_empty());
    }

    #[test]
    fn records_for_user_filters_by_owner() {
        let mut ledger = Ledger::new();
        ledger.append(record("a", "2", 1));
        ledger.append(record("b", "3", 1));
        ledger.append(record("c", "2", 2));

        assert_eq!(ids(&ledger.records_for_user(&UserId::from("2"))), ["c", "a"]);
        assert_eq!(ids(&ledger.records_for_user(&UserId::from("3"))), ["b"]);
        assert!(ledger.records_for_user(&UserId::from("9")).is_empty());
    }

    #[test]
    fn seeded_keeps_pool_order_for_one_user() {
        let pool = vec![
            record("101", "2", 25),
            record("102", "2", 24),
            record("103", "3", 25),
        ];
        let ledger = Ledger::seeded(&UserId::from("2"), &pool);

        assert_eq!(ledger.len(), 2);
        let all: Vec<_> = ledger.iter().collect();
        assert_eq!(ids(&all), ["101", "102"]);
    }

    #[test]
    fn filtered_keeps_order_and_leaves_the_source_alone() {
        let mut ledger = Ledger::new();
        ledger.append(record("a", "2", 1));
        ledger.append(record("b", "2", 20));
        ledger.append(record("c", "2", 3));

        let early = ledger.filtered(|r| r.date().day() < 10);
        let all: Vec<_> = early.iter().collect();
        assert_eq!(ids(&all), ["c", "a"]);
        assert_eq!(ledger.len(), 3);
    }
}
