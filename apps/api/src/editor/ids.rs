use std::collections::HashSet;

use chrono::Utc;

/// Issues list-entry ids derived from the creation time in milliseconds.
///
/// Ids strictly increase within a session and skip any value already present
/// in the target list, so two entries added in the same millisecond (or an
/// entry added after a clock step backwards) still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id<'a>(&mut self, existing: impl IntoIterator<Item = &'a str>) -> String {
        self.next_id_at(Utc::now().timestamp_millis(), existing)
    }

    pub fn next_id_at<'a>(
        &mut self,
        now_ms: i64,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> String {
        let taken: HashSet<&str> = existing.into_iter().collect();
        let mut candidate = now_ms.max(self.last + 1);
        while taken.contains(candidate.to_string().as_str()) {
            candidate += 1;
        }
        self.last = candidate;
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_creation_time() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id_at(1_700_000_000_000, []), "1700000000000");
    }

    #[test]
    fn test_same_millisecond_yields_distinct_ids() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id_at(1_000, []);
        let b = ids.next_id_at(1_000, []);
        assert_ne!(a, b);
        assert_eq!(b, "1001");
    }

    #[test]
    fn test_skips_ids_already_in_list() {
        let mut ids = IdGenerator::new();
        let id = ids.next_id_at(5_000, ["5000", "5001", "exp1"]);
        assert_eq!(id, "5002");
    }

    #[test]
    fn test_clock_going_backwards_still_increases() {
        let mut ids = IdGenerator::new();
        ids.next_id_at(9_000, []);
        assert_eq!(ids.next_id_at(8_000, []), "9001");
    }
}
