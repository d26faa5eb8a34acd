use std::collections::HashMap;

use crate::models::{DailyRecord, StudentRank};
use crate::roster::Roster;
use crate::scoring;

/// Rank every roster member by total experience across their records.
///
/// Every roster name is seeded with 0 so students without entries still
/// appear at the bottom. Scores are recomputed from raw fields rather than
/// read from the stored `total_exp` cache, so a stale cache cannot skew the
/// ranking. Records for names not on the roster are ignored. The sort is
/// stable and descending, so ties keep roster order.
pub fn rank_students(records: &[DailyRecord], roster: &Roster) -> Vec<StudentRank> {
    let mut totals: HashMap<&str, i64> = roster
        .names()
        .iter()
        .map(|name| (name.as_str(), 0))
        .collect();

    for record in records {
        if let Some(total) = totals.get_mut(record.student_name.as_str()) {
            *total += scoring::compute_score(record);
        }
    }

    let mut ranks: Vec<StudentRank> = roster
        .names()
        .iter()
        .map(|name| StudentRank {
            name: name.clone(),
            exp: totals.get(name.as_str()).copied().unwrap_or(0),
        })
        .collect();

    ranks.sort_by(|a, b| b.exp.cmp(&a.exp));
    ranks
}
