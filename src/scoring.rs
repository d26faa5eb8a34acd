use crate::models::{DailyRecord, PrayerStatus};

pub fn prayer_points(status: Option<PrayerStatus>) -> i64 {
    match status {
        Some(PrayerStatus::Congregation) => 15,
        Some(PrayerStatus::Individual) => 10,
        None => 0,
    }
}

/// Experience points for one daily record. All contributions are additive
/// and independent; absent fields contribute 0, so a partial record never
/// scores negative.
pub fn compute_score(record: &DailyRecord) -> i64 {
    let mut exp = 0;

    exp += prayer_points(record.fajr);
    exp += prayer_points(record.dhuhr);
    exp += prayer_points(record.asr);
    exp += prayer_points(record.maghrib);
    exp += prayer_points(record.isha);
    exp += prayer_points(record.tarawih);

    if record.duha {
        exp += 10;
    }
    if record.charity {
        exp += 15;
    }
    if record.dhikr {
        exp += 15;
    }
    if record.itikaf {
        exp += 15;
    }

    // The lecture bonus requires a summary that is non-empty after trimming.
    if record
        .lecture_summary
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty())
    {
        exp += 20;
    }

    exp += record.quran_pages.max(0) * 10;

    exp
}
