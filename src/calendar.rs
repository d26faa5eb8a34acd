use chrono::{Datelike, Duration, NaiveDate};

/// Hijri month abbreviations, Muharram first.
const HIJRI_MONTHS: [&str; 12] = [
    "Muh", "Saf", "R.Aw", "R.Akh", "Jum.Aw", "Jum.Akh", "Raj", "Sha", "Ram", "Syaw", "Dhu.Q",
    "Dhu.H",
];

/// Maps calendar dates to 1-based day indexes within the observance period.
/// The anchor date is day 1; the Hijri year is a fixed display label for
/// dates inside the 30-day window.
#[derive(Debug, Clone, Copy)]
pub struct RamadhanCalendar {
    anchor: NaiveDate,
    hijri_year: i64,
}

impl RamadhanCalendar {
    pub fn new(anchor: NaiveDate, hijri_year: i64) -> Self {
        Self { anchor, hijri_year }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Day index for a date. Dates before the anchor report day 1; dates
    /// past the nominal 30-day window return their true offset uncapped.
    pub fn day_for(&self, date: NaiveDate) -> i64 {
        let offset = (date - self.anchor).num_days() + 1;
        offset.max(1)
    }

    /// Inverse of `day_for` for dates on or after the anchor.
    pub fn date_for(&self, day: i64) -> NaiveDate {
        self.anchor + Duration::days(day - 1)
    }

    /// Hijri-style label for a date. Inside the 30-day window the label is
    /// exact; outside it falls back to the tabular approximation, which is
    /// cosmetic but deterministic.
    pub fn label(&self, date: NaiveDate) -> String {
        let offset = (date - self.anchor).num_days() + 1;
        if (1..=30).contains(&offset) {
            return format!("{} Ramadhan {} H", offset, self.hijri_year);
        }

        let (day, month, year) = approximate_hijri(date);
        let month_name = usize::try_from(month - 1)
            .ok()
            .and_then(|idx| HIJRI_MONTHS.get(idx))
            .copied()
            .unwrap_or_default();
        format!("{} {} {} H", day, month_name, year)
    }
}

/// Tabular civil-to-Hijri conversion (30-year cycle of 10631 days). Good to
/// about a day of drift against observation, which is acceptable for labels
/// outside the observance window.
fn approximate_hijri(date: NaiveDate) -> (i64, i64, i64) {
    let jdn = i64::from(date.num_days_from_ce()) + 1_721_425;

    let mut l = jdn - 1_948_440 + 10_632;
    let n = (l - 1).div_euclid(10_631);
    l = l - 10_631 * n + 354;

    let j = (10_985 - l).div_euclid(5_316) * (50 * l).div_euclid(17_719)
        + l.div_euclid(5_670) * (43 * l).div_euclid(15_238);
    l = l - (30 - j).div_euclid(15) * (17_719 * j).div_euclid(50)
        - j.div_euclid(16) * (15_238 * j).div_euclid(43)
        + 29;

    let month = (24 * l).div_euclid(709);
    let day = l - (709 * month).div_euclid(24);
    let year = 30 * n + j - 30;

    (day, month, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> RamadhanCalendar {
        RamadhanCalendar::new(NaiveDate::from_ymd_opt(2026, 2, 19).unwrap(), 1447)
    }

    #[test]
    fn anchor_is_day_one() {
        let cal = calendar();
        assert_eq!(cal.day_for(cal.anchor()), 1);
    }

    #[test]
    fn dates_before_anchor_clamp_to_day_one() {
        let cal = calendar();
        assert_eq!(cal.day_for(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()), 1);
        assert_eq!(cal.day_for(NaiveDate::from_ymd_opt(1950, 1, 1).unwrap()), 1);
    }

    #[test]
    fn offsets_past_the_window_are_not_capped() {
        let cal = calendar();
        let date = cal.anchor() + Duration::days(40);
        assert_eq!(cal.day_for(date), 41);
    }

    #[test]
    fn date_for_round_trips_on_or_after_anchor() {
        let cal = calendar();
        for offset in [0, 1, 15, 29, 30, 100] {
            let date = cal.anchor() + Duration::days(offset);
            assert_eq!(cal.date_for(cal.day_for(date)), date);
        }
    }

    #[test]
    fn labels_inside_the_window_are_exact() {
        let cal = calendar();
        assert_eq!(cal.label(cal.anchor()), "1 Ramadhan 1447 H");
        assert_eq!(
            cal.label(cal.anchor() + Duration::days(29)),
            "30 Ramadhan 1447 H"
        );
    }

    #[test]
    fn labels_outside_the_window_fall_back() {
        let cal = calendar();
        let label = cal.label(cal.anchor() + Duration::days(40));
        // 40 days past 19 Feb 2026 lands in Shawwal 1447.
        assert_eq!(label, "12 Syaw 1447 H");

        let before = cal.label(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert!(before.ends_with(" H"));
    }

    #[test]
    fn fallback_is_deterministic_far_from_anchor() {
        let cal = calendar();
        let far = NaiveDate::from_ymd_opt(2126, 6, 15).unwrap();
        assert_eq!(cal.label(far), cal.label(far));

        let past = NaiveDate::from_ymd_opt(1926, 6, 15).unwrap();
        assert!(cal.label(past).ends_with(" H"));
    }
}
