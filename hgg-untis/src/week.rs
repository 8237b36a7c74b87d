//! Week arithmetic for the plan window.
//!
//! Two week numberings are in play. Upstream pages are addressed by ISO 8601 week
//! ([`week_window`]), while the displayed start dates count weeks from the first Monday of the
//! calendar year ([`start_of_week`]). Both are kept exactly as the published plans expect them.

use time::Month::January;
use time::{Date, Duration, PrimitiveDateTime};

pub const WINDOW: usize = 5;

/// ISO weeks of `now` and the four following weeks.
pub fn week_window(now: PrimitiveDateTime) -> [u8; WINDOW] {
  std::array::from_fn(|offset| (now + Duration::weeks(offset as i64)).iso_week())
}

/// Monday of `week` in `year`, counting weeks the `%W` way.
///
/// Week `n` is the Monday of `%W` week `n - 1`, where `%W` week 0 holds the days before the
/// first Monday of the year. This is not ISO numbering: for years starting on Friday to Sunday
/// the result lies a week before the ISO Monday. Week 1 may land in December of the previous
/// year. Returns `None` for weeks outside `1..=54`.
pub fn start_of_week(week: u8, year: i32) -> Option<Date> {
  if !(1..=54).contains(&week) {
    return None;
  }

  let first = Date::from_calendar_date(year, January, 1).ok()?;
  let first_weekday = i64::from(first.weekday().number_days_from_monday());

  let offset = match i64::from(week) - 1 {
    0 => -first_weekday,
    monday_week => (7 - first_weekday) % 7 + 7 * (monday_week - 1),
  };

  first.checked_add(Duration::days(offset))
}

/// Whole days from the start of today until `start`, negative once it has passed.
pub fn days_until_start(start: Date, now: PrimitiveDateTime) -> i64 {
  (start - now.date()).whole_days()
}

pub fn day_offset_phrase(days: i64) -> String {
  match days {
    i64::MIN..=-2 => format!("Hat vor {} Tagen angefangen", days.abs()),
    -1 => "Hat vor einem Tag angefangen".to_string(),
    0 => "Fängt heute an".to_string(),
    1 => "Fängt morgen an".to_string(),
    _ => format!("Fängt in {days} Tagen an"),
  }
}

/// `dd.mm.yy`, as shown in the plan header.
pub fn format_date(date: Date) -> String {
  format!(
    "{:02}.{:02}.{:02}",
    date.day(),
    u8::from(date.month()),
    date.year().rem_euclid(100)
  )
}

#[cfg(test)]
mod test {
  use time::macros::{date, datetime};

  use super::*;

  #[test]
  fn window_covers_five_consecutive_weeks() {
    assert_eq!(week_window(datetime!(2026-10-19 08:30)), [43, 44, 45, 46, 47]);
    assert_eq!(week_window(datetime!(2026-10-25 23:59)), [43, 44, 45, 46, 47]);
  }

  #[test]
  fn window_wraps_at_year_end() {
    assert_eq!(week_window(datetime!(2025-12-15 12:00)), [51, 52, 1, 2, 3]);
    // 2026 has 53 ISO weeks
    assert_eq!(week_window(datetime!(2026-12-14 12:00)), [51, 52, 53, 1, 2]);
  }

  #[test]
  fn window_on_new_years_day_belongs_to_previous_iso_year() {
    assert_eq!(week_window(datetime!(2027-01-01 00:00)), [53, 1, 2, 3, 4]);
  }

  #[test]
  fn start_of_week_matches_iso_when_year_starts_early_in_week() {
    // 2026 starts on a Thursday
    assert_eq!(start_of_week(1, 2026), Some(date!(2025-12-29)));
    assert_eq!(start_of_week(2, 2026), Some(date!(2026-01-05)));
    assert_eq!(start_of_week(43, 2026), Some(date!(2026-10-19)));
    assert_eq!(start_of_week(53, 2026), Some(date!(2026-12-28)));
  }

  #[test]
  fn start_of_week_lags_iso_when_year_starts_late_in_week() {
    // 2027 starts on a Friday, ISO week 1 begins on 2027-01-04
    assert_eq!(start_of_week(1, 2027), Some(date!(2026-12-28)));
    assert_eq!(start_of_week(2, 2027), Some(date!(2027-01-04)));
    assert_eq!(start_of_week(10, 2027), Some(date!(2027-03-01)));
  }

  #[test]
  fn start_of_week_when_year_starts_on_monday() {
    // 2024 starts on a Monday, weeks 1 and 2 both begin on new year's day
    assert_eq!(start_of_week(1, 2024), Some(date!(2024-01-01)));
    assert_eq!(start_of_week(2, 2024), Some(date!(2024-01-01)));
    assert_eq!(start_of_week(3, 2024), Some(date!(2024-01-08)));
  }

  #[test]
  fn start_of_week_rejects_impossible_weeks() {
    assert_eq!(start_of_week(0, 2026), None);
    assert_eq!(start_of_week(55, 2026), None);
  }

  #[test]
  fn counts_days_from_midnight() {
    let now = datetime!(2026-10-21 23:15);

    assert_eq!(days_until_start(date!(2026-10-19), now), -2);
    assert_eq!(days_until_start(date!(2026-10-21), now), 0);
    assert_eq!(days_until_start(date!(2026-10-26), now), 5);
  }

  #[test]
  fn phrases_boundaries_in_singular() {
    assert_eq!(day_offset_phrase(-1), "Hat vor einem Tag angefangen");
    assert_eq!(day_offset_phrase(0), "Fängt heute an");
    assert_eq!(day_offset_phrase(1), "Fängt morgen an");
  }

  #[test]
  fn phrases_distances_in_plural() {
    assert_eq!(day_offset_phrase(-2), "Hat vor 2 Tagen angefangen");
    assert_eq!(day_offset_phrase(-6), "Hat vor 6 Tagen angefangen");
    assert_eq!(day_offset_phrase(2), "Fängt in 2 Tagen an");
    assert_eq!(day_offset_phrase(28), "Fängt in 28 Tagen an");
  }

  #[test]
  fn formats_header_date() {
    assert_eq!(format_date(date!(2026-10-19)), "19.10.26");
    assert_eq!(format_date(date!(2027-01-04)), "04.01.27");
    assert_eq!(format_date(date!(2000-03-09)), "09.03.00");
  }
}
