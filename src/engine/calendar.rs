use chrono::{Datelike, NaiveDate, Weekday};

/// Fixed month abbreviations, so trend labels sort and parse the same way in
/// every environment regardless of locale.
pub const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One calendar day within a reporting month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    pub weekday: Weekday,
    pub is_weekend: bool,
}

/// Number of days in the given month (1-based), leap-year correct.
/// Returns 0 for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Every day of the month in order, with weekday and weekend flag.
pub fn enumerate_days(year: i32, month: u32) -> Vec<CalendarDay> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| {
            let weekday = date.weekday();
            CalendarDay {
                day: date.day(),
                weekday,
                is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            }
        })
        .collect()
}

/// Display label for a trend point, e.g. "Sep 2025".
pub fn month_label(year: i32, month: u32) -> String {
    let abbrev = MONTH_ABBREV
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("???");
    format!("{abbrev} {year}")
}

/// Inverse of [`month_label`]. None when the label is not in "Abbrev YYYY"
/// form; callers decide what to do with unparseable labels.
pub fn parse_month_label(label: &str) -> Option<(i32, u32)> {
    let mut parts = label.split_whitespace();
    let abbrev = parts.next()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let month = MONTH_ABBREV.iter().position(|m| m.eq_ignore_ascii_case(abbrev))? as u32 + 1;
    Some((year, month))
}
