//! Human-readable entry ages ("5 minutes", "about 2 hours", ...).

const MINUTE: i64 = 60;
const MINUTES_IN_DAY: f64 = 1440.0;
const MINUTES_IN_MONTH: f64 = 43200.0;
const MINUTES_IN_TWO_MONTHS: f64 = 86400.0;

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Describe the distance between `created_at` and `now` (epoch millis).
///
/// Timestamps in the future read as "less than a minute".
///
/// ```
/// use qrforge::history::format_age;
///
/// let now = 1_700_000_000_000;
/// assert_eq!(format_age(now - 5 * 60_000, now), "5 minutes");
/// assert_eq!(format_age(now - 3 * 3_600_000, now), "about 3 hours");
/// ```
pub fn format_age(created_at: i64, now: i64) -> String {
    let seconds = (now.saturating_sub(created_at) / 1000).max(0);
    let minutes = (seconds as f64 / MINUTE as f64).round();

    if seconds < 30 {
        return "less than a minute".to_string();
    }
    if minutes < 2.0 {
        return "1 minute".to_string();
    }
    if minutes < 45.0 {
        return format!("{} minutes", minutes as i64);
    }
    if minutes < 90.0 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        return format!("about {}", plural((minutes / 60.0).round() as i64, "hour"));
    }
    if minutes < 2520.0 {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        return plural((minutes / MINUTES_IN_DAY).round() as i64, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return format!("about {}", plural((minutes / MINUTES_IN_MONTH).round() as i64, "month"));
    }

    let months = (minutes / MINUTES_IN_MONTH).floor() as i64;
    if months < 12 {
        return plural(months, "month");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}
