//! Display formatting for prices, dates and names.

use chrono::{DateTime, Utc};

pub const DEFAULT_CURRENCY: &str = "LKR";
pub const DEFAULT_TRUNCATE: usize = 60;

/// Groups digits in threes: `4850000` → `4,850,000`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `currency(12000.0, "LKR")` → `LKR 12,000.00`.
pub fn currency(amount: f64, code: &str) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{code} {sign}{}.{:02}", thousands(cents / 100), cents % 100)
}

/// `19 Oct 2026`.
pub fn date(value: DateTime<Utc>) -> String {
    value.format("%-d %b %Y").to_string()
}

/// Coarse "how long ago" label; falls back to [`date`] after a week.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        "Just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else if secs < 604_800 {
        format!("{}d ago", secs / 86_400)
    } else {
        date(then)
    }
}

/// Up to two uppercase initials: `Nimal Perera` → `NP`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Cuts to `length` characters and appends `…` when anything was removed.
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let mut cut: String = text.chars().take(length).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(12000), "12,000");
        assert_eq!(thousands(4_850_000), "4,850,000");
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency(12000.0, DEFAULT_CURRENCY), "LKR 12,000.00");
        assert_eq!(currency(8500.5, "LKR"), "LKR 8,500.50");
        assert_eq!(currency(-42.129, "USD"), "USD -42.13");
    }

    #[test]
    fn test_date() {
        let d = Utc.with_ymd_and_hms(2026, 10, 9, 12, 0, 0).unwrap();
        assert_eq!(date(d), "9 Oct 2026");
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        assert_eq!(relative_time(now - Duration::seconds(30), now), "Just now");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2d ago");
        assert_eq!(relative_time(now - Duration::days(10), now), "9 Oct 2026");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Nimal Perera"), "NP");
        assert_eq!(initials("harvesting pro lk"), "HP");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 60), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}
