//! Text and time formatting shared by view-models and fragments

use chrono::{DateTime, Duration, Utc};

/// Characters kept in a list excerpt before `...` is appended
pub const EXCERPT_CHARS: usize = 100;

/// Badge counts above this are shown as `99+`
pub const BADGE_CAP: u64 = 99;

/// Truncate to `max_chars` characters, appending `...` when anything was cut
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// Bootstrap badge class for a stored badge color
pub fn badge_class(color: Option<&str>) -> &'static str {
    match color.map(str::trim) {
        Some("primary") => "bg-primary",
        Some("warning") => "bg-warning text-dark",
        Some("success") => "bg-success",
        Some("info") => "bg-info",
        Some("secondary") => "bg-secondary",
        Some("danger") => "bg-danger",
        _ => "bg-primary",
    }
}

/// Relative label: just now, minutes, hours, days, then the calendar date after a week
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{} min ago", s / 60),
        s if s < 86_400 => format!("{} h ago", s / 3_600),
        s if s < 604_800 => format!("{} d ago", s / 86_400),
        _ => calendar_date(then),
    }
}

/// Created within the last 24 hours
pub fn is_recent(then: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    then > now - Duration::hours(24)
}

pub fn cap_badge(count: u64) -> String {
    if count > BADGE_CAP {
        format!("{}+", BADGE_CAP)
    } else {
        count.to_string()
    }
}

pub fn calendar_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub fn date_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 100), "short");

        let exact = "a".repeat(100);
        assert_eq!(excerpt(&exact, 100), exact);

        let long = "b".repeat(101);
        assert_eq!(excerpt(&long, 100), format!("{}...", "b".repeat(100)));

        // counts characters, not bytes
        let korean = "가".repeat(120);
        let cut = excerpt(&korean, 100);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_badge_class() {
        assert_eq!(badge_class(Some("warning")), "bg-warning text-dark");
        assert_eq!(badge_class(Some("danger")), "bg-danger");
        assert_eq!(badge_class(Some("purple")), "bg-primary");
        assert_eq!(badge_class(None), "bg-primary");
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();

        assert_eq!(time_ago(now - Duration::seconds(59), now), "just now");
        assert_eq!(time_ago(now - Duration::seconds(60), now), "1 min ago");
        assert_eq!(time_ago(now - Duration::minutes(59), now), "59 min ago");
        assert_eq!(time_ago(now - Duration::hours(5), now), "5 h ago");
        assert_eq!(time_ago(now - Duration::days(6), now), "6 d ago");
        assert_eq!(time_ago(now - Duration::days(7), now), "2024-05-03");
        assert_eq!(time_ago(now + Duration::minutes(5), now), "just now");
    }

    #[test]
    fn test_recent_and_badges() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert!(is_recent(now - Duration::hours(23), now));
        assert!(!is_recent(now - Duration::hours(24), now));

        assert_eq!(cap_badge(0), "0");
        assert_eq!(cap_badge(99), "99");
        assert_eq!(cap_badge(100), "99+");
    }
}
