//! Display helpers for view counts, relative times, durations and long text.

use chrono::{DateTime, Utc};

/// Abbreviate a view count: 999 -> "999", 1500 -> "1.5K", 2_000_000 -> "2.0M".
pub fn format_views(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Relative time such as "3 days ago". Months are 30 days, years are 12 months.
pub fn time_ago(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return "recently".to_string();
    };

    let seconds = (now - timestamp).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    let days = hours / 24;
    if days < 30 {
        return plural(days, "day");
    }
    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }
    plural(months / 12, "year")
}

/// Format seconds for display: "1:02:03" with hours, "4:05" without.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }
    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Truncate to `max_chars` characters, appending "..." when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

/// Pick the most useful message out of an error response.
///
/// Prefers the JSON body's `message`, then the status reason, then a generic fallback.
pub fn error_message(body: &str, status_reason: Option<&str>) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.trim().is_empty());

    from_body
        .or_else(|| {
            status_reason
                .filter(|r| !r.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Something went wrong. Please try again.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn format_views_thresholds() {
        assert_eq!(format_views(0), "0");
        assert_eq!(format_views(999), "999");
        assert_eq!(format_views(1_000), "1.0K");
        assert_eq!(format_views(1_500), "1.5K");
        assert_eq!(format_views(999_999), "1000.0K");
        assert_eq!(format_views(1_000_000), "1.0M");
        assert_eq!(format_views(2_340_000), "2.3M");
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(time_ago(None, now), "recently");
        assert_eq!(time_ago(Some(now - Duration::seconds(5)), now), "just now");
        assert_eq!(time_ago(Some(now - Duration::minutes(1)), now), "1 minute ago");
        assert_eq!(time_ago(Some(now - Duration::minutes(59)), now), "59 minutes ago");
        assert_eq!(time_ago(Some(now - Duration::hours(2)), now), "2 hours ago");
        assert_eq!(time_ago(Some(now - Duration::days(1)), now), "1 day ago");
        assert_eq!(time_ago(Some(now - Duration::days(29)), now), "29 days ago");
        assert_eq!(time_ago(Some(now - Duration::days(30)), now), "1 month ago");
        assert_eq!(time_ago(Some(now - Duration::days(365)), now), "1 year ago");
        assert_eq!(time_ago(Some(now - Duration::days(800)), now), "2 years ago");
    }

    #[test]
    fn time_ago_future_timestamp_is_just_now() {
        let now = Utc::now();
        assert_eq!(time_ago(Some(now + Duration::hours(1)), now), "just now");
    }

    #[test]
    fn format_duration_variants() {
        assert_eq!(format_duration(0.0), "00:00");
        assert_eq!(format_duration(f64::NAN), "00:00");
        assert_eq!(format_duration(5.9), "0:05");
        assert_eq!(format_duration(135.0), "2:15");
        assert_eq!(format_duration(3723.0), "1:02:03");
    }

    #[test]
    fn truncate_text_counts_chars() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("hello world", 5), "hello...");
        assert_eq!(truncate_text("Tiêu đề video", 4), "Tiêu...");
    }

    #[test]
    fn error_message_prefers_body_message() {
        assert_eq!(
            error_message(r#"{"message":"Token expired"}"#, Some("Unauthorized")),
            "Token expired"
        );
        assert_eq!(error_message("<html>", Some("Unauthorized")), "Unauthorized");
        assert_eq!(
            error_message(r#"{"message":""}"#, None),
            "Something went wrong. Please try again."
        );
    }
}
