use chrono::{DateTime, Utc};
use minitube_core::format::{format_views, time_ago, truncate_text};
use minitube_core::models::{Channel, Video};
use std::fmt::Write;

pub fn render_video_table(videos: &[Video], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    if videos.is_empty() {
        out.push_str("No videos found.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<12} {:<40} {:<16} {:>8} {:>8} {:<10} {:<16}",
        "ID", "Title", "Uploader", "Views", "Length", "Status", "Uploaded"
    );
    let _ = writeln!(out, "{}", "-".repeat(116));

    for video in videos {
        let _ = writeln!(
            out,
            "{:<12} {:<40} {:<16} {:>8} {:>8} {:<10} {:<16}",
            truncate_text(&video.id.to_string(), 9),
            truncate_text(&video.title, 37),
            truncate_text(video.uploader.as_deref().unwrap_or("-"), 13),
            format_views(video.views),
            video.duration.as_deref().unwrap_or("00:00"),
            video.status,
            time_ago(video.created_at, now)
        );
    }
    out
}

pub fn render_channel(username: &str, channel: &Channel, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", username);
    let _ = writeln!(
        out,
        "{} subscribers | {} videos | {} views\n",
        format_views(channel.subscriber_count),
        channel.video_count,
        format_views(channel.total_views)
    );
    out.push_str(&render_video_table(&channel.videos, now));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn video(json: serde_json::Value) -> Video {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_video_row() {
        let now = Utc::now();
        let mut v = video(serde_json::json!({
            "id": 7,
            "title": "A very long title that will definitely need truncating here",
            "uploader": "alice",
            "views": 1500,
            "duration": "02:15",
            "status": "READY"
        }));
        v.created_at = Some(now - Duration::hours(3));

        let table = render_video_table(&[v], now);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("7 "));
        assert!(row.contains("..."));
        assert!(row.contains("1.5K"));
        assert!(row.contains("02:15"));
        assert!(row.contains("READY"));
        assert!(row.contains("3 hours ago"));
    }

    #[test]
    fn test_columns_line_up_with_header() {
        let now = Utc::now();
        let videos = [
            video(serde_json::json!({ "id": 1, "title": "t", "status": "READY" })),
            video(serde_json::json!({ "id": "abc", "title": "u", "status": "PROCESSING" })),
        ];

        let table = render_video_table(&videos, now);
        let mut lines = table.lines();
        let header = lines.next().unwrap();
        let uploaded = header.find("Uploaded").unwrap();

        for row in lines.skip(1) {
            assert_eq!(row.find("recently"), Some(uploaded), "row: {:?}", row);
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_video_table(&[], Utc::now()), "No videos found.\n");
    }

    #[test]
    fn test_channel_header() {
        let channel: Channel = serde_json::from_value(serde_json::json!({
            "subscriberCount": 2500,
            "videoCount": 0,
            "totalViews": 12
        }))
        .unwrap();
        let out = render_channel("bob", &channel, Utc::now());
        assert!(out.starts_with("=== bob ==="));
        assert!(out.contains("2.5K subscribers | 0 videos | 12 views"));
    }
}
