//! Rendering of domain items into [`RelayMessage`]s.
//!
//! Optional attributes never leave a field blank: a fixed placeholder is shown
//! instead (`"Unknown"`, `"No Tags"`, `"No description available."`).

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Kolkata;

use super::relay_message::{Accent, RelayMessage, Render};
use crate::core::codeforces::{Contest, Problem};
use crate::core::kaggle::{Competition, Dataset};

pub const CODEFORCES_THUMBNAIL: &str =
    "https://codeforces.org/s/118231/images/codeforces-logo-with-telegram.png";
pub const KAGGLE_THUMBNAIL: &str =
    "https://github.com/user-attachments/assets/d6cdddfe-8d79-4af6-92f5-d9593c5f5768";

pub const UNKNOWN: &str = "Unknown";
pub const NO_TAGS: &str = "No Tags";
pub const NO_DESCRIPTION: &str = "No description available.";

const CONTEST_TIME_FORMAT: &str = "%A, %d %B %Y %I:%M:%S %p";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Render for Problem {
    fn render(&self) -> RelayMessage {
        let tags = if self.tags.is_empty() {
            NO_TAGS.to_string()
        } else {
            self.tags.join(", ")
        };
        let contest_id = self
            .contest_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let mut message = RelayMessage::new(&self.name, Accent::Gold);
        if let Some(url) = self.url() {
            message = message.description(format!("[Solve Problem]({})", url));
        }

        message
            .url(self.url())
            .thumbnail(CODEFORCES_THUMBNAIL)
            .footer(format!("Contest ID: {} | Index: {}", contest_id, self.index))
            .field("Type", self.problem_type.as_deref().unwrap_or(UNKNOWN), true)
            .field("Rating", or_unknown(self.rating), true)
            .field("Tags", tags, false)
    }
}

impl Render for Contest {
    fn render(&self) -> RelayMessage {
        let left = match self.hours_remaining() {
            Some(hours) => format!("{} hours", hours),
            None => UNKNOWN.to_string(),
        };

        RelayMessage::new(&self.name, Accent::Gold)
            .url(Some(self.url()))
            .thumbnail(CODEFORCES_THUMBNAIL)
            .field("Type", &self.contest_type, true)
            .field("Duration", format!("{} hours", self.duration_hours()), true)
            .field(
                "Contest Date & Time",
                format_contest_start(self.start_time_seconds),
                false,
            )
            .footer(format!(
                "Contest ID: {} | Phase: {} | Left Time: {}",
                self.id,
                self.phase.as_api_str(),
                left
            ))
    }
}

impl Render for Competition {
    fn render(&self) -> RelayMessage {
        RelayMessage::new(&self.title, Accent::Blue)
            .description(description_or_placeholder(self.description.as_deref()))
            .url(Some(self.url.clone()))
            .thumbnail(KAGGLE_THUMBNAIL)
            .field("Deadline", format_timestamp(self.deadline), false)
            .field("URL", format!("[Visit Competition]({})", self.url), true)
            .field(
                "Category",
                self.category.as_deref().unwrap_or(UNKNOWN),
                true,
            )
    }
}

impl Render for Dataset {
    fn render(&self) -> RelayMessage {
        RelayMessage::new(&self.title, Accent::Green)
            .description(description_or_placeholder(self.description.as_deref()))
            .url(Some(self.url.clone()))
            .thumbnail(KAGGLE_THUMBNAIL)
            .field("URL", format!("[Visit Dataset]({})", self.url), false)
            .field("Size", format_bytes(self.total_bytes), false)
            .field("Last Updated", format_timestamp(self.last_updated), false)
            .field(
                "Number of Downloads",
                self.download_count.to_string(),
                false,
            )
    }
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn description_or_placeholder(description: Option<&str>) -> String {
    match description.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NO_DESCRIPTION.to_string(),
    }
}

/// Contest start in Indian Standard Time, e.g. `Wednesday, 15 November 2023 03:43:20 AM`.
pub fn format_contest_start(start_time_seconds: Option<i64>) -> String {
    start_time_seconds
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.with_timezone(&Kolkata).format(CONTEST_TIME_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Human-readable byte count with no decimals, e.g. `5MB`.
pub fn format_bytes(bytes: u64) -> String {
    const SUFFIXES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut suffix = 0;
    while size >= 1024.0 && suffix < SUFFIXES.len() - 1 {
        size /= 1024.0;
        suffix += 1;
    }
    format!("{:.0}{}", size, SUFFIXES[suffix])
}
