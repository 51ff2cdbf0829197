//! Text normalisation for extracted table cells.
//!
//! Timetable PDFs are typed by hand in word processors, so the same slot
//! shows up as `7-9`, `7:00 - 9:00`, `07:00–09:00` or `7:00—9:00`, and the
//! same day as `MON`, `thurs` or `Thursday`. These three functions map
//! those variants onto the canonical strings the grid is keyed by. None of
//! them fail: input they do not recognise is passed through, and the grid
//! builder later drops whatever is still not canonical.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Trim and collapse every internal whitespace run to a single space.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a day name or abbreviation onto its canonical form.
///
/// Matching is case-insensitive. Unknown input is title-cased and returned
/// as-is (so `"sunday"` becomes `"Sunday"`, which is not a grid day).
pub fn normalize_day(day: &str) -> String {
    let lowered = day.trim().to_lowercase();
    if lowered.is_empty() {
        return String::new();
    }

    let canonical = match lowered.as_str() {
        "mon" | "monday" => "Monday",
        "tue" | "tues" | "tuesday" => "Tuesday",
        "wed" | "wednesday" => "Wednesday",
        "thu" | "thur" | "thurs" | "thursday" => "Thursday",
        "fri" | "friday" => "Friday",
        "sat" | "saturday" => "Saturday",
        _ => return title_case(&lowered),
    };
    canonical.to_string()
}

// Hours with optional minutes on either side, e.g. `7:30-9:45`, `7 – 9:00`.
static RE_RANGE_WITH_MINUTES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}):?(\d{2})?\s*[-–—]\s*(\d{1,2}):?(\d{2})?").unwrap()
});

// Bare hours, e.g. `7 - 9`.
static RE_HOUR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})\s*[-–—]\s*(\d{1,2})").unwrap());

/// Normalise a time range to `HH:MM-HH:MM`.
///
/// The first range found anywhere in the string wins, so trailing noise
/// such as `"7-9 am"` is tolerated. Missing minutes default to `00`. When no
/// range is found the trimmed input is returned unchanged.
pub fn normalize_time(time: &str) -> String {
    let time = time.trim();
    if time.is_empty() {
        return String::new();
    }

    if let Some(caps) = RE_RANGE_WITH_MINUTES.captures(time) {
        return format!(
            "{}:{}-{}:{}",
            pad2(&caps[1]),
            minutes(&caps, 2),
            pad2(&caps[3]),
            minutes(&caps, 4),
        );
    }

    if let Some(caps) = RE_HOUR_RANGE.captures(time) {
        return format!("{}:00-{}:00", pad2(&caps[1]), pad2(&caps[2]));
    }

    time.to_string()
}

fn pad2(digits: &str) -> String {
    format!("{digits:0>2}")
}

fn minutes(caps: &Captures<'_>, group: usize) -> String {
    caps.get(group)
        .map(|m| pad2(m.as_str()))
        .unwrap_or_else(|| "00".to_string())
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
