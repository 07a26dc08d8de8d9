use chrono::{DateTime, Duration as ChronoDuration, Utc};

use crate::model::HistoricalRound;

/// Shown wherever a metric has no value yet.
pub const MISSING: &str = "—";

/// One decimal with an explicit `+` for zero and above.
#[must_use]
pub fn format_handicap(handicap: Option<f64>) -> String {
    match handicap {
        Some(h) if h >= 0.0 => format!("+{h:.1}"),
        Some(h) => format!("{h:.1}"),
        None => MISSING.to_string(),
    }
}

#[must_use]
pub fn format_average(average: Option<f64>) -> String {
    average.map_or_else(|| MISSING.to_string(), |a| format!("{a:.1}"))
}

#[must_use]
pub fn format_best(best: Option<i32>) -> String {
    best.map_or_else(|| MISSING.to_string(), |b| b.to_string())
}

/// Ring fill as a whole percentage, truncated.
#[must_use]
pub fn ring_percent(progress: f64) -> u32 {
    (progress.clamp(0.0, 1.0) * 100.0) as u32
}

/// Coarse age of a round for listings: "3 days", "1 week", "2.50 months".
#[must_use]
pub fn format_time_ago(td: ChronoDuration) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const WEEK: i64 = 7 * DAY;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    let secs = td.num_seconds().max(0);
    let unit = |n: i64, name: &str| {
        if n == 1 {
            format!("1 {name}")
        } else {
            format!("{n} {name}s")
        }
    };

    if secs >= YEAR {
        format!("{:.2} years", secs as f64 / YEAR as f64)
    } else if secs >= MONTH {
        format!("{:.2} months", secs as f64 / MONTH as f64)
    } else if secs >= WEEK {
        unit(secs / WEEK, "week")
    } else if secs >= DAY {
        unit(secs / DAY, "day")
    } else if secs >= HOUR {
        unit(secs / HOUR, "hour")
    } else if secs >= MINUTE {
        unit(secs / MINUTE, "minute")
    } else {
        unit(secs, "second")
    }
}

/// A single history line: id, date, course, total and the nine-hole tag.
#[must_use]
pub fn format_round_line(round: &HistoricalRound, now: DateTime<Utc>) -> String {
    let id = round
        .id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let tag = if round.is_nine_hole { " (9)" } else { "" };
    format!(
        "#{id:<4} {}  {:<24} {:>4}{tag}  {} ago",
        round.date.format("%Y-%m-%d"),
        round.display_name(),
        round.total_score,
        format_time_ago(now - round.date)
    )
}
