//! Formatting helpers for presenting assessments.

/// Comma-joined list with an explicit `"None"` for the empty sequence. An
/// absent list never reaches this point; it fails decoding upstream.
pub fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

pub fn format_score(value: f64) -> String {
    format!("{value:.0}")
}

/// Compact `date · hh:mm` label for an ISO-8601 timestamp, tolerant of the
/// fractional-seconds and offset variants the server has emitted.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    let Some(iso) = timestamp else {
        return "—".to_string();
    };

    let (date, time_segment) = iso.split_once('T').unwrap_or((iso, ""));
    let primary_time = time_segment
        .split(['.', 'Z', '+'])
        .next()
        .unwrap_or(time_segment);
    let time_display: String = primary_time.chars().take(5).collect();

    if time_display.is_empty() {
        date.to_string()
    } else {
        format!("{date} · {time_display}")
    }
}
