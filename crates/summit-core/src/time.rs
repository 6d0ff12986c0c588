/// Format seconds as a zero-padded `MM:SS` clock. Negative or non-finite input reads `00:00`.
pub fn format_clock(secs: f32) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
