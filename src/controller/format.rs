/// Format a position in seconds as `m:ss`.
///
/// Minutes are not padded and may exceed 59; negative or non-finite input
/// renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
