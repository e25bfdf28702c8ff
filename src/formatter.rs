/// Renders a time in seconds as `M:SS.mmm`.
///
/// Minutes have no padding, seconds are padded to two digits and the
/// fraction is cut (not rounded) to milliseconds, so `59.9999` renders as
/// `0:59.999` and never as `1:00.000`.
pub fn format_time(seconds: f64) -> String {
    debug_assert!(seconds >= 0.0, "negative time {seconds}");

    let remainder = seconds % 60.0;
    debug_assert!(remainder < 60.0, "remainder {remainder} out of range");
    // Exact multiple of 60, so rounding only removes division noise.
    let minutes = ((seconds - remainder) / 60.0).round() as u64;

    // rem * 1000 can round up to 60000 when rem sits one ulp below 60.
    let millis = ((remainder * 1000.0).trunc() as u64).min(59_999);

    format!("{}:{:02}.{:03}", minutes, millis / 1000, millis % 1000)
}
