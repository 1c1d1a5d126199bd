/// Human-readable round duration for the summary, e.g. `1 min 05 s`.
#[must_use]
pub fn format_elapsed(elapsed_ms: i64) -> String {
    let total_secs = elapsed_ms.max(0) / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    if minutes == 0 {
        format!("{seconds} s")
    } else {
        format!("{minutes} min {seconds:02} s")
    }
}
