/// Formats an offset in seconds as `HH:MM:SS`.
///
/// The offset is truncated to whole seconds first, and hours are not wrapped
/// at 24 so long recordings keep counting up.
pub fn format_time(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
