use std::time;

/// Get the current system time in whole seconds since the Unix epoch.
///
/// # Panics
///
/// Panics if the system time is before epoch.
pub fn now_from_epoch() -> u64 {
    time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .expect("system time is before epoch")
        .as_secs()
}

/// Number of whole days since the Unix epoch.
///
/// The `player` endpoint wants a signature timestamp that the web client
/// derives from the age of its player build; the current epoch day is
/// close enough when the caller has no real value.
#[must_use]
pub fn days_from_epoch() -> u64 {
    now_from_epoch() / 86_400
}
