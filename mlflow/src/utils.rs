use std::borrow::Cow;

use mlflow_core::MlflowError;

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Percent-encode an id or key used as a single path segment.
///
/// Empty, `.` and `..` are rejected: URL parsers treat dot segments (escaped or
/// not) as navigation, which would address a different resource.
pub(crate) fn path_segment(raw: &str) -> Result<Cow<'_, str>, MlflowError> {
    if matches!(raw, "" | "." | "..") {
        return Err(MlflowError::InvalidRequest(format!(
            "'{raw}' is not a valid path segment"
        )));
    }
    Ok(urlencoding::encode(raw))
}
