//! Response classification.

/// Which decoding path a response takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    ApiError,
}

/// Status codes in `[400, 600)` carry an error body; everything else is decoded as a result.
pub const fn classify_status(status: u16) -> ResponseClass {
    match status {
        400..=599 => ResponseClass::ApiError,
        _ => ResponseClass::Success,
    }
}
