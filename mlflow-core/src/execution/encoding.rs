//! Request body encoding.

use bytes::Bytes;
use serde::Serialize;

use crate::error::MlflowError;

/// Serialize an optional payload to a JSON buffer.
///
/// `None` means the request carries no body (and no content type).
pub fn encode_body<T>(payload: Option<&T>) -> Result<Option<Bytes>, MlflowError>
where
    T: Serialize + ?Sized,
{
    match payload {
        None => Ok(None),
        Some(value) => {
            let buf = serde_json::to_vec(value).map_err(MlflowError::Encoding)?;
            Ok(Some(Bytes::from(buf)))
        }
    }
}
