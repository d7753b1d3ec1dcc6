use crate::error::DecodeError;
use slot_types::AppointmentRecord;

/// Parse a slots response body.
///
/// The body must be a JSON array of objects (or `null`, read as an empty
/// listing); unknown fields are ignored and missing ones default.
pub fn decode(body: &[u8]) -> Result<Vec<AppointmentRecord>, DecodeError> {
    serde_json::from_slice::<Option<Vec<AppointmentRecord>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| DecodeError::new(e, body))
}
