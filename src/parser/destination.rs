// Destination lookup responses
use crate::utils::as_text;
use serde_json::Value;

/// `dest_id` of the first entry in the `data` array.
pub fn extract_destination_id(raw: &Value) -> Option<String> {
    raw.get("data")?
        .as_array()?
        .first()?
        .get("dest_id")
        .and_then(as_text)
}
