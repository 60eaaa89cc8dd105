// Envelope detection for hotel search responses
use serde::Serialize;
use serde_json::Value;

/// Which envelope the upstream payload arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    Data,
    Result,
    Results,
    BareArray,
    SingleHotel,
    Unrecognized,
    Absent,
}

/// Envelope keys tried in priority order.
const ENVELOPE_KEYS: [(&str, ResponseShape); 3] = [
    ("data", ResponseShape::Data),
    ("result", ResponseShape::Result),
    ("results", ResponseShape::Results),
];

/// Any of these marks a bare object as a hotel.
const HOTEL_MARKERS: [&str; 2] = ["hotel_name", "hotel_id"];

/// Finds the hotel items inside `raw`. The first matching shape wins.
pub fn detect_shape(raw: Option<&Value>) -> (ResponseShape, Vec<&Value>) {
    let raw = match raw {
        None | Some(Value::Null) => return (ResponseShape::Absent, Vec::new()),
        Some(v) => v,
    };

    if let Value::Object(map) = raw {
        for (key, shape) in ENVELOPE_KEYS {
            if let Some(Value::Array(items)) = map.get(key) {
                return (shape, items.iter().collect());
            }
        }
    }

    match raw {
        Value::Array(items) => (ResponseShape::BareArray, items.iter().collect()),
        Value::Object(map) if HOTEL_MARKERS.iter().any(|k| map.get(*k).is_some_and(|v| !v.is_null())) => {
            (ResponseShape::SingleHotel, vec![raw])
        }
        _ => (ResponseShape::Unrecognized, Vec::new()),
    }
}
