use crate::diagnostics::{Diagnostic, Diagnostics, PhotoSource};
use crate::model::HotelRecord;
use crate::parser::{ResponseShape, detect_shape};
use crate::photos::resolve_photos;
use crate::placeholder::{destination_label, synthesize_records};
use crate::utils::{as_number, as_text, as_text_list};
use serde::Serialize;
use serde_json::Value;

/// Upstream key names per field, tried in order.
mod keys {
    pub const ID: &[&str] = &["hotel_id", "id"];
    pub const NAME: &[&str] = &["hotel_name", "name"];
    pub const ADDRESS: &[&str] = &["address", "location"];
    pub const RATING: &[&str] = &["review_score", "rating"];
    pub const STARS: &[&str] = &["class", "stars"];
    pub const PRICE: &[&str] = &["min_total_price", "price"];
    pub const ORIGINAL_PRICE: &[&str] = &["original_price"];
    pub const DISTANCE: &[&str] = &["distance_to_cc", "distance_to_center"];
    pub const FACILITIES: &[&str] = &["facilities", "amenities"];
    pub const DESCRIPTION: &[&str] = &["hotel_description", "description"];
}

const DEFAULT_RATING: f64 = 4.0;
const DEFAULT_STARS: u8 = 4;

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    pub shape: ResponseShape,
    pub records: Vec<HotelRecord>,
    pub diagnostics: Diagnostics,
}

impl NormalizeReport {
    /// True when every record was fabricated rather than taken from upstream.
    pub fn is_synthesized(&self) -> bool {
        self.diagnostics
            .entries()
            .iter()
            .any(|e| matches!(e, Diagnostic::Synthesized { .. }))
    }
}

/// Turns an upstream hotel payload (or its absence) into displayable records.
pub fn normalize(raw: Option<&Value>, destination_hint: &str, requested_count: usize) -> Vec<HotelRecord> {
    normalize_with_report(raw, destination_hint, requested_count).records
}

pub fn normalize_with_report(
    raw: Option<&Value>,
    destination_hint: &str,
    requested_count: usize,
) -> NormalizeReport {
    let destination = destination_label(destination_hint);
    let mut diagnostics = Diagnostics::new();

    let (shape, items) = detect_shape(raw);
    diagnostics.record(Diagnostic::ShapeDetected {
        shape,
        items: items.len(),
    });

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            diagnostics.record(Diagnostic::SkippedItem { index });
            continue;
        }
        records.push(normalize_item(item, index, destination, &mut diagnostics));
    }

    if records.is_empty() && requested_count > 0 {
        diagnostics.record(Diagnostic::Synthesized {
            count: requested_count,
        });
        records = synthesize_records(destination, requested_count);
        for index in 0..records.len() {
            diagnostics.record(Diagnostic::PhotoSource {
                index,
                source: PhotoSource::Placeholder,
            });
        }
    }

    NormalizeReport {
        shape,
        records,
        diagnostics,
    }
}

/// The record with `id`, or the first one when no record matches.
pub fn select_hotel<'a>(records: &'a [HotelRecord], id: Option<&str>) -> Option<&'a HotelRecord> {
    id.and_then(|id| records.iter().find(|r| r.id == id))
        .or_else(|| records.first())
}

fn first<T>(item: &Value, candidates: &[&str], extract: impl Fn(&Value) -> Option<T>) -> Option<T> {
    candidates.iter().find_map(|k| item.get(*k).and_then(&extract))
}

fn as_star_class(value: &Value) -> Option<u8> {
    let n = as_number(value)?.round();
    (1.0..=5.0).contains(&n).then_some(n as u8)
}

fn or_default<T>(
    value: Option<T>,
    index: usize,
    field: &'static str,
    diagnostics: &mut Diagnostics,
    default: impl FnOnce() -> T,
) -> T {
    value.unwrap_or_else(|| {
        diagnostics.record(Diagnostic::FieldDefaulted { index, field });
        default()
    })
}

fn normalize_item(item: &Value, index: usize, destination: &str, diagnostics: &mut Diagnostics) -> HotelRecord {
    let id = or_default(first(item, keys::ID, as_text), index, "id", diagnostics, || {
        format!("hotel-{index}")
    });
    let name = or_default(first(item, keys::NAME, as_text), index, "name", diagnostics, || {
        format!("Hotel {} in {}", index + 1, destination)
    });
    let address = or_default(first(item, keys::ADDRESS, as_text), index, "address", diagnostics, || {
        destination.to_string()
    });
    let rating_score = or_default(first(item, keys::RATING, as_number), index, "rating_score", diagnostics, || {
        DEFAULT_RATING
    });
    let star_class = or_default(first(item, keys::STARS, as_star_class), index, "star_class", diagnostics, || {
        DEFAULT_STARS
    });
    let facilities = or_default(first(item, keys::FACILITIES, as_text_list), index, "facilities", diagnostics, Vec::new);
    let description = or_default(first(item, keys::DESCRIPTION, as_text), index, "description", diagnostics, || {
        format!("A comfortable hotel in {destination} with modern amenities.")
    });

    // No default price: absence stays visible to the caller.
    let price_current = first(item, keys::PRICE, as_number);
    if price_current.is_none() {
        diagnostics.record(Diagnostic::FieldDefaulted { index, field: "price_current" });
    }

    let (photos, source) = resolve_photos(item, &name);
    diagnostics.record(Diagnostic::PhotoSource { index, source });

    HotelRecord {
        id,
        name,
        address,
        rating_score,
        star_class,
        price_current,
        price_original: first(item, keys::ORIGINAL_PRICE, as_number),
        distance_to_center: first(item, keys::DISTANCE, as_text),
        facilities,
        photos,
        description,
    }
}
