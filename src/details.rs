// Review scores and room availability for the hotel detail view
use crate::model::{ReviewCategory, ReviewDetails, RoomAvailability, RoomOffer};
use crate::utils::{as_number, as_text, as_text_list};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const DEFAULT_TOTAL_SCORE: f64 = 10.0;

/// The `data` payload of a detail endpoint. Arrays yield their first object.
fn payload(raw: &Value) -> Option<&Map<String, Value>> {
    match raw.get("data")? {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.iter().find_map(Value::as_object),
        _ => None,
    }
}

fn first<T>(map: &Map<String, Value>, keys: &[&str], extract: impl Fn(&Value) -> Option<T>) -> Option<T> {
    keys.iter().find_map(|k| map.get(*k).and_then(&extract))
}

fn as_count(value: &Value) -> Option<u64> {
    let n = as_number(value)?;
    (n >= 0.0).then_some(n.round() as u64)
}

/// Scores keyed by category, from an object map or a list of
/// `{ question, average_score }` entries.
fn score_breakdown(value: &Value) -> BTreeMap<String, f64> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| Some((k.clone(), as_number(v)?)))
            .collect(),
        Value::Array(entries) => entries
            .iter()
            .filter_map(|e| {
                let name = ["question", "name", "localized_question"]
                    .iter()
                    .find_map(|k| e.get(*k).and_then(as_text))?;
                let score = ["average_score", "score"]
                    .iter()
                    .find_map(|k| e.get(*k).and_then(as_number))?;
                Some((name, score))
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}

fn review_categories(value: &Value) -> Vec<ReviewCategory> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| {
                    Some(ReviewCategory {
                        name: e.get("name").and_then(as_text)?,
                        count: e.get("count").and_then(as_count).unwrap_or(0),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Normalizes a review-score response. `None` when it carries neither an
/// overall score nor a breakdown.
pub fn normalize_reviews(raw: &Value) -> Option<ReviewDetails> {
    let data = payload(raw)?;
    let breakdown = data.get("score_breakdown").map(score_breakdown).unwrap_or_default();
    let score = first(data, &["score", "average_score", "review_score"], as_number).or_else(|| {
        (!breakdown.is_empty()).then(|| breakdown.values().sum::<f64>() / breakdown.len() as f64)
    })?;

    Some(ReviewDetails {
        score,
        total_score: first(data, &["total_score"], as_number).unwrap_or(DEFAULT_TOTAL_SCORE),
        score_breakdown: breakdown,
        review_count: first(data, &["review_count", "count", "number_of_reviews"], as_count).unwrap_or(0),
        review_categories: data.get("review_categories").map(review_categories).unwrap_or_default(),
    })
}

fn as_u32(value: &Value) -> Option<u32> {
    as_count(value).and_then(|n| u32::try_from(n).ok())
}

/// A room price: a number, a numeric string, or an object with a `value`/`price`.
fn as_price(value: &Value) -> Option<f64> {
    as_number(value).or_else(|| {
        ["value", "price"]
            .iter()
            .find_map(|k| value.get(*k).and_then(as_number))
    })
}

fn room_offer(entry: &Value) -> Option<RoomOffer> {
    let map = entry.as_object()?;
    Some(RoomOffer {
        name: first(map, &["name", "room_name", "name_without_policy"], as_text)?,
        price: first(map, &["price", "min_price"], as_price),
        description: first(map, &["description", "room_description"], as_text),
        amenities: first(map, &["amenities", "facilities"], as_text_list).unwrap_or_default(),
        max_occupancy: first(map, &["max_occupancy", "nr_adults"], as_u32),
        available_rooms: first(map, &["available_rooms", "room_count"], as_u32),
    })
}

/// Normalizes a room-availability response. Unnamed rooms are skipped;
/// `None` when the body has no `data` payload at all.
pub fn normalize_availability(raw: &Value) -> Option<RoomAvailability> {
    let rooms: Vec<RoomOffer> = match raw.get("data")? {
        Value::Array(entries) => entries.iter().filter_map(room_offer).collect(),
        Value::Object(map) => ["rooms", "block"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array))
            .map(|entries| entries.iter().filter_map(room_offer).collect())
            .unwrap_or_default(),
        _ => return None,
    };

    let available = raw
        .get("data")
        .and_then(|d| d.get("available"))
        .and_then(Value::as_bool)
        .unwrap_or(!rooms.is_empty());

    Some(RoomAvailability { available, rooms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn review_object_is_read_directly() {
        let raw = json!({ "status": true, "data": {
            "score": 8.5,
            "total_score": 10,
            "score_breakdown": { "cleanliness": 8.7, "staff": "9.0" },
            "review_count": 245,
            "review_categories": [{ "name": "Couples", "count": 120 }, { "count": 3 }]
        }});
        let reviews = normalize_reviews(&raw).unwrap();
        assert_eq!(reviews.score, 8.5);
        assert_eq!(reviews.score_breakdown["staff"], 9.0);
        assert_eq!(reviews.review_count, 245);
        assert_eq!(reviews.review_categories, vec![ReviewCategory { name: "Couples".into(), count: 120 }]);
    }

    #[test]
    fn review_list_breakdown_averages_into_score() {
        let raw = json!({ "data": [{
            "score_breakdown": [
                { "question": "hotel_clean", "average_score": "8.0" },
                { "question": "hotel_staff", "average_score": 9.0 },
                { "average_score": 1.0 }
            ],
            "count": 1200
        }]});
        let reviews = normalize_reviews(&raw).unwrap();
        assert_eq!(reviews.score, 8.5);
        assert_eq!(reviews.total_score, 10.0);
        assert_eq!(reviews.score_breakdown.len(), 2);
        assert_eq!(reviews.review_count, 1200);
    }

    #[test]
    fn scoreless_reviews_are_none() {
        assert!(normalize_reviews(&json!({ "data": { "review_count": 5 } })).is_none());
        assert!(normalize_reviews(&json!({ "message": "not found" })).is_none());
        assert!(normalize_reviews(&json!({ "data": [] })).is_none());
    }

    #[test]
    fn availability_rooms_are_normalized() {
        let raw = json!({ "data": { "available": true, "rooms": [
            { "name": "Deluxe Room", "price": 150, "description": "City view",
              "amenities": ["Free Wi-Fi", "TV"], "max_occupancy": 2, "available_rooms": 5 },
            { "room_name": "Suite", "min_price": { "value": "250.5" } },
            { "price": 10 }
        ]}});
        let availability = normalize_availability(&raw).unwrap();
        assert!(availability.available);
        assert_eq!(availability.rooms.len(), 2);
        assert_eq!(availability.rooms[0].max_occupancy, Some(2));
        assert_eq!(availability.rooms[0].amenities, vec!["Free Wi-Fi", "TV"]);
        assert_eq!(availability.rooms[1].name, "Suite");
        assert_eq!(availability.rooms[1].price, Some(250.5));
        assert_eq!(availability.rooms[1].available_rooms, None);
    }

    #[test]
    fn availability_flag_follows_rooms_when_missing() {
        let none_left = normalize_availability(&json!({ "data": { "block": [] } })).unwrap();
        assert!(!none_left.available);

        let listed = normalize_availability(&json!({ "data": [{ "name": "Twin" }] })).unwrap();
        assert!(listed.available);

        assert!(normalize_availability(&json!({ "status": false })).is_none());
    }
}
