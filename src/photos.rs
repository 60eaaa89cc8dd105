// Photo URL resolution across the upstream photo schemas
use crate::diagnostics::PhotoSource;
use crate::model::Photo;
use crate::placeholder::placeholder_photo;
use serde_json::Value;

const LARGE_KEYS: [&str; 3] = ["url_max", "url_1440", "url"];
const MEDIUM_KEYS: [&str; 3] = ["url_1440", "url", "url_max"];

/// Single-URL fields, in priority order, tried after the `photos` list.
const SINGLE_URL_KEYS: [(&str, PhotoSource); 4] = [
    ("max_photo_url", PhotoSource::MaxPhotoUrl),
    ("photo", PhotoSource::Photo),
    ("main_photo_url", PhotoSource::MainPhotoUrl),
    ("image", PhotoSource::Image),
];

/// URLs must be non-empty strings; numbers and other values never count.
fn as_url(value: &Value) -> Option<String> {
    let url = value.as_str()?.trim();
    (!url.is_empty()).then(|| url.to_string())
}

fn first_url(entry: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| entry.get(*k).and_then(as_url))
}

/// One entry of a photo list: an object with size keys, or a bare URL.
pub fn resolve_entry(entry: &Value) -> Option<Photo> {
    if entry.is_string() {
        return as_url(entry).map(Photo::single);
    }
    let large = first_url(entry, &LARGE_KEYS)?;
    let medium = first_url(entry, &MEDIUM_KEYS).unwrap_or_else(|| large.clone());
    Some(Photo { large, medium })
}

fn resolve_list(entries: &[Value]) -> Vec<Photo> {
    entries.iter().filter_map(resolve_entry).collect()
}

/// Photos for one hotel item. Never empty: falls back to a placeholder naming `display_name`.
pub fn resolve_photos(item: &Value, display_name: &str) -> (Vec<Photo>, PhotoSource) {
    if let Some(entries) = item.get("photos").and_then(Value::as_array) {
        let photos = resolve_list(entries);
        if !photos.is_empty() {
            return (photos, PhotoSource::PhotoList);
        }
    }

    for (key, source) in SINGLE_URL_KEYS {
        if let Some(url) = item.get(key).and_then(as_url) {
            return (vec![Photo::single(url)], source);
        }
    }

    (vec![placeholder_photo(display_name)], PhotoSource::Placeholder)
}

/// Normalizes a standalone photo endpoint response. An empty result keeps
/// `existing`; a placeholder labelled `label` is used only when both are empty.
pub fn normalize_photo_response(raw: Option<&Value>, existing: &[Photo], label: &str) -> Vec<Photo> {
    let entries = raw.and_then(|r| {
        r.get("data")
            .and_then(Value::as_array)
            .or_else(|| r.as_array())
            .or_else(|| r.get("results").and_then(Value::as_array))
    });

    let photos = entries.map(|e| resolve_list(e)).unwrap_or_default();
    if !photos.is_empty() {
        photos
    } else if !existing.is_empty() {
        existing.to_vec()
    } else {
        vec![placeholder_photo(label)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_only_entry_fills_both_sizes() {
        let item = json!({ "photos": [{ "url": "https://img/1.jpg" }] });
        let (photos, source) = resolve_photos(&item, "X");
        assert_eq!(source, PhotoSource::PhotoList);
        assert_eq!(photos, vec![Photo::single("https://img/1.jpg")]);
    }

    #[test]
    fn size_keys_are_preferred_per_slot() {
        let entry = json!({ "url_max": "big", "url_1440": "mid", "url": "plain" });
        assert_eq!(
            resolve_entry(&entry),
            Some(Photo { large: "big".into(), medium: "mid".into() })
        );

        let only_1440 = json!({ "url_1440": "mid" });
        assert_eq!(resolve_entry(&only_1440), Some(Photo::single("mid")));

        let no_max = json!({ "url": "plain", "url_1440": "mid" });
        assert_eq!(resolve_entry(&no_max).map(|p| p.large), Some("mid".to_string()));
    }

    #[test]
    fn every_usable_entry_is_kept() {
        let item = json!({
            "photos": ["https://a.jpg", { "url_max": "https://b.jpg" }, {}, { "url": "" }, 7],
            "max_photo_url": "https://ignored.jpg"
        });
        let (photos, _) = resolve_photos(&item, "X");
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].large, "https://a.jpg");
        assert_eq!(photos[1].medium, "https://b.jpg");
    }

    #[test]
    fn unusable_list_falls_back_to_single_fields() {
        let item = json!({ "photos": [{}], "main_photo_url": "https://main.jpg", "image": "https://img.jpg" });
        let (photos, source) = resolve_photos(&item, "X");
        assert_eq!(source, PhotoSource::MainPhotoUrl);
        assert_eq!(photos[0].large, "https://main.jpg");

        let item = json!({ "image": "https://img.jpg", "max_photo_url": "https://max.jpg" });
        assert_eq!(resolve_photos(&item, "X").1, PhotoSource::MaxPhotoUrl);
    }

    #[test]
    fn nothing_usable_gives_named_placeholder() {
        let (photos, source) = resolve_photos(&json!({ "photos": [] }), "Test Inn");
        assert_eq!(source, PhotoSource::Placeholder);
        assert_eq!(photos, vec![placeholder_photo("Test Inn")]);
    }

    #[test]
    fn photo_response_envelopes() {
        let data = json!({ "status": true, "data": [{ "id": 1, "url_max": "a", "url_1440": "b" }] });
        assert_eq!(normalize_photo_response(Some(&data), &[], "H")[0].medium, "b");

        let bare = json!([{ "url": "c" }]);
        assert_eq!(normalize_photo_response(Some(&bare), &[], "H")[0].large, "c");

        let results = json!({ "results": [{ "url": "d" }] });
        assert_eq!(normalize_photo_response(Some(&results), &[], "H")[0].large, "d");
    }

    #[test]
    fn empty_photo_response_keeps_existing_photos() {
        let existing = vec![Photo::single("https://cdn/real.jpg")];
        let empty = json!({ "status": true, "data": [] });
        assert_eq!(normalize_photo_response(Some(&empty), &existing, "Real Inn"), existing);

        let unusable = json!({ "data": [{ "id": 3 }] });
        assert_eq!(normalize_photo_response(Some(&unusable), &existing, "Real Inn"), existing);
        assert_eq!(normalize_photo_response(None, &existing, "Real Inn"), existing);
    }

    #[test]
    fn no_photos_anywhere_gives_placeholder() {
        let photos = normalize_photo_response(None, &[], "Hotel Image");
        assert_eq!(photos, vec![placeholder_photo("Hotel Image")]);

        let empty = json!({ "data": [] });
        assert_eq!(normalize_photo_response(Some(&empty), &[], "Hotel Image").len(), 1);
    }
}
