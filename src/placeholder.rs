// Synthesized stand-ins for missing photos, records and destination ids
use crate::model::{HotelRecord, Photo};
use crate::utils::to_kebab_case;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// The destination label used in generated text.
pub fn destination_label(hint: &str) -> &str {
    let trimmed = hint.trim();
    if trimmed.is_empty() { UNKNOWN_LOCATION } else { trimmed }
}

/// A grey 288x225 SVG card showing `label`, as a base64 data URL.
pub fn placeholder_photo_url(label: &str) -> String {
    let svg = format!(
        concat!(
            r##"<svg width="288" height="225" xmlns="http://www.w3.org/2000/svg" "##,
            r##"viewBox="0 0 288 225" preserveAspectRatio="none">"##,
            r##"<rect width="288" height="225" fill="#55595c"/>"##,
            r##"<text x="50%" y="50%" fill="#eceeef" font-family="Arial, Helvetica, sans-serif" "##,
            r##"font-size="14pt" font-weight="bold" text-anchor="middle" dominant-baseline="middle">"##,
            "{}</text></svg>"
        ),
        escape_xml(label)
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

pub fn placeholder_photo(label: &str) -> Photo {
    Photo::single(placeholder_photo_url(label))
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Stand-in destination id when the lookup endpoint is unavailable.
pub fn fallback_destination_id(destination: &str) -> String {
    format!("{}-123456", to_kebab_case(destination_label(destination)))
}

struct Template {
    kind: &'static str,
    street: &'static str,
    rating: f64,
    stars: u8,
    price: f64,
    distance: &'static str,
    facilities: &'static [&'static str],
    description: (&'static str, &'static str),
}

const TEMPLATES: [Template; 3] = [
    Template {
        kind: "Grand Hotel",
        street: "Main Street",
        rating: 8.5,
        stars: 4,
        price: 150.0,
        distance: "0.5 km",
        facilities: &["Free Wi-Fi", "Swimming Pool", "Restaurant", "Spa"],
        description: ("A luxurious hotel in the heart of ", " with excellent amenities and service."),
    },
    Template {
        kind: "Luxury Resort",
        street: "Beach Road",
        rating: 9.2,
        stars: 5,
        price: 250.0,
        distance: "2.1 km",
        facilities: &["Free Wi-Fi", "Swimming Pool", "Restaurant", "Spa", "Gym", "Beach Access"],
        description: ("An exclusive resort in ", " offering premium amenities and breathtaking views."),
    },
    Template {
        kind: "City Center Hotel",
        street: "Downtown",
        rating: 7.8,
        stars: 3,
        price: 120.0,
        distance: "0.1 km",
        facilities: &["Free Wi-Fi", "Restaurant", "Business Center"],
        description: ("A convenient hotel located in downtown ", ", perfect for business travelers."),
    },
];

/// `count` plausible records for `destination`, used when upstream gave nothing usable.
pub fn synthesize_records(destination: &str, count: usize) -> Vec<HotelRecord> {
    let label = destination_label(destination);
    let slug = to_kebab_case(label);

    (0..count)
        .map(|i| {
            let t = &TEMPLATES[i % TEMPLATES.len()];
            let mut name = format!("{} {}", t.kind, label);
            if i >= TEMPLATES.len() {
                name.push_str(&format!(" #{}", i + 1));
            }
            HotelRecord {
                id: format!("{}-hotel-{}", slug, i + 1),
                photos: vec![placeholder_photo(&name)],
                name,
                address: format!("{}, {}", t.street, label),
                rating_score: t.rating,
                star_class: t.stars,
                price_current: Some(t.price),
                price_original: None,
                distance_to_center: Some(t.distance.to_string()),
                facilities: t.facilities.iter().map(|f| f.to_string()).collect(),
                description: format!("{}{}{}", t.description.0, label, t.description.1),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn decode_svg(url: &str) -> String {
        let b64 = url
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("svg data url");
        String::from_utf8(STANDARD.decode(b64).unwrap()).unwrap()
    }

    #[test]
    fn photo_encodes_escaped_label() {
        let svg = decode_svg(&placeholder_photo_url("Tom & Jerry's <Inn>"));
        assert!(svg.contains("Tom &amp; Jerry&apos;s &lt;Inn&gt;</text>"));
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn distinct_labels_give_distinct_photos() {
        assert_ne!(placeholder_photo_url("Hotel A"), placeholder_photo_url("Hotel B"));
    }

    #[test]
    fn blank_destination_becomes_unknown_location() {
        assert_eq!(destination_label("   "), UNKNOWN_LOCATION);
        assert_eq!(destination_label(" Rome "), "Rome");
        assert_eq!(fallback_destination_id(""), "unknown-location-123456");
        assert_eq!(fallback_destination_id("New York"), "new-york-123456");
    }

    #[test]
    fn synthesized_records_mention_destination() {
        let records = synthesize_records("Tokyo", 5);
        assert_eq!(records.len(), 5);

        let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(records[0].id, "tokyo-hotel-1");

        for r in &records {
            assert!(r.name.contains("Tokyo"));
            assert!(r.address.contains("Tokyo"));
            assert!(r.description.contains("Tokyo"));
            assert_eq!(r.photos.len(), 1);
            assert!(decode_svg(&r.photos[0].large).contains(&r.name));
        }
        assert_eq!(records[3].name, "Grand Hotel Tokyo #4");
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(synthesize_records("Oslo", 0).is_empty());
    }
}
