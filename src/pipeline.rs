// Fetch, then normalize; upstream failures degrade into placeholder data
use crate::details::{normalize_availability, normalize_reviews};
use crate::fetcher::HotelSource;
use crate::model::{HotelDetail, HotelQuery, HotelRecord, Photo, ReviewDetails, RoomAvailability};
use crate::normalizer::{NormalizeReport, normalize_with_report, select_hotel};
use crate::parser::extract_destination_id;
use crate::photos::normalize_photo_response;
use crate::placeholder::fallback_destination_id;
use serde_json::Value;
use tracing::{info, warn};

/// Result of one search, with the raw payload kept for debugging.
pub struct SearchOutcome {
    pub report: NormalizeReport,
    pub raw: Option<Value>,
}

/// Resolves the destination id, falling back to a synthesized one.
async fn resolve_destination(source: &dyn HotelSource, destination: &str) -> String {
    match source.search_destination(destination).await {
        Ok(raw) => match extract_destination_id(&raw) {
            Some(id) => {
                info!("Destination id for {}: {}", destination, id);
                return id;
            }
            None => warn!("No destinations found for \"{}\"", destination),
        },
        Err(e) => warn!("Destination search failed for {}: {}", destination, e),
    }
    let id = fallback_destination_id(destination);
    info!("Using fallback destination id {}", id);
    id
}

pub async fn search(source: &dyn HotelSource, query: &HotelQuery) -> SearchOutcome {
    let dest_id = resolve_destination(source, &query.destination).await;

    let raw = match source.search_hotels(query, &dest_id).await {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!("Hotel search failed for {}: {}", query.destination, e);
            None
        }
    };

    let report = normalize_with_report(raw.as_ref(), &query.destination, query.requested_count);
    if report.is_synthesized() {
        warn!(
            "No usable hotels for {} (shape {:?}); showing {} placeholders",
            query.destination,
            report.shape,
            report.records.len()
        );
    } else {
        info!("Normalized {} hotels for {}", report.records.len(), query.destination);
    }

    SearchOutcome { report, raw }
}

/// Full photo list for one hotel; keeps the record's photos if the lookup fails or comes back empty.
pub async fn hotel_photos(source: &dyn HotelSource, record: &HotelRecord) -> Vec<Photo> {
    let raw = match source.hotel_photos(&record.id).await {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!("Photo lookup failed for {}: {}", record.id, e);
            None
        }
    };
    normalize_photo_response(raw.as_ref(), &record.photos, &record.name)
}

async fn load_reviews(source: &dyn HotelSource, hotel_id: &str) -> Option<ReviewDetails> {
    match source.hotel_reviews(hotel_id).await {
        Ok(raw) => {
            let reviews = normalize_reviews(&raw);
            if reviews.is_none() {
                warn!("No review scores for {}", hotel_id);
            }
            reviews
        }
        Err(e) => {
            warn!("Review lookup failed for {}: {}", hotel_id, e);
            None
        }
    }
}

async fn load_availability(source: &dyn HotelSource, hotel_id: &str, currency: &str) -> Option<RoomAvailability> {
    match source.room_availability(hotel_id, currency).await {
        Ok(raw) => {
            let availability = normalize_availability(&raw);
            if availability.is_none() {
                warn!("No availability data for {}", hotel_id);
            }
            availability
        }
        Err(e) => {
            warn!("Availability lookup failed for {}: {}", hotel_id, e);
            None
        }
    }
}

/// The hotel to show in detail (by id, else the first), with its full photo
/// gallery, review scores and room availability. Detail lookups that fail leave
/// their part empty.
pub async fn hotel_detail(
    source: &dyn HotelSource,
    records: &[HotelRecord],
    id: Option<&str>,
    currency: &str,
) -> Option<HotelDetail> {
    let mut hotel = select_hotel(records, id)?.clone();
    if id.is_some_and(|id| id != hotel.id) {
        warn!("Hotel {:?} not in results, showing {}", id, hotel.id);
    }

    let (photos, review_details, room_availability) = tokio::join!(
        hotel_photos(source, &hotel),
        load_reviews(source, &hotel.id),
        load_availability(source, &hotel.id, currency),
    );
    hotel.photos = photos;

    Some(HotelDetail {
        hotel,
        review_details,
        room_availability,
    })
}
