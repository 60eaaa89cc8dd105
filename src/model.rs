// Core structs: HotelRecord, Photo, HotelDetail, HotelQuery and error types
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// A single hotel, normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating_score: f64,
    pub star_class: u8,
    pub price_current: Option<f64>,
    pub price_original: Option<f64>,
    pub distance_to_center: Option<String>,
    pub facilities: Vec<String>,
    pub photos: Vec<Photo>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub large: String,
    pub medium: String,
}

impl Photo {
    /// One URL used for both sizes.
    pub fn single(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            large: url.clone(),
            medium: url,
        }
    }
}

/// A hotel shown in detail: the record plus data from the detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDetail {
    #[serde(flatten)]
    pub hotel: HotelRecord,
    pub review_details: Option<ReviewDetails>,
    pub room_availability: Option<RoomAvailability>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetails {
    pub score: f64,
    pub total_score: f64,
    /// Category name to score, e.g. `cleanliness` -> 8.7.
    pub score_breakdown: BTreeMap<String, f64>,
    pub review_count: u64,
    pub review_categories: Vec<ReviewCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewCategory {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomAvailability {
    pub available: bool,
    pub rooms: Vec<RoomOffer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomOffer {
    pub name: String,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub amenities: Vec<String>,
    pub max_occupancy: Option<u32>,
    pub available_rooms: Option<u32>,
}

/// One hotel search the binary runs against the upstream API.
#[derive(Debug, Clone)]
pub struct HotelQuery {
    pub destination: String,
    pub requested_count: usize,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub rooms: u32,
    pub currency: String,
    /// Hotel to show in detail, if any.
    pub detail_hotel_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },
    #[error("upstream responded [{status}]: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::InvalidBody(e.to_string())
        } else {
            FetchError::Http(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
