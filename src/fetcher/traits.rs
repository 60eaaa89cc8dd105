use crate::model::{FetchError, HotelQuery};
use serde_json::Value;

/// The upstream hotel API, returning raw JSON bodies.
#[async_trait::async_trait]
pub trait HotelSource: Send + Sync {
    async fn search_destination(&self, query: &str) -> Result<Value, FetchError>;
    async fn search_hotels(&self, query: &HotelQuery, dest_id: &str) -> Result<Value, FetchError>;
    async fn hotel_photos(&self, hotel_id: &str) -> Result<Value, FetchError>;
    async fn hotel_reviews(&self, hotel_id: &str) -> Result<Value, FetchError>;
    async fn room_availability(&self, hotel_id: &str, currency: &str) -> Result<Value, FetchError>;
}
