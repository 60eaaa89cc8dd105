use crate::config::ApiConfig;
use crate::fetcher::throttle::{Throttle, retry_rate_limited};
use crate::fetcher::traits::HotelSource;
use crate::model::{FetchError, HotelQuery};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

type Params = Vec<(&'static str, String)>;

const LANGUAGE_CODE: &str = "en-us";
const AVAILABILITY_LOCATION: &str = "US";

pub struct RapidApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_host: String,
    throttle: Throttle,
    retry_delay: Duration,
    max_retries: u32,
}

impl RapidApiClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) HotelNormalizer/0.1")
            .timeout(cfg.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            api_host: cfg.api_host.clone(),
            throttle: Throttle::new(cfg.min_request_interval()),
            retry_delay: cfg.rate_limit_retry(),
            max_retries: cfg.max_retries,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get_json(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Value, FetchError> {
        let url = self.build_url(endpoint);
        let url = url.as_str();

        retry_rate_limited(self.max_retries, self.retry_delay, move || async move {
            self.throttle.wait().await;
            info!("Fetching {}", url);

            let response = self
                .client
                .get(url)
                .query(params)
                .header("X-RapidAPI-Key", &self.api_key)
                .header("X-RapidAPI-Host", &self.api_host)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_else(|_| "unknown".into());
                warn!("❌ {} responded [{}]: {}", endpoint, status, body);
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| FetchError::InvalidBody(e.to_string()))
        })
        .await
    }
}

fn hotel_search_params(query: &HotelQuery, dest_id: &str) -> Params {
    vec![
        ("dest_id", dest_id.to_string()),
        ("search_type", "CITY".to_string()),
        ("arrival_date", query.check_in.format("%Y-%m-%d").to_string()),
        ("departure_date", query.check_out.format("%Y-%m-%d").to_string()),
        ("adults", query.adults.to_string()),
        ("room_qty", query.rooms.to_string()),
        ("page_number", "1".to_string()),
        ("currency_code", query.currency.clone()),
        ("sort_by", "popularity".to_string()),
    ]
}

fn availability_params(hotel_id: &str, currency: &str) -> Params {
    vec![
        ("hotel_id", hotel_id.to_string()),
        ("currency_code", currency.to_string()),
        ("location", AVAILABILITY_LOCATION.to_string()),
    ]
}

#[async_trait::async_trait]
impl HotelSource for RapidApiClient {
    async fn search_destination(&self, query: &str) -> Result<Value, FetchError> {
        self.get_json("searchDestination", &[("query", query.to_string())])
            .await
    }

    async fn search_hotels(&self, query: &HotelQuery, dest_id: &str) -> Result<Value, FetchError> {
        self.get_json("searchHotels", &hotel_search_params(query, dest_id))
            .await
    }

    async fn hotel_photos(&self, hotel_id: &str) -> Result<Value, FetchError> {
        self.get_json("getHotelPhotos", &[("hotel_id", hotel_id.to_string())])
            .await
    }

    async fn hotel_reviews(&self, hotel_id: &str) -> Result<Value, FetchError> {
        let params = [
            ("hotel_id", hotel_id.to_string()),
            ("languagecode", LANGUAGE_CODE.to_string()),
        ];
        self.get_json("getHotelReviewScores", &params).await
    }

    async fn room_availability(&self, hotel_id: &str, currency: &str) -> Result<Value, FetchError> {
        self.get_json("getAvailability", &availability_params(hotel_id, currency))
            .await
    }
}
