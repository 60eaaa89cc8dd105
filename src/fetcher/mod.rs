// Fetcher module: HTTP access to the upstream hotel API.

pub mod rapidapi;
pub mod throttle;
pub mod traits;

pub use rapidapi::RapidApiClient;
pub use traits::HotelSource;
