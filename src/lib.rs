// Hotel search normalization: turns inconsistent upstream hotel payloads into displayable records.

pub mod config;
pub mod details;
pub mod diagnostics;
pub mod fetcher;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod photos;
pub mod pipeline;
pub mod placeholder;
pub mod utils;

pub use model::{HotelDetail, HotelRecord, Photo};
pub use normalizer::{NormalizeReport, normalize, normalize_with_report, select_hotel};
