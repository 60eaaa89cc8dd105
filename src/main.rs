use futures::future::join_all;
use hotel_normalizer::config::{AppConfig, load_config};
use hotel_normalizer::fetcher::{HotelSource, RapidApiClient};
use hotel_normalizer::model::{HotelDetail, HotelQuery, HotelRecord};
use hotel_normalizer::parser::ResponseShape;
use hotel_normalizer::pipeline::{self, SearchOutcome};
use hotel_normalizer::utils::to_kebab_case;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct DestinationResult<'a> {
    destination: &'a str,
    shape: ResponseShape,
    synthesized: bool,
    hotels: &'a [HotelRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<HotelDetail>,
}

#[tokio::main]
async fn main() {
    // Initialize logging; stdout is reserved for the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let client = match RapidApiClient::new(&config.api) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let mut queries = Vec::with_capacity(config.queries.len());
    for q in &config.queries {
        match q.to_query() {
            Ok(query) => queries.push(query),
            Err(e) => warn!("Skipping {}: {}", q.destination, e),
        }
    }
    info!("Queries to process: {}", queries.len());

    // One shared client, so its throttle paces every query together
    let tasks = queries.iter().map(|query| process_query(&client, query));
    let outcomes: Vec<(SearchOutcome, Option<HotelDetail>)> = join_all(tasks).await;

    let results: Vec<DestinationResult> = queries
        .iter()
        .zip(outcomes.iter())
        .map(|(query, (outcome, detail))| DestinationResult {
            destination: &query.destination,
            shape: outcome.report.shape,
            synthesized: outcome.report.is_synthesized(),
            hotels: &outcome.report.records,
            detail: detail.clone(),
        })
        .collect();

    match serde_json::to_string_pretty(&results) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize results: {}", e),
    }
}

/// Searches one destination and, if asked, loads one hotel in detail.
async fn process_query(source: &dyn HotelSource, query: &HotelQuery) -> (SearchOutcome, Option<HotelDetail>) {
    info!("Processing destination: {}", query.destination);
    let outcome = pipeline::search(source, query).await;
    let report = &outcome.report;

    info!(
        "{}: {} hotels (shape {:?}, synthesized: {}, {} placeholder photos)",
        query.destination,
        report.records.len(),
        report.shape,
        report.is_synthesized(),
        report.diagnostics.placeholder_photos()
    );
    if report.shape == ResponseShape::Unrecognized {
        if let Some(raw) = &outcome.raw {
            log_and_save_payload(raw, &query.destination);
        }
    }

    let detail = match &query.detail_hotel_id {
        Some(id) => pipeline::hotel_detail(source, &report.records, Some(id), &query.currency).await,
        None => None,
    };

    (outcome, detail)
}

/// Saves an unrecognized upstream payload for debugging.
fn log_and_save_payload(raw: &Value, destination: &str) {
    let folder = Path::new("logs/payloads");
    if let Err(e) = fs::create_dir_all(folder) {
        warn!("Failed to create debug folder: {}", e);
        return;
    }
    let filename = folder.join(format!("unrecognized-{}.json", to_kebab_case(destination)));
    let body = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    if let Err(e) = fs::write(&filename, body) {
        warn!("Failed to write debug payload: {}", e);
    } else {
        info!("Saved debug payload: {}", filename.display());
    }
}
