// Request pacing and rate-limit retries
use crate::model::FetchError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::warn;

const TOO_MANY_REQUESTS: u16 = 429;

/// Enforces a minimum gap between consecutive requests.
pub struct Throttle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until the interval since the previous request has passed.
    /// The lock is held while sleeping so concurrent callers queue up.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

fn with_jitter(delay: Duration) -> Duration {
    let max_jitter = (delay.as_millis() / 4) as u64;
    delay + Duration::from_millis(rand::rng().random_range(0..=max_jitter))
}

/// Runs `op`, retrying on HTTP 429 up to `max_retries` times.
pub async fn retry_rate_limited<T, F, Fut>(max_retries: u32, delay: Duration, mut op: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(FetchError::Status { status, .. }) if status == TOO_MANY_REQUESTS => {
                attempt += 1;
                if attempt > max_retries {
                    return Err(FetchError::RateLimited { attempts: attempt });
                }
                let wait = with_jitter(delay);
                warn!("Rate limit hit, retry {}/{} in {:?}", attempt, max_retries, wait);
                sleep(wait).await;
            }
            other => return other,
        }
    }
}
