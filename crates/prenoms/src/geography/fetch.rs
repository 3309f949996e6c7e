use super::{GeoReference, ReferenceFetchError};
use crate::config::GeographyConfig;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

const RETRY_DELAY: Duration = Duration::from_millis(500);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Fetches the boundary reference with retries, refreshing a local cache on
/// success and falling back to it when the remote stays unreachable.
#[derive(Debug, Clone)]
pub struct GeographyLoader {
    client: Client,
    url: String,
    cache_path: Option<PathBuf>,
    max_retries: u32,
    retry_delay: Duration,
}

impl GeographyLoader {
    pub fn new(config: &GeographyConfig) -> Result<Self, ReferenceFetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            cache_path: config.cache_path.clone(),
            max_retries: config.max_retries,
            retry_delay: RETRY_DELAY,
        })
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub async fn load(&self) -> Result<GeoReference, ReferenceFetchError> {
        match self.fetch_remote().await {
            Ok(reference) => {
                self.refresh_cache(&reference).await;
                Ok(reference)
            }
            Err(remote_error) => {
                let Some(path) = &self.cache_path else {
                    return Err(remote_error);
                };
                warn!(url = %self.url, error = %remote_error, cache = %path.display(), "geography fetch failed, trying local cache");
                match read_cache(path).await {
                    Ok(reference) => {
                        info!(cache = %path.display(), features = reference.codes().len(), "geography reference loaded from cache");
                        Ok(reference)
                    }
                    Err(cache_error) => {
                        warn!(error = %cache_error, "geography cache unavailable");
                        Err(remote_error)
                    }
                }
            }
        }
    }

    async fn fetch_remote(&self) -> Result<GeoReference, ReferenceFetchError> {
        let mut attempt: u32 = 0;
        loop {
            match self.fetch_once().await {
                Ok(reference) => {
                    info!(url = %self.url, attempt, features = reference.codes().len(), "geography reference fetched");
                    return Ok(reference);
                }
                // A document that parses but is not usable will not improve on retry.
                Err(error @ (ReferenceFetchError::InvalidDocument(_) | ReferenceFetchError::Decode(_))) => {
                    return Err(error);
                }
                Err(error) if attempt < self.max_retries => {
                    let delay = backoff(self.retry_delay, attempt);
                    attempt += 1;
                    warn!(url = %self.url, attempt, error = %error, delay_ms = delay.as_millis() as u64, "geography fetch failed, retrying");
                    sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn fetch_once(&self) -> Result<GeoReference, ReferenceFetchError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReferenceFetchError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        GeoReference::from_bytes(body)
    }

    async fn refresh_cache(&self, reference: &GeoReference) {
        let Some(path) = &self.cache_path else {
            return;
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            if let Err(error) = tokio::fs::create_dir_all(parent).await {
                warn!(cache = %path.display(), %error, "unable to create geography cache directory");
                return;
            }
        }
        if let Err(error) = tokio::fs::write(path, reference.body()).await {
            warn!(cache = %path.display(), %error, "unable to refresh geography cache");
        }
    }
}

async fn read_cache(path: &Path) -> Result<GeoReference, ReferenceFetchError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ReferenceFetchError::Cache {
            path: path.display().to_string(),
            source,
        })?;
    GeoReference::from_bytes(bytes)
}

/// Exponential delay: `base`, `2 * base`, `4 * base`, capped at `64 * base`.
fn backoff(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(1 << attempt.min(6))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"code":"13"},"geometry":null}]}"#;

    fn unreachable_config(cache_path: Option<PathBuf>) -> GeographyConfig {
        GeographyConfig {
            // Port 9 (discard) is closed on test hosts; the connection is refused.
            url: "http://127.0.0.1:9/departements.geojson".to_string(),
            cache_path,
            max_retries: 1,
            required: false,
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("prenoms-{}-{name}", std::process::id()))
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let base = Duration::from_millis(10);
        assert_eq!(backoff(base, 0), Duration::from_millis(10));
        assert_eq!(backoff(base, 1), Duration::from_millis(20));
        assert_eq!(backoff(base, 3), Duration::from_millis(80));
        assert_eq!(backoff(base, 20), Duration::from_millis(640));
    }

    #[tokio::test]
    async fn falls_back_to_cache_when_remote_unreachable() {
        let cache = scratch_path("fallback.geojson");
        std::fs::write(&cache, SAMPLE).expect("write cache");

        let loader = GeographyLoader::new(&unreachable_config(Some(cache.clone())))
            .expect("client builds")
            .with_retry_delay(Duration::ZERO);
        let reference = loader.load().await.expect("cache fallback");
        assert!(reference.codes().contains("13"));

        std::fs::remove_file(cache).ok();
    }

    #[tokio::test]
    async fn reports_remote_error_without_cache() {
        let loader = GeographyLoader::new(&unreachable_config(None))
            .expect("client builds")
            .with_retry_delay(Duration::ZERO);
        let error = loader.load().await.expect_err("no reference");
        assert!(matches!(error, ReferenceFetchError::Http(_)));
    }

    #[tokio::test]
    async fn missing_cache_keeps_remote_error() {
        let cache = scratch_path("missing.geojson");
        let loader = GeographyLoader::new(&unreachable_config(Some(cache)))
            .expect("client builds")
            .with_retry_delay(Duration::ZERO);
        let error = loader.load().await.expect_err("no reference");
        assert!(matches!(error, ReferenceFetchError::Http(_)));
    }
}
