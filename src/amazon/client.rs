//! HTTP client fetching Amazon search pages with wreq TLS fingerprint emulation.

use crate::amazon::regions::Region;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Headers a desktop Chrome sends on a top-level navigation.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
    ),
    ("Accept-Encoding", "gzip, deflate, br"),
    ("Cache-Control", "no-cache"),
    ("Pragma", "no-cache"),
    ("Sec-Ch-Ua", "\"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\""),
    ("Sec-Ch-Ua-Mobile", "?0"),
    ("Sec-Ch-Ua-Platform", "\"Windows\""),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "none"),
    ("Sec-Fetch-User", "?1"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// Source of search result pages - enables mocking for tests.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Searches for `keyword` and returns the result page HTML.
    async fn search(&self, keyword: &str) -> Result<String>;

    /// Returns the configured region.
    fn region(&self) -> Region;
}

/// Amazon HTTP client with browser impersonation and a human-like pace.
pub struct AmazonClient {
    client: Client,
    region: Region,
    delay_ms: u64,
    delay_jitter_ms: u64,
    base_url: Option<String>,
}

impl AmazonClient {
    /// Creates a new Amazon client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None).await
    }

    /// Creates a new Amazon client with an optional custom base URL (for testing).
    pub async fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            region: config.region,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            base_url,
        })
    }

    /// Returns the base URL (custom for testing, or region-based for production).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| self.region.base_url())
    }

    /// Builds the search URL for a keyword.
    fn search_url(&self, keyword: &str) -> String {
        format!("{}/s?k={}", self.base_url(), urlencoding::encode(keyword.trim()))
    }

    /// Performs a browser-like GET and returns the body.
    async fn get(&self, url: &str) -> Result<String> {
        self.pause().await;

        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept-Language", self.region.accept_language());
        for (name, value) in BROWSER_HEADERS {
            request = request.header(*name, *value);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503). Consider using a proxy or increasing delay.");
            anyhow::bail!("Rate limited by Amazon. Try increasing --delay or using a proxy.");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        let final_url = response.uri().to_string();
        if self.base_url.is_none() && !final_url.contains(self.region.domain()) {
            warn!(
                "Redirected to {}. Your IP may be associated with a different storefront.",
                final_url
            );
        }

        response.text().await.context("Failed to read response body")
    }

    /// Sleeps for the base delay plus random jitter.
    async fn pause(&self) {
        let total = self.pause_duration();
        if total.is_zero() {
            return;
        }
        debug!("Pausing {}ms before request", total.as_millis());
        tokio::time::sleep(total).await;
    }

    fn pause_duration(&self) -> Duration {
        if self.delay_ms == 0 {
            return Duration::ZERO;
        }
        let jitter = match self.delay_jitter_ms {
            0 => 0,
            max => rand::rng().random_range(0..=max),
        };
        Duration::from_millis(self.delay_ms + jitter)
    }
}

#[async_trait]
impl SearchSource for AmazonClient {
    async fn search(&self, keyword: &str) -> Result<String> {
        let url = self.search_url(keyword);

        info!("Searching {} for: {}", self.region.domain(), keyword);
        self.get(&url).await
    }

    fn region(&self) -> Region {
        self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config() -> Config {
        Config {
            delay_ms: 0,        // No delay for tests
            delay_jitter_ms: 0, // No jitter for tests
            ..Config::default()
        }
    }

    async fn client_for(server: &MockServer) -> AmazonClient {
        AmazonClient::with_base_url(&make_test_config(), Some(server.uri())).await.unwrap()
    }

    #[tokio::test]
    async fn test_search_success() {
        let mock_server = MockServer::start().await;

        let html = r#"
            <html><body>
                <div data-component-type="s-search-result" data-asin="B0JP000001">
                    <h2><a href="/dp/B0JP000001"><span>Test Product</span></a></h2>
                </div>
            </body></html>
        "#;

        Mock::given(method("GET"))
            .and(path("/s"))
            .and(query_param("k", "Python プログラミング"))
            .and(header_exists("Accept-Language"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let body = client.search("Python プログラミング").await.unwrap();
        assert!(body.contains("Test Product"));
        assert!(body.contains("B0JP000001"));
    }

    #[tokio::test]
    async fn test_rate_limited_503() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/s"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.search("test").await.unwrap_err().to_string();
        assert!(err.contains("Rate limited"));
    }

    #[tokio::test]
    async fn test_http_error_500() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/s"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.search("test").await.unwrap_err().to_string();
        assert!(err.contains("500"));
    }

    #[tokio::test]
    async fn test_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/s"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(client.search("test").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_url_encoding() {
        let client = AmazonClient::with_base_url(&make_test_config(), Some("http://h".into()))
            .await
            .unwrap();
        assert_eq!(client.search_url(" rust & c++ "), "http://h/s?k=rust%20%26%20c%2B%2B");
    }

    #[tokio::test]
    async fn test_base_url_default() {
        let client = AmazonClient::new(&make_test_config()).await.unwrap();
        assert_eq!(client.region(), Region::Jp);
        assert_eq!(client.base_url(), "https://www.amazon.co.jp");
    }

    #[tokio::test]
    async fn test_different_regions() {
        let mut config = make_test_config();
        config.region = Region::Uk;

        let client = AmazonClient::new(&config).await.unwrap();
        assert_eq!(client.region(), Region::Uk);
        assert_eq!(client.base_url(), "https://www.amazon.co.uk");
    }

    #[tokio::test]
    async fn test_pause_duration() {
        let mut config = make_test_config();
        let client = AmazonClient::new(&config).await.unwrap();
        assert_eq!(client.pause_duration(), Duration::ZERO);

        config.delay_ms = 100;
        config.delay_jitter_ms = 50;
        let client = AmazonClient::new(&config).await.unwrap();
        for _ in 0..20 {
            let pause = client.pause_duration();
            assert!(pause >= Duration::from_millis(100));
            assert!(pause <= Duration::from_millis(150));
        }
    }
}
