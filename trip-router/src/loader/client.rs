//! HTTP client for fetching a network dataset.

use super::Dataset;
use super::error::LoadError;

/// Configuration for the dataset client.
#[derive(Debug, Clone)]
pub struct DatasetClientConfig {
    /// URL of the line dataset JSON.
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DatasetClientConfig {
    /// Create a new config for the given dataset URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 30,
        }
    }

    /// Set a custom timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client that downloads a line dataset.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    http: reqwest::Client,
    url: String,
}

impl DatasetClient {
    /// Create a new dataset client.
    pub fn new(config: DatasetClientConfig) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Returns the dataset URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the dataset.
    pub async fn fetch(&self) -> Result<Dataset, LoadError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        Dataset::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = DatasetClientConfig::new("http://localhost:8080/lines.json");
        assert_eq!(config.url, "http://localhost:8080/lines.json");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_timeout() {
        let config = DatasetClientConfig::new("http://localhost").with_timeout_secs(5);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_keeps_url() {
        let client = DatasetClient::new(DatasetClientConfig::new("http://localhost/x.json")).unwrap();
        assert_eq!(client.url(), "http://localhost/x.json");
    }
}
