use url::Url;

use crate::config::RaceConfig;
use crate::model::RaceDataset;

/// Error while loading a race payload.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Client error: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Server responded with HTTP {status}")]
    Status { status: u16 },
    #[error("Failed to read body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The query actually sent: the trimmed input, or the configured default when blank.
pub fn effective_query<'a>(input: &'a str, config: &'a RaceConfig) -> &'a str {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        config.default_query.as_str()
    } else {
        trimmed
    }
}

/// `{api_base}/api/news?query=..&display=..`
pub fn news_url(config: &RaceConfig, query: &str) -> Result<Url, FetchError> {
    let base = Url::parse(&config.api_base)?;
    let mut url = base.join("api/news")?;
    url.query_pairs_mut()
        .append_pair("query", effective_query(query, config))
        .append_pair("display", &config.display.to_string());
    Ok(url)
}

/// Fetch and decode the race payload (blocking).
///
/// Any non-2xx status, transport failure or undecodable body is an error;
/// fields missing from an otherwise valid object are not.
pub fn fetch_race(config: &RaceConfig, query: &str) -> Result<RaceDataset, FetchError> {
    let url = news_url(config, query)?;
    log::debug!("GET {}", url);

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("news-race/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .map_err(FetchError::Request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().map_err(FetchError::Body)?;
    let dataset = RaceDataset::from_json(&body)?;
    log::info!(
        "fetched {} articles, {} targets",
        dataset.articles.len(),
        dataset.relations.len()
    );
    Ok(dataset)
}
