use std::time::Duration;

use backoff::ExponentialBackoff;
use log::info;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::BibCheckError;

/// Narrow seam between the orchestrator and whatever answers metadata
/// queries. A lookup either produces a candidate record or nothing; network
/// problems are the implementation's business and never escape this contract.
pub trait MetadataSource {
    fn lookup(&self, query: &str) -> Option<CandidateRecord>;
}

/// The external source's view of one bibliographic work, built fresh from a
/// lookup response and discarded after reconciliation.
#[derive(Debug, Clone, Default)]
pub struct CandidateRecord {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub journal: Option<String>,
    pub year: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
}

impl CandidateRecord {
    /// Map one Crossref work item into the candidate shape.
    pub fn from_crossref(item: &Value) -> Self {
        Self {
            title: first_string(item, "title"),
            authors: parse_authors(item),
            journal: first_string(item, "container-title"),
            year: parse_year(item).map(|y| y.to_string()),
            volume: item["volume"].as_str().map(str::to_string),
            issue: item["issue"].as_str().map(str::to_string),
            pages: item["page"].as_str().map(str::to_string),
            doi: item["DOI"].as_str().map(str::to_string),
            url: item["URL"].as_str().map(str::to_string),
        }
    }

    /// Candidate authors as a BibTeX author list, `None` when the response
    /// carried no author data.
    pub fn author_list(&self) -> Option<String> {
        if self.authors.is_empty() {
            None
        } else {
            Some(self.authors.join(" and "))
        }
    }
}

fn first_string(item: &Value, field: &str) -> Option<String> {
    item[field]
        .as_array()
        .and_then(|a| a.first())
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn parse_authors(item: &Value) -> Vec<String> {
    item["author"]
        .as_array()
        .map(|authors| {
            authors
                .iter()
                .filter_map(|a| {
                    let given = a["given"].as_str();
                    let family = a["family"].as_str();
                    match (given, family) {
                        (Some(g), Some(f)) => Some(format!("{} {}", g, f)),
                        (None, Some(f)) => Some(f.to_string()),
                        (Some(g), None) => Some(g.to_string()),
                        (None, None) => a["name"].as_str().map(str::to_string),
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_year(item: &Value) -> Option<i64> {
    // Crossref date parts: "published-print": {"date-parts": [[2017, 6, 12]]}
    item["published-print"]["date-parts"][0][0]
        .as_i64()
        .or_else(|| item["published-online"]["date-parts"][0][0].as_i64())
        .or_else(|| item["issued"]["date-parts"][0][0].as_i64())
        .or_else(|| item["created"]["date-parts"][0][0].as_i64())
}

/// Connection settings for the Crossref gateway, threaded explicitly into
/// the client so one run's proxy never leaks into another.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: String,
    pub proxy: Option<String>,
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.crossref.org".to_string(),
            proxy: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Blocking Crossref client. One `rows=1` bibliographic query per entry.
pub struct CrossrefClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl CrossrefClient {
    pub fn new(config: &LookupConfig) -> Result<Self, BibCheckError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bibcheck/", env!("CARGO_PKG_VERSION")));
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    fn try_lookup(&self, query: &str) -> Option<CandidateRecord> {
        let url = format!(
            "{}/works?query={}&rows=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let backoff = ExponentialBackoff {
            initial_interval: Duration::from_millis(100),
            max_interval: Duration::from_secs(5),
            max_elapsed_time: Some(self.timeout),
            ..Default::default()
        };

        let operation = || {
            info!("Querying Crossref: {}", query);
            let response = self
                .client
                .get(&url)
                .send()
                .map_err(|e| backoff::Error::transient(BibCheckError::Network(e)))?;

            if !response.status().is_success() {
                log::warn!("Crossref API returned status {}", response.status());
                return Err(backoff::Error::transient(BibCheckError::Api(format!(
                    "Crossref API returned status {}",
                    response.status()
                ))));
            }

            let json: Value = response
                .json()
                .map_err(|e| backoff::Error::transient(BibCheckError::Network(e)))?;

            let item = json["message"]["items"]
                .as_array()
                .and_then(|items| items.first());

            Ok(item.map(CandidateRecord::from_crossref))
        };

        match backoff::retry(backoff, operation) {
            Ok(result) => result,
            Err(_) => {
                log::warn!("Crossref query failed after retries: {}", query);
                None
            }
        }
    }
}

impl MetadataSource for CrossrefClient {
    fn lookup(&self, query: &str) -> Option<CandidateRecord> {
        self.try_lookup(query)
    }
}
