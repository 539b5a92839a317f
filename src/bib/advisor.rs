use std::time::Duration;

use log::warn;
use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::bib::record::BibEntry;
use crate::error::BibCheckError;

/// Best-effort format commentary from a chat-completions API.
///
/// The response is stored as opaque text in the report; it is never parsed
/// into corrections and never touches the reconciler's verdicts. Any failure
/// downgrades to "no commentary".
pub struct FormatAdvisor {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FormatAdvisor {
    pub fn new(api_key: impl Into<String>, proxy: Option<&str>) -> Result<Self, BibCheckError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("bibcheck/", env!("CARGO_PKG_VERSION")));
        if let Some(proxy) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: "https://api.deepseek.com".to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request commentary on one entry's citation format.
    pub fn advise(&self, entry: &BibEntry) -> Option<String> {
        match self.request(&format_prompt(entry)) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Advisory query failed for {}: {}", entry.key, e);
                None
            }
        }
    }

    fn request(&self, prompt: &str) -> Result<String, BibCheckError> {
        let body = json!({
            "model": "deepseek-chat",
            "messages": [
                {
                    "role": "system",
                    "content": "You are an expert on academic citation formats. \
                                Analyze BibTeX entries strictly and concisely."
                },
                { "role": "user", "content": prompt }
            ],
            "max_tokens": 1000,
            "temperature": 0.1
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        if !response.status().is_success() {
            return Err(BibCheckError::Api(format!(
                "advisory API returned status {}",
                response.status()
            )));
        }

        let json: Value = response.json()?;
        json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| BibCheckError::Api("advisory response missing content".to_string()))
    }
}

/// Fixed prompt template listing the fields that matter for format review.
fn format_prompt(entry: &BibEntry) -> String {
    format!(
        "Review the format of this BibTeX entry:\n\n\
         @{}{{{},\n\
         \x20 title = {{{}}},\n\
         \x20 author = {{{}}},\n\
         \x20 journal = {{{}}},\n\
         \x20 year = {{{}}},\n\
         \x20 volume = {{{}}},\n\
         \x20 pages = {{{}}},\n\
         \x20 doi = {{{}}}\n\
         }}\n\n\
         Check: required fields (title, author, journal, year), author list \
         separated by \"and\", four-digit year, numeric volume, page range \
         hyphenation, and DOI starting with \"10.\". Reply with a short list \
         of problems, or \"no issues\".",
        entry.entry_type,
        entry.key,
        entry.value("title"),
        entry.value("author"),
        entry.value("journal"),
        entry.value("year"),
        entry.value("volume"),
        entry.value("pages"),
        entry.value("doi"),
    )
}
