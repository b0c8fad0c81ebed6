//! HTTP client for the restricted-term list endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use tipline_classify::{ClassifyError, ClassifyResult, RestrictedTerm, TermSource};

use crate::error::{TermsClientError, TermsClientResult};

/// Wire shape of one term record.
#[derive(Debug, Deserialize)]
struct TermRecord {
    dirty_word: String,
    word_classification: String,
}

/// A fetched term list with its retrieval timestamp.
#[derive(Clone, Debug)]
pub struct TermList {
    pub fetched_at: DateTime<Utc>,
    pub terms: Vec<RestrictedTerm>,
}

/// Configuration for the term-list client. No ambient environment reads:
/// the caller supplies everything.
#[derive(Clone, Debug)]
pub struct TermsClientConfig {
    /// API base URL; a trailing slash is tolerated.
    pub base_url: String,
    /// Value for the `x-api-key` header, if the deployment requires one.
    pub api_key: Option<String>,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
}

impl TermsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Client for `GET {base}/dirty_words`.
pub struct TermsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TermsClient {
    pub fn new(config: TermsClientConfig) -> TermsClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Fetch the current term list.
    ///
    /// Transport and status failures are retryable from the caller's point
    /// of view; an [`TermsClientError::InvalidLevel`] is not.
    pub async fn fetch(&self) -> TermsClientResult<TermList> {
        let url = format!("{}/dirty_words", self.base_url);
        debug!(%url, "fetching restricted term list");

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TermsClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let records: Vec<TermRecord> = serde_json::from_str(&body)?;
        let terms = map_records(records)?;

        debug!(count = terms.len(), "restricted term list fetched");
        Ok(TermList {
            fetched_at: Utc::now(),
            terms,
        })
    }
}

fn map_records(records: Vec<TermRecord>) -> TermsClientResult<Vec<RestrictedTerm>> {
    let mut terms = Vec::with_capacity(records.len());
    for record in records {
        let level = record.word_classification.parse().map_err(|_| {
            TermsClientError::InvalidLevel {
                term: record.dirty_word.clone(),
                value: record.word_classification.clone(),
            }
        })?;
        terms.push(RestrictedTerm::new(record.dirty_word, level));
    }
    Ok(terms)
}

#[async_trait]
impl TermSource for TermsClient {
    async fn fetch_terms(&self) -> ClassifyResult<Vec<RestrictedTerm>> {
        match self.fetch().await {
            Ok(list) => Ok(list.terms),
            Err(TermsClientError::InvalidLevel { term, value }) => {
                warn!(%term, %value, "term list carries an unknown classification level");
                Err(ClassifyError::InvalidLevel(value))
            }
            Err(err) => Err(ClassifyError::TermListUnavailable(err.to_string())),
        }
    }
}
