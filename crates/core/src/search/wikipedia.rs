//! Random article titles from the Wikipedia API.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::source::{SourceError, TitleSource};

const API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// The API serves at most this many random titles per request.
pub const MAX_BATCH: usize = 10;

const USER_AGENT: &str = concat!("camptown/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct RandomResponse {
    query: RandomQuery,
}

#[derive(Debug, Deserialize)]
struct RandomQuery {
    random: Vec<RandomPage>,
}

#[derive(Debug, Deserialize)]
struct RandomPage {
    title: String,
}

pub struct WikipediaSource {
    client: reqwest::blocking::Client,
    batch_size: usize,
}

impl WikipediaSource {
    pub fn new(batch_size: usize, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            batch_size: batch_size.clamp(1, MAX_BATCH),
        })
    }
}

fn classify(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout(err.to_string())
    } else {
        SourceError::Fatal(err.to_string())
    }
}

/// Titles from a `list=random` response body.
fn parse_titles(body: &str) -> Result<Vec<String>, SourceError> {
    let parsed: RandomResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Fatal(format!("unexpected API response: {}", e)))?;
    Ok(parsed.query.random.into_iter().map(|p| p.title).collect())
}

impl TitleSource for WikipediaSource {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn fetch_batch(&mut self) -> Result<Vec<String>, SourceError> {
        let limit = self.batch_size.to_string();
        let response = self
            .client
            .get(API_URL)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "random"),
                ("rnnamespace", "0"),
                ("rnlimit", limit.as_str()),
            ])
            .send()
            .map_err(classify)?;

        if !response.status().is_success() {
            return Err(SourceError::Fatal(format!("HTTP {}", response.status())));
        }

        let body = response.text().map_err(classify)?;
        let titles = parse_titles(&body)?;
        log::debug!("Fetched {} titles from Wikipedia", titles.len());
        Ok(titles)
    }
}
