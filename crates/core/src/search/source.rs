//! Where candidate titles come from.

use std::collections::VecDeque;

use thiserror::Error;

/// A failed batch fetch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Worth waiting and trying again.
    #[error("title source timed out: {0}")]
    Timeout(String),
    /// The run should stop.
    #[error("title source failed: {0}")]
    Fatal(String),
}

impl SourceError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Timeout(_))
    }
}

/// Supplies bounded batches of candidate titles.
pub trait TitleSource {
    /// Backend name for logging.
    fn name(&self) -> &str;

    fn fetch_batch(&mut self) -> Result<Vec<String>, SourceError>;
}

/// Replays scripted batches, then returns empty ones.
#[derive(Debug, Default, Clone)]
pub struct VecSource {
    batches: VecDeque<Result<Vec<String>, SourceError>>,
    fetches: usize,
}

impl VecSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.batches
            .push_back(Ok(titles.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_error(mut self, err: SourceError) -> Self {
        self.batches.push_back(Err(err));
        self
    }

    /// Number of fetches made so far.
    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

impl TitleSource for VecSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch_batch(&mut self) -> Result<Vec<String>, SourceError> {
        self.fetches += 1;
        self.batches.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}
