use std::collections::VecDeque;

use crate::engine::SearchEngine;
use crate::error::Result;
use crate::{DocId, DocumentStatus, SearchHit, DEFAULT_REQUEST_WINDOW};

#[derive(Debug, Clone, Copy)]
struct RequestRecord {
    tick: u64,
    result_count: usize,
}

/// Counts how many of the last `window` searches returned nothing.
///
/// Every recorded search advances the tick by one. Old records are evicted
/// only when a new search is recorded, so [`zero_result_count`] goes stale
/// once callers stop searching.
///
/// [`zero_result_count`]: RequestRateTracker::zero_result_count
#[derive(Debug)]
pub struct RequestRateTracker<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<RequestRecord>,
    tick: u64,
    zero_results: usize,
    window: u64,
}

impl<'a> RequestRateTracker<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self { Self::with_window(engine, DEFAULT_REQUEST_WINDOW) }

    pub fn with_window(engine: &'a SearchEngine, window: u64) -> Self {
        Self { engine, requests: VecDeque::new(), tick: 0, zero_results: 0, window }
    }

    /// Run `search` against the engine and record how many hits it produced.
    /// A failed search is passed through and not recorded.
    pub fn record_and_wrap<F>(&mut self, search: F) -> Result<Vec<SearchHit>>
    where
        F: FnOnce(&SearchEngine) -> Result<Vec<SearchHit>>,
    {
        let hits = search(self.engine)?;
        self.record(hits.len());
        Ok(hits)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<SearchHit>> {
        self.record_and_wrap(|engine| engine.find_top_documents(raw_query))
    }

    pub fn add_find_request_with_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<SearchHit>> {
        self.record_and_wrap(|engine| engine.find_top_documents_with_status(raw_query, status))
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<SearchHit>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        self.record_and_wrap(|engine| engine.find_top_documents_by(raw_query, predicate))
    }

    fn record(&mut self, result_count: usize) {
        self.tick += 1;
        while let Some(front) = self.requests.front() {
            if self.tick - front.tick < self.window {
                break;
            }
            if front.result_count == 0 {
                self.zero_results -= 1;
            }
            self.requests.pop_front();
        }

        self.requests.push_back(RequestRecord { tick: self.tick, result_count });
        if result_count == 0 {
            self.zero_results += 1;
        }
        tracing::trace!(tick = self.tick, result_count, zero_results = self.zero_results, "recorded request");
    }

    pub fn zero_result_count(&self) -> usize { self.zero_results }

    pub fn tick(&self) -> u64 { self.tick }

    pub fn window(&self) -> u64 { self.window }

    pub fn engine(&self) -> &'a SearchEngine { self.engine }
}
