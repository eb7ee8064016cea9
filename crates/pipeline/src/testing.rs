//! In-memory transport for tests
//!
//! Serves a fixed record list per endpoint, honouring the `limit` / `offset`
//! of each query and reporting the list length in `x-count`. Where clauses
//! are recorded but not evaluated.

use igdb_features_core::Query;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{PipelineError, Result};
use crate::igdb::{ApiResponse, Transport};

#[derive(Default)]
pub struct ScriptedTransport {
    records: HashMap<String, Vec<Value>>,
    declared_counts: HashMap<String, Option<String>>,
    failures: HashMap<(String, u64), u16>,
    transport_errors: HashMap<(String, u64), String>,
    pub calls: Vec<(String, String)>,
}

fn clause(query: &str, name: &str) -> u64 {
    query
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(name))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, endpoint: &str, records: Vec<Value>) -> Self {
        self.records.insert(endpoint.to_string(), records);
        self
    }

    /// Override the `x-count` header (None = header absent)
    pub fn with_count_header(mut self, endpoint: &str, value: Option<&str>) -> Self {
        self.declared_counts
            .insert(endpoint.to_string(), value.map(String::from));
        self
    }

    /// Answer the page at `offset` with a non-success status
    pub fn failing_at(mut self, endpoint: &str, offset: u64, status: u16) -> Self {
        self.failures.insert((endpoint.to_string(), offset), status);
        self
    }

    /// Fail the page at `offset` before any response arrives
    pub fn erroring_at(mut self, endpoint: &str, offset: u64, message: &str) -> Self {
        self.transport_errors
            .insert((endpoint.to_string(), offset), message.to_string());
        self
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<&str> {
        self.calls
            .iter()
            .filter(|(e, _)| e == endpoint)
            .map(|(_, q)| q.as_str())
            .collect()
    }

    pub fn offsets_for(&self, endpoint: &str) -> Vec<u64> {
        self.calls_to(endpoint)
            .iter()
            .map(|q| clause(q, "offset"))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn post_query(&mut self, endpoint: &str, query: &Query) -> Result<ApiResponse> {
        let text = query.to_string();
        self.calls.push((endpoint.to_string(), text.clone()));

        let limit = clause(&text, "limit") as usize;
        let offset = clause(&text, "offset");
        let key = (endpoint.to_string(), offset);

        if let Some(message) = self.transport_errors.get(&key) {
            return Err(PipelineError::Config(message.clone()));
        }
        if let Some(status) = self.failures.get(&key) {
            return Ok(ApiResponse {
                status: *status,
                body: "failure".to_string(),
                total_count: None,
            });
        }

        let all = self.records.get(endpoint).cloned().unwrap_or_default();
        let page: Vec<Value> = all.iter().skip(offset as usize).take(limit).cloned().collect();
        let total_count = match self.declared_counts.get(endpoint) {
            Some(declared) => declared.clone(),
            None => Some(all.len().to_string()),
        };

        Ok(ApiResponse {
            status: 200,
            body: serde_json::to_string(&page)?,
            total_count,
        })
    }
}
