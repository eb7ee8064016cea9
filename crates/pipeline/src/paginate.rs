//! Paginated fetching
//!
//! A [`PageCursor`] walks one Filter Set through successive offsets until the
//! `x-count` header says nothing remains. A failed page ends that cursor
//! only; the records already yielded are kept and the remaining Filter Sets
//! still run.

use igdb_features_core::{build_query, split_filters, CoreError, FilterSet, Resource};
use serde_json::Value;

use crate::config::Config;
use crate::igdb::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub page_size: u64,
    pub max_filter_options: usize,
}

impl FetchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            max_filter_options: config.max_filter_options,
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// One page of raw records
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<Value>,
    pub offset: u64,
    pub total_count: u64,
}

/// Lazy, finite sequence of pages for one Filter Set
pub struct PageCursor<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
    endpoint: &'a str,
    fields: &'a [&'a str],
    filters: Option<&'a FilterSet>,
    limit: u64,
    offset: u64,
    done: bool,
}

impl<'a, T: Transport + ?Sized> PageCursor<'a, T> {
    pub fn new(
        transport: &'a mut T,
        endpoint: &'a str,
        fields: &'a [&'a str],
        filters: Option<&'a FilterSet>,
        limit: u64,
    ) -> Result<Self, CoreError> {
        // Reject bad field lists and limits before any request goes out
        build_query(fields, filters, limit, 0)?;

        Ok(Self {
            transport,
            endpoint,
            fields,
            filters,
            limit,
            offset: 0,
            done: false,
        })
    }

    /// Offset of the next page to request
    #[cfg(test)]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn stop(&mut self) -> Option<Page> {
        self.done = true;
        None
    }
}

fn parse_total_count(endpoint: &str, header: Option<&str>) -> u64 {
    match header.map(|h| h.trim().parse::<u64>()) {
        Some(Ok(count)) => count,
        Some(Err(_)) => {
            tracing::warn!("Non-numeric total count header from {}", endpoint);
            0
        }
        None => {
            tracing::warn!("Missing total count header from {}", endpoint);
            0
        }
    }
}

impl<'a, T: Transport + ?Sized> Iterator for PageCursor<'a, T> {
    type Item = Page;

    fn next(&mut self) -> Option<Page> {
        if self.done {
            return None;
        }

        let query = match build_query(self.fields, self.filters, self.limit, self.offset) {
            Ok(query) => query,
            Err(e) => {
                tracing::error!("Could not build query for {}: {}", self.endpoint, e);
                return self.stop();
            }
        };

        let response = match self.transport.post_query(self.endpoint, &query) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    "Request to {} failed at offset {}: {}",
                    self.endpoint,
                    self.offset,
                    e
                );
                return self.stop();
            }
        };

        if !response.is_success() {
            tracing::error!(
                "Error fetching {} at offset {}: {} - {}",
                self.endpoint,
                self.offset,
                response.status,
                response.body
            );
            return self.stop();
        }

        let records: Vec<Value> = match serde_json::from_str(&response.body) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    "Invalid JSON from {} at offset {}: {}",
                    self.endpoint,
                    self.offset,
                    e
                );
                return self.stop();
            }
        };

        let total_count = parse_total_count(self.endpoint, response.total_count.as_deref());
        let page = Page { records, offset: self.offset, total_count };

        if self.offset + self.limit >= total_count {
            self.done = true;
        } else {
            self.offset += self.limit;
        }

        Some(page)
    }
}

/// Fetch every record matching `filters`, splitting oversized predicates
/// into sequential partitions. Rows are concatenated without de-duplication.
pub fn fetch_records<T: Transport + ?Sized>(
    transport: &mut T,
    endpoint: &str,
    fields: &[&str],
    filters: Option<&FilterSet>,
    options: FetchOptions,
) -> Result<Vec<Value>, CoreError> {
    let partitions = match filters {
        Some(filters) => split_filters(filters, options.max_filter_options),
        None => vec![FilterSet::new()],
    };

    if partitions.len() > 1 {
        tracing::debug!("Split {} query into {} partitions", endpoint, partitions.len());
    }

    let mut all_records = Vec::new();
    for partition in &partitions {
        let cursor = PageCursor::new(
            &mut *transport,
            endpoint,
            fields,
            Some(partition),
            options.page_size,
        )?;
        for page in cursor {
            tracing::debug!(
                "{} offset {}: {} records of {}",
                endpoint,
                page.offset,
                page.records.len(),
                page.total_count
            );
            all_records.extend(page.records);
        }
    }

    tracing::debug!("Fetched {} records from {}", all_records.len(), endpoint);
    Ok(all_records)
}

/// Decode raw records into typed rows, skipping any that do not fit the schema
pub fn into_resource_table<R: Resource>(records: Vec<Value>) -> Vec<R> {
    let total = records.len();
    let rows: Vec<R> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!("Skipping malformed {} record: {}", R::ENDPOINT, e);
                None
            }
        })
        .collect();

    if rows.len() < total {
        tracing::warn!("Kept {} of {} {} records", rows.len(), total, R::ENDPOINT);
    }
    rows
}

/// Fetch a typed Resource Table
pub fn fetch_resource<R: Resource, T: Transport + ?Sized>(
    transport: &mut T,
    filters: Option<&FilterSet>,
    options: FetchOptions,
) -> Result<Vec<R>, CoreError> {
    let records = fetch_records(transport, R::ENDPOINT, R::FIELDS, filters, options)?;
    Ok(into_resource_table(records))
}
