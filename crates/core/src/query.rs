//! Apicalypse query construction and filter splitting
//!
//! Queries have the shape
//! `fields a,b; where k1 = 1 & k2 = (2,3); limit 500; offset 0;`.
//! Large id lists are split across several Filter Sets so each request stays
//! within the API's predicate size limit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Ordered mapping from field name to a predicate such as `= 6` or `= (1,2,3)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    clauses: Vec<(String, String)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterSet::insert`]
    pub fn with(mut self, field: impl Into<String>, predicate: impl Into<String>) -> Self {
        self.insert(field, predicate);
        self
    }

    /// Set the predicate for a field, replacing any previous one in place
    pub fn insert(&mut self, field: impl Into<String>, predicate: impl Into<String>) {
        let field = field.into();
        let predicate = predicate.into();
        match self.clauses.iter_mut().find(|(key, _)| *key == field) {
            Some(clause) => clause.1 = predicate,
            None => self.clauses.push((field, predicate)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.clauses
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, predicate)| predicate.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.clauses.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Predicate matching any of the given ids, e.g. `= (1,2,3)`
pub fn any_of<I, T>(ids: I) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    let joined = ids
        .into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("= ({})", joined)
}

/// A finished query string; only [`build_query`] creates one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build a query selecting `fields`, constrained by `filters`, for one page
pub fn build_query(
    fields: &[&str],
    filters: Option<&FilterSet>,
    limit: u64,
    offset: u64,
) -> Result<Query, CoreError> {
    if fields.is_empty() {
        return Err(CoreError::EmptyFields);
    }
    if limit == 0 {
        return Err(CoreError::InvalidLimit);
    }

    let mut query = format!("fields {};", fields.join(","));

    if let Some(filters) = filters.filter(|f| !f.is_empty()) {
        let clauses: Vec<String> = filters
            .iter()
            .map(|(key, predicate)| format!("{} {}", key, predicate))
            .collect();
        query.push_str(&format!(" where {};", clauses.join(" & ")));
    }

    query.push_str(&format!(" limit {}; offset {};", limit, offset));
    Ok(Query(query))
}

/// A predicate broken into its operator prefix and its comma-separated options
struct OptionList<'a> {
    prefix: &'a str,
    grouped: bool,
    options: Vec<&'a str>,
}

impl<'a> OptionList<'a> {
    fn parse(predicate: &'a str) -> Self {
        let trimmed = predicate.trim();
        let value_start = trimmed
            .find(|c: char| !matches!(c, '=' | '!' | '<' | '>' | '~' | ' '))
            .unwrap_or(trimmed.len());
        let (prefix, value) = trimmed.split_at(value_start);

        let (grouped, inner) = match value.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
            Some(inner) => (true, inner),
            None => (false, value),
        };

        let options = inner
            .split(',')
            .map(str::trim)
            .filter(|option| !option.is_empty())
            .collect();

        Self { prefix, grouped, options }
    }

    fn chunks(&self, max_options: usize) -> Vec<String> {
        self.options
            .chunks(max_options)
            .map(|chunk| {
                let joined = chunk.join(",");
                if self.grouped {
                    format!("{}({})", self.prefix, joined)
                } else {
                    format!("{}{}", self.prefix, joined)
                }
            })
            .collect()
    }
}

/// Split a Filter Set so no predicate carries more than `max_options` options.
///
/// Predicates within the limit are copied into every partition. When several
/// predicates overflow, the partitions cover every combination of their
/// chunks, first field varying slowest. A `max_options` of zero disables
/// splitting.
pub fn split_filters(filters: &FilterSet, max_options: usize) -> Vec<FilterSet> {
    let mut partitions = vec![FilterSet::new()];

    for (key, predicate) in filters.iter() {
        let list = OptionList::parse(predicate);
        let chunks = if max_options > 0 && list.options.len() > max_options {
            list.chunks(max_options)
        } else {
            vec![predicate.to_string()]
        };

        partitions = partitions
            .iter()
            .flat_map(|partition| {
                chunks.iter().map(move |chunk| partition.clone().with(key, chunk.as_str()))
            })
            .collect();
    }

    partitions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_with_filters() {
        let filters = FilterSet::new().with("status", "= 6").with("y", "= 2022");
        let query = build_query(&["game", "region"], Some(&filters), 500, 1000).unwrap();
        assert_eq!(
            query.as_str(),
            "fields game,region; where status = 6 & y = 2022; limit 500; offset 1000;"
        );
    }

    #[test]
    fn test_build_query_without_filters() {
        let query = build_query(&["slug"], None, 500, 0).unwrap();
        assert_eq!(query.as_str(), "fields slug; limit 500; offset 0;");

        let empty = FilterSet::new();
        let query = build_query(&["slug"], Some(&empty), 10, 20).unwrap();
        assert_eq!(query.to_string(), "fields slug; limit 10; offset 20;");
    }

    #[test]
    fn test_build_query_rejects_bad_input() {
        assert_eq!(build_query(&[], None, 500, 0), Err(CoreError::EmptyFields));
        assert_eq!(build_query(&["id"], None, 0, 0), Err(CoreError::InvalidLimit));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut filters = FilterSet::new().with("a", "= 1").with("b", "= 2");
        filters.insert("a", "= 3");
        let clauses: Vec<_> = filters.iter().collect();
        assert_eq!(clauses, vec![("a", "= 3"), ("b", "= 2")]);
    }

    #[test]
    fn test_any_of() {
        assert_eq!(any_of([3u64, 1, 2]), "= (3,1,2)");
    }

    #[test]
    fn test_split_keeps_small_filters_unchanged() {
        let filters = FilterSet::new()
            .with("status", "= 6")
            .with("y", "= 2022")
            .with("region", "= 8");
        let split = split_filters(&filters, 1);
        assert_eq!(split, vec![filters]);
    }

    #[test]
    fn test_split_chunks_preserve_order_and_grouping() {
        let filters = FilterSet::new().with("id", "= (1,2,3,4,5)");
        let split = split_filters(&filters, 2);
        let predicates: Vec<_> = split.iter().map(|f| f.get("id").unwrap().to_string()).collect();
        assert_eq!(predicates, vec!["= (1,2)", "= (3,4)", "= (5)"]);
    }

    #[test]
    fn test_split_partition_count_and_union() {
        for n in 1..=23usize {
            for m in 1..=7usize {
                let ids: Vec<usize> = (0..n).collect();
                let filters = FilterSet::new().with("game", any_of(&ids));
                let split = split_filters(&filters, m);

                assert_eq!(split.len(), (n + m - 1) / m, "n={} m={}", n, m);

                let union: Vec<usize> = split
                    .iter()
                    .flat_map(|f| {
                        let predicate = f.get("game").unwrap();
                        OptionList::parse(predicate)
                            .options
                            .into_iter()
                            .map(|o| o.parse::<usize>().unwrap())
                            .collect::<Vec<_>>()
                    })
                    .collect();
                assert_eq!(union, ids);
            }
        }
    }

    #[test]
    fn test_split_carries_other_clauses_into_each_partition() {
        let filters = FilterSet::new()
            .with("status", "= 6")
            .with("game", "= (10,11,12)");
        let split = split_filters(&filters, 2);
        assert_eq!(split.len(), 2);
        for partition in &split {
            assert_eq!(partition.get("status"), Some("= 6"));
        }
        assert_eq!(split[1].get("game"), Some("= (12)"));
    }

    #[test]
    fn test_split_multiple_oversized_keys_crosses_chunks() {
        let filters = FilterSet::new()
            .with("a", "= (1,2)")
            .with("b", "= (3,4)");
        let split = split_filters(&filters, 1);
        let pairs: Vec<_> = split
            .iter()
            .map(|f| (f.get("a").unwrap(), f.get("b").unwrap()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("= (1)", "= (3)"),
                ("= (1)", "= (4)"),
                ("= (2)", "= (3)"),
                ("= (2)", "= (4)"),
            ]
        );
    }

    #[test]
    fn test_split_zero_means_unlimited() {
        let filters = FilterSet::new().with("id", "= (1,2,3)");
        assert_eq!(split_filters(&filters, 0), vec![filters]);
    }

    #[test]
    fn test_split_empty_filter_set() {
        assert_eq!(split_filters(&FilterSet::new(), 5), vec![FilterSet::new()]);
    }

    #[test]
    fn test_split_ungrouped_list() {
        let filters = FilterSet::new().with("platform", "= 6,48,49");
        let split = split_filters(&filters, 2);
        assert_eq!(split[0].get("platform"), Some("= 6,48"));
        assert_eq!(split[1].get("platform"), Some("= 49"));
    }
}
