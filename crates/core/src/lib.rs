//! Shared domain types for the IGDB feature pipeline
//!
//! Everything in this crate is pure: no network, no storage. The pipeline
//! crate drives these pieces against the live API and the document store.

pub mod constants;
pub mod error;
pub mod features;
pub mod geo;
pub mod mappings;
pub mod normalize;
pub mod query;
pub mod ratings;
pub mod records;

pub use error::CoreError;
pub use features::*;
pub use mappings::{MappingCatalog, MappingDictionary};
pub use query::{build_query, split_filters, FilterSet, Query};
pub use ratings::{AgeClassification, AgeClassificationTable, AgeRatingGroup};
pub use records::*;
