//! Raw ingestion for one reference year

use igdb_features_core::constants::{
    REFERENCE_YEAR_FIELD, REGION_WORLDWIDE, RELEASE_STATUS_RELEASED,
};
use igdb_features_core::query::any_of;
use igdb_features_core::{
    Company, CoreError, FilterSet, GameInfo, InvolvedCompany, MultiplayerMode, ReleaseDate,
    Resource,
};
use rusqlite::Connection;
use serde_json::Value;
use std::collections::BTreeSet;

use super::RawDocuments;
use crate::config::Config;
use crate::db::{count_documents, insert_documents};
use crate::error::Result;
use crate::igdb::Transport;
use crate::paginate::{fetch_records, into_resource_table, FetchOptions};

fn fetch<R: Resource, T: Transport + ?Sized>(
    transport: &mut T,
    filters: &FilterSet,
    options: FetchOptions,
) -> std::result::Result<Vec<Value>, CoreError> {
    fetch_records(transport, R::ENDPOINT, R::FIELDS, Some(filters), options)
}

/// Fetch release dates matching `release_filters`, then every resource
/// linked to the games they reference
pub fn fetch_raw_documents<T: Transport + ?Sized>(
    transport: &mut T,
    release_filters: &FilterSet,
    options: FetchOptions,
) -> std::result::Result<RawDocuments, CoreError> {
    let release_dates = fetch::<ReleaseDate, _>(transport, release_filters, options)?;

    let game_ids: BTreeSet<u64> = into_resource_table::<ReleaseDate>(release_dates.clone())
        .iter()
        .map(|release| release.game)
        .collect();
    tracing::info!("Found {} release dates for {} games", release_dates.len(), game_ids.len());

    if game_ids.is_empty() {
        tracing::warn!("No games matched, skipping dependent resources");
        return Ok(RawDocuments { release_dates, ..Default::default() });
    }

    let by_game = FilterSet::new().with("game", any_of(&game_ids));
    let involved_companies = fetch::<InvolvedCompany, _>(transport, &by_game, options)?;

    let company_ids: BTreeSet<u64> =
        into_resource_table::<InvolvedCompany>(involved_companies.clone())
            .iter()
            .map(|link| link.company)
            .collect();
    let companies = if company_ids.is_empty() {
        Vec::new()
    } else {
        let by_id = FilterSet::new().with("id", any_of(&company_ids));
        fetch::<Company, _>(transport, &by_id, options)?
    };

    let multiplayer_modes = fetch::<MultiplayerMode, _>(transport, &by_game, options)?;

    let by_id = FilterSet::new().with("id", any_of(&game_ids));
    let games = fetch::<GameInfo, _>(transport, &by_id, options)?;

    Ok(RawDocuments {
        release_dates,
        involved_companies,
        companies,
        multiplayer_modes,
        games,
    })
}

/// Stamp every object document with its reference year
pub fn tag_reference_year(documents: &mut [Value], year: i32) {
    for document in documents.iter_mut() {
        if let Some(object) = document.as_object_mut() {
            object.insert(REFERENCE_YEAR_FIELD.to_string(), Value::from(year));
        }
    }
}

/// Released, worldwide release dates of `year`
pub fn release_filters(year: i32) -> FilterSet {
    FilterSet::new()
        .with("status", format!("= {}", RELEASE_STATUS_RELEASED))
        .with("y", format!("= {}", year))
        .with("region", format!("= {}", REGION_WORLDWIDE))
}

/// Fetch one reference year and append it to the raw collections.
/// Returns the number of documents written.
pub fn ingest<T: Transport + ?Sized>(
    transport: &mut T,
    conn: &Connection,
    config: &Config,
    year: i32,
) -> Result<usize> {
    tracing::info!("Ingesting raw resources for {}", year);

    let options = FetchOptions::from_config(config);
    let mut raw = fetch_raw_documents(transport, &release_filters(year), options)?;
    if raw.is_empty() {
        tracing::warn!("Nothing to ingest for {}", year);
    } else {
        tracing::debug!("Fetched {} raw documents for {}", raw.len(), year);
    }

    let database = config.raw_database.as_str();
    let collections = &config.collections;
    let targets = [
        (&mut raw.release_dates, &collections.release_dates),
        (&mut raw.involved_companies, &collections.involved_companies_list),
        (&mut raw.companies, &collections.involved_companies),
        (&mut raw.multiplayer_modes, &collections.multiplayer_modes),
        (&mut raw.games, &collections.game_info),
    ];

    let mut written = 0;
    for (documents, collection) in targets {
        tag_reference_year(documents, year);
        written += insert_documents(conn, database, collection, documents)?;
        tracing::debug!(
            "{}.{} now holds {} documents",
            database,
            collection,
            count_documents(conn, database, collection)?
        );
    }

    tracing::info!("Ingested {} raw documents for {}", written, year);
    Ok(written)
}
