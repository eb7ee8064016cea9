//! Feature Table construction

use igdb_features_core::normalize::{
    collect_age_rating_ids, map_age_classifications, map_release_regions, process_companies,
    process_games, process_multiplayer_modes,
};
use igdb_features_core::query::any_of;
use igdb_features_core::{
    complete_company_features, complete_game_infos, CoreError, FeatureTable, FilterSet,
    MappingCatalog,
};
use rusqlite::Connection;

use super::ingest::{fetch_raw_documents, tag_reference_year};
use super::RawTables;
use crate::age_ratings::batch_fetch_age_classifications;
use crate::config::Config;
use crate::db::{get_resource, insert_documents, DocumentFilter};
use crate::error::Result;
use crate::igdb::Transport;
use crate::paginate::FetchOptions;

/// Normalize the raw tables, classify age ratings and join into one row per game
pub fn build_feature_table<T: Transport + ?Sized>(
    transport: &mut T,
    raw: &RawTables,
    catalog: &MappingCatalog,
    options: FetchOptions,
) -> std::result::Result<FeatureTable, CoreError> {
    let release_regions = map_release_regions(&raw.release_dates, &catalog.regions);
    let companies = process_companies(&raw.companies);
    let company_games = complete_company_features(&raw.involved_companies, &companies);
    let multiplayer = process_multiplayer_modes(&raw.multiplayer_modes);

    let mut games = process_games(&raw.games, catalog);
    let rating_ids = collect_age_rating_ids(&games);
    let classifications = batch_fetch_age_classifications(transport, &rating_ids, options)?;
    map_age_classifications(&mut games, &classifications);

    let table = complete_game_infos(&company_games, &release_regions, &multiplayer, &games);
    tracing::debug!(
        "Built feature table: {} rows, {} indicator columns",
        table.len(),
        table.indicator_columns.len()
    );
    Ok(table)
}

fn read_raw_tables(conn: &Connection, config: &Config, year: i32) -> Result<RawTables> {
    let database = config.raw_database.as_str();
    let collections = &config.collections;
    let filter = DocumentFilter::by_year(year);

    Ok(RawTables {
        release_dates: get_resource(conn, database, &collections.release_dates, &filter)?,
        involved_companies: get_resource(
            conn,
            database,
            &collections.involved_companies_list,
            &filter,
        )?,
        companies: get_resource(conn, database, &collections.involved_companies, &filter)?,
        multiplayer_modes: get_resource(conn, database, &collections.multiplayer_modes, &filter)?,
        games: get_resource(conn, database, &collections.game_info, &filter)?,
    })
}

/// Build the Feature Table for a stored year and append it to the silver collection
pub fn featurize<T: Transport + ?Sized>(
    transport: &mut T,
    conn: &Connection,
    config: &Config,
    catalog: &MappingCatalog,
    year: i32,
) -> Result<FeatureTable> {
    tracing::info!("Featurizing {}", year);

    let raw = read_raw_tables(conn, config, year)?;
    if raw.games.is_empty() {
        tracing::warn!("No raw games stored for {}; run ingest first", year);
    }

    let table = build_feature_table(transport, &raw, catalog, FetchOptions::from_config(config))?;

    let mut documents = table.to_documents()?;
    tag_reference_year(&mut documents, year);
    insert_documents(conn, &config.silver_database, &config.collections.games_silver, &documents)?;

    tracing::info!("Wrote {} feature rows for {}", table.len(), year);
    Ok(table)
}

/// Feature Table for one game, fetched straight from the API without persistence
pub fn featurize_game<T: Transport + ?Sized>(
    transport: &mut T,
    config: &Config,
    catalog: &MappingCatalog,
    game_id: u64,
) -> Result<FeatureTable> {
    tracing::info!("Featurizing game {}", game_id);

    let options = FetchOptions::from_config(config);
    let filters = FilterSet::new().with("game", any_of([game_id]));
    let raw = fetch_raw_documents(transport, &filters, options)?.decode();

    Ok(build_feature_table(transport, &raw, catalog, options)?)
}
