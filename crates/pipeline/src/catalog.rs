//! Slug dictionaries for genres, game modes and player perspectives

use igdb_features_core::constants::{
    ENDPOINT_GAME_MODES, ENDPOINT_GENRES, ENDPOINT_PLAYER_PERSPECTIVES,
};
use igdb_features_core::{CoreError, MappingCatalog, SlugEntry};
use serde_json::Value;

use crate::igdb::Transport;
use crate::paginate::{fetch_records, FetchOptions};

fn fetch_slugs<T: Transport + ?Sized>(
    transport: &mut T,
    endpoint: &str,
    options: FetchOptions,
) -> Result<Vec<SlugEntry>, CoreError> {
    let records = fetch_records(transport, endpoint, &["slug"], None, options)?;
    Ok(records.into_iter().filter_map(slug_entry).collect())
}

// `id` always comes back even when only `slug` is requested
fn slug_entry(record: Value) -> Option<SlugEntry> {
    match serde_json::from_value(record) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!("Skipping malformed slug row: {}", e);
            None
        }
    }
}

/// Build the mapping catalog from the live lookup resources
pub fn load_catalog<T: Transport + ?Sized>(
    transport: &mut T,
    options: FetchOptions,
) -> Result<MappingCatalog, CoreError> {
    let genres = fetch_slugs(transport, ENDPOINT_GENRES, options)?;
    let game_modes = fetch_slugs(transport, ENDPOINT_GAME_MODES, options)?;
    let player_perspectives = fetch_slugs(transport, ENDPOINT_PLAYER_PERSPECTIVES, options)?;

    tracing::info!(
        "Loaded {} genres, {} game modes, {} player perspectives",
        genres.len(),
        game_modes.len(),
        player_perspectives.len()
    );

    Ok(MappingCatalog::from_slugs(&genres, &game_modes, &player_perspectives))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    #[test]
    fn test_load_catalog() {
        let mut transport = ScriptedTransport::new()
            .with_records(
                "genres",
                vec![json!({ "id": 5, "slug": "shooter" }), json!({ "id": 12 })],
            )
            .with_records("game_modes", vec![json!({ "id": 1, "slug": "single-player" })])
            .with_records("player_perspectives", vec![json!({ "id": 2, "slug": "third-person" })]);

        let catalog = load_catalog(&mut transport, FetchOptions::default()).unwrap();

        assert_eq!(catalog.genres.label(5), "shooter");
        assert_eq!(catalog.genres.len(), 1);
        assert_eq!(catalog.genres.label(12), "unknown_genres_name");
        assert_eq!(catalog.game_modes.label(1), "single-player");
        assert_eq!(catalog.player_perspectives.label(9), "unknown_player_perspectives");
        assert_eq!(catalog.regions.label(8), "worldwide");
        assert!(transport.calls_to("genres")[0].starts_with("fields slug; limit 500; offset 0;"));
    }
}
