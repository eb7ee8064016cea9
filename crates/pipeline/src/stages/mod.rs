//! Pipeline stages
//!
//! `ingest` pulls one reference year of raw resources into the raw database,
//! `featurize` turns a stored year into the silver Feature Table, and
//! `featurize_game` runs the same transformation for a single game straight
//! from the API.

mod featurize;
mod ingest;

pub use featurize::{featurize, featurize_game};
pub use ingest::ingest;

use igdb_features_core::{Company, GameInfo, InvolvedCompany, MultiplayerMode, ReleaseDate};
use serde_json::Value;

use crate::paginate::into_resource_table;

/// Raw documents of the five resources, as returned by the API
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocuments {
    pub release_dates: Vec<Value>,
    pub involved_companies: Vec<Value>,
    pub companies: Vec<Value>,
    pub multiplayer_modes: Vec<Value>,
    pub games: Vec<Value>,
}

impl RawDocuments {
    pub fn len(&self) -> usize {
        self.release_dates.len()
            + self.involved_companies.len()
            + self.companies.len()
            + self.multiplayer_modes.len()
            + self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn decode(&self) -> RawTables {
        RawTables {
            release_dates: into_resource_table(self.release_dates.clone()),
            involved_companies: into_resource_table(self.involved_companies.clone()),
            companies: into_resource_table(self.companies.clone()),
            multiplayer_modes: into_resource_table(self.multiplayer_modes.clone()),
            games: into_resource_table(self.games.clone()),
        }
    }
}

/// Typed Resource Tables feeding the normalizer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTables {
    pub release_dates: Vec<ReleaseDate>,
    pub involved_companies: Vec<InvolvedCompany>,
    pub companies: Vec<Company>,
    pub multiplayer_modes: Vec<MultiplayerMode>,
    pub games: Vec<GameInfo>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    /// Three released games: 1 worldwide, 2 in Europe, 3 with an unknown company
    pub fn transport() -> ScriptedTransport {
        ScriptedTransport::new()
            .with_records(
                "release_dates",
                vec![
                    json!({ "id": 501, "game": 1, "region": 8, "status": 6, "y": 2022 }),
                    json!({ "id": 502, "game": 1, "region": 1, "status": 6, "y": 2022 }),
                    json!({ "id": 503, "game": 2, "region": 1, "status": 6, "y": 2022 }),
                    json!({ "id": 504, "game": 3, "region": 8, "status": 6, "y": 2022 }),
                ],
            )
            .with_records(
                "involved_companies",
                vec![
                    json!({ "id": 601, "company": 10, "game": 1, "developer": true }),
                    json!({ "id": 602, "company": 11, "game": 2, "publisher": true }),
                    json!({ "id": 603, "company": 99, "game": 3 }),
                ],
            )
            .with_records(
                "companies",
                vec![
                    json!({ "id": 10, "country": 250, "developed": [1, 4], "slug": "studio-a" }),
                    json!({ "id": 11, "country": 840, "parent": 10, "published": [2] }),
                ],
            )
            .with_records(
                "multiplayer_modes",
                vec![json!({
                    "id": 701,
                    "game": 1,
                    "onlinecoop": true,
                    "onlinemax": 4,
                    "splitscreen": false
                })],
            )
            .with_records(
                "games",
                vec![
                    json!({
                        "id": 1,
                        "name": "Alpha",
                        "platforms": [6, 48],
                        "game_modes": [1],
                        "age_ratings": [100, 101],
                        "rating": 81.5
                    }),
                    json!({ "id": 2, "name": "Beta", "platforms": [34], "remasters": [9] }),
                    json!({ "id": 3, "name": "Gamma" }),
                ],
            )
            .with_records(
                "age_ratings",
                vec![json!({ "id": 100, "rating": 3 }), json!({ "id": 101, "rating": 11 })],
            )
    }
}
