//! Feature joiner: combines the normalized resource tables into one row per game

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::constants::WORLDWIDE_LABEL;
use crate::normalize::{CompanyFeatures, GameFeatures, MultiplayerFeatures, ReleaseRegion};
use crate::records::InvolvedCompany;

/// Company columns attached to a game through `involved_companies`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyGameFeatures {
    pub game: u64,
    pub games_developed: i64,
    pub has_parents: i64,
    pub games_published: i64,
    pub continent_name: String,
}

/// Inner join of involved companies with company features on the company id.
///
/// Rows keep the order of `involved`; companies with no features are dropped.
pub fn complete_company_features(
    involved: &[InvolvedCompany],
    companies: &[CompanyFeatures],
) -> Vec<CompanyGameFeatures> {
    let mut by_id: HashMap<u64, Vec<&CompanyFeatures>> = HashMap::new();
    for company in companies {
        by_id.entry(company.id).or_default().push(company);
    }

    involved
        .iter()
        .flat_map(|link| {
            by_id
                .get(&link.company)
                .into_iter()
                .flatten()
                .map(move |company| CompanyGameFeatures {
                    game: link.game,
                    games_developed: company.games_developed,
                    has_parents: company.has_parents,
                    games_published: company.games_published,
                    continent_name: company.continent_name.clone(),
                })
        })
        .collect()
}

/// One feature row per game; indicator columns hold 0/1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub id: u64,
    pub name: String,
    pub genres_first: String,
    pub has_remaster: i64,
    pub target: i64,
    pub age_classif: String,
    pub games_developed: Option<i64>,
    pub has_parents: Option<i64>,
    pub games_published: Option<i64>,
    pub continent_name: Option<String>,
    pub onlinecoop: Option<i64>,
    pub onlinecoopmax: Option<i64>,
    pub onlinemax: Option<i64>,
    pub splitscreen: Option<i64>,
    pub has_global_launch: i64,
    #[serde(flatten)]
    pub indicators: BTreeMap<String, i64>,
}

/// Fixed (non-indicator) columns of a [`FeatureRow`], in serialization order
pub const BASE_COLUMNS: &[&str] = &[
    "id",
    "name",
    "genres_first",
    "has_remaster",
    "target",
    "age_classif",
    "games_developed",
    "has_parents",
    "games_published",
    "continent_name",
    "onlinecoop",
    "onlinecoopmax",
    "onlinemax",
    "splitscreen",
    "has_global_launch",
];

/// The joined, one-row-per-game table handed to training
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
    pub indicator_columns: Vec<String>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> Vec<String> {
        BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.indicator_columns.iter().cloned())
            .collect()
    }

    pub fn get(&self, id: u64) -> Option<&FeatureRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Rows as flat JSON documents for the document store
    pub fn to_documents(&self) -> Result<Vec<serde_json::Value>, serde_json::Error> {
        self.rows.iter().map(serde_json::to_value).collect()
    }
}

/// Indicator column name for a label; dashes are not valid in column names downstream
fn indicator_name(label: &str) -> String {
    label.replace('-', "_")
}

/// First row per key, in input order
fn first_by<T, F>(rows: &[T], key: F) -> HashMap<u64, &T>
where
    F: Fn(&T) -> u64,
{
    let mut first = HashMap::new();
    for row in rows {
        first.entry(key(row)).or_insert(row);
    }
    first
}

/// Join everything into the final feature table.
///
/// 1. company rows ⋈ release regions on game (inner, releases de-duplicated by game)
/// 2. de-duplicate by game, then ⟕ multiplayer modes on game
/// 3. games ⟕ the result on id, de-duplicated by id
/// 4. one-hot expand platforms, game modes and perspectives
/// 5. `has_global_launch` from the region, which is then dropped
pub fn complete_game_infos(
    companies: &[CompanyGameFeatures],
    release_regions: &[ReleaseRegion],
    multiplayer: &[MultiplayerFeatures],
    games: &[GameFeatures],
) -> FeatureTable {
    let regions = first_by(release_regions, |r| r.game);
    let modes = first_by(multiplayer, |m| m.game);

    // Inner join with releases; the first surviving company row per game wins
    let mut company_rows: HashMap<u64, (&CompanyGameFeatures, &str)> = HashMap::new();
    for company in companies {
        if let Some(region) = regions.get(&company.game) {
            company_rows
                .entry(company.game)
                .or_insert((company, region.region_name.as_str()));
        }
    }

    let mut seen = HashSet::new();
    let games: Vec<&GameFeatures> = games.iter().filter(|g| seen.insert(g.id)).collect();

    let indicator_columns: Vec<String> = games
        .iter()
        .flat_map(|g| {
            g.platforms_name
                .iter()
                .chain(&g.game_modes_name)
                .chain(&g.player_perspective_name)
        })
        .map(|label| indicator_name(label))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = games
        .into_iter()
        .map(|game| {
            let joined = company_rows.get(&game.id);
            let company = joined.map(|(c, _)| *c);
            let region_name = joined.map(|(_, region)| *region);
            // Multiplayer columns hang off the company/release join, not the game
            let mode = joined.and_then(|_| modes.get(&game.id));

            let mut indicators: BTreeMap<String, i64> =
                indicator_columns.iter().map(|c| (c.clone(), 0)).collect();
            for label in game
                .platforms_name
                .iter()
                .chain(&game.game_modes_name)
                .chain(&game.player_perspective_name)
            {
                indicators.insert(indicator_name(label), 1);
            }

            FeatureRow {
                id: game.id,
                name: game.name.clone(),
                genres_first: game.genres_first.clone(),
                has_remaster: game.has_remaster,
                target: game.target,
                age_classif: game.age_classif.clone(),
                games_developed: company.map(|c| c.games_developed),
                has_parents: company.map(|c| c.has_parents),
                games_published: company.map(|c| c.games_published),
                continent_name: company.map(|c| c.continent_name.clone()),
                onlinecoop: mode.and_then(|m| m.onlinecoop),
                onlinecoopmax: mode.and_then(|m| m.onlinecoopmax),
                onlinemax: mode.and_then(|m| m.onlinemax),
                splitscreen: mode.and_then(|m| m.splitscreen),
                has_global_launch: i64::from(region_name == Some(WORLDWIDE_LABEL)),
                indicators,
            }
        })
        .collect();

    FeatureTable { rows, indicator_columns }
}
