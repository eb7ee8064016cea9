//! Field mapping: raw IGDB codes to labels and derived per-resource columns

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::DEFAULT_COUNTRY_CODE;
use crate::geo::country_to_continent;
use crate::mappings::{MappingCatalog, MappingDictionary};
use crate::ratings::AgeClassificationTable;
use crate::records::{CategoryValue, Company, GameInfo, MultiplayerMode, ReleaseDate};

/// Map a multi-valued column to its de-duplicated label set.
///
/// A missing column becomes `{sentinel}`; labels pass through untouched, so
/// mapping an already-mapped column is a no-op.
pub fn map_label_set(
    values: Option<&[CategoryValue]>,
    dict: &MappingDictionary,
) -> BTreeSet<String> {
    let Some(values) = values else {
        return BTreeSet::from([dict.sentinel().to_string()]);
    };

    values
        .iter()
        .map(|value| match value {
            CategoryValue::Code(code) => dict.label(*code).to_string(),
            CategoryValue::Label(label) => label.clone(),
        })
        .collect()
}

/// Label set turned back into column values, for feeding a mapped column through again
pub fn as_labels(labels: &BTreeSet<String>) -> Vec<CategoryValue> {
    labels.iter().map(|l| CategoryValue::Label(l.clone())).collect()
}

/// Region label of one release date row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRegion {
    pub game: u64,
    pub region_name: String,
}

pub fn map_release_regions(
    release_dates: &[ReleaseDate],
    regions: &MappingDictionary,
) -> Vec<ReleaseRegion> {
    release_dates
        .iter()
        .map(|release| ReleaseRegion {
            game: release.game,
            region_name: match release.region {
                Some(code) => regions.label(code).to_string(),
                None => regions.sentinel().to_string(),
            },
        })
        .collect()
}

/// Company columns after normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyFeatures {
    pub id: u64,
    pub slug: Option<String>,
    pub start_date: Option<i64>,
    /// Number of games developed, -1 when unknown
    pub games_developed: i64,
    pub has_parents: i64,
    /// Number of games published, -1 when unknown
    pub games_published: i64,
    pub continent_name: String,
}

fn array_count(values: Option<&Vec<u64>>) -> i64 {
    values.map_or(-1, |v| v.len() as i64)
}

pub fn process_companies(companies: &[Company]) -> Vec<CompanyFeatures> {
    companies
        .iter()
        .map(|company| {
            let country = company.country.unwrap_or(DEFAULT_COUNTRY_CODE);
            CompanyFeatures {
                id: company.id,
                slug: company.slug.clone(),
                start_date: company.start_date,
                games_developed: array_count(company.developed.as_ref()),
                has_parents: i64::from(company.parent.is_some()),
                games_published: array_count(company.published.as_ref()),
                continent_name: country_to_continent(Some(country)).to_string(),
            }
        })
        .collect()
}

/// Multiplayer columns kept for the feature table, booleans as 0/1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplayerFeatures {
    pub game: u64,
    pub onlinecoop: Option<i64>,
    pub onlinecoopmax: Option<i64>,
    pub onlinemax: Option<i64>,
    pub splitscreen: Option<i64>,
}

pub fn process_multiplayer_modes(modes: &[MultiplayerMode]) -> Vec<MultiplayerFeatures> {
    modes
        .iter()
        .map(|mode| MultiplayerFeatures {
            game: mode.game,
            onlinecoop: mode.onlinecoop.map(i64::from),
            onlinecoopmax: mode.onlinecoopmax,
            onlinemax: mode.onlinemax,
            splitscreen: mode.splitscreen.map(i64::from),
        })
        .collect()
}

/// Game columns after mapping, before joins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameFeatures {
    pub id: u64,
    pub name: String,
    pub platforms_name: BTreeSet<String>,
    pub game_modes_name: BTreeSet<String>,
    pub player_perspective_name: BTreeSet<String>,
    pub genres_first: String,
    pub has_remaster: i64,
    pub target: i64,
    pub age_ratings: Vec<u64>,
    pub age_classif: String,
}

pub fn process_games(games: &[GameInfo], catalog: &MappingCatalog) -> Vec<GameFeatures> {
    games
        .iter()
        .map(|game| {
            let genres = map_label_set(game.genres.as_deref(), &catalog.genres);
            let genres_first = genres
                .iter()
                .next()
                .cloned()
                .unwrap_or_else(|| catalog.genres.sentinel().to_string());

            GameFeatures {
                id: game.id,
                name: game.name.clone(),
                platforms_name: map_label_set(game.platforms.as_deref(), &catalog.platforms),
                game_modes_name: map_label_set(game.game_modes.as_deref(), &catalog.game_modes),
                player_perspective_name: map_label_set(
                    game.player_perspectives.as_deref(),
                    &catalog.player_perspectives,
                ),
                genres_first,
                has_remaster: i64::from(game.remasters.is_some()),
                target: i64::from(game.rating.is_some()),
                age_ratings: game.age_ratings.clone().unwrap_or_default(),
                age_classif: String::new(),
            }
        })
        .collect()
}

/// Every age rating id referenced by the games, duplicates included
pub fn collect_age_rating_ids(games: &[GameFeatures]) -> Vec<u64> {
    games.iter().flat_map(|g| g.age_ratings.iter().copied()).collect()
}

/// Reduce each game's ratings to its most restrictive bucket
pub fn map_age_classifications(games: &mut [GameFeatures], table: &AgeClassificationTable) {
    for game in games.iter_mut() {
        game.age_classif = table.max_label(&game.age_ratings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::{AgeClassification, AgeRatingGroup};
    use crate::records::SlugEntry;

    fn codes(values: &[i64]) -> Vec<CategoryValue> {
        values.iter().map(|c| CategoryValue::Code(*c)).collect()
    }

    #[test]
    fn test_map_label_set_collapses_and_defaults() {
        let dict = MappingDictionary::new("platform", [(1, "pc"), (2, "mobile")]);
        let labels = map_label_set(Some(codes(&[1, 1, 3]).as_slice()), &dict);
        assert_eq!(
            labels,
            BTreeSet::from(["pc".to_string(), "unknown_platform".to_string()])
        );
    }

    #[test]
    fn test_map_label_set_missing_and_empty() {
        let dict = MappingDictionary::new("game_mode", [(1, "single-player")]);
        assert_eq!(map_label_set(None, &dict), BTreeSet::from(["unknown_game_mode".to_string()]));
        assert!(map_label_set(Some(&[][..]), &dict).is_empty());
    }

    #[test]
    fn test_map_label_set_is_idempotent() {
        let dict = MappingDictionary::new("platform", [(1, "pc"), (2, "mobile")]);
        let first = map_label_set(Some(codes(&[1, 2, 9]).as_slice()), &dict);
        let second = map_label_set(Some(as_labels(&first).as_slice()), &dict);
        assert_eq!(first, second);
    }

    #[test]
    fn test_release_regions() {
        let releases = vec![
            ReleaseDate { game: 1, region: Some(8), ..Default::default() },
            ReleaseDate { game: 2, region: Some(99), ..Default::default() },
            ReleaseDate { game: 3, region: None, ..Default::default() },
        ];
        let mapped = map_release_regions(&releases, crate::mappings::regions());
        let names: Vec<_> = mapped.iter().map(|r| r.region_name.as_str()).collect();
        assert_eq!(names, vec!["worldwide", "unknown_region", "unknown_region"]);
    }

    #[test]
    fn test_process_companies() {
        let companies = vec![
            Company {
                id: 1,
                developed: Some(vec![10, 11, 12]),
                published: None,
                country: Some(392),
                parent: Some(7),
                ..Default::default()
            },
            Company { id: 2, ..Default::default() },
        ];
        let features = process_companies(&companies);
        assert_eq!(features[0].games_developed, 3);
        assert_eq!(features[0].games_published, -1);
        assert_eq!(features[0].has_parents, 1);
        assert_eq!(features[0].continent_name, "Asia");
        assert_eq!(features[1].games_developed, -1);
        assert_eq!(features[1].has_parents, 0);
        assert_eq!(features[1].continent_name, "Unknown");
    }

    #[test]
    fn test_process_multiplayer_modes_encodes_flags() {
        let modes = vec![MultiplayerMode {
            game: 5,
            onlinecoop: Some(true),
            splitscreen: Some(false),
            onlinemax: Some(4),
            ..Default::default()
        }];
        let features = process_multiplayer_modes(&modes);
        assert_eq!(features[0].onlinecoop, Some(1));
        assert_eq!(features[0].splitscreen, Some(0));
        assert_eq!(features[0].onlinemax, Some(4));
        assert_eq!(features[0].onlinecoopmax, None);
    }

    #[test]
    fn test_process_games() {
        let catalog = MappingCatalog::from_slugs(
            &[
                SlugEntry { id: 5, slug: "shooter".to_string() },
                SlugEntry { id: 12, slug: "adventure".to_string() },
            ],
            &[SlugEntry { id: 1, slug: "single-player".to_string() }],
            &[],
        );
        let games = vec![GameInfo {
            id: 100,
            name: "Test Game".to_string(),
            genres: Some(codes(&[5, 12])),
            game_modes: Some(codes(&[1])),
            platforms: Some(codes(&[6, 14, 48])),
            rating: Some(81.5),
            remasters: Some(vec![200]),
            age_ratings: Some(vec![1, 2]),
            ..Default::default()
        }];

        let features = process_games(&games, &catalog);
        let game = &features[0];
        assert_eq!(game.genres_first, "adventure");
        assert_eq!(
            game.platforms_name,
            BTreeSet::from(["modern_console".to_string(), "pc".to_string()])
        );
        assert_eq!(game.game_modes_name, BTreeSet::from(["single-player".to_string()]));
        assert_eq!(
            game.player_perspective_name,
            BTreeSet::from(["unknown_player_perspectives".to_string()])
        );
        assert_eq!(game.has_remaster, 1);
        assert_eq!(game.target, 1);
        assert_eq!(collect_age_rating_ids(&features), vec![1, 2]);
    }

    #[test]
    fn test_game_without_rating_or_genres() {
        let games = [GameInfo { id: 1, ..Default::default() }];
        let features = process_games(&games, &MappingCatalog::offline());
        assert_eq!(features[0].target, 0);
        assert_eq!(features[0].has_remaster, 0);
        assert_eq!(features[0].genres_first, "unknown_genres_name");
    }

    #[test]
    fn test_map_age_classifications() {
        let mut games = process_games(
            &[
                GameInfo { id: 1, age_ratings: Some(vec![10, 11]), ..Default::default() },
                GameInfo { id: 2, ..Default::default() },
            ],
            &MappingCatalog::offline(),
        );
        let table = AgeClassificationTable::from_rows(vec![
            AgeClassification {
                id: "10".to_string(),
                age_rating_group: Some(AgeRatingGroup::SixPlus),
            },
            AgeClassification {
                id: "11".to_string(),
                age_rating_group: Some(AgeRatingGroup::SixteenPlus),
            },
        ]);
        map_age_classifications(&mut games, &table);
        assert_eq!(games[0].age_classif, "16+");
        assert_eq!(games[1].age_classif, "No Rating");
    }
}
