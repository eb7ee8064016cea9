//! Typed records for the IGDB resources the pipeline reads
//!
//! Every field IGDB may omit is optional or defaulted, so a record only fails
//! to decode when its join key is missing or a value has the wrong shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// A resource endpoint and the fields requested from it
pub trait Resource: DeserializeOwned + Serialize {
    const ENDPOINT: &'static str;
    const FIELDS: &'static [&'static str];
}

/// A categorical value as stored on a game: a raw IGDB code, or a label that
/// has already been mapped
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Code(i64),
    Label(String),
}

impl From<i64> for CategoryValue {
    fn from(code: i64) -> Self {
        CategoryValue::Code(code)
    }
}

impl From<&str> for CategoryValue {
    fn from(label: &str) -> Self {
        CategoryValue::Label(label.to_string())
    }
}

/// Release date entry (one per game/platform/region)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub id: u64,
    pub game: u64,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub human: Option<String>,
    #[serde(default)]
    pub platform: Option<i64>,
    #[serde(default)]
    pub region: Option<i64>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
}

impl Resource for ReleaseDate {
    const ENDPOINT: &'static str = ENDPOINT_RELEASE_DATES;
    const FIELDS: &'static [&'static str] = &[
        "category",
        "created_at",
        "date",
        "game",
        "human",
        "platform",
        "region",
        "status",
        "updated_at",
        "y",
    ];
}

/// Link between a game and a company that worked on it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvolvedCompany {
    #[serde(default)]
    pub id: u64,
    pub company: u64,
    pub game: u64,
    #[serde(default)]
    pub developer: bool,
    #[serde(default)]
    pub publisher: bool,
    #[serde(default)]
    pub porting: bool,
    #[serde(default)]
    pub supporting: bool,
}

impl Resource for InvolvedCompany {
    const ENDPOINT: &'static str = ENDPOINT_INVOLVED_COMPANIES;
    const FIELDS: &'static [&'static str] = &["*"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: u64,
    #[serde(default)]
    pub developed: Option<Vec<u64>>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub published: Option<Vec<u64>>,
    /// ISO 3166-1 numeric country code
    #[serde(default)]
    pub country: Option<i64>,
    #[serde(default)]
    pub start_date: Option<i64>,
    #[serde(default)]
    pub start_date_category: Option<i64>,
    #[serde(default)]
    pub parent: Option<u64>,
}

impl Resource for Company {
    const ENDPOINT: &'static str = ENDPOINT_COMPANIES;
    const FIELDS: &'static [&'static str] = &[
        "developed",
        "slug",
        "published",
        "country",
        "start_date",
        "start_date_category",
        "parent",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiplayerMode {
    #[serde(default)]
    pub id: u64,
    pub game: u64,
    #[serde(default)]
    pub campaigncoop: Option<bool>,
    #[serde(default)]
    pub lancoop: Option<bool>,
    #[serde(default)]
    pub offlinecoop: Option<bool>,
    #[serde(default)]
    pub offlinecoopmax: Option<i64>,
    #[serde(default)]
    pub offlinemax: Option<i64>,
    #[serde(default)]
    pub onlinecoop: Option<bool>,
    #[serde(default)]
    pub onlinecoopmax: Option<i64>,
    #[serde(default)]
    pub onlinemax: Option<i64>,
    #[serde(default)]
    pub splitscreen: Option<bool>,
}

impl Resource for MultiplayerMode {
    const ENDPOINT: &'static str = ENDPOINT_MULTIPLAYER_MODES;
    const FIELDS: &'static [&'static str] = &[
        "campaigncoop",
        "game",
        "lancoop",
        "offlinecoop",
        "offlinecoopmax",
        "offlinemax",
        "onlinecoop",
        "onlinecoopmax",
        "onlinemax",
        "splitscreen",
    ];
}

/// Core game information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub game_modes: Option<Vec<CategoryValue>>,
    #[serde(default)]
    pub genres: Option<Vec<CategoryValue>>,
    #[serde(default)]
    pub age_ratings: Option<Vec<u64>>,
    #[serde(default)]
    pub involved_companies: Option<Vec<u64>>,
    #[serde(default)]
    pub player_perspectives: Option<Vec<CategoryValue>>,
    #[serde(default)]
    pub platforms: Option<Vec<CategoryValue>>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub remasters: Option<Vec<u64>>,
}

impl Resource for GameInfo {
    const ENDPOINT: &'static str = ENDPOINT_GAMES;
    const FIELDS: &'static [&'static str] = &[
        "name",
        "game_modes",
        "genres",
        "age_ratings",
        "involved_companies",
        "player_perspectives",
        "platforms",
        "rating",
        "remasters",
    ];
}

/// Age rating entry; `rating` is the rating-body specific category code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeRating {
    pub id: u64,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl Resource for AgeRating {
    const ENDPOINT: &'static str = ENDPOINT_AGE_RATINGS;
    const FIELDS: &'static [&'static str] = &["id", "rating"];
}

/// Row of a lookup resource (genres, game modes, player perspectives)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugEntry {
    pub id: i64,
    pub slug: String,
}
