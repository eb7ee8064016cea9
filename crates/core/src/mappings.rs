//! Static code → label dictionaries and the per-process mapping catalog

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::records::SlugEntry;

/// Immutable lookup from an IGDB code to a label.
///
/// Codes with no entry resolve to the dictionary's sentinel,
/// `unknown_<field>` unless overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDictionary {
    field: String,
    sentinel: String,
    entries: BTreeMap<i64, String>,
}

impl MappingDictionary {
    pub fn new<I, S>(field: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            field: field.to_string(),
            sentinel: format!("unknown_{}", field),
            entries: entries.into_iter().map(|(code, label)| (code, label.into())).collect(),
        }
    }

    pub fn with_sentinel(mut self, sentinel: &str) -> Self {
        self.sentinel = sentinel.to_string();
        self
    }

    /// Build a dictionary from `id → slug` lookup rows
    pub fn from_slugs(field: &str, slugs: &[SlugEntry]) -> Self {
        Self::new(field, slugs.iter().map(|s| (s.id, s.slug.clone())))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    pub fn get(&self, code: i64) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    /// Label for `code`, or the sentinel when the code is unknown
    pub fn label(&self, code: i64) -> &str {
        self.get(code).unwrap_or(&self.sentinel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const REGIONS: &[(i64, &str)] = &[
    (1, "europe"),
    (2, "north_america"),
    (3, "australia"),
    (4, "new_zealand"),
    (5, "japan"),
    (6, "china"),
    (7, "asia"),
    (8, "worldwide"),
    (9, "korea"),
    (10, "brazil"),
];

// Platform ids grouped into coarse hardware families
const PLATFORM_GROUPS: &[(&str, &[i64])] = &[
    (
        "classic_console",
        &[59, 66, 60, 68, 67, 18, 19, 29, 78, 30, 32, 23, 7, 8, 11, 4, 21, 5],
    ),
    ("modern_console", &[9, 48, 167, 12, 49, 169, 41, 130]),
    ("portable_console", &[33, 22, 24, 20, 159, 37, 137, 38, 46]),
    (
        "less_common_portable_console",
        &[62, 61, 50, 150, 136, 57, 86, 80, 240, 379, 309],
    ),
    ("pc", &[6, 14, 3, 16, 15, 63, 27, 53, 26, 75, 121]),
    ("mobile", &[34, 39, 405, 74, 73, 72, 417]),
    ("vr", &[385, 165, 471, 164, 161, 162, 384, 386]),
    ("others", &[52, 170, 113, 412, 474]),
];

/// Release region names
pub fn regions() -> &'static MappingDictionary {
    static REGION_MAP: OnceLock<MappingDictionary> = OnceLock::new();
    REGION_MAP.get_or_init(|| MappingDictionary::new("region", REGIONS.iter().copied()))
}

/// Platform id → platform family
pub fn platforms() -> &'static MappingDictionary {
    static PLATFORM_MAP: OnceLock<MappingDictionary> = OnceLock::new();
    PLATFORM_MAP.get_or_init(|| {
        let entries = PLATFORM_GROUPS
            .iter()
            .flat_map(|(group, ids)| ids.iter().map(move |id| (*id, *group)));
        MappingDictionary::new("platforms_name", entries)
    })
}

/// All dictionaries the normalizer needs.
///
/// Regions and platforms are fixed; genres, game modes and player
/// perspectives are slug tables loaded from the API once per run.
#[derive(Debug, Clone)]
pub struct MappingCatalog {
    pub regions: MappingDictionary,
    pub platforms: MappingDictionary,
    pub genres: MappingDictionary,
    pub game_modes: MappingDictionary,
    pub player_perspectives: MappingDictionary,
}

impl MappingCatalog {
    pub fn from_slugs(
        genres: &[SlugEntry],
        game_modes: &[SlugEntry],
        player_perspectives: &[SlugEntry],
    ) -> Self {
        Self {
            regions: regions().clone(),
            platforms: platforms().clone(),
            genres: MappingDictionary::from_slugs("genres_name", genres),
            game_modes: MappingDictionary::from_slugs("game_mode", game_modes),
            player_perspectives: MappingDictionary::from_slugs(
                "player_perspectives",
                player_perspectives,
            ),
        }
    }

    /// Catalog with empty slug tables; every genre/mode/perspective resolves to its sentinel
    pub fn offline() -> Self {
        Self::from_slugs(&[], &[], &[])
    }
}
