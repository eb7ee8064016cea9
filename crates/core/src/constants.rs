//! Endpoint names, page sizes and sentinel labels

/// Records requested per page; IGDB caps `limit` at 500
pub const DEFAULT_PAGE_SIZE: u64 = 500;

/// Options allowed in one filter predicate before the request is split
pub const DEFAULT_MAX_FILTER_OPTIONS: usize = 500;

/// Response header carrying the total number of matching records
pub const TOTAL_COUNT_HEADER: &str = "x-count";

pub const ENDPOINT_RELEASE_DATES: &str = "release_dates";
pub const ENDPOINT_INVOLVED_COMPANIES: &str = "involved_companies";
pub const ENDPOINT_COMPANIES: &str = "companies";
pub const ENDPOINT_MULTIPLAYER_MODES: &str = "multiplayer_modes";
pub const ENDPOINT_GAMES: &str = "games";
pub const ENDPOINT_AGE_RATINGS: &str = "age_ratings";
pub const ENDPOINT_GENRES: &str = "genres";
pub const ENDPOINT_GAME_MODES: &str = "game_modes";
pub const ENDPOINT_PLAYER_PERSPECTIVES: &str = "player_perspectives";

/// Release status "released" on the release_dates resource
pub const RELEASE_STATUS_RELEASED: i64 = 6;

/// Region code for a worldwide release
pub const REGION_WORLDWIDE: i64 = 8;
pub const WORLDWIDE_LABEL: &str = "worldwide";

pub const UNKNOWN_CONTINENT: &str = "Unknown";
pub const NO_RATING: &str = "No Rating";

/// Country code used when a company has none; it resolves to no continent
pub const DEFAULT_COUNTRY_CODE: i64 = 1;

/// Column name of the training target in the feature table
pub const TARGET_COLUMN: &str = "target";

/// Field tagging every raw document with the reference year it was ingested for
pub const REFERENCE_YEAR_FIELD: &str = "dat_ref";
