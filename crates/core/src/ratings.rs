//! Age rating buckets and the classification table used for joins

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::NO_RATING;

/// Age rating bucket, ordered from least to most restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeRatingGroup {
    #[serde(rename = "Rating Pending")]
    RatingPending,
    #[serde(rename = "All Ages")]
    AllAges,
    #[serde(rename = "3+")]
    ThreePlus,
    #[serde(rename = "6+")]
    SixPlus,
    #[serde(rename = "10+")]
    TenPlus,
    #[serde(rename = "12+")]
    TwelvePlus,
    #[serde(rename = "14+")]
    FourteenPlus,
    #[serde(rename = "15+")]
    FifteenPlus,
    #[serde(rename = "16+")]
    SixteenPlus,
    #[serde(rename = "18+")]
    EighteenPlus,
}

impl AgeRatingGroup {
    pub fn label(self) -> &'static str {
        match self {
            AgeRatingGroup::RatingPending => "Rating Pending",
            AgeRatingGroup::AllAges => "All Ages",
            AgeRatingGroup::ThreePlus => "3+",
            AgeRatingGroup::SixPlus => "6+",
            AgeRatingGroup::TenPlus => "10+",
            AgeRatingGroup::TwelvePlus => "12+",
            AgeRatingGroup::FourteenPlus => "14+",
            AgeRatingGroup::FifteenPlus => "15+",
            AgeRatingGroup::SixteenPlus => "16+",
            AgeRatingGroup::EighteenPlus => "18+",
        }
    }

    /// Bucket for an IGDB rating category code (PEGI, ESRB, CERO, USK, GRAC,
    /// CLASS_IND and ACB codes 1..=39)
    pub fn from_rating_code(code: i64) -> Option<Self> {
        use AgeRatingGroup::*;
        let group = match code {
            1 => ThreePlus,
            2 | 19 | 35 => SixPlus,
            3 | 10 | 14 | 20 | 24 | 30 => TwelvePlus,
            4 | 15 | 21 | 32 => SixteenPlus,
            5 | 11 | 12 | 16 | 17 | 22 | 26 | 27 | 33 | 38 | 39 => EighteenPlus,
            6 => RatingPending,
            7 | 8 | 13 | 18 | 23 | 28 | 34 => AllAges,
            9 | 29 => TenPlus,
            25 | 36 | 37 => FifteenPlus,
            31 => FourteenPlus,
            _ => return None,
        };
        Some(group)
    }
}

/// One classified age rating; `id` is kept as a string for joins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeClassification {
    pub id: String,
    pub age_rating_group: Option<AgeRatingGroup>,
}

/// Age rating id → bucket, as returned by one batched lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeClassificationTable {
    rows: Vec<AgeClassification>,
}

impl AgeClassificationTable {
    pub const COLUMNS: [&'static str; 2] = ["id", "age_rating_group"];

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<AgeClassification>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    pub fn rows(&self) -> &[AgeClassification] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index by id; the first row wins on duplicate ids
    pub fn index(&self) -> HashMap<&str, AgeRatingGroup> {
        let mut index = HashMap::new();
        for row in &self.rows {
            if let Some(group) = row.age_rating_group {
                index.entry(row.id.as_str()).or_insert(group);
            }
        }
        index
    }

    /// Most restrictive bucket among `rating_ids`, or "No Rating"
    pub fn max_label(&self, rating_ids: &[u64]) -> String {
        let index = self.index();
        rating_ids
            .iter()
            .filter_map(|id| index.get(id.to_string().as_str()).copied())
            .max()
            .map(|group| group.label().to_string())
            .unwrap_or_else(|| NO_RATING.to_string())
    }
}
