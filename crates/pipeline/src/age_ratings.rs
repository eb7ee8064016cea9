//! Age-classification batcher
//!
//! Resolves every age rating id referenced by a batch of games with one
//! (possibly partitioned) fetch instead of one request per game.

use igdb_features_core::query::any_of;
use igdb_features_core::{
    AgeClassification, AgeClassificationTable, AgeRating, AgeRatingGroup, CoreError, FilterSet,
};
use std::collections::BTreeSet;

use crate::igdb::Transport;
use crate::paginate::{fetch_resource, FetchOptions};

pub fn batch_fetch_age_classifications<T: Transport + ?Sized>(
    transport: &mut T,
    ids: &[u64],
    options: FetchOptions,
) -> Result<AgeClassificationTable, CoreError> {
    let unique: BTreeSet<u64> = ids.iter().copied().collect();
    if unique.is_empty() {
        return Ok(AgeClassificationTable::empty());
    }

    tracing::debug!("Classifying {} age ratings", unique.len());

    let filters = FilterSet::new().with("id", any_of(&unique));
    let ratings: Vec<AgeRating> = fetch_resource(transport, Some(&filters), options)?;

    let rows = ratings
        .into_iter()
        .map(|rating| AgeClassification {
            id: rating.id.to_string(),
            age_rating_group: rating.rating.and_then(AgeRatingGroup::from_rating_code),
        })
        .collect();

    Ok(AgeClassificationTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    #[test]
    fn test_no_ids_means_no_calls() {
        let mut transport = ScriptedTransport::new();
        let table =
            batch_fetch_age_classifications(&mut transport, &[], FetchOptions::default()).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.columns(), &["id", "age_rating_group"]);
        assert!(transport.calls.is_empty());
    }

    #[test]
    fn test_ids_are_deduplicated_into_one_query() {
        let mut transport = ScriptedTransport::new().with_records(
            "age_ratings",
            vec![
                json!({ "id": 10, "rating": 11 }),
                json!({ "id": 11, "rating": 6 }),
                json!({ "id": 12, "rating": 99 }),
            ],
        );
        let ids = [12, 10, 11, 10];
        let table =
            batch_fetch_age_classifications(&mut transport, &ids, FetchOptions::default()).unwrap();

        let calls = transport.calls_to("age_ratings");
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("fields id,rating; where id = (10,11,12);"));

        let rows = table.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            AgeClassification {
                id: "10".to_string(),
                age_rating_group: Some(AgeRatingGroup::EighteenPlus),
            }
        );
        assert_eq!(rows[1].age_rating_group, Some(AgeRatingGroup::RatingPending));
        assert_eq!(rows[2].age_rating_group, None);
    }

    #[test]
    fn test_most_restrictive_label() {
        let mut transport = ScriptedTransport::new().with_records(
            "age_ratings",
            vec![json!({ "id": 1, "rating": 3 }), json!({ "id": 2, "rating": 4 })],
        );
        let options = FetchOptions::default();
        let table = batch_fetch_age_classifications(&mut transport, &[1, 2], options).unwrap();

        assert_eq!(table.max_label(&[1, 2]), "16+");
        assert_eq!(table.max_label(&[1]), "12+");
        assert_eq!(table.max_label(&[42]), "No Rating");
    }
}
