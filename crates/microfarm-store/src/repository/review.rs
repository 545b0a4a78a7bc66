//! # Review Repository
//!
//! Persistence for customer reviews. Newest reviews come first, matching
//! how the shop surfaces them.

use microfarm_core::validation::validate_rating;
use microfarm_core::Review;
use tracing::debug;

use crate::error::StoreResult;
use crate::store::Store;
use crate::{bootstrap, keys};

/// Repository for review records.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    store: Store,
}

impl ReviewRepository {
    pub fn new(store: Store) -> Self {
        ReviewRepository { store }
    }

    /// All reviews, newest first; a missing or corrupt record yields the
    /// bootstrap set.
    pub fn all(&self) -> Vec<Review> {
        self.store
            .load_or_seed(keys::REVIEWS, bootstrap::default_reviews)
    }

    /// Reviews for one product.
    pub fn for_product(&self, product_id: &str) -> Vec<Review> {
        self.all()
            .into_iter()
            .filter(|r| r.product_id.as_deref() == Some(product_id))
            .collect()
    }

    /// Adds a review at the front of the sequence.
    pub fn add(&self, review: Review) -> StoreResult<()> {
        validate_rating(review.rating)?;

        debug!(id = %review.id, "adding review");
        let mut reviews = self.all();
        reviews.insert(0, review);
        self.store.save(keys::REVIEWS, &reviews)
    }

    /// Updates a review in place; an unknown id is a no-op.
    pub fn update(&self, updated: Review) -> StoreResult<()> {
        validate_rating(updated.rating)?;

        let mut reviews = self.all();
        let Some(index) = reviews.iter().position(|r| r.id == updated.id) else {
            return Ok(());
        };
        reviews[index] = updated;
        self.store.save(keys::REVIEWS, &reviews)
    }

    /// Deletes the reviews with the given ids; absent ids are no-ops.
    pub fn delete(&self, ids: &[&str]) -> StoreResult<()> {
        let mut reviews = self.all();
        reviews.retain(|r| !ids.contains(&r.id.as_str()));
        self.store.save(keys::REVIEWS, &reviews)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(id: &str, rating: u8) -> Review {
        Review {
            id: id.to_string(),
            user_id: "u-9".to_string(),
            user_name: "Tester".to_string(),
            product_id: Some("kit-001".to_string()),
            rating,
            comment: "ok".to_string(),
            date: Utc::now(),
        }
    }

    #[test]
    fn test_add_prepends() {
        let repo = ReviewRepository::new(Store::in_memory());
        repo.add(review("rev-99", 5)).unwrap();
        assert_eq!(repo.all()[0].id, "rev-99");
    }

    #[test]
    fn test_invalid_rating_rejected_state_unchanged() {
        let repo = ReviewRepository::new(Store::in_memory());
        let before = repo.all();
        assert!(repo.add(review("rev-99", 6)).is_err());
        assert_eq!(repo.all(), before);
    }

    #[test]
    fn test_for_product() {
        let repo = ReviewRepository::new(Store::in_memory());
        repo.add(review("rev-99", 4)).unwrap();
        let matches = repo.for_product("kit-001");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "rev-99");
    }

    #[test]
    fn test_update_and_delete() {
        let repo = ReviewRepository::new(Store::in_memory());
        repo.add(review("rev-99", 4)).unwrap();

        let mut updated = review("rev-99", 5);
        updated.comment = "even better".to_string();
        repo.update(updated).unwrap();
        assert_eq!(repo.all()[0].rating, 5);

        repo.update(review("ghost", 3)).unwrap(); // no-op
        repo.delete(&["rev-99"]).unwrap();
        assert!(repo.all().iter().all(|r| r.id != "rev-99"));
    }
}
