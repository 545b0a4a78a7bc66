//! # Product Repository
//!
//! Persistence for catalog products: bootstrap-backed reads, admin
//! mutations with the image degrade policy, and the image-generation
//! collaborator hook.

use std::sync::Arc;

use microfarm_core::validation::{validate_name, validate_price};
use microfarm_core::Product;
use tracing::debug;

use crate::error::StoreResult;
use crate::image::{self, ImageGenerator, NoopImageGenerator, PLACEHOLDER_IMAGE};
use crate::repository::save_with_image_degrade;
use crate::store::Store;
use crate::{bootstrap, keys};

/// Repository for product records.
///
/// ## Usage
/// ```rust
/// use microfarm_store::{ProductRepository, Store};
///
/// let repo = ProductRepository::new(Store::in_memory());
/// let products = repo.all(); // bootstrap catalog on first read
/// assert!(!products.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: Store,
    generator: Arc<dyn ImageGenerator>,
}

impl ProductRepository {
    /// Creates a repository with no image-generation capability.
    pub fn new(store: Store) -> Self {
        ProductRepository {
            store,
            generator: Arc::new(NoopImageGenerator),
        }
    }

    /// Creates a repository wired to an image-generation collaborator.
    pub fn with_generator(store: Store, generator: Arc<dyn ImageGenerator>) -> Self {
        ProductRepository { store, generator }
    }

    /// All products; a missing or corrupt record yields the bootstrap
    /// catalog.
    pub fn all(&self) -> Vec<Product> {
        self.store
            .load_or_seed(keys::PRODUCTS, bootstrap::default_products)
    }

    /// Looks a product up by id.
    pub fn get(&self, id: &str) -> Option<Product> {
        self.all().into_iter().find(|p| p.id == id)
    }

    /// Adds a product.
    ///
    /// A missing image is filled by the image-generation collaborator
    /// when one is wired up; generation failures are silent and fall back
    /// to the placeholder reference. A quota failure triggers the degrade
    /// policy; a failure of the retried save is surfaced as final.
    pub fn add(&self, mut product: Product) -> StoreResult<()> {
        validate_name(&product.name)?;
        validate_price(product.price)?;

        if image::needs_generation(&product.image) {
            if let Some(generated) =
                self.generator
                    .generate(&product.name, product.category, &product.description)
            {
                product.image = generated;
            }
        }
        if product.image.is_empty() {
            product.image = PLACEHOLDER_IMAGE.to_string();
        }

        debug!(id = %product.id, "adding product");
        let mut products = self.all();
        products.push(product);
        let index = products.len() - 1;
        save_with_image_degrade(
            &self.store,
            keys::PRODUCTS,
            &mut products,
            index,
            None,
            |p| p.image.as_str(),
            |p, image| p.image = image,
        )
    }

    /// Updates a product in place; an unknown id is a no-op.
    ///
    /// On a quota failure with an inline image, the previously stored
    /// non-inline reference is preferred over the generic placeholder.
    pub fn update(&self, updated: Product) -> StoreResult<()> {
        validate_name(&updated.name)?;
        validate_price(updated.price)?;

        let mut products = self.all();
        let Some(index) = products.iter().position(|p| p.id == updated.id) else {
            return Ok(());
        };

        debug!(id = %updated.id, "updating product");
        let old_image = products[index].image.clone();
        products[index] = updated;
        save_with_image_degrade(
            &self.store,
            keys::PRODUCTS,
            &mut products,
            index,
            Some(old_image),
            |p| p.image.as_str(),
            |p, image| p.image = image,
        )
    }

    /// Deletes the products with the given ids; absent ids are no-ops.
    pub fn delete(&self, ids: &[&str]) -> StoreResult<()> {
        let mut products = self.all();
        products.retain(|p| !ids.contains(&p.id.as_str()));
        self.store.save(keys::PRODUCTS, &products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use microfarm_core::{Category, Money};

    fn product(id: &str, image: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: "test".to_string(),
            details: String::new(),
            price: Money::from_units(1000),
            old_price: None,
            is_hit: None,
            image: image.to_string(),
            category: Category::Kit,
            difficulty: None,
            growth_time: None,
            variants: None,
            dimensions: None,
            equipment_ids: Vec::new(),
        }
    }

    #[test]
    fn test_first_read_seeds_bootstrap_catalog() {
        let store = Store::in_memory();
        let repo = ProductRepository::new(store.clone());

        let products = repo.all();
        assert_eq!(products.len(), 6);
        // the seeded catalog was persisted for consistent re-reads
        assert!(store.get_raw(keys::PRODUCTS).unwrap().is_some());
    }

    #[test]
    fn test_add_and_get() {
        let repo = ProductRepository::new(Store::in_memory());
        repo.add(product("kit-099", "https://example.com/x.jpg")).unwrap();

        let found = repo.get("kit-099").unwrap();
        assert_eq!(found.image, "https://example.com/x.jpg");
    }

    #[test]
    fn test_add_fills_missing_image_with_placeholder() {
        let repo = ProductRepository::new(Store::in_memory());
        repo.add(product("kit-099", "")).unwrap();
        assert_eq!(repo.get("kit-099").unwrap().image, PLACEHOLDER_IMAGE);
    }

    #[derive(Debug)]
    struct FixedGenerator;
    impl ImageGenerator for FixedGenerator {
        fn generate(&self, _: &str, _: Category, _: &str) -> Option<String> {
            Some("data:image/jpeg;base64,QUFB".to_string())
        }
    }

    #[test]
    fn test_add_uses_generated_image() {
        let repo =
            ProductRepository::with_generator(Store::in_memory(), Arc::new(FixedGenerator));
        repo.add(product("kit-099", "")).unwrap();
        assert!(repo.get("kit-099").unwrap().image.starts_with("data:"));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let repo = ProductRepository::new(Store::in_memory());
        repo.update(product("ghost", "x")).unwrap();
        assert!(repo.get("ghost").is_none());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let repo = ProductRepository::new(Store::in_memory());
        let before = repo.all().len();
        repo.delete(&["kit-001", "no-such-id"]).unwrap();
        assert_eq!(repo.all().len(), before - 1);
        repo.delete(&["kit-001"]).unwrap();
        assert_eq!(repo.all().len(), before - 1);
    }

    fn quota_fixture() -> (Store, ProductRepository) {
        // Big enough for the catalog with reference images, far too small
        // for an inline payload.
        let store = Store::in_memory_with_budget(16 * 1024);
        let repo = ProductRepository::new(store.clone());
        repo.all(); // seed
        (store, repo)
    }

    fn inline_payload() -> String {
        format!("data:image/jpeg;base64,{}", "Q".repeat(32 * 1024))
    }

    #[test]
    fn test_add_degrades_inline_image_to_placeholder() {
        let (_store, repo) = quota_fixture();
        repo.add(product("kit-099", &inline_payload())).unwrap();
        assert_eq!(repo.get("kit-099").unwrap().image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_update_prefers_old_remote_reference() {
        let (_store, repo) = quota_fixture();

        // stored record has a lightweight remote reference
        let old = "https://example.com/old.jpg";
        repo.add(product("kit-099", old)).unwrap();

        // the update swaps in an inline payload that blows the quota
        repo.update(product("kit-099", &inline_payload())).unwrap();

        // the stored record keeps the old reference - not the inline
        // payload and not the generic placeholder
        assert_eq!(repo.get("kit-099").unwrap().image, old);
    }

    #[test]
    fn test_update_without_inline_image_surfaces_quota_failure() {
        let (_store, repo) = quota_fixture();
        let mut big = product("kit-099", "https://example.com/ok.jpg");
        repo.add(big.clone()).unwrap();

        // not an image problem: the description itself is over budget
        big.details = "x".repeat(32 * 1024);
        let err = repo.update(big).unwrap_err();
        assert!(err.is_quota());
    }

    #[test]
    fn test_retried_save_failure_is_final() {
        // Budget too small even for the degraded record set.
        let store = Store::in_memory_with_budget(64);
        let repo = ProductRepository::new(store);
        let err = repo.add(product("kit-099", &inline_payload())).unwrap_err();
        assert!(err.is_quota());
    }
}
