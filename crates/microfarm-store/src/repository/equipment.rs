//! # Equipment Repository
//!
//! Persistence for hardware records. Equipment writers run the same
//! image degrade policy as products; the records are referenced (non-
//! owningly) from products, so deletion here never cascades.

use microfarm_core::validation::{validate_name, validate_price};
use microfarm_core::Equipment;
use tracing::debug;

use crate::error::StoreResult;
use crate::repository::save_with_image_degrade;
use crate::store::Store;
use crate::{bootstrap, keys};

/// Repository for equipment records.
#[derive(Debug, Clone)]
pub struct EquipmentRepository {
    store: Store,
}

impl EquipmentRepository {
    pub fn new(store: Store) -> Self {
        EquipmentRepository { store }
    }

    /// All equipment; a missing or corrupt record yields the bootstrap
    /// set.
    pub fn all(&self) -> Vec<Equipment> {
        self.store
            .load_or_seed(keys::EQUIPMENT, bootstrap::default_equipment)
    }

    /// Looks a record up by id.
    pub fn get(&self, id: &str) -> Option<Equipment> {
        self.all().into_iter().find(|e| e.id == id)
    }

    /// Adds an equipment record, degrading an inline image on quota
    /// failure.
    pub fn add(&self, item: Equipment) -> StoreResult<()> {
        validate_name(&item.name)?;
        validate_price(item.price)?;

        debug!(id = %item.id, "adding equipment");
        let mut equipment = self.all();
        equipment.push(item);
        let index = equipment.len() - 1;
        save_with_image_degrade(
            &self.store,
            keys::EQUIPMENT,
            &mut equipment,
            index,
            None,
            |e| e.image.as_str(),
            |e, image| e.image = image,
        )
    }

    /// Updates a record in place; an unknown id is a no-op. Prefers the
    /// previously stored non-inline reference when degrading.
    pub fn update(&self, updated: Equipment) -> StoreResult<()> {
        validate_name(&updated.name)?;
        validate_price(updated.price)?;

        let mut equipment = self.all();
        let Some(index) = equipment.iter().position(|e| e.id == updated.id) else {
            return Ok(());
        };

        debug!(id = %updated.id, "updating equipment");
        let old_image = equipment[index].image.clone();
        equipment[index] = updated;
        save_with_image_degrade(
            &self.store,
            keys::EQUIPMENT,
            &mut equipment,
            index,
            Some(old_image),
            |e| e.image.as_str(),
            |e, image| e.image = image,
        )
    }

    /// Deletes the records with the given ids; absent ids are no-ops.
    pub fn delete(&self, ids: &[&str]) -> StoreResult<()> {
        let mut equipment = self.all();
        equipment.retain(|e| !ids.contains(&e.id.as_str()));
        self.store.save(keys::EQUIPMENT, &equipment)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PLACEHOLDER_IMAGE;
    use microfarm_core::Money;

    fn equipment(id: &str, image: &str) -> Equipment {
        Equipment {
            id: id.to_string(),
            name: format!("Module {id}"),
            price: Money::from_units(500),
            purpose: "Testing".to_string(),
            description: String::new(),
            image: image.to_string(),
            power_consumption: "1 W".to_string(),
            power_rating: "N/A".to_string(),
        }
    }

    #[test]
    fn test_first_read_seeds_bootstrap_set() {
        let repo = EquipmentRepository::new(Store::in_memory());
        assert_eq!(repo.all().len(), 12);
    }

    #[test]
    fn test_add_update_delete() {
        let repo = EquipmentRepository::new(Store::in_memory());
        repo.add(equipment("eq-099", "https://example.com/a.jpg")).unwrap();

        let mut updated = equipment("eq-099", "https://example.com/b.jpg");
        updated.price = Money::from_units(750);
        repo.update(updated).unwrap();
        assert_eq!(repo.get("eq-099").unwrap().price.units(), 750);

        repo.delete(&["eq-099", "missing"]).unwrap();
        assert!(repo.get("eq-099").is_none());
    }

    #[test]
    fn test_quota_degrade_parity_with_products() {
        let store = Store::in_memory_with_budget(16 * 1024);
        let repo = EquipmentRepository::new(store);
        repo.all(); // seed

        let inline = format!("data:image/png;base64,{}", "Q".repeat(32 * 1024));
        repo.add(equipment("eq-099", &inline)).unwrap();
        assert_eq!(repo.get("eq-099").unwrap().image, PLACEHOLDER_IMAGE);
    }
}
