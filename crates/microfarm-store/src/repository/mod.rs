//! # Repositories
//!
//! One repository per persisted record family. Each holds a [`Store`]
//! clone and implements the recovery discipline its records need.
//!
//! ## The Degrade-and-Retry Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  save(records)                                                      │
//! │     │                                                               │
//! │     ├── ok ────────────────────────────────► stored                 │
//! │     │                                                               │
//! │     └── quota exceeded                                              │
//! │           │                                                         │
//! │           ├── written record has NO inline image → final failure    │
//! │           │                                                         │
//! │           └── inline image payload                                  │
//! │                  │  replace with:                                   │
//! │                  │   - the previous record's non-inline reference   │
//! │                  │     (updates), else                              │
//! │                  │   - the generic placeholder                      │
//! │                  ▼                                                  │
//! │               retry ONCE ── ok → stored degraded                    │
//! │                         └── still failing → final failure           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod equipment;
pub mod order;
pub mod product;
pub mod review;
pub mod session;

use serde::Serialize;
use tracing::warn;

use crate::error::StoreResult;
use crate::image::{self, PLACEHOLDER_IMAGE};
use crate::store::Store;

/// Saves a record sequence, applying the image degrade policy to the
/// record at `index` when the write trips the quota.
///
/// `old_image` carries the previously stored image for updates; adds pass
/// `None` and degrade straight to the placeholder.
pub(crate) fn save_with_image_degrade<T, G, S>(
    store: &Store,
    key: &str,
    records: &mut [T],
    index: usize,
    old_image: Option<String>,
    image_of: G,
    set_image: S,
) -> StoreResult<()>
where
    T: Serialize,
    G: Fn(&T) -> &str,
    S: Fn(&mut T, String),
{
    match store.save(key, &records) {
        Ok(()) => Ok(()),
        Err(err) if err.is_quota() => {
            let Some(record) = records.get(index) else {
                return Err(err);
            };
            if !image::is_inline(image_of(record)) {
                // nothing to shed; the failure is final
                return Err(err);
            }

            let fallback = match old_image {
                Some(old) if !image::is_inline(&old) => old,
                _ => PLACEHOLDER_IMAGE.to_string(),
            };
            warn!(key, "quota exceeded, retrying once with a degraded image");
            if let Some(record) = records.get_mut(index) {
                set_image(record, fallback);
            }
            store.save(key, &records)
        }
        Err(err) => Err(err),
    }
}
