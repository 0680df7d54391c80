//! Process-wide registry cache keyed by (catalogue, identity).
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free. The published map is an immutable snapshot behind [`ArcSwap`].
//! - **Builds:** Serialized by a mutex with a re-check after acquiring it, so each key is
//!   built at most once. Publication copies the map and swaps it in; readers holding an
//!   older snapshot keep their registries alive.
//! - **Failures:** A failed build publishes nothing. Every caller for a malformed
//!   catalogue receives the configuration error.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arc_swap::ArcSwap;
use hostscope_primitives::{FeatureGate, Identity};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::{Catalogue, CatalogueError, CatalogueId, Registry};

type CacheKey = (CatalogueId, Identity);
type Published = FxHashMap<CacheKey, Arc<Registry>>;

/// Lazily built, shared registries for any number of catalogues and identities.
///
/// Catalogues are keyed by [`CatalogueId`], which is unique per catalogue even when
/// labels collide. [`RegistryCache::clear`] drops registries of catalogues that are
/// no longer in use.
pub struct RegistryCache {
	features: Arc<dyn FeatureGate>,
	published: ArcSwap<Published>,
	build_lock: Mutex<()>,
	builds: AtomicUsize,
}

impl RegistryCache {
	/// Creates an empty cache whose registries evaluate feature flags with `features`.
	pub fn new(features: Arc<dyn FeatureGate>) -> Self {
		Self {
			features,
			published: ArcSwap::from_pointee(Published::default()),
			build_lock: Mutex::new(()),
			builds: AtomicUsize::new(0),
		}
	}

	/// Returns the registry for `catalogue` at `identity`, building it on first use.
	pub fn registry(&self, catalogue: &Catalogue, identity: &Identity) -> Result<Arc<Registry>, CatalogueError> {
		let key = (catalogue.id().clone(), *identity);
		if let Some(registry) = self.published.load().get(&key) {
			return Ok(Arc::clone(registry));
		}

		let _guard = self.build_lock.lock();
		if let Some(registry) = self.published.load().get(&key) {
			return Ok(Arc::clone(registry));
		}

		let registry = match Registry::build(catalogue, *identity, Arc::clone(&self.features)) {
			Ok(registry) => Arc::new(registry),
			Err(error) => {
				warn!(catalogue = %catalogue.id(), %identity, %error, "registry build failed");
				return Err(error);
			}
		};
		self.builds.fetch_add(1, Ordering::Relaxed);

		let mut next = Published::clone(&self.published.load());
		next.insert(key, Arc::clone(&registry));
		self.published.store(Arc::new(next));
		debug!(catalogue = %catalogue.id(), %identity, "registry published");

		Ok(registry)
	}

	/// Returns true if `class_name` is exposed in `catalogue` for `identity`.
	pub fn is_exposed(&self, catalogue: &Catalogue, identity: &Identity, class_name: &str) -> Result<bool, CatalogueError> {
		Ok(self.registry(catalogue, identity)?.is_exposed(class_name))
	}

	/// Resolves `class_name`'s constants as owned `(name, value)` pairs.
	pub fn resolve_constants(
		&self,
		catalogue: &Catalogue,
		identity: &Identity,
		class_name: &str,
	) -> Result<Vec<(String, String)>, CatalogueError> {
		let registry = self.registry(catalogue, identity)?;
		Ok(registry
			.constants(class_name)
			.iter()
			.map(|constant| constant.to_pair())
			.collect())
	}

	/// Number of registries currently published.
	pub fn len(&self) -> usize {
		self.published.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.published.load().is_empty()
	}

	/// Total successful builds since creation, including ones discarded by [`Self::clear`].
	pub fn builds(&self) -> usize {
		self.builds.load(Ordering::Relaxed)
	}

	/// Drops every published registry. Outstanding `Arc<Registry>` handles stay valid.
	pub fn clear(&self) {
		let _guard = self.build_lock.lock();
		self.published.store(Arc::new(Published::default()));
	}
}
