//! Per-identity registry of supported class records.
//!
//! # Role
//!
//! A [`Registry`] is the filtered, name-indexed view of one [`Catalogue`] for one
//! [`Identity`]. It is immutable after [`Registry::build`] and safe to share across
//! threads. Parent links are followed by name lookup; a parent filtered out for the
//! identity ends the inheritance walk.

use std::fmt;
use std::sync::Arc;

use hostscope_primitives::{FeatureGate, Identity};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{Catalogue, CatalogueError, CatalogueId, ClassRecord};

pub struct Registry {
	catalogue: CatalogueId,
	identity: Identity,
	features: Arc<dyn FeatureGate>,
	by_name: FxHashMap<Box<str>, Arc<ClassRecord>>,
}

impl Registry {
	/// Builds the registry of `catalogue` for `identity`.
	///
	/// The whole catalogue is validated first; a duplicate name or parent cycle
	/// anywhere fails the build regardless of which classes `identity` supports.
	/// Records whose `supported` gate fails are omitted entirely.
	pub fn build(catalogue: &Catalogue, identity: Identity, features: Arc<dyn FeatureGate>) -> Result<Self, CatalogueError> {
		catalogue.validate()?;

		let mut by_name = FxHashMap::with_capacity_and_hasher(catalogue.len(), Default::default());
		for record in catalogue.records() {
			if record.supported.eval(&identity, features.as_ref()) {
				by_name.insert(Box::from(record.name.as_str()), Arc::clone(record));
			}
		}

		for record in by_name.values() {
			if let Some(parent) = record.parent.as_deref()
				&& !by_name.contains_key(parent)
			{
				trace!(
					catalogue = %catalogue.id(),
					%identity,
					class = %record.name,
					missing_parent = parent,
					"parent not exposed; inheritance walk stops here"
				);
			}
		}

		debug!(
			catalogue = %catalogue.id(),
			%identity,
			exposed = by_name.len(),
			declared = catalogue.len(),
			"registry built"
		);

		Ok(Self {
			catalogue: catalogue.id().clone(),
			identity,
			features,
			by_name,
		})
	}

	#[inline]
	pub fn identity(&self) -> &Identity {
		&self.identity
	}

	#[inline]
	pub fn catalogue(&self) -> &CatalogueId {
		&self.catalogue
	}

	/// Returns the feature gate the registry was built with.
	#[inline]
	pub fn features(&self) -> &dyn FeatureGate {
		self.features.as_ref()
	}

	/// Looks up an exposed class by name.
	#[inline]
	pub fn get(&self, name: &str) -> Option<&ClassRecord> {
		self.by_name.get(name).map(Arc::as_ref)
	}

	/// Returns true if `name` is exposed for this registry's identity.
	///
	/// Unknown names and names filtered out for the identity are indistinguishable.
	#[inline]
	pub fn is_exposed(&self, name: &str) -> bool {
		self.by_name.contains_key(name)
	}

	/// Returns the exposed parent of `record`, if its parent link is intact.
	pub fn parent_of(&self, record: &ClassRecord) -> Option<&ClassRecord> {
		record.parent.as_deref().and_then(|parent| self.get(parent))
	}

	/// Iterates from `name` through its exposed ancestors, nearest first.
	///
	/// Yields nothing for a class that is not exposed.
	pub fn ancestors<'a>(&'a self, name: &str) -> Ancestors<'a> {
		Ancestors {
			registry: self,
			next: self.get(name),
		}
	}

	/// Returns true if `name` is exposed and has a constructor present for this identity.
	pub fn has_constructor(&self, name: &str) -> bool {
		self.get(name)
			.and_then(|record| record.constructor.as_ref())
			.is_some_and(|ctor| ctor.present_for.eval(&self.identity, self.features()))
	}

	/// Returns every exposed class name, sorted.
	pub fn class_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.by_name.keys().map(|name| &**name).collect();
		names.sort_unstable();
		names
	}

	/// Returns exposed class names that are genuine host objects, sorted.
	///
	/// Metadata-only records are excluded.
	pub fn host_object_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self
			.by_name
			.values()
			.filter(|record| record.host_object)
			.map(|record| record.name.as_str())
			.collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("catalogue", &self.catalogue)
			.field("identity", &self.identity)
			.field("classes", &self.by_name.len())
			.finish_non_exhaustive()
	}
}

/// Inheritance walk over a [`Registry`], starting at the queried class.
///
/// Terminates because catalogues are validated acyclic before a registry exists.
#[derive(Clone)]
pub struct Ancestors<'a> {
	registry: &'a Registry,
	next: Option<&'a ClassRecord>,
}

impl<'a> Iterator for Ancestors<'a> {
	type Item = &'a ClassRecord;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;
		self.next = self.registry.parent_of(current);
		Some(current)
	}
}

#[cfg(test)]
mod tests;
