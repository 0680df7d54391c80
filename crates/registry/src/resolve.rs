//! Exposed-constant resolution over a registry's inheritance chains.
//!
//! # Policy
//!
//! Walking from the queried class towards the root:
//!
//! 1. **Continuation:** an ancestor that is not a host object ends the walk. The queried
//!    class itself is never subject to this check.
//! 2. **Inclusion:** the queried class always contributes its applicable constants; an
//!    ancestor contributes only when its constructor is present for the identity.
//! 3. **Ordering:** results are stably sorted by constant name, so equal names keep
//!    nearer ancestors first. Equal names are never merged.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::{ConstantValue, Registry};

/// One constant visible on a class's global constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExposedConstant<'a> {
	pub name: &'a str,
	pub value: &'a ConstantValue,
	/// Class whose record declares the constant.
	pub declared_on: &'a str,
	/// Steps from the queried class to `declared_on`.
	pub depth: usize,
}

impl ExposedConstant<'_> {
	/// Returns the owned `(name, value)` pair.
	pub fn to_pair(&self) -> (String, String) {
		(self.name.to_string(), self.value.to_string())
	}
}

/// Formats as `NAME:value`.
impl fmt::Display for ExposedConstant<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.name, self.value)
	}
}

/// Resolves the constants `class_name` exposes for the identity `registry` was built for.
///
/// Returns an empty vector when the class is not exposed in `registry`; use
/// [`is_exposed`] to tell that apart from a class without constants.
pub fn resolve_constants<'a>(registry: &'a Registry, class_name: &str) -> Vec<ExposedConstant<'a>> {
	let identity = registry.identity();
	let features = registry.features();
	let mut collected = Vec::new();

	for (depth, record) in registry.ancestors(class_name).enumerate() {
		let is_leaf = depth == 0;
		if !is_leaf && !record.host_object {
			trace!(class = class_name, ancestor = %record.name, "walk stopped at metadata-only ancestor");
			break;
		}

		let included = is_leaf
			|| record
				.constructor
				.as_ref()
				.is_some_and(|ctor| ctor.present_for.eval(identity, features));
		if !included {
			continue;
		}

		collected.extend(
			record
				.constants
				.iter()
				.filter(|constant| constant.applicable_for.eval(identity, features))
				.map(|constant| ExposedConstant {
					name: &constant.name,
					value: &constant.value,
					declared_on: &record.name,
					depth,
				}),
		);
	}

	collected.sort_by(|a, b| a.name.cmp(b.name));
	collected
}

/// Returns whether `class_name` is exposed in `registry`.
#[inline]
pub fn is_exposed(registry: &Registry, class_name: &str) -> bool {
	registry.is_exposed(class_name)
}

impl Registry {
	/// Resolves `class_name`'s constants for the identity this registry was built for.
	pub fn constants(&self, class_name: &str) -> Vec<ExposedConstant<'_>> {
		resolve_constants(self, class_name)
	}
}
