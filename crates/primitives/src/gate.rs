//! Declarative predicates over [`Identity`].
//!
//! A [`Gate`] is plain data: it can be built in code, deserialized from a
//! catalogue file, compared, and evaluated against an identity together with a
//! [`FeatureGate`] for named flags. Class support, constant applicability, and
//! constructor presence are all expressed as gates.
//!
//! # File syntax
//!
//! ```toml
//! supported = "always"
//! supported = { families = ["chrome", "edge"] }
//! supported = { feature = "JS_ERROR_STACK_TRACE_LIMIT" }
//! supported = { since = "ff-119" }
//! supported = { any = [{ families = ["chrome"] }, { since = "ff-121" }] }
//! supported = { not = { families = ["ff-esr"] } }
//! ```

use serde::{Deserialize, Serialize};

use crate::{Family, FeatureGate, Identity};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gate {
	/// Holds for every identity.
	#[default]
	Always,
	/// Holds for no identity.
	Never,
	/// Holds for any version of the listed families.
	Families(Vec<Family>),
	/// Delegates to the feature gate for the named flag.
	Feature(String),
	/// Same family as the bound, version at or above it.
	Since(Identity),
	/// Same family as the bound, version at or below it.
	Until(Identity),
	/// Holds when every inner gate holds (vacuously true when empty).
	All(Vec<Gate>),
	/// Holds when any inner gate holds (false when empty).
	Any(Vec<Gate>),
	/// Negation.
	Not(Box<Gate>),
}

impl Gate {
	/// Gate holding for the listed families.
	pub fn families(families: impl IntoIterator<Item = Family>) -> Self {
		Self::Families(families.into_iter().collect())
	}

	/// Gate delegating to a named feature flag.
	pub fn feature(flag: impl Into<String>) -> Self {
		Self::Feature(flag.into())
	}

	/// Gate holding from `bound` onwards within its family.
	pub fn since(bound: Identity) -> Self {
		Self::Since(bound)
	}

	/// Gate holding up to and including `bound` within its family.
	pub fn until(bound: Identity) -> Self {
		Self::Until(bound)
	}

	/// Gate holding for versions in `[low, high]`; both bounds should share a family.
	pub fn between(low: Identity, high: Identity) -> Self {
		Self::All(vec![Self::Since(low), Self::Until(high)])
	}

	/// Gate holding when any of `gates` holds.
	pub fn any(gates: impl IntoIterator<Item = Gate>) -> Self {
		Self::Any(gates.into_iter().collect())
	}

	/// Gate holding when all of `gates` hold.
	pub fn all(gates: impl IntoIterator<Item = Gate>) -> Self {
		Self::All(gates.into_iter().collect())
	}

	/// Negates `self`.
	pub fn negate(self) -> Self {
		Self::Not(Box::new(self))
	}

	/// Evaluates the gate for `identity`.
	pub fn eval(&self, identity: &Identity, features: &dyn FeatureGate) -> bool {
		match self {
			Self::Always => true,
			Self::Never => false,
			Self::Families(families) => families.contains(&identity.family()),
			Self::Feature(flag) => features.has_feature(flag, identity),
			Self::Since(bound) => identity.at_least(bound),
			Self::Until(bound) => identity.at_most(bound),
			Self::All(gates) => gates.iter().all(|g| g.eval(identity, features)),
			Self::Any(gates) => gates.iter().any(|g| g.eval(identity, features)),
			Self::Not(inner) => !inner.eval(identity, features),
		}
	}

	/// Returns the first feature flag referenced anywhere in the gate.
	pub fn first_feature(&self) -> Option<&str> {
		match self {
			Self::Feature(flag) => Some(flag),
			Self::All(gates) | Self::Any(gates) => gates.iter().find_map(Gate::first_feature),
			Self::Not(inner) => inner.first_feature(),
			Self::Always | Self::Never | Self::Families(_) | Self::Since(_) | Self::Until(_) => {
				None
			}
		}
	}
}
