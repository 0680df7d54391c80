use rustc_hash::FxHashMap;

use crate::{Gate, Identity, ParseError};

/// Host-supplied lookup answering whether a named feature flag holds for an identity.
///
/// Registries never compute feature truth themselves; every `Gate::Feature`
/// is forwarded here. Closures of shape `Fn(&str, &Identity) -> bool`
/// implement this trait directly.
pub trait FeatureGate: Send + Sync {
	/// Returns whether `flag` is enabled for `identity`. Unknown flags are disabled.
	fn has_feature(&self, flag: &str, identity: &Identity) -> bool;
}

impl<F> FeatureGate for F
where
	F: Fn(&str, &Identity) -> bool + Send + Sync,
{
	fn has_feature(&self, flag: &str, identity: &Identity) -> bool {
		self(flag, identity)
	}
}

/// Feature gate backed by a flag → [`Gate`] table.
///
/// Table gates are evaluated without access to other flags, so an entry that
/// references a feature is rejected on insertion.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
	flags: FxHashMap<String, Gate>,
}

/// Feature gate with every flag disabled, used when evaluating table entries.
struct Disabled;

impl FeatureGate for Disabled {
	fn has_feature(&self, _flag: &str, _identity: &Identity) -> bool {
		false
	}
}

impl FeatureTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table from `(flag, gate)` pairs. Later duplicates replace earlier ones.
	pub fn from_gates<I, S>(entries: I) -> Result<Self, ParseError>
	where
		I: IntoIterator<Item = (S, Gate)>,
		S: Into<String>,
	{
		let mut table = Self::new();
		for (flag, gate) in entries {
			table.insert(flag, gate)?;
		}
		Ok(table)
	}

	/// Adds or replaces a flag.
	pub fn insert(&mut self, flag: impl Into<String>, gate: Gate) -> Result<(), ParseError> {
		let flag = flag.into();
		if let Some(nested) = gate.first_feature() {
			return Err(ParseError::NestedFeature {
				nested: nested.to_string(),
				flag,
			});
		}
		self.flags.insert(flag, gate);
		Ok(())
	}

	/// Returns the gate registered for `flag`.
	pub fn get(&self, flag: &str) -> Option<&Gate> {
		self.flags.get(flag)
	}

	/// Returns the flags enabled for `identity`, sorted.
	pub fn enabled_for(&self, identity: &Identity) -> Vec<&str> {
		let mut enabled: Vec<&str> = self
			.flags
			.iter()
			.filter(|(_, gate)| gate.eval(identity, &Disabled))
			.map(|(flag, _)| flag.as_str())
			.collect();
		enabled.sort_unstable();
		enabled
	}

	pub fn len(&self) -> usize {
		self.flags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.flags.is_empty()
	}
}

impl FeatureGate for FeatureTable {
	fn has_feature(&self, flag: &str, identity: &Identity) -> bool {
		self.flags
			.get(flag)
			.is_some_and(|gate| gate.eval(identity, &Disabled))
	}
}
