//! Catalogues of class records and their structural validation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::{CatalogueError, ClassRecord};

/// Scripting context a catalogue describes.
///
/// Main and worker catalogues are separate namespaces and are resolved
/// independently, even when they declare classes with the same names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
	/// Window/document scripting context.
	#[default]
	Main,
	/// Dedicated worker global scope.
	Worker,
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Main => write!(f, "main"),
			Self::Worker => write!(f, "worker"),
		}
	}
}

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

fn next_serial() -> u64 {
	NEXT_SERIAL.fetch_add(1, Ordering::Relaxed)
}

/// Identifies a catalogue for caching and diagnostics.
///
/// Every id carries a process-unique serial, so two catalogues with the same
/// scope and label (e.g. two `main.toml` files) never compare equal. Clones of
/// one catalogue share its id; mutating a catalogue assigns it a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogueId {
	scope: Scope,
	label: Arc<str>,
	serial: u64,
}

impl CatalogueId {
	pub fn new(label: impl Into<Arc<str>>, scope: Scope) -> Self {
		Self {
			scope,
			label: label.into(),
			serial: next_serial(),
		}
	}

	fn renew(&mut self) {
		self.serial = next_serial();
	}

	#[inline]
	pub fn scope(&self) -> Scope {
		self.scope
	}

	#[inline]
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Process-unique serial distinguishing catalogues that share a label.
	#[inline]
	pub fn serial(&self) -> u64 {
		self.serial
	}
}

impl fmt::Display for CatalogueId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.scope, self.label)
	}
}

/// Unfiltered collection of class records for one scripting context.
///
/// Records are immutable once added and shared by reference with every
/// registry built from the catalogue.
#[derive(Debug, Clone)]
pub struct Catalogue {
	id: CatalogueId,
	records: Vec<Arc<ClassRecord>>,
}

impl Catalogue {
	/// Creates an empty catalogue.
	pub fn new(label: impl Into<Arc<str>>, scope: Scope) -> Self {
		Self {
			id: CatalogueId::new(label, scope),
			records: Vec::new(),
		}
	}

	/// Creates a catalogue from records, preserving their order.
	pub fn with_records(label: impl Into<Arc<str>>, scope: Scope, records: impl IntoIterator<Item = ClassRecord>) -> Self {
		let mut catalogue = Self::new(label, scope);
		catalogue.extend(records);
		catalogue
	}

	pub fn push(&mut self, record: ClassRecord) {
		self.records.push(Arc::new(record));
		self.id.renew();
	}

	pub fn extend<I: IntoIterator<Item = ClassRecord>>(&mut self, records: I) {
		self.records.extend(records.into_iter().map(Arc::new));
		self.id.renew();
	}

	#[inline]
	pub fn id(&self) -> &CatalogueId {
		&self.id
	}

	#[inline]
	pub fn scope(&self) -> Scope {
		self.id.scope
	}

	#[inline]
	pub fn label(&self) -> &str {
		self.id.label()
	}

	/// Returns every record in declaration order.
	#[inline]
	pub fn records(&self) -> &[Arc<ClassRecord>] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Checks catalogue-wide invariants: unique class names and acyclic parent chains.
	///
	/// Validation ignores identities entirely, so a malformed catalogue fails for
	/// every identity, including ones where the offending classes are not supported.
	/// Parent names that no record declares are broken links, not errors.
	pub fn validate(&self) -> Result<(), CatalogueError> {
		let index = self.index_by_name()?;
		self.check_acyclic(&index)
	}

	fn index_by_name(&self) -> Result<HashMap<&str, usize>, CatalogueError> {
		let mut index = HashMap::with_capacity_and_hasher(self.records.len(), Default::default());
		for (slot, record) in self.records.iter().enumerate() {
			if index.insert(record.name.as_str(), slot).is_some() {
				return Err(CatalogueError::DuplicateClass {
					catalogue: self.id.to_string(),
					name: record.name.clone(),
				});
			}
		}
		Ok(index)
	}

	fn check_acyclic(&self, index: &HashMap<&str, usize>) -> Result<(), CatalogueError> {
		#[derive(Clone, Copy, PartialEq, Eq)]
		enum Mark {
			Unvisited,
			OnPath,
			Done,
		}

		let mut marks = vec![Mark::Unvisited; self.records.len()];
		let mut path: Vec<usize> = Vec::new();

		for start in 0..self.records.len() {
			if marks[start] != Mark::Unvisited {
				continue;
			}

			path.clear();
			let mut current = Some(start);
			while let Some(slot) = current {
				match marks[slot] {
					Mark::Done => break,
					Mark::OnPath => {
						let pos = path.iter().position(|&p| p == slot).unwrap_or_default();
						let mut chain: Vec<String> = path[pos..]
							.iter()
							.map(|&p| self.records[p].name.clone())
							.collect();
						chain.push(self.records[slot].name.clone());
						return Err(CatalogueError::ParentCycle {
							catalogue: self.id.to_string(),
							class: self.records[slot].name.clone(),
							chain,
						});
					}
					Mark::Unvisited => {
						marks[slot] = Mark::OnPath;
						path.push(slot);
						current = self.records[slot]
							.parent
							.as_deref()
							.and_then(|parent| index.get(parent).copied());
					}
				}
			}

			for &slot in &path {
				marks[slot] = Mark::Done;
			}
		}

		Ok(())
	}
}
