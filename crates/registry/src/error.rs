use thiserror::Error;

/// Fatal catalogue configuration errors detected while building a registry.
///
/// These abort registry construction for every identity; no partially valid
/// registry is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
	/// Two records in one catalogue share a class name.
	#[error("catalogue {catalogue}: duplicate class {name:?}")]
	DuplicateClass { catalogue: String, name: String },
	/// Following parent links from `class` returns to a class already on the chain.
	#[error("catalogue {catalogue}: parent cycle at {class:?}: {}", .chain.join(" -> "))]
	ParentCycle {
		catalogue: String,
		class: String,
		/// The cycling chain, starting and ending at `class`.
		chain: Vec<String>,
	},
}
