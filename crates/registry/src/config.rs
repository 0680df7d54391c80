//! TOML loading for catalogues and feature tables.
//!
//! # Catalogue files
//!
//! ```toml
//! label = "worker"          # optional, defaults to the file stem
//! scope = "worker"          # "main" (default) or "worker"
//!
//! [[class]]
//! name = "Event"
//! constructor = "always"
//!
//! [[class.constant]]
//! name = "NONE"
//! value = 0
//!
//! [[class]]
//! name = "SecurityPolicyViolationEvent"
//! parent = "Event"
//! supported = { families = ["chrome", "edge"] }
//! constructor = "always"
//! ```
//!
//! # Feature files
//!
//! ```toml
//! [features]
//! JS_ERROR_STACK_TRACE_LIMIT = { families = ["chrome", "edge"] }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hostscope_primitives::{FeatureTable, Gate, ParseError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{Catalogue, ClassRecord, Scope};

/// Errors loading configuration files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
	#[error("{}: {message}", .path.display())]
	Io { path: PathBuf, message: String },
	#[error("{origin}: invalid TOML: {message}")]
	Toml { origin: String, message: String },
	#[error("{origin}: {source}")]
	Features {
		origin: String,
		#[source]
		source: ParseError,
	},
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogueFile {
	label: Option<String>,
	#[serde(default)]
	scope: Scope,
	#[serde(default, rename = "class")]
	classes: Vec<ClassRecord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FeatureFile {
	#[serde(default)]
	features: BTreeMap<String, Gate>,
}

/// Parses a catalogue document. `default_label` is used when the document has no `label`.
///
/// Only syntax is checked here; structural validation happens when a registry is built.
pub fn parse_catalogue_str(content: &str, default_label: &str) -> Result<Catalogue, LoadError> {
	let file: CatalogueFile = toml::from_str(content).map_err(|e| LoadError::Toml {
		origin: default_label.to_string(),
		message: e.to_string(),
	})?;
	let label = file.label.unwrap_or_else(|| default_label.to_string());
	Ok(Catalogue::with_records(label, file.scope, file.classes))
}

/// Loads a catalogue file, labelled by its `label` key or file stem.
pub fn load_catalogue(path: &Path) -> Result<Catalogue, LoadError> {
	let content = read(path)?;
	let stem = path
		.file_stem()
		.map(|s| s.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.display().to_string());
	let catalogue = parse_catalogue_str(&content, &stem).map_err(|e| with_origin(e, path))?;
	debug!(path = %path.display(), catalogue = %catalogue.id(), classes = catalogue.len(), "catalogue loaded");
	Ok(catalogue)
}

/// Parses a feature table document.
pub fn parse_features_str(content: &str, origin: &str) -> Result<FeatureTable, LoadError> {
	let file: FeatureFile = toml::from_str(content).map_err(|e| LoadError::Toml {
		origin: origin.to_string(),
		message: e.to_string(),
	})?;
	FeatureTable::from_gates(file.features).map_err(|source| LoadError::Features {
		origin: origin.to_string(),
		source,
	})
}

/// Loads a feature table file.
pub fn load_features(path: &Path) -> Result<FeatureTable, LoadError> {
	let content = read(path)?;
	let table = parse_features_str(&content, &path.display().to_string())?;
	debug!(path = %path.display(), flags = table.len(), "feature table loaded");
	Ok(table)
}

fn read(path: &Path) -> Result<String, LoadError> {
	std::fs::read_to_string(path).map_err(|e| LoadError::Io {
		path: path.to_path_buf(),
		message: e.to_string(),
	})
}

fn with_origin(error: LoadError, path: &Path) -> LoadError {
	match error {
		LoadError::Toml { message, .. } => LoadError::Toml {
			origin: path.display().to_string(),
			message,
		},
		other => other,
	}
}

#[cfg(test)]
mod tests;
