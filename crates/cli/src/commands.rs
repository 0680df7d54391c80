use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use hostscope_registry::config::{load_catalogue, load_features};
use hostscope_registry::{FeatureGate, FeatureTable, Registry};
use tracing::debug;

use crate::cli::{Command, Query, Source};

/// Executes `command`, writing results to `out`.
pub fn run(command: &Command, out: &mut impl Write) -> anyhow::Result<()> {
	match command {
		Command::Resolve { query, class, json } => {
			let registry = open(query)?;
			let constants = registry.constants(class);
			debug!(class = %class, count = constants.len(), "resolved constants");
			if *json {
				serde_json::to_writer_pretty(&mut *out, &constants)?;
				writeln!(out)?;
			} else {
				for constant in &constants {
					writeln!(out, "{constant}")?;
				}
			}
		}
		Command::Exposed { query, class } => {
			let registry = open(query)?;
			writeln!(out, "{}", registry.is_exposed(class))?;
		}
		Command::Classes { query, all } => {
			let registry = open(query)?;
			let names = if *all {
				registry.class_names()
			} else {
				registry.host_object_names()
			};
			for name in names {
				writeln!(out, "{name}")?;
			}
		}
		Command::Chain { query, class } => {
			let registry = open(query)?;
			for record in registry.ancestors(class) {
				let mut line = record.name.clone();
				if registry.has_constructor(&record.name) {
					line.push_str(" [constructor]");
				}
				if !record.host_object {
					line.push_str(" [metadata]");
				}
				writeln!(out, "{line}")?;
			}
		}
		Command::Check { source } => {
			let catalogue = load_catalogue(&source.catalogue)?;
			feature_gate(source)?;
			catalogue
				.validate()
				.with_context(|| format!("validating {}", source.catalogue.display()))?;
			writeln!(out, "ok: {} ({} classes)", catalogue.id(), catalogue.len())?;
		}
	}
	Ok(())
}

fn open(query: &Query) -> anyhow::Result<Registry> {
	let catalogue = load_catalogue(&query.source.catalogue)?;
	let features = feature_gate(&query.source)?;
	Registry::build(&catalogue, query.identity, features)
		.with_context(|| format!("building registry for {}", query.identity))
}

fn feature_gate(source: &Source) -> anyhow::Result<Arc<dyn FeatureGate>> {
	let table = match &source.features {
		Some(path) => load_features(path)?,
		None => FeatureTable::new(),
	};
	Ok(Arc::new(table))
}
