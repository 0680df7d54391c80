use std::sync::Arc;

use hostscope_primitives::{Family, FeatureGate, FeatureTable, Gate, Identity};
use pretty_assertions::assert_eq;

use super::*;
use crate::Scope;

const FAMILIES: [Family; 4] = [Family::Chrome, Family::Edge, Family::Firefox, Family::FirefoxEsr];

fn no_features() -> Arc<dyn FeatureGate> {
	Arc::new(FeatureTable::new())
}

fn sample() -> Catalogue {
	Catalogue::with_records(
		"sample",
		Scope::Main,
		[
			ClassRecord::builder("EventTarget").constructor(Gate::Always).build(),
			ClassRecord::builder("AudioNode").parent("EventTarget").build(),
			ClassRecord::builder("IIRFilterNode")
				.parent("AudioNode")
				.constructor(Gate::Always)
				.build(),
			ClassRecord::builder("HTMLDialogElement")
				.supported(Gate::families([Family::Chrome, Family::Edge]))
				.constructor(Gate::Always)
				.build(),
			ClassRecord::builder("Image")
				.host_object(false)
				.constructor(Gate::Always)
				.build(),
		],
	)
}

#[test]
fn build_filters_unsupported_records() {
	let chrome = Registry::build(&sample(), Identity::new(Family::Chrome, 120), no_features()).unwrap();
	let firefox = Registry::build(&sample(), Identity::new(Family::Firefox, 121), no_features()).unwrap();

	assert_eq!(chrome.len(), 5);
	assert!(chrome.is_exposed("HTMLDialogElement"));
	assert_eq!(firefox.len(), 4);
	assert!(!firefox.is_exposed("HTMLDialogElement"));
	assert!(firefox.get("HTMLDialogElement").is_none());
	assert_eq!(firefox.identity(), &Identity::new(Family::Firefox, 121));
	assert_eq!(firefox.catalogue().label(), "sample");
}

#[test]
fn records_are_shared_with_the_catalogue() {
	let catalogue = sample();
	let registry = Registry::build(&catalogue, Identity::new(Family::Edge, 120), no_features()).unwrap();
	let from_catalogue: &ClassRecord = &catalogue.records()[0];
	let from_registry = registry.get("EventTarget").unwrap();
	assert!(std::ptr::eq(from_catalogue, from_registry));
}

#[test]
fn ancestors_walk_nearest_first() {
	let registry = Registry::build(&sample(), Identity::new(Family::Chrome, 120), no_features()).unwrap();
	let chain: Vec<&str> = registry
		.ancestors("IIRFilterNode")
		.map(|record| record.name.as_str())
		.collect();
	assert_eq!(chain, vec!["IIRFilterNode", "AudioNode", "EventTarget"]);
	assert_eq!(registry.ancestors("Missing").count(), 0);
}

#[test]
fn ancestors_stop_at_unsupported_parent() {
	let catalogue = Catalogue::with_records(
		"broken",
		Scope::Worker,
		[
			ClassRecord::builder("Event").build(),
			ClassRecord::builder("ChromiumEvent")
				.parent("Event")
				.supported(Gate::families([Family::Chrome]))
				.build(),
			ClassRecord::builder("SecurityPolicyViolationEvent")
				.parent("ChromiumEvent")
				.build(),
		],
	);
	let registry = Registry::build(&catalogue, Identity::new(Family::Firefox, 121), no_features()).unwrap();
	let chain: Vec<&str> = registry
		.ancestors("SecurityPolicyViolationEvent")
		.map(|record| record.name.as_str())
		.collect();
	assert_eq!(chain, vec!["SecurityPolicyViolationEvent"]);
}

#[test]
fn constructor_presence_is_per_identity() {
	let catalogue = Catalogue::with_records(
		"ctor",
		Scope::Main,
		[ClassRecord::builder("Notification")
			.constructor(Gate::since(Identity::new(Family::Firefox, 120)))
			.build()],
	);
	let old = Registry::build(&catalogue, Identity::new(Family::Firefox, 119), no_features()).unwrap();
	let new = Registry::build(&catalogue, Identity::new(Family::Firefox, 120), no_features()).unwrap();
	assert!(old.is_exposed("Notification"));
	assert!(!old.has_constructor("Notification"));
	assert!(new.has_constructor("Notification"));
	assert!(!new.has_constructor("Missing"));
}

#[test]
fn class_enumerations_are_sorted() {
	let registry = Registry::build(&sample(), Identity::new(Family::Chrome, 120), no_features()).unwrap();
	assert_eq!(
		registry.class_names(),
		vec!["AudioNode", "EventTarget", "HTMLDialogElement", "IIRFilterNode", "Image"]
	);
	assert_eq!(
		registry.host_object_names(),
		vec!["AudioNode", "EventTarget", "HTMLDialogElement", "IIRFilterNode"]
	);
}

#[test]
fn cycle_fails_for_every_identity() {
	let catalogue = Catalogue::with_records(
		"cyclic",
		Scope::Main,
		[
			ClassRecord::builder("Fine").build(),
			ClassRecord::builder("A")
				.parent("B")
				.supported(Gate::families([Family::Chrome]))
				.build(),
			ClassRecord::builder("B")
				.parent("A")
				.supported(Gate::families([Family::Chrome]))
				.build(),
		],
	);
	for family in FAMILIES {
		let err = Registry::build(&catalogue, Identity::new(family, 100), no_features()).unwrap_err();
		assert!(matches!(err, CatalogueError::ParentCycle { .. }), "{family}: {err}");
	}
}

#[test]
fn duplicate_names_fail_even_when_filtered_out() {
	let catalogue = Catalogue::with_records(
		"dupes",
		Scope::Main,
		[
			ClassRecord::builder("Event")
				.supported(Gate::families([Family::Chrome]))
				.build(),
			ClassRecord::builder("Event")
				.supported(Gate::families([Family::Firefox]))
				.build(),
		],
	);
	let err = Registry::build(&catalogue, Identity::new(Family::Edge, 120), no_features()).unwrap_err();
	assert_eq!(
		err,
		CatalogueError::DuplicateClass {
			catalogue: "main:dupes".into(),
			name: "Event".into(),
		}
	);
}

#[test]
fn registry_is_shareable_across_threads() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<Registry>();
}
