use std::io::Write;

use hostscope_primitives::{Family, FeatureGate, Identity};
use pretty_assertions::assert_eq;

use super::*;
use crate::{ConstantRecord, ConstantValue, ConstructorDescriptor};

#[test]
fn parses_classes_constants_and_gates() {
	let catalogue = parse_catalogue_str(
		r#"
scope = "worker"

[[class]]
name = "Event"
constructor = "always"

[[class.constant]]
name = "NONE"
value = 0

[[class.constant]]
name = "LABEL"
value = "text"
applicable_for = { families = ["chrome"] }

[[class]]
name = "Float32Array"
parent = "Event"
host_object = false
supported = { since = "ff-100" }
"#,
		"inline",
	)
	.unwrap();

	assert_eq!(catalogue.label(), "inline");
	assert_eq!(catalogue.scope(), Scope::Worker);
	assert_eq!(catalogue.len(), 2);

	let event = &catalogue.records()[0];
	assert_eq!(event.name, "Event");
	assert!(event.host_object);
	assert_eq!(event.supported, Gate::Always);
	assert_eq!(event.constructor, Some(ConstructorDescriptor::new(Gate::Always)));
	assert_eq!(
		event.constants,
		vec![
			ConstantRecord::new("NONE", ConstantValue::Int(0), Gate::Always),
			ConstantRecord::new("LABEL", "text", Gate::families([Family::Chrome])),
		]
	);

	let array = &catalogue.records()[1];
	assert_eq!(array.parent.as_deref(), Some("Event"));
	assert!(!array.host_object);
	assert_eq!(array.constructor, None);
	assert_eq!(array.supported, Gate::since(Identity::new(Family::Firefox, 100)));
}

#[test]
fn label_in_document_wins_over_default() {
	let catalogue = parse_catalogue_str("label = \"named\"\n", "fallback").unwrap();
	assert_eq!(catalogue.label(), "named");
	assert_eq!(catalogue.scope(), Scope::Main);
	assert!(catalogue.is_empty());
}

#[test]
fn unknown_keys_are_rejected() {
	let err = parse_catalogue_str(
		r#"
[[class]]
name = "Event"
constructors = "always"
"#,
		"typo",
	)
	.unwrap_err();
	assert!(matches!(err, LoadError::Toml { ref origin, .. } if origin == "typo"), "{err}");
}

#[test]
fn unknown_family_is_a_toml_error() {
	let err = parse_catalogue_str(
		r#"
[[class]]
name = "Event"
supported = { families = ["netscape"] }
"#,
		"family",
	)
	.unwrap_err();
	assert!(matches!(err, LoadError::Toml { .. }));
}

#[test]
fn feature_table_parses_and_evaluates() {
	let table = parse_features_str(
		r#"
[features]
JS_ERROR_STACK_TRACE_LIMIT = { families = ["chrome", "edge"] }
"#,
		"inline",
	)
	.unwrap();
	assert!(table.has_feature("JS_ERROR_STACK_TRACE_LIMIT", &Identity::new(Family::Edge, 120)));
	assert!(!table.has_feature("JS_ERROR_STACK_TRACE_LIMIT", &Identity::new(Family::Firefox, 120)));
}

#[test]
fn nested_feature_reference_is_rejected() {
	let err = parse_features_str(
		r#"
[features]
A = { feature = "B" }
"#,
		"nested",
	)
	.unwrap_err();
	assert_eq!(
		err,
		LoadError::Features {
			origin: "nested".into(),
			source: ParseError::NestedFeature {
				flag: "A".into(),
				nested: "B".into(),
			},
		}
	);
}

#[test]
fn load_catalogue_uses_file_stem_as_label() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("serviceworker.toml");
	let mut file = std::fs::File::create(&path).unwrap();
	writeln!(file, "scope = \"worker\"\n\n[[class]]\nname = \"Client\"").unwrap();
	drop(file);

	let catalogue = load_catalogue(&path).unwrap();
	assert_eq!(catalogue.label(), "serviceworker");
	assert_eq!(catalogue.records()[0].name, "Client");
}

#[test]
fn load_errors_name_the_file() {
	let dir = tempfile::tempdir().unwrap();

	let missing = dir.path().join("missing.toml");
	assert!(matches!(load_catalogue(&missing), Err(LoadError::Io { ref path, .. }) if *path == missing));

	let broken = dir.path().join("broken.toml");
	std::fs::write(&broken, "[[class]\n").unwrap();
	match load_catalogue(&broken).unwrap_err() {
		LoadError::Toml { origin, .. } => assert_eq!(origin, broken.display().to_string()),
		other => panic!("unexpected error: {other}"),
	}
}
