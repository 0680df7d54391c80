//! Declarative host class records.

use std::fmt;

use hostscope_primitives::Gate;
use serde::{Deserialize, Serialize};

/// Value of a static constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
	Int(i64),
	Str(String),
}

impl fmt::Display for ConstantValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(v) => write!(f, "{v}"),
			Self::Str(s) => f.write_str(s),
		}
	}
}

impl From<i64> for ConstantValue {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<i32> for ConstantValue {
	fn from(v: i32) -> Self {
		Self::Int(i64::from(v))
	}
}

impl From<u32> for ConstantValue {
	fn from(v: u32) -> Self {
		Self::Int(i64::from(v))
	}
}

impl From<u16> for ConstantValue {
	fn from(v: u16) -> Self {
		Self::Int(i64::from(v))
	}
}

impl From<&str> for ConstantValue {
	fn from(v: &str) -> Self {
		Self::Str(v.to_string())
	}
}

impl From<String> for ConstantValue {
	fn from(v: String) -> Self {
		Self::Str(v)
	}
}

/// A static constant declared on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstantRecord {
	pub name: String,
	pub value: ConstantValue,
	/// Identities for which the constant is declared.
	#[serde(default)]
	pub applicable_for: Gate,
}

impl ConstantRecord {
	pub fn new(name: impl Into<String>, value: impl Into<ConstantValue>, applicable_for: Gate) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			applicable_for,
		}
	}
}

/// Presence of a class's global constructor binding.
///
/// A class without a reachable constructor may still exist as a value type;
/// it only lacks a global binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstructorDescriptor {
	pub present_for: Gate,
}

impl ConstructorDescriptor {
	pub fn new(present_for: Gate) -> Self {
		Self { present_for }
	}
}

/// Declarative description of one host class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassRecord {
	/// Class name, unique within a catalogue.
	pub name: String,
	/// Identities for which the class exists at all.
	#[serde(default)]
	pub supported: Gate,
	/// Name of the single parent class.
	#[serde(default)]
	pub parent: Option<String>,
	/// False for metadata-only records (array-like or image-like leaves).
	#[serde(default = "host_object_default")]
	pub host_object: bool,
	#[serde(default)]
	pub constructor: Option<ConstructorDescriptor>,
	/// Declared constants, in declaration order.
	#[serde(default, rename = "constant")]
	pub constants: Vec<ConstantRecord>,
}

fn host_object_default() -> bool {
	true
}

impl ClassRecord {
	/// Starts a builder for a host object supported everywhere, without parent or constructor.
	pub fn builder(name: impl Into<String>) -> ClassRecordBuilder {
		ClassRecordBuilder {
			record: ClassRecord {
				name: name.into(),
				supported: Gate::Always,
				parent: None,
				host_object: true,
				constructor: None,
				constants: Vec::new(),
			},
		}
	}
}

/// Fluent construction of a [`ClassRecord`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ClassRecordBuilder {
	record: ClassRecord,
}

impl ClassRecordBuilder {
	pub fn supported(mut self, gate: Gate) -> Self {
		self.record.supported = gate;
		self
	}

	pub fn parent(mut self, parent: impl Into<String>) -> Self {
		self.record.parent = Some(parent.into());
		self
	}

	pub fn host_object(mut self, on: bool) -> Self {
		self.record.host_object = on;
		self
	}

	/// Declares a constructor present for identities matching `present_for`.
	pub fn constructor(mut self, present_for: Gate) -> Self {
		self.record.constructor = Some(ConstructorDescriptor::new(present_for));
		self
	}

	/// Appends a constant applicable for identities matching `applicable_for`.
	pub fn constant(mut self, name: impl Into<String>, value: impl Into<ConstantValue>, applicable_for: Gate) -> Self {
		self.record
			.constants
			.push(ConstantRecord::new(name, value, applicable_for));
		self
	}

	pub fn build(self) -> ClassRecord {
		self.record
	}
}
