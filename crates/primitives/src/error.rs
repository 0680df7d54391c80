use thiserror::Error;

/// Errors produced while parsing identities or assembling feature tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
	/// Family name is not one of the emulated runtimes.
	#[error("unknown runtime family: {0:?}")]
	UnknownFamily(String),
	/// Version is not one to four dot-separated integers.
	#[error("invalid version: {0:?}")]
	InvalidVersion(String),
	/// Identity string is not `<family>-<version>`.
	#[error("malformed identity {0:?} (expected <family>-<version>, e.g. chrome-120)")]
	MalformedIdentity(String),
	/// A feature table entry refers to another feature flag.
	#[error("feature {flag:?} refers to feature {nested:?}; feature gates cannot nest")]
	NestedFeature { flag: String, nested: String },
}
