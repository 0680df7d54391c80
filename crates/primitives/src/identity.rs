use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::ParseError;

/// Runtime families that can be emulated.
///
/// The textual forms (`chrome`, `edge`, `ff`, `ff-esr`) are used in identity
/// strings and catalogue files. `firefox` and `firefox-esr` are accepted as
/// aliases when parsing.
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Serialize,
	Deserialize,
	Display,
	EnumString,
	EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Family {
	/// Chromium-based Google Chrome.
	#[strum(to_string = "chrome")]
	#[serde(rename = "chrome")]
	Chrome,
	/// Chromium-based Microsoft Edge.
	#[strum(to_string = "edge")]
	#[serde(rename = "edge")]
	Edge,
	/// Mozilla Firefox, release channel.
	#[strum(to_string = "ff", serialize = "firefox")]
	#[serde(rename = "ff", alias = "firefox")]
	Firefox,
	/// Mozilla Firefox, extended support release.
	#[strum(to_string = "ff-esr", serialize = "firefox-esr")]
	#[serde(rename = "ff-esr", alias = "firefox-esr")]
	FirefoxEsr,
}

impl Family {
	/// Parses a family name, mapping failures into [`ParseError`].
	pub fn parse(s: &str) -> Result<Self, ParseError> {
		s.parse::<Family>()
			.map_err(|_| ParseError::UnknownFamily(s.to_string()))
	}
}

const MAX_COMPONENTS: usize = 4;

/// Comparable runtime version of up to four dot-separated components.
///
/// Missing components are zero, so `120`, `120.0` and `120.0.0.0` are equal, and
/// display drops trailing zero components. Full browser versions such as
/// `120.0.6099.109` parse as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
	components: [u32; MAX_COMPONENTS],
}

impl Version {
	/// Creates a `major.minor` version.
	pub const fn new(major: u32, minor: u32) -> Self {
		Self {
			components: [major, minor, 0, 0],
		}
	}
}

impl From<u32> for Version {
	fn from(major: u32) -> Self {
		Self::new(major, 0)
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let shown = self
			.components
			.iter()
			.rposition(|&c| c != 0)
			.map_or(1, |last| last + 1);
		write!(f, "{}", self.components[0])?;
		for component in &self.components[1..shown] {
			write!(f, ".{component}")?;
		}
		Ok(())
	}
}

impl FromStr for Version {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || ParseError::InvalidVersion(s.to_string());
		let mut components = [0; MAX_COMPONENTS];
		let mut parts = s.split('.');
		for slot in &mut components {
			match parts.next() {
				Some(part) => *slot = part.parse::<u32>().map_err(|_| invalid())?,
				None => break,
			}
		}
		if parts.next().is_some() {
			return Err(invalid());
		}
		Ok(Self { components })
	}
}

impl TryFrom<String> for Version {
	type Error = ParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Version> for String {
	fn from(value: Version) -> Self {
		value.to_string()
	}
}

/// A simulated runtime: family plus version.
///
/// Identities are the resolution key for registries. Two identities are equal
/// iff both family and version match. Version gates compare only within the
/// same family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity {
	family: Family,
	version: Version,
}

impl Identity {
	/// Creates an identity.
	pub fn new(family: Family, version: impl Into<Version>) -> Self {
		Self {
			family,
			version: version.into(),
		}
	}

	#[inline]
	pub fn family(&self) -> Family {
		self.family
	}

	#[inline]
	pub fn version(&self) -> Version {
		self.version
	}

	/// Returns true if `self` is the same family as `bound` and at least its version.
	pub fn at_least(&self, bound: &Identity) -> bool {
		self.family == bound.family && self.version >= bound.version
	}

	/// Returns true if `self` is the same family as `bound` and at most its version.
	pub fn at_most(&self, bound: &Identity) -> bool {
		self.family == bound.family && self.version <= bound.version
	}
}

impl fmt::Display for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.family, self.version)
	}
}

impl FromStr for Identity {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		// Family names may contain '-', the version never does.
		let Some((family, version)) = s.trim().rsplit_once('-') else {
			return Err(ParseError::MalformedIdentity(s.to_string()));
		};
		if family.is_empty() || version.is_empty() {
			return Err(ParseError::MalformedIdentity(s.to_string()));
		}
		Ok(Self {
			family: Family::parse(family)?,
			version: version.parse()?,
		})
	}
}

impl TryFrom<String> for Identity {
	type Error = ParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Identity> for String {
	fn from(value: Identity) -> Self {
		value.to_string()
	}
}
