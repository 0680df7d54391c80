//! Core value types for host object resolution: runtime identities and gates.

/// Parse errors for identities, versions, and feature tables.
pub mod error;
/// Feature flag lookup and the table-backed implementation.
pub mod feature;
/// Declarative predicates over runtime identities.
pub mod gate;
/// Simulated runtime identities (family + version).
pub mod identity;

pub use error::ParseError;
pub use feature::{FeatureGate, FeatureTable};
pub use gate::Gate;
pub use identity::{Family, Identity, Version};
