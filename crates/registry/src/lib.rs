//! Host class registries and inherited constant resolution.
//!
//! # Mental Model
//!
//! 1. **Declare:** A [`Catalogue`] holds declarative [`ClassRecord`]s for one scripting
//!    context (main or worker). Records carry [`Gate`]s instead of behavior.
//! 2. **Build:** [`Registry::build`] validates the whole catalogue (unique names, acyclic
//!    parent chains) and indexes the records supported by one [`Identity`].
//! 3. **Resolve:** [`resolve_constants`] walks a class's parent chain through the registry
//!    and returns the constants visible on its global constructor, sorted by name.
//! 4. **Share:** [`RegistryCache`] builds each (catalogue, identity) registry at most once
//!    and publishes it for lock-free concurrent reads.
//!
//! # Invariants
//!
//! - A registry is never returned for a malformed catalogue, whatever the identity.
//!   - Enforced in: [`Catalogue::validate`], called from [`Registry::build`].
//! - Leaf constants are always included; ancestor constants only through a present constructor.
//!   - Enforced in: [`resolve_constants`].
//! - Resolved output is sorted by constant name and independent of declaration order.
//!   - Enforced in: [`resolve_constants`] (stable sort keeps nearer ancestors first on ties).

mod cache;
mod catalogue;
pub mod config;
mod error;
mod record;
mod registry;
mod resolve;

pub use cache::RegistryCache;
pub use catalogue::{Catalogue, CatalogueId, Scope};
pub use error::CatalogueError;
pub use hostscope_primitives::{Family, FeatureGate, FeatureTable, Gate, Identity, Version};
pub use record::{ClassRecord, ClassRecordBuilder, ConstantRecord, ConstantValue, ConstructorDescriptor};
pub use registry::{Ancestors, Registry};
pub use resolve::{ExposedConstant, is_exposed, resolve_constants};
