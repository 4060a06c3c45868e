//! # bw-providers
//!
//! Provider metadata and the compatibility matrix for Blackwell.
//!
//! The [`Catalog`] answers "is this CMS + e-commerce + SSG combination
//! valid?" and "what SSG engines work with provider X?" over descriptor
//! tables. Two sources exist:
//! - the built-in static tables ([`Catalog::builtin`])
//! - the platform-infrastructure factory metadata, resolved once at startup
//!   by [`platform::resolve`] with silent fallback to the static tables.

pub mod catalog;
pub mod descriptors;
pub mod error;
pub mod platform;
mod tables;

pub use catalog::{BudgetProviders, Catalog, Combination, ProviderKind};
pub use descriptors::{CmsProvider, Complexity, EcommerceProvider, SsgEngine};
pub use error::ProviderError;
pub use platform::{CatalogSource, ResolvedCatalog};
