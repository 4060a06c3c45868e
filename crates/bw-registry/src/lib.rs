//! # bw-registry
//!
//! Durable client registry stored under `~/.blackwell/registry/`.
//!
//! Layout:
//!
//! ```text
//! registry/
//! ├── index.json                  # denormalized listing, written last
//! └── clients/
//!     └── <client-id>/
//!         ├── manifest.json       # desired state
//!         ├── state.json          # observed state
//!         └── history.json        # append-only event log
//! ```
//!
//! A legacy flat `clients.yml` sitting next to the registry directory is
//! migrated into this layout on first open.

mod error;
mod legacy;
mod store;
mod types;

pub use error::RegistryError;
pub use store::ClientRegistry;
pub use types::{ManifestPatch, NewClient, RegistrySummary, StatePatch};
