//! # bw-core
//!
//! Core types and error types for Blackwell.
//!
//! This crate provides the foundational types shared across all Blackwell
//! crates:
//! - Persisted registry documents (manifest, state, history, index)
//! - Status enums with string round-tripping
//! - Deterministic CDK stack-name generation
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;

pub use entities::history::{ClientHistory, HistoryEvent};
pub use entities::index::{IndexEntry, RegistryIndex};
pub use entities::manifest::ClientManifest;
pub use entities::state::ClientState;
pub use enums::{ClientStatus, IntegrationMode, ServiceType};
pub use errors::CoreError;
