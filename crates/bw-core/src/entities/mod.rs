//! Persisted registry documents.
//!
//! Each document carries a `$schema` URL and a `schema_version` string. The
//! version is written but never checked; migrations happen at the registry
//! layer (legacy `clients.yml` only).

pub mod history;
pub mod index;
pub mod manifest;
pub mod state;
