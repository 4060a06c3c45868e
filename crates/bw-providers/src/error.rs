use thiserror::Error;

/// Errors raised while resolving or querying provider catalogs.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown {kind} provider '{id}'")]
    UnknownProvider { kind: &'static str, id: String },

    #[error("platform metadata dump failed: {0}")]
    PlatformDump(String),

    #[error("platform metadata is not valid JSON: {0}")]
    PlatformJson(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
