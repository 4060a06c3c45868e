use thiserror::Error;

/// Errors raised by the cost model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A provider id was not present in the active catalog. Unknown ids are
    /// an error rather than a silent $0 line item.
    #[error("unknown {kind} provider '{id}' — cannot price this stack")]
    UnknownProvider { kind: &'static str, id: String },
}
