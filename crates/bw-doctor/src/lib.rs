//! # bw-doctor
//!
//! Environment diagnostics for Blackwell: external tool probes, AWS
//! credential checks, and CDK bootstrap state. Everything here shells out to
//! the `aws` and `cdk` CLIs; nothing talks to AWS APIs directly.

mod bootstrap;
mod diagnose;
mod error;
mod tools;

pub use bootstrap::{BootstrapChecker, BootstrapOutcome, BootstrapStatus};
pub use diagnose::{passed, Diagnostic, Severity, SystemDoctor};
pub use error::DoctorError;
pub use tools::{aws_identity, aws_region, check_command, AwsIdentity};
