use thiserror::Error;

/// Errors raised while probing the environment or driving CDK bootstrap.
#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("'{command}' failed: {stderr}")]
    Failed { command: String, stderr: String },

    #[error("unexpected output from '{command}': {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("AWS account could not be determined; check credentials for profile '{profile}'")]
    NoAccount { profile: String },
}
