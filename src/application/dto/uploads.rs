/// Result of one upload attempt. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub success: bool,
    /// Browse URL of the written file; empty on failure.
    pub url: String,
    pub message: String,
    pub remote_path: String,
    /// True when an existing blob was replaced.
    pub updated: bool,
}
