//! Process exit codes.

/// Exit codes for the dupelink binary.
///
/// - 0: Success (run completed, or usage text was requested)
/// - 1: Usage error (malformed size string, bad glob, unknown flag)
/// - 1: General error (the report could not be written)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: the run completed or help was printed.
    Success,
    /// Usage error: options could not be parsed or validated.
    UsageError,
    /// General error: an unexpected failure after startup.
    GeneralError,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::UsageError | Self::GeneralError => 1,
        }
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DL000",
            Self::UsageError => "DL001",
            Self::GeneralError => "DL002",
        }
    }
}
