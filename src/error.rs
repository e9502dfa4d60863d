//! Application error type.
//!
//! Every fallible path in the crate returns `AppError`. The binary turns it into
//! a process exit code, the HTTP layer turns it into an `{ok:false, error}`
//! envelope. The message is what the caller sees in both cases.

/// Bad CLI usage, configuration, or request parameters.
pub const EXIT_USAGE: u8 = 2;
/// Upstream answered but nothing usable came back.
pub const EXIT_NO_DATA: u8 = 3;
/// Upstream unreachable or answered with a non-success status.
pub const EXIT_UPSTREAM: u8 = 4;
/// Local failure (terminal, file system, runtime).
pub const EXIT_INTERNAL: u8 = 5;

#[derive(Clone, PartialEq, Eq)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Non-success HTTP status from a provider, e.g. `HTTP 503`.
    ///
    /// `prefix` names the provider when the caller wants it in the message
    /// (`SGS HTTP 503`); pass `""` for the bare form.
    pub fn upstream_status(prefix: &str, status: u16) -> Self {
        let message = if prefix.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("{prefix} HTTP {status}")
        };
        Self::new(EXIT_UPSTREAM, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(EXIT_UPSTREAM, message)
    }

    /// The provider returned data but none of it parsed into a number.
    pub fn no_value() -> Self {
        Self::new(EXIT_NO_DATA, "no_value")
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(EXIT_INTERNAL, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
