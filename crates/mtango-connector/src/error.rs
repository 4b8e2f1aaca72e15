use std::borrow::Cow;

use reqwest::StatusCode;

/// All possible error kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The connector cannot be built from the given endpoint or credentials.
    Configuration,
    /// The server answered with an unsuccessful status.
    Remote,
    /// The exchange with the server could not be completed.
    Network,
    /// A response payload cannot be converted into domain objects.
    Decode,
    /// The operation is not supported by the remote protocol.
    NotImplemented,
}

impl ErrorKind {
    pub(crate) const fn description(self) -> &'static str {
        match self {
            Self::Configuration => "Configuration",
            Self::Remote => "Remote",
            Self::Network => "Network",
            Self::Decode => "Decode",
            Self::NotImplemented => "Not Implemented",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Library error.
#[derive(PartialEq)]
pub struct Error {
    kind: ErrorKind,
    info: Cow<'static, str>,
    status: Option<StatusCode>,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error())
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an [`Error`] from an [`ErrorKind`] and a description.
    #[must_use]
    pub fn new(kind: ErrorKind, info: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            info: info.into(),
            status: None,
        }
    }

    pub(crate) fn remote(status: StatusCode, status_text: &str) -> Self {
        Self {
            kind: ErrorKind::Remote,
            info: format!("Failed request: {} {status_text}", status.as_u16()).into(),
            status: Some(status),
        }
    }

    pub(crate) fn not_implemented(operation: &str) -> Self {
        Self::new(
            ErrorKind::NotImplemented,
            format!("`{operation}` is not implemented"),
        )
    }

    pub(crate) fn decode(info: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Decode, info)
    }

    /// Returns the [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error description.
    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Returns the HTTP status of a [`ErrorKind::Remote`] error.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    fn error(&self) -> String {
        format!("{}: {}", self.kind, self.info)
    }
}

// Joins an error with all of its sources.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut info = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        info.push_str(": ");
        info.push_str(&cause.to_string());
        source = cause.source();
    }
    info
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::new(ErrorKind::Network, error_chain(&e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::decode(e.to_string())
    }
}

/// A specialized [`Result`] type for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
