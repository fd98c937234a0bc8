use std::{fmt, io};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Fatal,
}

/// A transport failure, classified by the transport that raised it.
///
/// A `Warning` leaves the stream usable (a dropped packet, a stalled read).
/// A `Fatal` error ends the stream; no further data will arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    Warning(String),
    Fatal(String),
}

impl StreamError {
    pub fn severity(&self) -> Severity {
        match self {
            StreamError::Warning(_) => Severity::Warning,
            StreamError::Fatal(_) => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    pub fn message(&self) -> &str {
        match self {
            StreamError::Warning(msg) | StreamError::Fatal(msg) => msg,
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Warning(msg) => write!(f, "transport warning: {msg}"),
            StreamError::Fatal(msg) => write!(f, "transport failure: {msg}"),
        }
    }
}

impl std::error::Error for StreamError {}

/// Returns true for I/O errors that only mean "nothing arrived in time".
pub(crate) fn is_stall(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}

impl From<io::Error> for StreamError {
    fn from(err: io::Error) -> Self {
        if is_stall(&err) {
            StreamError::Warning(err.to_string())
        } else {
            StreamError::Fatal(err.to_string())
        }
    }
}
