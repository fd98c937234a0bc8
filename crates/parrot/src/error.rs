use {
    com::StreamError,
    std::fmt,
    vision::{ExtractError, GridError, TrackError},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ParrotError {
    Configuration(String),
    TransportWarning(String),
    TransportFatal(String),
    Extraction(String),
    NotInitialized(&'static str),
}

impl ParrotError {
    /// True if the control loop cannot continue.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ParrotError::TransportWarning(_) | ParrotError::Extraction(_)
        )
    }
}

impl fmt::Display for ParrotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParrotError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            ParrotError::TransportWarning(msg) => write!(f, "transport warning: {msg}"),
            ParrotError::TransportFatal(msg) => write!(f, "transport failure: {msg}"),
            ParrotError::Extraction(msg) => write!(f, "extraction error: {msg}"),
            ParrotError::NotInitialized(what) => write!(f, "{what} not initialized"),
        }
    }
}

impl std::error::Error for ParrotError {}

impl From<StreamError> for ParrotError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Warning(msg) => ParrotError::TransportWarning(msg),
            StreamError::Fatal(msg) => ParrotError::TransportFatal(msg),
        }
    }
}

impl From<GridError> for ParrotError {
    fn from(err: GridError) -> Self {
        ParrotError::Configuration(err.to_string())
    }
}

impl From<ExtractError> for ParrotError {
    fn from(err: ExtractError) -> Self {
        if err.is_configuration() {
            ParrotError::Configuration(err.to_string())
        } else {
            ParrotError::Extraction(err.to_string())
        }
    }
}

impl From<TrackError> for ParrotError {
    fn from(err: TrackError) -> Self {
        match err {
            TrackError::InvalidBox(_) => ParrotError::Configuration(err.to_string()),
            TrackError::Rejected(_) => ParrotError::Extraction(err.to_string()),
        }
    }
}
