use {
    crate::StreamError,
    std::{
        fmt,
        sync::{Arc, Mutex, PoisonError},
    },
    tokio::sync::mpsc,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Fatal(String),
    Cancelled,
}

/// Lifecycle of a transport thread. Only moves forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamState {
    Starting,
    Running,
    Stopped(StopReason),
}

impl StreamState {
    pub fn is_stopped(&self) -> bool {
        matches!(self, StreamState::Stopped(_))
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamState::Starting => write!(f, "starting"),
            StreamState::Running => write!(f, "running"),
            StreamState::Stopped(StopReason::Cancelled) => write!(f, "stopped (cancelled)"),
            StreamState::Stopped(StopReason::Fatal(msg)) => write!(f, "stopped ({msg})"),
        }
    }
}

/// Outcome of a health poll that found no fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub alive: bool,
    pub warnings: Vec<StreamError>,
}

type SharedState = Arc<Mutex<StreamState>>;

fn read_state(state: &SharedState) -> StreamState {
    state.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Transport-thread side of a health link.
pub struct HealthReporter {
    name: String,
    state: SharedState,
    errors: mpsc::UnboundedSender<StreamError>,
}

impl HealthReporter {
    fn set_state(&self, next: StreamState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.is_stopped() {
            *state = next;
        }
    }

    pub fn running(&self) {
        self.set_state(StreamState::Running);
    }

    /// Report a non-fatal error. The stream keeps going.
    pub fn warning(&self, error: StreamError) {
        log::debug!("{}: {}", self.name, error);
        let _ = self.errors.send(error);
    }

    /// Report the error that stopped the stream, then mark it stopped.
    ///
    /// Once a monitor sees the stream stopped, the error is already queued.
    pub fn fatal(&self, error: StreamError) {
        log::error!("{}: {}", self.name, error);
        let reason = StopReason::Fatal(error.message().to_string());
        let _ = self.errors.send(error);
        self.set_state(StreamState::Stopped(reason));
    }

    pub fn cancelled(&self) {
        self.set_state(StreamState::Stopped(StopReason::Cancelled));
    }

    /// Route an error by its severity.
    pub fn report(&self, error: StreamError) {
        if error.is_fatal() {
            self.fatal(error)
        } else {
            self.warning(error)
        }
    }

    pub fn state(&self) -> StreamState {
        read_state(&self.state)
    }
}

/// Control-loop side of a health link: liveness plus the drained error channel.
pub struct HealthMonitor {
    name: String,
    state: SharedState,
    errors: mpsc::UnboundedReceiver<StreamError>,
}

impl HealthMonitor {
    /// Drain every pending error without blocking.
    ///
    /// Warnings are logged and returned in the report. The first fatal error
    /// is returned as `Err`; it is consumed, so the next poll reports the
    /// stream as not alive instead of repeating it.
    pub fn poll(&mut self) -> Result<HealthReport, StreamError> {
        let mut warnings = Vec::new();
        while let Ok(error) = self.errors.try_recv() {
            if error.is_fatal() {
                return Err(error);
            }
            log::warn!("{}: {}", self.name, error);
            warnings.push(error);
        }
        Ok(HealthReport {
            alive: self.is_alive(),
            warnings,
        })
    }

    pub fn is_alive(&self) -> bool {
        !self.state().is_stopped()
    }

    pub fn state(&self) -> StreamState {
        read_state(&self.state)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Create a connected reporter/monitor pair for the stream called `name`.
pub fn health_link(name: &str) -> (HealthReporter, HealthMonitor) {
    let state = Arc::new(Mutex::new(StreamState::Starting));
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        HealthReporter {
            name: name.to_string(),
            state: Arc::clone(&state),
            errors: sender,
        },
        HealthMonitor {
            name: name.to_string(),
            state,
            errors: receiver,
        },
    )
}
