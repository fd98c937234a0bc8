//! Stream plumbing between the vehicle transports and the control loop.
//!
//! Every producer/consumer link is a single-slot [`Mailbox`]. Transport
//! threads ([`Acquisition`] for incoming streams, [`Delivery`] for outgoing
//! commands) report classified [`StreamError`]s that the control loop drains
//! through a [`HealthMonitor`].

pub mod acquisition;
pub mod error;
pub mod framing;
pub mod health;
pub mod mailbox;
pub mod transport;

pub use acquisition::{Acquisition, Delivery};
pub use error::{Severity, StreamError};
pub use health::{HealthMonitor, HealthReport, HealthReporter, StopReason, StreamState, health_link};
pub use mailbox::Mailbox;
pub use transport::{FnSink, FnSource, Sink, Source, sink_fn, source_fn};
