//! Runtime façade for a remotely piloted quadcopter.
//!
//! `Parrot` ties together the video, telemetry and remote-control streams
//! (each an `Acquisition` thread), the outgoing command link (a `Delivery`
//! thread), windowed feature extraction and target tracking.

pub mod command;
pub mod config;
pub mod error;
pub mod parrot;
pub mod telemetry;
pub mod transport;

pub use command::{Camera, Command, CommandDispatcher, Intent};
pub use config::ParrotConfig;
pub use error::ParrotError;
pub use parrot::Parrot;
pub use telemetry::{Attitude, FlightState, TelemetrySample, Velocity};
pub use transport::{FramedImageSource, JsonCommandSink, JsonLineSource};
