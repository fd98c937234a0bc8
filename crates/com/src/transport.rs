use crate::StreamError;

/// Blocking producer of decoded units (frames, telemetry samples, pilot commands).
pub trait Source<T>: Send {
    /// Read the next complete unit. Never returns partial data.
    fn read(&mut self) -> Result<T, StreamError>;
}

/// Blocking consumer of outgoing units.
pub trait Sink<T>: Send {
    fn write(&mut self, item: T) -> Result<(), StreamError>;
}

/// `Source` backed by a closure.
pub struct FnSource<F>(F);

/// `Sink` backed by a closure.
pub struct FnSink<F>(F);

pub fn source_fn<T, F>(f: F) -> FnSource<F>
where
    F: FnMut() -> Result<T, StreamError> + Send,
{
    FnSource(f)
}

pub fn sink_fn<T, F>(f: F) -> FnSink<F>
where
    F: FnMut(T) -> Result<(), StreamError> + Send,
{
    FnSink(f)
}

impl<T, F> Source<T> for FnSource<F>
where
    F: FnMut() -> Result<T, StreamError> + Send,
{
    fn read(&mut self) -> Result<T, StreamError> {
        (self.0)()
    }
}

impl<T, F> Sink<T> for FnSink<F>
where
    F: FnMut(T) -> Result<(), StreamError> + Send,
{
    fn write(&mut self, item: T) -> Result<(), StreamError> {
        (self.0)(item)
    }
}
