use {
    crate::{
        HealthMonitor, HealthReport, Mailbox, Sink, Source, StreamError, StreamState,
        health::{HealthReporter, health_link},
    },
    std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        thread::{self, JoinHandle},
        time::Duration,
    },
    tokio::sync::oneshot,
};

// how often an idle delivery thread checks for cancellation
const DELIVERY_POLL_MS: u64 = 20;

fn thread_died(name: &str) -> StreamError {
    StreamError::Fatal(format!("{name} thread died during startup"))
}

/// Background thread that keeps the freshest unit of an incoming stream.
///
/// The thread owns the source and loops `read → put` until the source fails
/// fatally or the handle is dropped. A source blocked inside `read` is only
/// noticed as cancelled once that read returns.
pub struct Acquisition<T> {
    mailbox: Mailbox<T>,
    health: HealthMonitor,
    cancel: Arc<AtomicBool>,
    join_handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Acquisition<T> {
    /// Start the thread and wait until the first unit is in the mailbox.
    ///
    /// Warnings during startup are reported and retried. A fatal error before
    /// the first unit is returned here.
    pub fn spawn<S>(name: &str, mut source: S) -> Result<Self, StreamError>
    where
        S: Source<T> + 'static,
    {
        let mailbox = Mailbox::new();
        let cancel = Arc::new(AtomicBool::new(false));
        let (reporter, health) = health_link(name);
        let (init_tx, init_rx) = oneshot::channel::<Result<(), StreamError>>();

        let join_handle = thread::Builder::new()
            .name(name.to_string())
            .spawn({
                let mailbox = mailbox.clone();
                let cancel = Arc::clone(&cancel);
                let name = name.to_string();
                move || {
                    // first unit
                    loop {
                        match source.read() {
                            Ok(item) => {
                                mailbox.put(item);
                                reporter.running();
                                let _ = init_tx.send(Ok(()));
                                break;
                            }
                            Err(error) if error.is_fatal() => {
                                reporter.fatal(error.clone());
                                let _ = init_tx.send(Err(error));
                                return;
                            }
                            Err(error) => reporter.warning(error),
                        }
                        if cancel.load(Ordering::Relaxed) {
                            reporter.cancelled();
                            return;
                        }
                    }

                    log::info!("{name}: acquisition running");
                    Self::pump(&name, &mut source, &mailbox, &reporter, &cancel);
                }
            })
            .map_err(|error| StreamError::Fatal(error.to_string()))?;

        init_rx.blocking_recv().map_err(|_| thread_died(name))??;

        Ok(Self {
            mailbox,
            health,
            cancel,
            join_handle: Some(join_handle),
        })
    }

    fn pump<S: Source<T>>(
        name: &str,
        source: &mut S,
        mailbox: &Mailbox<T>,
        reporter: &HealthReporter,
        cancel: &AtomicBool,
    ) {
        while !cancel.load(Ordering::Relaxed) {
            match source.read() {
                Ok(item) => {
                    if mailbox.put(item) {
                        log::debug!("{name}: dropped stale unit");
                    }
                }
                Err(error) if error.is_fatal() => {
                    reporter.fatal(error);
                    return;
                }
                Err(error) => reporter.warning(error),
            }
        }
        reporter.cancelled();
    }
}

impl<T> Acquisition<T> {
    /// Wait for the next unit. Blocks forever if the stream has stopped;
    /// callers that need a bound use `get_timeout`.
    pub fn get(&self) -> T {
        self.mailbox.get()
    }

    pub fn try_get(&self) -> Option<T> {
        self.mailbox.try_get()
    }

    pub fn get_timeout(&self, timeout: Duration) -> Option<T> {
        self.mailbox.get_timeout(timeout)
    }

    /// Drain pending errors; see `HealthMonitor::poll`.
    pub fn check(&mut self) -> Result<HealthReport, StreamError> {
        self.health.poll()
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn state(&self) -> StreamState {
        self.health.state()
    }

    /// Ask the thread to stop after its current read.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

impl<T> Drop for Acquisition<T> {
    fn drop(&mut self) {
        self.cancel();
        // the source may be blocked in read, so the thread is not joined
        drop(self.join_handle.take());
    }
}

/// Background thread that forwards the freshest outgoing unit to a sink.
///
/// Units waiting in the mailbox are overwritten by newer ones, so a slow sink
/// only ever writes the latest command. Dropping the handle flushes a pending
/// unit and stops the thread.
pub struct Delivery<T> {
    mailbox: Mailbox<T>,
    health: HealthMonitor,
    cancel: Arc<AtomicBool>,
    join_handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Delivery<T> {
    /// Start the thread and wait until it reports running.
    pub fn spawn<S>(name: &str, mut sink: S) -> Result<Self, StreamError>
    where
        S: Sink<T> + 'static,
    {
        let mailbox = Mailbox::<T>::new();
        let cancel = Arc::new(AtomicBool::new(false));
        let (reporter, health) = health_link(name);
        let (init_tx, init_rx) = oneshot::channel::<()>();

        let join_handle = thread::Builder::new()
            .name(name.to_string())
            .spawn({
                let mailbox = mailbox.clone();
                let cancel = Arc::clone(&cancel);
                let name = name.to_string();
                move || {
                    reporter.running();
                    let _ = init_tx.send(());
                    log::info!("{name}: delivery running");

                    let poll = Duration::from_millis(DELIVERY_POLL_MS);
                    while !cancel.load(Ordering::Relaxed) {
                        if let Some(item) = mailbox.get_timeout(poll) {
                            if let Err(error) = sink.write(item) {
                                let fatal = error.is_fatal();
                                reporter.report(error);
                                if fatal {
                                    return;
                                }
                            }
                        }
                    }

                    // flush the last command before leaving
                    if let Some(item) = mailbox.try_get() {
                        if let Err(error) = sink.write(item) {
                            reporter.report(error);
                        }
                    }
                    reporter.cancelled();
                }
            })
            .map_err(|error| StreamError::Fatal(error.to_string()))?;

        init_rx.blocking_recv().map_err(|_| thread_died(name))?;

        Ok(Self {
            mailbox,
            health,
            cancel,
            join_handle: Some(join_handle),
        })
    }
}

impl<T> Delivery<T> {
    /// Queue `item` for delivery, replacing any unit not yet written. Never blocks.
    pub fn send(&self, item: T) {
        self.mailbox.put(item);
    }

    /// Another handle to the outgoing mailbox.
    pub fn sender(&self) -> Mailbox<T> {
        self.mailbox.clone()
    }

    pub fn check(&mut self) -> Result<HealthReport, StreamError> {
        self.health.poll()
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn state(&self) -> StreamState {
        self.health.state()
    }

    /// Stop the thread and wait for it to write any pending unit.
    pub fn close(mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(join_handle) = self.join_handle.take() {
            let _ = join_handle.join();
        }
    }
}

impl<T> Drop for Delivery<T> {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}
