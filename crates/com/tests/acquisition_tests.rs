use {
    com::{Acquisition, Delivery, Mailbox, StopReason, StreamError, StreamState, sink_fn, source_fn},
    std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
        thread,
        time::{Duration, Instant},
    },
};

const PATIENCE: Duration = Duration::from_secs(5);

// scripted source: plays back results, then parks on a gate forever
fn scripted(script: Vec<Result<u32, StreamError>>) -> impl FnMut() -> Result<u32, StreamError> + Send {
    let mut script: VecDeque<_> = script.into();
    let gate = Mailbox::<()>::new();
    move || match script.pop_front() {
        Some(result) => result,
        None => {
            gate.get();
            unreachable!()
        }
    }
}

fn wait_until(mut condition: impl FnMut() -> bool) {
    let start = Instant::now();
    while !condition() {
        assert!(start.elapsed() < PATIENCE, "timed out waiting");
        thread::sleep(Duration::from_millis(5));
    }
}

// ---------------------------------------------------------------- source mode

#[test]
fn test_spawn_waits_for_first_unit() {
    let acquisition = Acquisition::spawn("test-video", source_fn(scripted(vec![Ok(1)]))).unwrap();
    assert!(acquisition.is_alive());
    assert_eq!(acquisition.try_get(), Some(1));
}

#[test]
fn test_first_read_fatal_fails_spawn() {
    let result = Acquisition::spawn(
        "test-video",
        source_fn(scripted(vec![Err(StreamError::Fatal("no camera".to_string()))])),
    );
    match result {
        Err(StreamError::Fatal(msg)) => assert_eq!(msg, "no camera"),
        Err(other) => panic!("expected fatal, got {:?}", other),
        Ok(_) => panic!("expected spawn to fail"),
    }
}

#[test]
fn test_startup_warnings_are_retried() {
    let mut acquisition = Acquisition::spawn(
        "test-navdata",
        source_fn(scripted(vec![
            Err(StreamError::Warning("no data yet".to_string())),
            Ok(5),
        ])),
    )
    .unwrap();
    assert_eq!(acquisition.get(), 5);

    let report = acquisition.check().unwrap();
    assert!(report.alive);
    assert_eq!(report.warnings, vec![StreamError::Warning("no data yet".to_string())]);
}

#[test]
fn test_consumer_sees_freshest_unit() {
    let (tx, rx) = std::sync::mpsc::channel::<u32>();
    tx.send(0).unwrap();
    let acquisition = Acquisition::spawn(
        "test-video",
        source_fn(move || {
            rx.recv()
                .map_err(|_| StreamError::Fatal("producer gone".to_string()))
        }),
    )
    .unwrap();
    assert_eq!(acquisition.get(), 0);

    for i in 1..=3 {
        tx.send(i).unwrap();
    }
    // wait until the last unit lands; earlier ones are overwritten
    let mut latest = None;
    wait_until(|| {
        if let Some(unit) = acquisition.try_get() {
            latest = Some(unit);
        }
        latest == Some(3)
    });
}

#[test]
fn test_fatal_after_start_stops_stream() {
    let mut acquisition = Acquisition::spawn(
        "test-video",
        source_fn(scripted(vec![
            Ok(1),
            Err(StreamError::Warning("glitch".to_string())),
            Err(StreamError::Fatal("link lost".to_string())),
        ])),
    )
    .unwrap();

    wait_until(|| !acquisition.is_alive());

    // the warning comes first, then the fatal exactly once
    let report = acquisition.check();
    match report {
        Err(StreamError::Fatal(msg)) => assert_eq!(msg, "link lost"),
        other => panic!("expected fatal, got {:?}", other),
    }
    let report = acquisition.check().unwrap();
    assert!(!report.alive);
}

#[test]
fn test_cancel_stops_after_current_read() {
    let acquisition = Acquisition::spawn(
        "test-navdata",
        source_fn(|| {
            thread::sleep(Duration::from_millis(5));
            Ok(1u32)
        }),
    )
    .unwrap();
    assert_eq!(acquisition.state(), StreamState::Running);

    acquisition.cancel();
    wait_until(|| acquisition.state() == StreamState::Stopped(StopReason::Cancelled));
    assert!(!acquisition.is_alive());
}

#[test]
fn test_drop_releases_source() {
    let token = Arc::new(());
    let acquisition = Acquisition::spawn("test-navdata", {
        let token = Arc::clone(&token);
        source_fn(move || {
            let _held = &token;
            thread::sleep(Duration::from_millis(5));
            Ok(1u32)
        })
    })
    .unwrap();
    assert_eq!(Arc::strong_count(&token), 2);

    // the thread exits and drops the source once it sees the cancel flag
    drop(acquisition);
    wait_until(|| Arc::strong_count(&token) == 1);
}

// ------------------------------------------------------------------ sink mode

#[test]
fn test_delivery_writes_sent_items() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let delivery = Delivery::spawn("test-commands", {
        let written = Arc::clone(&written);
        sink_fn(move |item: u32| {
            written.lock().unwrap().push(item);
            Ok(())
        })
    })
    .unwrap();
    assert!(delivery.is_alive());

    delivery.send(42);
    wait_until(|| written.lock().unwrap().contains(&42));

    delivery.send(43);
    delivery.close();
    assert_eq!(written.lock().unwrap().last(), Some(&43));
}

#[test]
fn test_delivery_fatal_write_stops() {
    let mut delivery = Delivery::spawn(
        "test-commands",
        sink_fn(|_: u32| Err(StreamError::Fatal("controller gone".to_string()))),
    )
    .unwrap();

    delivery.send(1);
    wait_until(|| !delivery.is_alive());
    assert!(matches!(delivery.check(), Err(StreamError::Fatal(_))));
}

#[test]
fn test_delivery_write_warning_keeps_running() {
    let mut delivery = Delivery::spawn(
        "test-commands",
        sink_fn(|_: u32| Err(StreamError::Warning("busy".to_string()))),
    )
    .unwrap();

    delivery.sender().put(1);
    let mut warnings = Vec::new();
    wait_until(|| {
        warnings.extend(delivery.check().unwrap().warnings);
        !warnings.is_empty()
    });
    assert!(delivery.is_alive());
}

#[test]
fn test_delivery_close_flushes_pending_item() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let gate = Mailbox::<()>::new();
    let delivery = Delivery::spawn("test-commands", {
        let written = Arc::clone(&written);
        let gate = gate.clone();
        // the first write blocks until the gate opens
        sink_fn(move |item: u32| {
            let first = {
                let mut written = written.lock().unwrap();
                written.push(item);
                written.len() == 1
            };
            if first {
                gate.get();
            }
            Ok(())
        })
    })
    .unwrap();

    delivery.send(1);
    wait_until(|| written.lock().unwrap().len() == 1);
    delivery.send(2);

    let opener = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        gate.put(());
    });
    delivery.close();
    opener.join().unwrap();

    assert_eq!(*written.lock().unwrap(), vec![1, 2]);
}
