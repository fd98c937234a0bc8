use {
    com::{Sink, Source, StreamError, framing},
    crates_image::ImageEncoder,
    parrot::{Command, FramedImageSource, Intent, JsonCommandSink, JsonLineSource, TelemetrySample},
    std::{
        io::{BufRead, BufReader, Cursor, Write},
        net::TcpListener,
        thread,
        time::Duration,
    },
};

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    let img = crates_image::GrayImage::from_fn(width, height, |x, y| crates_image::Luma([(x + y) as u8]));
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), width, height, crates_image::ExtendedColorType::L8)
        .unwrap();
    buffer
}

#[test]
fn test_json_line_source_reads_records() {
    let input = concat!(
        r#"{"sequence":1,"attitude":{"pitch":1.0,"roll":2.0,"yaw":3.0},"altitude":1.5,"#,
        r#""velocity":{"vx":0.0,"vy":0.0,"vz":0.0},"battery":80}"#,
        "\n\n",
        r#"{"sequence":2,"attitude":{"pitch":0.0,"roll":0.0,"yaw":0.0},"altitude":2.0,"#,
        r#""velocity":{"vx":0.5,"vy":0.0,"vz":0.0},"battery":79,"#,
        r#""state":{"flying":true,"emergency":false,"low_battery":false}}"#,
        "\n",
    );
    let mut source = JsonLineSource::<_, TelemetrySample>::new(Cursor::new(input));

    let first = source.read().unwrap();
    assert_eq!(first.sequence, 1);
    assert_eq!(first.attitude.yaw, 3.0);
    assert!(!first.state.flying);

    let second = source.read().unwrap();
    assert_eq!(second.sequence, 2);
    assert_eq!(second.battery, 79);
    assert!(second.state.flying);

    match source.read() {
        Err(StreamError::Fatal(msg)) => assert_eq!(msg, "connection closed"),
        other => panic!("expected fatal, got {:?}", other),
    }
}

#[test]
fn test_malformed_line_is_warning() {
    let input = "not json\n{\"X\":0,\"Y\":0,\"Z\":0,\"R\":0,\"C\":0,\"T\":true,\"L\":false,\"S\":false}\n";
    let mut source = JsonLineSource::<_, Command>::new(Cursor::new(input));

    assert!(matches!(source.read(), Err(StreamError::Warning(_))));
    assert!(source.read().unwrap().takeoff);
}

#[test]
fn test_invalid_utf8_line_is_warning() {
    let mut input = b"\xff\xfe\n".to_vec();
    input.extend_from_slice(
        br#"{"sequence":7,"attitude":{"pitch":0.0,"roll":0.0,"yaw":0.0},"altitude":1.0,"velocity":{"vx":0.0,"vy":0.0,"vz":0.0},"battery":50}"#,
    );
    input.push(b'\n');
    let mut source = JsonLineSource::<_, TelemetrySample>::new(Cursor::new(input));

    assert!(matches!(source.read(), Err(StreamError::Warning(_))));
    // the stream keeps going after the corrupt packet
    assert_eq!(source.read().unwrap().sequence, 7);
}

#[test]
fn test_command_sink_writes_lines() {
    let mut sink = JsonCommandSink::new(Vec::new());
    sink.write(Intent::Land.to_command()).unwrap();
    sink.write(Intent::FlyUp(1.0).to_command()).unwrap();

    let written = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: Command = serde_json::from_str(lines[0]).unwrap();
    assert!(first.land);
    let second: Command = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second.vertical, 1.0);
}

#[test]
fn test_framed_image_source() {
    let mut stream = Vec::new();
    framing::write_frame(&mut stream, &png(6, 4)).unwrap();
    framing::write_frame(&mut stream, b"garbage").unwrap();
    framing::write_frame(&mut stream, &png(2, 2)).unwrap();
    let mut source = FramedImageSource::new(Cursor::new(stream));

    let frame = source.read().unwrap();
    assert_eq!((frame.width(), frame.height(), frame.channels()), (6, 4, 1));

    // bad frame is skipped, stream stays aligned
    assert!(matches!(source.read(), Err(StreamError::Warning(_))));
    assert_eq!(source.read().unwrap().width(), 2);
    assert!(matches!(source.read(), Err(StreamError::Fatal(_))));
}

#[test]
fn test_command_sink_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let receiver = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut line = String::new();
        BufReader::new(stream).read_line(&mut line).unwrap();
        line
    });

    let mut sink = JsonCommandSink::connect(&address).unwrap();
    sink.write(Intent::Takeoff.to_command()).unwrap();

    let line = receiver.join().unwrap();
    let command: Command = serde_json::from_str(line.trim()).unwrap();
    assert!(command.takeoff);
}

#[test]
fn test_sources_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let sender = thread::spawn(move || {
        // telemetry connection first, then video
        let (mut telemetry, _) = listener.accept().unwrap();
        telemetry
            .write_all(b"{\"X\":0,\"Y\":0,\"Z\":0,\"R\":0,\"C\":0,\"T\":false,\"L\":true,\"S\":false}\n")
            .unwrap();
        let (mut video, _) = listener.accept().unwrap();
        framing::write_frame(&mut video, &png(3, 5)).unwrap();
        (telemetry, video)
    });

    let mut lines = JsonLineSource::<_, Command>::connect(&address, Duration::from_secs(5)).unwrap();
    assert!(lines.read().unwrap().land);

    let mut frames = FramedImageSource::connect(&address, Duration::from_secs(5)).unwrap();
    assert_eq!(frames.read().unwrap().height(), 5);

    drop(sender.join().unwrap());
}
