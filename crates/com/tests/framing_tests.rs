use {
    com::{StreamError, framing},
    std::io::{self, Cursor, Read},
};

#[test]
fn test_round_trip() {
    let mut buffer = Vec::new();
    framing::write_frame(&mut buffer, b"hello").unwrap();
    framing::write_frame(&mut buffer, b"").unwrap();
    assert_eq!(buffer.len(), 4 + 5 + 4);

    let mut reader = Cursor::new(buffer);
    assert_eq!(framing::read_frame(&mut reader).unwrap(), b"hello");
    assert_eq!(framing::read_frame(&mut reader).unwrap(), b"");
}

#[test]
fn test_length_prefix_is_little_endian() {
    let mut buffer = Vec::new();
    framing::write_frame(&mut buffer, &[9u8; 258]).unwrap();
    assert_eq!(&buffer[..4], &[2, 1, 0, 0]);
}

#[test]
fn test_eof_is_fatal() {
    // half a length prefix, then nothing
    let mut reader = Cursor::new(vec![0x01, 0x02]);
    match framing::read_frame(&mut reader) {
        Err(StreamError::Fatal(msg)) => assert_eq!(msg, "connection closed"),
        other => panic!("expected fatal, got {:?}", other),
    }
}

#[test]
fn test_truncated_payload_is_fatal() {
    let mut bytes = 10u32.to_le_bytes().to_vec();
    bytes.extend_from_slice(b"abc");
    let mut reader = Cursor::new(bytes);
    assert!(matches!(framing::read_frame(&mut reader), Err(StreamError::Fatal(_))));
}

#[test]
fn test_frame_too_large_rejected() {
    let bytes = (framing::MAX_FRAME_SIZE + 1).to_le_bytes().to_vec();
    let mut reader = Cursor::new(bytes);
    match framing::read_frame(&mut reader) {
        Err(StreamError::Fatal(msg)) => assert!(msg.contains("too large")),
        other => panic!("expected fatal, got {:?}", other),
    }
}

// reader that times out on its first call, then behaves
struct Stalling {
    stalled: bool,
    inner: Cursor<Vec<u8>>,
}

impl Read for Stalling {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.stalled {
            self.stalled = true;
            return Err(io::Error::from(io::ErrorKind::TimedOut));
        }
        self.inner.read(buf)
    }
}

#[test]
fn test_stall_at_frame_boundary_is_warning() {
    let mut buffer = Vec::new();
    framing::write_frame(&mut buffer, b"later").unwrap();
    let mut reader = Stalling {
        stalled: false,
        inner: Cursor::new(buffer),
    };

    assert!(matches!(framing::read_frame(&mut reader), Err(StreamError::Warning(_))));
    // stream is still aligned
    assert_eq!(framing::read_frame(&mut reader).unwrap(), b"later");
}
