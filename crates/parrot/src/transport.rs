use {
    crate::Command,
    com::{Sink, Source, StreamError, framing},
    image::Image,
    serde::de::DeserializeOwned,
    std::{
        io::{BufRead, BufReader, ErrorKind, Read, Write},
        marker::PhantomData,
        net::TcpStream,
        time::Duration,
    },
};

fn is_stall(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

fn connect(address: &str, read_timeout: Option<Duration>) -> Result<TcpStream, StreamError> {
    let stream = TcpStream::connect(address)
        .map_err(|err| StreamError::Fatal(format!("connect to {address}: {err}")))?;
    stream.set_read_timeout(read_timeout)?;
    stream.set_nodelay(true)?;
    log::info!("connected to {address}");
    Ok(stream)
}

/// Source of newline-delimited JSON records.
///
/// A line that does not parse (bad JSON or bad UTF-8) is a warning; the
/// next read moves on to the next line. A stalled read before any byte of a line is a warning too.
pub struct JsonLineSource<R, T> {
    reader: R,
    line: Vec<u8>,
    _record: PhantomData<fn() -> T>,
}

impl<R: BufRead, T: DeserializeOwned> JsonLineSource<R, T> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            _record: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> JsonLineSource<BufReader<TcpStream>, T> {
    pub fn connect(address: &str, read_timeout: Duration) -> Result<Self, StreamError> {
        let stream = connect(address, Some(read_timeout))?;
        Ok(Self::new(BufReader::new(stream)))
    }
}

impl<R: BufRead + Send, T: DeserializeOwned> Source<T> for JsonLineSource<R, T> {
    fn read(&mut self) -> Result<T, StreamError> {
        loop {
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) if self.line.is_empty() => {
                    return Err(StreamError::Fatal("connection closed".to_string()));
                }
                Ok(_) => {}
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_stall(&err) && self.line.is_empty() => return Err(err.into()),
                // a partial line stays buffered until the rest arrives
                Err(err) if is_stall(&err) => continue,
                Err(err) => return Err(err.into()),
            }
            let line = std::mem::take(&mut self.line);
            let trimmed = line.trim_ascii();
            if trimmed.is_empty() {
                continue;
            }
            return serde_json::from_slice(trimmed)
                .map_err(|err| StreamError::Warning(format!("malformed record: {err}")));
        }
    }
}

/// Sink writing each command as one JSON line.
pub struct JsonCommandSink<W> {
    writer: W,
}

impl<W: Write> JsonCommandSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonCommandSink<TcpStream> {
    pub fn connect(address: &str) -> Result<Self, StreamError> {
        Ok(Self::new(connect(address, None)?))
    }
}

impl<W: Write + Send> Sink<Command> for JsonCommandSink<W> {
    fn write(&mut self, command: Command) -> Result<(), StreamError> {
        let mut line = serde_json::to_vec(&command)
            .map_err(|err| StreamError::Fatal(format!("encode command: {err}")))?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Source of length-prefixed encoded frames (JPEG or PNG).
///
/// A frame that fails to decode is a warning; the stream stays aligned.
pub struct FramedImageSource<R> {
    reader: R,
}

impl<R: Read> FramedImageSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl FramedImageSource<TcpStream> {
    pub fn connect(address: &str, read_timeout: Duration) -> Result<Self, StreamError> {
        Ok(Self::new(connect(address, Some(read_timeout))?))
    }
}

impl<R: Read + Send> Source<Image> for FramedImageSource<R> {
    fn read(&mut self) -> Result<Image, StreamError> {
        let payload = framing::read_frame(&mut self.reader)?;
        image::decode_image(&payload)
            .map_err(|err| StreamError::Warning(format!("undecodable frame: {err}")))
    }
}
