use {
    crate::{StreamError, error::is_stall},
    std::io::{self, Read, Write},
};

pub const MAX_FRAME_SIZE: u32 = 16 * 1024 * 1024; // 16 MB

/// Write one length-prefixed frame: 4-byte little-endian length, then payload.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), StreamError> {
    let len = u32::try_from(payload.len())
        .ok()
        .filter(|&len| len <= MAX_FRAME_SIZE)
        .ok_or_else(|| StreamError::Fatal(format!("frame too large: {} bytes", payload.len())))?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Read one length-prefixed frame.
///
/// A read that stalls before the first byte of a frame is a `Warning` and
/// leaves the stream aligned. Once a frame has started, stalls are retried so
/// the caller never sees a partial frame. EOF and oversized frames are `Fatal`.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>, StreamError> {
    let mut len_buf = [0u8; 4];
    fill(reader, &mut len_buf, true)?;
    let len = u32::from_le_bytes(len_buf);
    if len > MAX_FRAME_SIZE {
        return Err(StreamError::Fatal(format!("frame too large: {len} bytes")));
    }
    let mut payload = vec![0u8; len as usize];
    fill(reader, &mut payload, false)?;
    Ok(payload)
}

fn fill<R: Read>(reader: &mut R, buf: &mut [u8], at_boundary: bool) -> Result<(), StreamError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Err(StreamError::Fatal("connection closed".to_string())),
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) if is_stall(&err) && at_boundary && filled == 0 => {
                return Err(StreamError::Warning(format!("read stalled: {err}")));
            }
            Err(err) if is_stall(&err) => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
