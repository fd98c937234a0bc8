use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ImageError {
    Decode(String),
    Empty,
    UnsupportedChannels(usize),
    OutOfBounds(String),
    Tensor(base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Empty => write!(f, "image has a zero-length axis"),
            ImageError::UnsupportedChannels(channels) => {
                write!(f, "unsupported channel count: {channels}")
            }
            ImageError::OutOfBounds(msg) => write!(f, "out of bounds: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<base::TensorError> for ImageError {
    fn from(err: base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
