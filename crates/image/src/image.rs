use {
    crate::ImageError,
    base::{Rect, Tensor, Vec2},
};

/// An 8-bit frame in HWC layout `[height, width, channels]`.
///
/// Only grayscale (1 channel) and RGB (3 channels) are supported. Both axes
/// are guaranteed to be non-zero. Images are never mutated after
/// construction; every operation returns a new `Image`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    tensor: Tensor<u8>,
}

impl Image {
    pub fn new(size: Vec2<usize>, channels: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        if size.x == 0 || size.y == 0 {
            return Err(ImageError::Empty);
        }
        if channels != 1 && channels != 3 {
            return Err(ImageError::UnsupportedChannels(channels));
        }
        let tensor = Tensor::new(vec![size.y, size.x, channels], data)?;
        Ok(Self { tensor })
    }

    /// Build an image by evaluating `f(x, y, channel)` for every sample.
    pub fn from_fn(
        size: Vec2<usize>,
        channels: usize,
        mut f: impl FnMut(usize, usize, usize) -> u8,
    ) -> Result<Self, ImageError> {
        let mut data = Vec::with_capacity(size.x * size.y * channels);
        for y in 0..size.y {
            for x in 0..size.x {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }
        Self::new(size, channels, data)
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[0]
    }

    pub fn channels(&self) -> usize {
        self.tensor.shape[2]
    }

    pub fn size(&self) -> Vec2<usize> {
        Vec2::new(self.width(), self.height())
    }

    pub fn bounds(&self) -> Rect<usize> {
        Rect::new(Vec2::zero(), self.size())
    }

    pub fn data(&self) -> &[u8] {
        &self.tensor.data
    }

    pub fn tensor(&self) -> &Tensor<u8> {
        &self.tensor
    }

    pub fn get(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.tensor.data[(y * self.width() + x) * self.channels() + channel]
    }

    /// Copy out the sub-image covered by `rect`.
    pub fn crop(&self, rect: Rect<usize>) -> Result<Image, ImageError> {
        if rect.size.x == 0 || rect.size.y == 0 {
            return Err(ImageError::Empty);
        }
        if !self.bounds().contains_rect(rect) {
            return Err(ImageError::OutOfBounds(format!(
                "{:?} outside {}x{} image",
                rect,
                self.width(),
                self.height()
            )));
        }
        let channels = self.channels();
        let row_len = rect.size.x * channels;
        let mut data = Vec::with_capacity(row_len * rect.size.y);
        for y in rect.origin.y..rect.origin.y + rect.size.y {
            let start = (y * self.width() + rect.origin.x) * channels;
            data.extend_from_slice(&self.tensor.data[start..start + row_len]);
        }
        Image::new(rect.size, channels, data)
    }

    /// Single-channel copy using Rec. 601 luma weights.
    pub fn to_luma(&self) -> Image {
        if self.channels() == 1 {
            return self.clone();
        }
        let data = self
            .tensor
            .data
            .chunks_exact(3)
            .map(|rgb| {
                let weighted = 299 * rgb[0] as u32 + 587 * rgb[1] as u32 + 114 * rgb[2] as u32;
                ((weighted + 500) / 1000) as u8
            })
            .collect();
        Image {
            tensor: Tensor {
                shape: vec![self.height(), self.width(), 1],
                data,
            },
        }
    }

    /// Luma samples as `f32` in `[0, 255]`, row-major.
    pub fn luma_plane(&self) -> Vec<f32> {
        self.to_luma().tensor.data.iter().map(|&v| v as f32).collect()
    }
}
