//! 帧编码 - RGBA -> JPEG -> base64，用于 `/predict` 上传

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageOutputFormat, RgbImage};
use thiserror::Error;

use crate::core::frame::VideoFrame;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Invalid frame: {width}x{height} with {len} bytes")]
    InvalidFrame { width: u32, height: u32, len: usize },
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

#[derive(Debug, Clone)]
pub struct FrameEncoder {
    quality: u8,
}

impl FrameEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn encode_jpeg(&self, frame: &VideoFrame) -> Result<Vec<u8>, EncodeError> {
        let invalid = || EncodeError::InvalidFrame {
            width: frame.width,
            height: frame.height,
            len: frame.data.len(),
        };

        if !frame.is_valid() {
            return Err(invalid());
        }

        let img = RgbImage::from_raw(frame.width, frame.height, frame.to_rgb()).ok_or_else(invalid)?;

        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageOutputFormat::Jpeg(self.quality))?;
        Ok(buffer.into_inner())
    }

    /// Base64 payload without the `data:image/jpeg;base64,` prefix.
    pub fn encode_base64(&self, frame: &VideoFrame) -> Result<String, EncodeError> {
        let jpeg = self.encode_jpeg(frame)?;
        Ok(STANDARD.encode(jpeg))
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new(80)
    }
}
