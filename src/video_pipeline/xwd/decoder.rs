//! Decoder for XWD window dumps.
//!
//! An XWD capture is a fixed header, a NUL-terminated window name, an
//! optional color table, then raw pixel rows padded to the declared stride.
//! The decoder validates the declared geometry against the buffer it was
//! given and exposes per-pixel sample access; it never performs a
//! color-table lookup, a stored sample is used directly as an intensity
//! proxy.

use std::borrow::Cow;

use tracing::debug;

use crate::video_pipeline::common::error::{Result, VideoError};
use crate::video_pipeline::xwd::types::{XWD_COLOR_LEN, XWD_HEADER_LEN, XwdHeader};

/// Immutable view over one XWD capture buffer.
pub struct XwdImage<'a> {
    header: XwdHeader,
    data: &'a [u8],
    pixel_offset: usize,
}

impl<'a> XwdImage<'a> {
    /// Parses and validates a capture buffer.
    ///
    /// Fails with [`VideoError::Format`] when the header is truncated, the
    /// declared geometry does not fit inside the buffer, or samples are
    /// wider than one byte.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = XwdHeader::parse(data)?;

        if (header.header_size as usize) < XWD_HEADER_LEN {
            return Err(VideoError::Format(format!(
                "header_size {} smaller than the fixed header",
                header.header_size
            )));
        }
        if header.bits_per_pixel > 8 {
            return Err(VideoError::Format(format!(
                "{} bits per pixel not supported",
                header.bits_per_pixel
            )));
        }
        if (header.bytes_per_line as usize) < header.pixmap_width as usize {
            return Err(VideoError::Format(format!(
                "stride {} shorter than width {}",
                header.bytes_per_line, header.pixmap_width
            )));
        }

        // header_size already covers the window name string.
        let pixel_offset = (header.ncolors as usize)
            .checked_mul(XWD_COLOR_LEN)
            .and_then(|colors| colors.checked_add(header.header_size as usize))
            .ok_or_else(|| VideoError::Format("color table length overflows".into()))?;

        let pixel_len = (header.bytes_per_line as usize)
            .checked_mul(header.pixmap_height as usize)
            .and_then(|len| len.checked_add(pixel_offset))
            .ok_or_else(|| VideoError::Format("pixel data length overflows".into()))?;
        if data.len() < pixel_len {
            return Err(VideoError::Format(format!(
                "capture is {} bytes but geometry needs {}",
                data.len(),
                pixel_len
            )));
        }

        debug!(
            pixel_offset,
            width = header.pixmap_width,
            height = header.pixmap_height,
            depth = header.pixmap_depth,
            "Decoded XWD capture"
        );

        Ok(Self {
            header,
            data,
            pixel_offset,
        })
    }

    pub fn header(&self) -> &XwdHeader {
        &self.header
    }

    /// Byte offset of the first pixel row from the start of the buffer.
    pub fn pixel_data_offset(&self) -> usize {
        self.pixel_offset
    }

    /// Window name recorded between the fixed header and the color table.
    pub fn window_name(&self) -> Cow<'_, str> {
        let name = &self.data[XWD_HEADER_LEN..self.header.header_size as usize];
        let name = name.split(|&b| b == 0).next().unwrap_or(&[]);
        String::from_utf8_lossy(name)
    }

    /// Raw stored sample at column `x`, row `y`.
    pub fn sample(&self, x: usize, y: usize) -> Result<u8> {
        let width = self.header.pixmap_width as usize;
        let height = self.header.pixmap_height as usize;
        if x >= width || y >= height {
            return Err(VideoError::Bounds {
                x,
                y,
                width,
                height,
            });
        }
        Ok(self.data[self.pixel_offset + y * self.header.bytes_per_line as usize + x])
    }

    /// Full stride slice of row `y`, the packer's hot path.
    pub fn row(&self, y: usize) -> Result<&[u8]> {
        let height = self.header.pixmap_height as usize;
        if y >= height {
            return Err(VideoError::Bounds {
                x: 0,
                y,
                width: self.header.pixmap_width as usize,
                height,
            });
        }
        let stride = self.header.bytes_per_line as usize;
        let start = self.pixel_offset + y * stride;
        Ok(&self.data[start..start + stride])
    }
}
