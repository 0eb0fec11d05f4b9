//! XWD dump header types.

use crate::video_pipeline::common::error::{Result, VideoError};

/// Length in bytes of the fixed XWD header (25 big-endian 32-bit words).
pub const XWD_HEADER_LEN: usize = 100;

/// On-disk length of one color-table entry.
pub const XWD_COLOR_LEN: usize = 12;

/// The only XWD file version this decoder understands.
pub const XWD_FILE_VERSION: u32 = 7;

// Word indices of the header fields this pipeline consumes.
const WORD_HEADER_SIZE: usize = 0;
const WORD_FILE_VERSION: usize = 1;
const WORD_PIXMAP_DEPTH: usize = 3;
const WORD_PIXMAP_WIDTH: usize = 4;
const WORD_PIXMAP_HEIGHT: usize = 5;
const WORD_BYTE_ORDER: usize = 7;
const WORD_BITS_PER_PIXEL: usize = 11;
const WORD_BYTES_PER_LINE: usize = 12;
const WORD_NCOLORS: usize = 19;

/// Byte order of the pixel data as declared by the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LsbFirst,
    MsbFirst,
}

/// Byte-order-corrected copy of the XWD header fields the pipeline uses.
///
/// Every multi-byte field of an XWD dump is stored big-endian regardless of
/// the machine that wrote it; all field access goes through [`header_word`]
/// so the correction lives in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XwdHeader {
    /// Fixed header length plus the NUL-terminated window name.
    pub header_size: u32,
    pub file_version: u32,
    pub pixmap_depth: u32,
    pub pixmap_width: u32,
    pub pixmap_height: u32,
    pub byte_order: ByteOrder,
    pub bits_per_pixel: u32,
    /// Row stride in bytes, possibly padded past the visible width.
    pub bytes_per_line: u32,
    /// Number of color-table entries between the header and the pixel data.
    pub ncolors: u32,
}

/// Reads header word `index` as a big-endian 32-bit value.
pub fn header_word(data: &[u8], index: usize) -> Result<u32> {
    let start = index * 4;
    let bytes: [u8; 4] = data
        .get(start..start + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| VideoError::Format(format!("header truncated at word {index}")))?;
    Ok(u32::from_be_bytes(bytes))
}

impl XwdHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < XWD_HEADER_LEN {
            return Err(VideoError::Format(format!(
                "{} bytes is too short for an XWD header",
                data.len()
            )));
        }

        let file_version = header_word(data, WORD_FILE_VERSION)?;
        if file_version != XWD_FILE_VERSION {
            return Err(VideoError::Format(format!(
                "unsupported XWD file version {file_version}"
            )));
        }

        let byte_order = match header_word(data, WORD_BYTE_ORDER)? {
            0 => ByteOrder::LsbFirst,
            1 => ByteOrder::MsbFirst,
            other => return Err(VideoError::Format(format!("bad byte order {other}"))),
        };

        Ok(Self {
            header_size: header_word(data, WORD_HEADER_SIZE)?,
            file_version,
            pixmap_depth: header_word(data, WORD_PIXMAP_DEPTH)?,
            pixmap_width: header_word(data, WORD_PIXMAP_WIDTH)?,
            pixmap_height: header_word(data, WORD_PIXMAP_HEIGHT)?,
            byte_order,
            bits_per_pixel: header_word(data, WORD_BITS_PER_PIXEL)?,
            bytes_per_line: header_word(data, WORD_BYTES_PER_LINE)?,
            ncolors: header_word(data, WORD_NCOLORS)?,
        })
    }
}
