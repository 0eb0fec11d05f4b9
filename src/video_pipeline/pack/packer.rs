//! Quantizes an XWD capture into the target's packed 1-bit framebuffer.

use crate::video_pipeline::common::error::{Result, VideoError};
use crate::video_pipeline::pack::types::{
    FRAME_BYTES, FRAME_HEIGHT, FRAME_STRIDE, FRAME_WIDTH, QuantMode,
};
use crate::video_pipeline::xwd::decoder::XwdImage;

pub struct FramePacker {
    threshold: u8,
}

impl FramePacker {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Verifies the capture covers the full target grid.
    ///
    /// Coordinates map one to one, no scaling; an undersized capture is a
    /// setup error, fatal at startup rather than per frame.
    pub fn check_bounds(&self, source: &XwdImage<'_>) -> Result<()> {
        let header = source.header();
        let width = header.pixmap_width as usize;
        let height = header.pixmap_height as usize;
        if width < FRAME_WIDTH || height < FRAME_HEIGHT {
            return Err(VideoError::SourceTooSmall {
                width,
                height,
                target_width: FRAME_WIDTH,
                target_height: FRAME_HEIGHT,
            });
        }
        Ok(())
    }

    /// Quantizes and packs one full frame into `target`.
    ///
    /// Each group of 8 horizontally adjacent pixels becomes one byte with
    /// the leftmost pixel in bit 7. `target` must be exactly one frame
    /// long.
    pub fn pack(&self, source: &XwdImage<'_>, target: &mut [u8]) -> Result<()> {
        if target.len() != FRAME_BYTES {
            return Err(VideoError::Resource(format!(
                "frame target is {} bytes, expected {FRAME_BYTES}",
                target.len()
            )));
        }
        self.check_bounds(source)?;

        let mode = QuantMode::for_depth(source.header().pixmap_depth, self.threshold);

        for y in 0..FRAME_HEIGHT {
            let row = source.row(y)?;
            let out = &mut target[y * FRAME_STRIDE..(y + 1) * FRAME_STRIDE];
            for (group, byte) in out.iter_mut().enumerate() {
                let mut packed = 0u8;
                for &sample in &row[group * 8..group * 8 + 8] {
                    packed <<= 1;
                    if mode.quantize(sample) {
                        packed |= 1;
                    }
                }
                *byte = packed;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_pipeline::pack::types::DEFAULT_THRESHOLD;
    use crate::video_pipeline::xwd::testutil::DumpBuilder;

    fn pack_dump(dump: &[u8], threshold: u8) -> Vec<u8> {
        let image = XwdImage::parse(dump).unwrap();
        let mut target = vec![0u8; FRAME_BYTES];
        FramePacker::new(threshold)
            .pack(&image, &mut target)
            .unwrap();
        target
    }

    fn full_dump() -> DumpBuilder {
        DumpBuilder::new(FRAME_WIDTH as u32, FRAME_HEIGHT as u32)
    }

    #[test]
    fn first_pixel_of_a_group_lands_in_bit_7() {
        let mut pixels = vec![0u8; FRAME_WIDTH * FRAME_HEIGHT];
        pixels[0] = 0xFF;
        pixels[7] = 0xFF;
        let dump = full_dump().pixels(pixels).build();
        let packed = pack_dump(&dump, DEFAULT_THRESHOLD);
        assert_eq!(packed[0], 0x81);

        let mut pixels = vec![0u8; FRAME_WIDTH * FRAME_HEIGHT];
        pixels[0] = 0xFF;
        pixels[1] = 0xFF;
        let dump = full_dump().pixels(pixels).build();
        let packed = pack_dump(&dump, DEFAULT_THRESHOLD);
        assert_eq!(packed[0], 0xC0);
    }

    #[test]
    fn all_dark_capture_packs_to_zeroes() {
        let dump = full_dump().fill(0).build();
        let packed = pack_dump(&dump, DEFAULT_THRESHOLD);
        assert_eq!(packed.len(), 24576);
        assert!(packed.iter().all(|&b| b == 0));
    }

    #[test]
    fn all_bright_capture_packs_to_ones() {
        let dump = full_dump().fill(0xFF).build();
        let packed = pack_dump(&dump, 0x80);
        assert!(packed.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn packing_is_deterministic() {
        let pixels: Vec<u8> = (0..FRAME_WIDTH * FRAME_HEIGHT)
            .map(|i| (i % 251) as u8)
            .collect();
        let dump = full_dump().pixels(pixels).build();
        assert_eq!(pack_dump(&dump, 0x40), pack_dump(&dump, 0x40));
    }

    #[test]
    fn bilevel_depth_skips_the_threshold() {
        let mut pixels = vec![0u8; FRAME_WIDTH * FRAME_HEIGHT];
        pixels[0] = 1;
        pixels[2] = 1;
        let dump = full_dump().depth(1).pixels(pixels).build();
        // Threshold 0xFF would reject everything in threshold mode.
        let packed = pack_dump(&dump, 0xFF);
        assert_eq!(packed[0], 0xA0);
    }

    #[test]
    fn padded_stride_does_not_leak_into_pixels() {
        let stride = FRAME_WIDTH + 8;
        let mut pixels = vec![0u8; stride * FRAME_HEIGHT];
        for row in pixels.chunks_mut(stride) {
            row[..FRAME_WIDTH].fill(0xFF);
        }
        let dump = full_dump()
            .bytes_per_line(stride as u32)
            .pixels(pixels)
            .build();
        let packed = pack_dump(&dump, 0x80);
        assert!(packed.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn undersized_capture_is_a_bounds_error() {
        let dump = DumpBuilder::new(320, 200).build();
        let image = XwdImage::parse(&dump).unwrap();
        let mut target = vec![0u8; FRAME_BYTES];
        let result = FramePacker::new(DEFAULT_THRESHOLD).pack(&image, &mut target);
        assert!(matches!(
            result,
            Err(VideoError::SourceTooSmall {
                width: 320,
                height: 200,
                ..
            })
        ));
    }

    #[test]
    fn wrong_target_length_is_rejected() {
        let dump = full_dump().build();
        let image = XwdImage::parse(&dump).unwrap();
        let mut target = vec![0u8; FRAME_BYTES - 1];
        assert!(
            FramePacker::new(DEFAULT_THRESHOLD)
                .pack(&image, &mut target)
                .is_err()
        );
    }
}
