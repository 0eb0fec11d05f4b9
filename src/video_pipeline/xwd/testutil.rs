//! Synthetic XWD dumps for tests.

use crate::video_pipeline::xwd::types::{XWD_COLOR_LEN, XWD_HEADER_LEN};

const WINDOW_NAME: &str = "xwd2mac-test";

pub(crate) struct DumpBuilder {
    width: u32,
    height: u32,
    depth: u32,
    bits_per_pixel: u32,
    bytes_per_line: u32,
    ncolors: u32,
    file_version: u32,
    fill: u8,
    pixels: Option<Vec<u8>>,
}

impl DumpBuilder {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: 8,
            bits_per_pixel: 8,
            bytes_per_line: width,
            ncolors: 0,
            file_version: 7,
            fill: 0,
            pixels: None,
        }
    }

    pub(crate) fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub(crate) fn bits_per_pixel(mut self, bits: u32) -> Self {
        self.bits_per_pixel = bits;
        self
    }

    pub(crate) fn bytes_per_line(mut self, stride: u32) -> Self {
        self.bytes_per_line = stride;
        self
    }

    pub(crate) fn ncolors(mut self, ncolors: u32) -> Self {
        self.ncolors = ncolors;
        self
    }

    pub(crate) fn file_version(mut self, version: u32) -> Self {
        self.file_version = version;
        self
    }

    pub(crate) fn fill(mut self, value: u8) -> Self {
        self.fill = value;
        self
    }

    pub(crate) fn pixels(mut self, pixels: Vec<u8>) -> Self {
        self.pixels = Some(pixels);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let header_size = (XWD_HEADER_LEN + WINDOW_NAME.len() + 1) as u32;

        let mut words = [0u32; 25];
        words[0] = header_size;
        words[1] = self.file_version;
        words[2] = 2; // ZPixmap
        words[3] = self.depth;
        words[4] = self.width;
        words[5] = self.height;
        words[7] = 1; // MSBFirst
        words[8] = 32;
        words[9] = 1;
        words[10] = 32;
        words[11] = self.bits_per_pixel;
        words[12] = self.bytes_per_line;
        words[13] = 3; // PseudoColor
        words[17] = 8;
        words[18] = self.ncolors;
        words[19] = self.ncolors;
        words[20] = self.width;
        words[21] = self.height;

        let mut out = Vec::new();
        for word in words {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out.extend_from_slice(WINDOW_NAME.as_bytes());
        out.push(0);
        out.resize(out.len() + self.ncolors as usize * XWD_COLOR_LEN, 0);

        let pixel_len = (self.bytes_per_line * self.height) as usize;
        match self.pixels {
            Some(pixels) => out.extend_from_slice(&pixels),
            None => out.resize(out.len() + pixel_len, self.fill),
        }
        out
    }
}
