//! Live, memory-mapped capture source.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::info;

use crate::video_pipeline::common::error::{Result, VideoError};
use crate::video_pipeline::xwd::decoder::XwdImage;

/// Read-only shared mapping of the capture file.
///
/// The X server rewrites the dump in place, so one mapping stays current for
/// the life of the process without remapping.
pub struct CaptureSource {
    map: Mmap,
}

impl CaptureSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| VideoError::Resource(format!("{}: {}", path.display(), e)))?;
        let map = unsafe { Mmap::map(&file) }
            .map_err(|e| VideoError::Resource(format!("{}: mmap failed: {}", path.display(), e)))?;

        info!(len = map.len(), path = %path.display(), "Mapped capture source");
        Ok(Self { map })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.map
    }

    /// Re-parses the mapping; called once per update cycle since the
    /// producer may have rewritten the header as well as the pixels.
    pub fn decode(&self) -> Result<XwdImage<'_>> {
        XwdImage::parse(&self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_pipeline::xwd::testutil::DumpBuilder;
    use std::io::Write;

    #[test]
    fn opens_and_decodes_a_dump_file() {
        let dump = DumpBuilder::new(16, 4).fill(0x7F).build();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&dump).unwrap();
        file.flush().unwrap();

        let source = CaptureSource::open(file.path()).unwrap();
        let image = source.decode().unwrap();
        assert_eq!(image.header().pixmap_width, 16);
        assert_eq!(image.sample(0, 0).unwrap(), 0x7F);
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let result = CaptureSource::open("/nonexistent/xwd2mac-capture");
        assert!(matches!(result, Err(VideoError::Resource(_))));
    }
}
