//! Co-processor handle backed by the Linux `uio_pruss` driver.
//!
//! `/dev/uioN` exposes two mappings: map 0 is the PRU subsystem window
//! (data RAM, instruction RAM, control registers) and map 1 is the DDR
//! region reserved for sharing with the PRU. Each map is selected by
//! mmap'ing at `index * page size`; sysfs publishes every map's physical
//! address and size.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::ptr;

use memmap2::{MmapMut, MmapOptions};
use tracing::{debug, info};

use crate::video_pipeline::common::error::{Result, VideoError};
use crate::video_pipeline::pru::handle::{Coprocessor, PinDirection};

/// mmap offset stride selecting a uio map.
const UIO_MAP_STRIDE: u64 = 4096;

/// PRU0 data RAM inside the subsystem window; the command word the video
/// program polls is its first word.
const PRU0_DATA_RAM: usize = 0x0000;

/// PRU0 control register block.
const PRU0_CTRL: usize = 0x2_2000;

/// PRU0 instruction RAM.
const PRU0_IRAM: usize = 0x3_4000;

/// Instruction RAM capacity on the AM335x.
const PRU_IRAM_LEN: usize = 8192;

/// Control register: writing 0 clears the enable bit and asserts reset.
const CTRL_RESET: u32 = 0;
const CTRL_ENABLE: u32 = 1 << 1;

pub struct UioPruss {
    pruss: MmapMut,
    shared: MmapMut,
    shared_base: u32,
}

impl UioPruss {
    /// Opens `/dev/uio{index}` and maps the subsystem and shared regions.
    pub fn init(index: u32) -> Result<Self> {
        let dev_path = format!("/dev/uio{index}");
        let device = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&dev_path)
            .map_err(|e| VideoError::Resource(format!("{dev_path}: {e}")))?;

        let pruss_len = read_sysfs_word(index, 0, "size")? as usize;
        let shared_len = read_sysfs_word(index, 1, "size")? as usize;
        let shared_base = read_sysfs_word(index, 1, "addr")? as u32;

        let pruss = map_region(&device, 0, pruss_len, &dev_path)?;
        let shared = map_region(&device, 1, shared_len, &dev_path)?;

        info!(
            pruss_len,
            shared_len,
            shared_base = format_args!("{shared_base:#010x}"),
            "PRU subsystem mapped"
        );

        Ok(Self {
            pruss,
            shared,
            shared_base,
        })
    }

    fn write_ctrl(&mut self, value: u32) {
        let ctrl = unsafe { self.pruss.as_mut_ptr().add(PRU0_CTRL) } as *mut u32;
        unsafe { ptr::write_volatile(ctrl, value) };
    }
}

impl Coprocessor for UioPruss {
    fn shared_base(&self) -> u32 {
        self.shared_base
    }

    fn shared_len(&self) -> usize {
        self.shared.len()
    }

    fn shared_mut(&mut self) -> &mut [u8] {
        &mut self.shared
    }

    fn write_command(&mut self, word: u32) {
        let command = unsafe { self.pruss.as_mut_ptr().add(PRU0_DATA_RAM) } as *mut u32;
        unsafe { ptr::write_volatile(command, word) };
    }

    fn configure_gpio(
        &mut self,
        bank: u32,
        pin: u32,
        direction: PinDirection,
        value: bool,
    ) -> Result<()> {
        let number = bank * 32 + pin;
        let base = format!("/sys/class/gpio/gpio{number}");
        if !Path::new(&base).exists() {
            write_sysfs("/sys/class/gpio/export", &number.to_string())?;
        }
        let dir = match direction {
            PinDirection::Output => "out",
            PinDirection::Input => "in",
        };
        write_sysfs(&format!("{base}/direction"), dir)?;
        if direction == PinDirection::Output {
            write_sysfs(&format!("{base}/value"), if value { "1" } else { "0" })?;
        }
        debug!(bank, pin, ?direction, value, "GPIO configured");
        Ok(())
    }

    fn run_program(&mut self, image: &Path) -> Result<()> {
        let code = fs::read(image)
            .map_err(|e| VideoError::Resource(format!("{}: {}", image.display(), e)))?;
        if code.len() > PRU_IRAM_LEN {
            return Err(VideoError::Resource(format!(
                "{}: {} bytes exceeds instruction RAM",
                image.display(),
                code.len()
            )));
        }

        // Hold the core in reset while the image is replaced.
        self.write_ctrl(CTRL_RESET);
        self.pruss[PRU0_IRAM..PRU0_IRAM + code.len()].copy_from_slice(&code);
        self.write_ctrl(CTRL_ENABLE);

        info!(image = %image.display(), bytes = code.len(), "PRU program running");
        Ok(())
    }
}

fn map_region(device: &File, map_index: u64, len: usize, dev_path: &str) -> Result<MmapMut> {
    unsafe {
        MmapOptions::new()
            .offset(map_index * UIO_MAP_STRIDE)
            .len(len)
            .map_mut(device)
    }
    .map_err(|e| VideoError::Resource(format!("{dev_path} map {map_index}: {e}")))
}

fn read_sysfs_word(index: u32, map: u32, name: &str) -> Result<u64> {
    let path = format!("/sys/class/uio/uio{index}/maps/map{map}/{name}");
    let text = fs::read_to_string(&path)
        .map_err(|e| VideoError::Resource(format!("{path}: {e}")))?;
    let text = text.trim();
    let parsed = match text.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| VideoError::Resource(format!("{path}: bad value {text:?}: {e}")))
}

fn write_sysfs(path: &str, value: &str) -> Result<()> {
    fs::write(path, value).map_err(|e| VideoError::Resource(format!("{path}: {e}")))
}
