//! Production register span backed by a `/dev/mem` mapping

use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use log::debug;
use memmap2::{MmapOptions, MmapRaw};

use crate::config::Layout;
use crate::error::Error;
use crate::registers::RegisterSpan;

/// Physical memory device
pub const DEV_MEM: &str = "/dev/mem";

/// GPIO registers mapped from physical memory
///
/// The file descriptor used to create the mapping is closed as soon as the
/// mapping exists; the mapping itself stays valid until the block is dropped.
pub struct MappedBlock {
    map: MmapRaw,
}

impl MappedBlock {
    /// Map the GPIO block described by `layout` from [`DEV_MEM`]
    ///
    /// # Errors
    ///
    /// [`Error::DeviceOpen`] if the device cannot be opened (usually missing
    /// root privileges), [`Error::Map`] if the mapping call fails.
    pub fn open(layout: &Layout) -> Result<Self, Error> {
        Self::open_path(DEV_MEM, layout)
    }

    /// Map the GPIO block from an arbitrary device node, such as `/dev/gpiomem`
    pub fn open_path(path: impl AsRef<Path>, layout: &Layout) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)
            .map_err(|source| Error::DeviceOpen {
                path: path.to_path_buf(),
                source,
            })?;

        let offset = layout.physical_address();
        let map = MmapOptions::new()
            .offset(offset)
            .len(layout.block_size())
            .map_raw(&file)
            .map_err(|source| Error::Map { offset, source })?;

        debug!(
            "mapped {} bytes of {} at {:#x}",
            layout.block_size(),
            path.display(),
            offset
        );
        Ok(Self { map })
    }

    fn word(&self, offset: usize) -> *mut u32 {
        assert!(
            offset % 4 == 0 && offset + 4 <= self.map.len(),
            "register offset {offset:#x} outside mapped block"
        );
        // SAFETY: bounds and alignment checked above; the mapping is page aligned.
        unsafe { self.map.as_mut_ptr().add(offset).cast::<u32>() }
    }
}

impl RegisterSpan for MappedBlock {
    fn len(&self) -> usize {
        self.map.len()
    }

    fn read(&mut self, offset: usize) -> u32 {
        let word = self.word(offset);
        // SAFETY: `word` points at a live, aligned register inside the mapping.
        unsafe { word.read_volatile() }
    }

    fn write(&mut self, offset: usize, value: u32) {
        let word = self.word(offset);
        // SAFETY: as in `read`.
        unsafe { word.write_volatile(value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_device_is_an_open_error() {
        let result = MappedBlock::open_path("/nonexistent/mem", &Layout::default());
        match result {
            Err(Error::DeviceOpen { path, source }) => {
                assert_eq!(path, Path::new("/nonexistent/mem"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("mapping a missing device succeeded"),
        }
    }
}
