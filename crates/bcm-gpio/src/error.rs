//! Error types for the driver
//!
//! - [`Error`] - Mapping failures and runtime pin errors
//! - [`BuilderError`] - Invalid register layouts rejected by
//!   [`LayoutBuilder::build`](crate::config::LayoutBuilder::build)
//!
//! ## Example
//!
//! ```
//! use bcm_gpio::{BuilderError, Layout};
//!
//! // A 16 byte block cannot hold the level registers
//! let result = Layout::builder().block_size(16).build();
//! assert!(matches!(result, Err(BuilderError::RegisterOutOfBlock { .. })));
//! ```

use std::io;
use std::path::PathBuf;

use embedded_hal::digital::ErrorKind;

/// Errors that can occur when mapping or driving GPIO pins
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The physical memory device could not be opened
    ///
    /// Usually a permission problem: `/dev/mem` needs root.
    #[error("cannot open {}: {source}", .path.display())]
    DeviceOpen {
        /// Device that was opened
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },
    /// The register block could not be mapped into the address space
    #[error("cannot map GPIO registers at physical address {offset:#x}: {source}")]
    Map {
        /// Physical address the mapping was requested at
        offset: u64,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },
    /// The register span is smaller than the layout requires
    #[error("register span is {len} bytes, layout needs {required}")]
    SpanTooSmall {
        /// Span size in bytes
        len: usize,
        /// Block size declared by the layout
        required: usize,
    },
    /// Pin number outside the layout's pin range
    #[error("pin {pin} is outside the supported range 0..={max}")]
    PinOutOfRange {
        /// Requested pin
        pin: u8,
        /// Highest valid pin
        max: u8,
    },
    /// The register block has been released
    #[error("GPIO register block is not mapped")]
    Unmapped,
}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Errors that can occur when building a register layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// Block size of zero or not a multiple of the register width
    #[error("block size {0} is not a non-zero multiple of 4")]
    InvalidBlockSize(usize),
    /// Register offset not aligned to the register width
    #[error("{register} offset {offset:#x} is not 4-byte aligned")]
    UnalignedOffset {
        /// Register name
        register: &'static str,
        /// Offending offset
        offset: usize,
    },
    /// The register serving the highest pin lies outside the block
    #[error("{register} register at {offset:#x} for pin {pin} lies outside the {block_size} byte block")]
    RegisterOutOfBlock {
        /// Register name
        register: &'static str,
        /// Byte offset of the out-of-block register
        offset: usize,
        /// Pin that needs it
        pin: u8,
        /// Block size in bytes
        block_size: usize,
    },
}
