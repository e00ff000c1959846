//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Example
//!
//! ```
//! use hd44780::{Builder, BuilderError, Font};
//!
//! // The 5x10 font is only available with a single line
//! let result = Builder::new().rows(2).font(Font::Dots5x10).build();
//! assert!(matches!(result, Err(BuilderError::FontNeedsSingleLine)));
//! ```

use core::fmt::Debug;

use crate::command::DDRAM_LINE_LENGTH;

/// Maximum number of display rows supported by the controller addressing
pub const MAX_ROWS: u8 = 4;

/// Errors that can occur when driving the display
///
/// Generic over the interface error so callers can match on the pin error.
#[derive(Debug)]
pub enum Error<E> {
    /// Interface error (GPIO)
    Interface(E),
    /// Cursor position outside the addressable DDRAM
    PositionOutOfRange {
        /// Requested column
        col: u8,
        /// Requested row
        row: u8,
    },
}

impl<E: Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "Interface error: {e:?}"),
            Error::PositionOutOfRange { col, row } => write!(
                f,
                "Position ({col}, {row}) out of range (max {DDRAM_LINE_LENGTH} columns)"
            ),
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}

/// Errors that can occur when building configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Row count of zero or above [`MAX_ROWS`]
    InvalidRows(u8),
    /// Column count of zero or above the DDRAM line length
    InvalidColumns(u8),
    /// The 5x10 font was requested for a multi-line display
    FontNeedsSingleLine,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::InvalidRows(rows) => {
                write!(f, "Invalid row count {rows} (1..={MAX_ROWS})")
            }
            BuilderError::InvalidColumns(cols) => {
                write!(f, "Invalid column count {cols} (1..={DDRAM_LINE_LENGTH})")
            }
            BuilderError::FontNeedsSingleLine => {
                write!(f, "5x10 font requires a single-line display")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
