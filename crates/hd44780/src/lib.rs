//! HD44780 character LCD driver for a 4-bit parallel bus
//!
//! The driver bit-bangs the controller through six embedded-hal output pins
//! (RS, E, D4..D7) with R/W tied low, so it never reads the busy flag and
//! relies on fixed settle delays instead.
//!
//! ## Example
//!
//! ```rust,ignore
//! use hd44780::{Builder, Display, ParallelInterface};
//!
//! let interface = ParallelInterface::new(rs, en, d4, d5, d6, d7);
//! let config = Builder::new().columns(16).rows(2).build()?;
//! let mut display = Display::new(interface, delay, config);
//!
//! display.init()?;
//! display.go_to(0, 1)?;
//! display.write_text("Hello")?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod command;
mod config;
mod display;
mod error;
mod interface;

pub use config::{Builder, Config, Font, Timing};
pub use display::Display;
pub use error::{BuilderError, Error, MAX_ROWS};
pub use interface::{DisplayInterface, Mode, ParallelInterface};
