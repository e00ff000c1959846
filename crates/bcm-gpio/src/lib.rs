//! Register-level GPIO driver for BCM283x peripherals with a debounced click input.
//!
//! The crate is split into two layers:
//!
//! - [`Gpio`] owns a [`RegisterSpan`] (a [`MappedBlock`] over `/dev/mem` in
//!   production, a [`SimulatedBlock`] in tests) and implements the three pin
//!   primitives: configure direction, write level, read level.
//! - [`DebouncedInput`] turns any embedded-hal [`InputPin`](embedded_hal::digital::InputPin)
//!   into a debounced button with click and multi-click detection.
//!
//! [`SharedGpio`] hands out [`OutputLine`] and [`InputLine`] handles that
//! implement the embedded-hal digital traits, so display drivers and the
//! debounced input can be wired to the same register block.
//!
//! ## Threading
//!
//! The register block is assumed to be owned by a single thread of a single
//! process. Direction changes are a non-atomic read-modify-write of a
//! function-select word shared by ten pins; [`SharedGpio`] is `!Send` so the
//! handles cannot leave the thread that created them.
//!
//! ## Example
//!
//! ```no_run
//! use bcm_gpio::{DebouncedInput, Layout, SharedGpio, StdDelay};
//!
//! let gpio = SharedGpio::open(Layout::default())?;
//! let button = gpio.input(19)?;
//! let mut input = DebouncedInput::new(button, StdDelay);
//!
//! let clicks = input.count_clicks(6, Some(&mut |count: u8| println!("{count}")))?;
//! println!("final count: {clicks}");
//! # Ok::<(), bcm_gpio::Error>(())
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unwrap_used
    )
)]

pub mod config;
pub mod debounce;
pub mod delay;
pub mod error;
pub mod gpio;
pub mod lines;
pub mod mapped;
pub mod registers;
pub mod simulated;

pub use config::{Layout, LayoutBuilder, Timing};
pub use debounce::DebouncedInput;
pub use delay::StdDelay;
pub use error::{BuilderError, Error};
pub use gpio::{Direction, Gpio};
pub use lines::{InputLine, OutputLine, SharedGpio};
pub use mapped::MappedBlock;
pub use registers::RegisterSpan;
pub use simulated::{PinEvent, SimulatedBlock};

pub use embedded_hal::digital::PinState;
