//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the
//! [`ParallelInterface`] struct for driving an HD44780 over a 4-bit bus.
//!
//! ## Hardware Requirements
//!
//! - 6 GPIO outputs:
//!   - **RS**: Register select (low=command, high=data)
//!   - **E**: Enable strobe, data is latched on the falling edge
//!   - **D4..D7**: Upper half of the data bus
//! - R/W tied to ground (write only)
//!
//! ## Example
//!
//! ```rust,ignore
//! use hd44780::{Mode, ParallelInterface, DisplayInterface};
//!
//! let mut interface = ParallelInterface::new(rs, en, d4, d5, d6, d7);
//!
//! // Clear display: command mode, high nibble then low nibble
//! interface.set_mode(Mode::Command)?;
//! interface.write_nibble(0x0)?;
//! interface.write_nibble(0x1)?;
//! ```

use core::fmt::Debug;
use embedded_hal::digital::{OutputPin, PinState};

/// Register selected by the RS line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Instruction register (RS low)
    Command,
    /// Data register (RS high)
    Data,
}

impl From<Mode> for PinState {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Command => PinState::Low,
            Mode::Data => PinState::High,
        }
    }
}

/// Trait for the bus between the host and the controller
///
/// Implementations only move bits; timing between transfers is the
/// [`Display`](crate::display::Display)'s job.
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Drive RS and E low, the idle state before the reset sequence
    fn idle(&mut self) -> Result<(), Self::Error>;

    /// Select the command or data register
    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error>;

    /// Transfer the low 4 bits of `nibble`
    ///
    /// The implementation must:
    /// 1. Raise E
    /// 2. Present bit 0 on D4 through bit 3 on D7
    /// 3. Lower E
    fn write_nibble(&mut self, nibble: u8) -> Result<(), Self::Error>;
}

/// 4-bit parallel bus over embedded-hal output pins
///
/// All six pins must share one error type.
pub struct ParallelInterface<RS, E, D4, D5, D6, D7> {
    /// Register select
    rs: RS,
    /// Enable strobe
    en: E,
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
}

impl<RS, E, D4, D5, D6, D7> ParallelInterface<RS, E, D4, D5, D6, D7> {
    /// Create a new interface from pins already configured as outputs
    pub fn new(rs: RS, en: E, d4: D4, d5: D5, d6: D6, d7: D7) -> Self {
        Self {
            rs,
            en,
            d4,
            d5,
            d6,
            d7,
        }
    }

    /// Give the pins back
    pub fn release(self) -> (RS, E, D4, D5, D6, D7) {
        (self.rs, self.en, self.d4, self.d5, self.d6, self.d7)
    }
}

impl<RS, E, D4, D5, D6, D7, PinErr> DisplayInterface for ParallelInterface<RS, E, D4, D5, D6, D7>
where
    RS: OutputPin<Error = PinErr>,
    E: OutputPin<Error = PinErr>,
    D4: OutputPin<Error = PinErr>,
    D5: OutputPin<Error = PinErr>,
    D6: OutputPin<Error = PinErr>,
    D7: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = PinErr;

    fn idle(&mut self) -> Result<(), Self::Error> {
        self.rs.set_low()?;
        self.en.set_low()
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        self.rs.set_state(mode.into())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), Self::Error> {
        self.en.set_high()?;
        self.d4.set_state(bit(nibble, 0))?;
        self.d5.set_state(bit(nibble, 1))?;
        self.d6.set_state(bit(nibble, 2))?;
        self.d7.set_state(bit(nibble, 3))?;
        self.en.set_low()
    }
}

fn bit(value: u8, index: u8) -> PinState {
    PinState::from(value & (1 << index) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    fn pin(states: &[State]) -> PinMock {
        let transactions: Vec<Transaction> = states.iter().map(|s| Transaction::set(*s)).collect();
        PinMock::new(&transactions)
    }

    #[test]
    fn nibble_strobes_enable_around_data_lines() {
        use State::{High, Low};

        let mut rs = pin(&[Low]);
        let mut en = pin(&[Low, High, Low]);
        let mut d4 = pin(&[Low]);
        let mut d5 = pin(&[High]);
        let mut d6 = pin(&[Low]);
        let mut d7 = pin(&[High]);

        let mut interface = ParallelInterface::new(
            rs.clone(),
            en.clone(),
            d4.clone(),
            d5.clone(),
            d6.clone(),
            d7.clone(),
        );
        interface.idle().unwrap();
        interface.write_nibble(0b1010).unwrap();

        for pin in [&mut rs, &mut en, &mut d4, &mut d5, &mut d6, &mut d7] {
            pin.done();
        }
    }

    #[test]
    fn mode_drives_register_select() {
        let mut rs = pin(&[State::High, State::Low]);
        let mut interface = ParallelInterface::new(
            rs.clone(),
            pin(&[]),
            pin(&[]),
            pin(&[]),
            pin(&[]),
            pin(&[]),
        );
        interface.set_mode(Mode::Data).unwrap();
        interface.set_mode(Mode::Command).unwrap();

        let (_, mut en, mut d4, mut d5, mut d6, mut d7) = interface.release();
        for pin in [&mut rs, &mut en, &mut d4, &mut d5, &mut d6, &mut d7] {
            pin.done();
        }
    }

    #[test]
    fn only_low_four_bits_are_presented() {
        use State::{High, Low};

        let mut en = pin(&[High, Low]);
        let mut d4 = pin(&[High]);
        let mut d5 = pin(&[High]);
        let mut d6 = pin(&[High]);
        let mut d7 = pin(&[High]);
        let mut interface = ParallelInterface::new(
            pin(&[]),
            en.clone(),
            d4.clone(),
            d5.clone(),
            d6.clone(),
            d7.clone(),
        );
        interface.write_nibble(0xAF).unwrap();

        let (mut rs, ..) = interface.release();
        for pin in [&mut rs, &mut en, &mut d4, &mut d5, &mut d6, &mut d7] {
            pin.done();
        }
    }
}
