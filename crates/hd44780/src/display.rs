//! Core display operations

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::command::*;
use crate::config::{Config, Font};
use crate::error::Error;
use crate::interface::{DisplayInterface, Mode};

/// Character display driver
///
/// Owns the delay because every byte written must be followed by a settle
/// delay, including bytes written through [`core::fmt::Write`].
pub struct Display<I, D> {
    /// Hardware interface
    interface: I,
    /// Settle delays
    delay: D,
    /// Display configuration
    config: Config,
}

impl<I, D> Display<I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    /// Create a new Display instance
    ///
    /// The controller is untouched until [`init`](Self::init).
    pub fn new(interface: I, delay: D, config: Config) -> Self {
        Self {
            interface,
            delay,
            config,
        }
    }

    /// Reset the controller into 4-bit mode and configure it
    ///
    /// Leaves the display cleared and on, with the cursor hidden.
    pub fn init(&mut self) -> Result<(), Error<I::Error>> {
        let timing = self.config.timing;

        self.delay.delay_ms(timing.power_on_ms);
        self.interface.idle().map_err(Error::Interface)?;

        // The controller may be in 8-bit mode or halfway through a 4-bit
        // transfer; three 8-bit function sets bring it to a known state
        for _ in 0..3 {
            self.write_nibble(RESET_8_BIT)?;
            self.delay.delay_ms(timing.reset_ms);
        }
        self.write_nibble(RESET_4_BIT)?;
        self.delay.delay_ms(timing.setup_ms);

        self.write_command(self.function_set())?;
        self.write_command(DISPLAY_CONTROL)?;
        self.clear()?;
        self.write_command(ENTRY_MODE | ENTRY_INCREMENT)?;
        self.write_command(DISPLAY_CONTROL | DISPLAY_ON)?;

        debug!(
            "hd44780 initialised: {}x{}",
            self.config.columns, self.config.rows
        );
        Ok(())
    }

    /// Clear the display and move the cursor home
    pub fn clear(&mut self) -> Result<(), Error<I::Error>> {
        self.write_command(CLEAR_DISPLAY)?;
        self.delay.delay_ms(self.config.timing.clear_ms);
        Ok(())
    }

    /// Move the cursor home and undo any display shift
    pub fn home(&mut self) -> Result<(), Error<I::Error>> {
        self.write_command(RETURN_HOME)?;
        self.delay.delay_ms(self.config.timing.clear_ms);
        Ok(())
    }

    /// Move the cursor to `col`, `row`
    pub fn go_to(&mut self, col: u8, row: u8) -> Result<(), Error<I::Error>> {
        let address = self
            .config
            .address(col, row)
            .ok_or(Error::PositionOutOfRange { col, row })?;
        self.write_command(SET_DDRAM_ADDRESS | address)
    }

    /// Write text at the cursor
    ///
    /// Characters outside ASCII are shown as `?`.
    pub fn write_text(&mut self, text: &str) -> Result<(), Error<I::Error>> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.write_data(byte)?;
        }
        Ok(())
    }

    /// Write one character code at the cursor
    pub fn write_data(&mut self, data: u8) -> Result<(), Error<I::Error>> {
        self.write_byte(data, Mode::Data)
    }

    /// Send a raw instruction
    pub fn write_command(&mut self, command: u8) -> Result<(), Error<I::Error>> {
        self.write_byte(command, Mode::Command)
    }

    /// Show or hide the cursor and its blinking
    ///
    /// The display itself stays on.
    pub fn display_cursor(&mut self, visible: bool, blink: bool) -> Result<(), Error<I::Error>> {
        let mut command = DISPLAY_CONTROL | DISPLAY_ON;
        if visible {
            command |= CURSOR_ON;
        }
        if blink {
            command |= CURSOR_BLINK;
        }
        self.write_command(command)
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the interface and delay
    pub fn release(self) -> (I, D) {
        (self.interface, self.delay)
    }

    fn function_set(&self) -> u8 {
        let mut command = FUNCTION_SET;
        if self.config.rows > 1 {
            command |= TWO_LINES;
        }
        if self.config.font == Font::Dots5x10 {
            command |= FONT_5X10;
        }
        command
    }

    /// High nibble then low nibble, RS unchanged in between
    fn write_byte(&mut self, byte: u8, mode: Mode) -> Result<(), Error<I::Error>> {
        self.interface.set_mode(mode).map_err(Error::Interface)?;
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)?;
        self.delay.delay_us(self.config.timing.write_us);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), Error<I::Error>> {
        self.interface.write_nibble(nibble).map_err(Error::Interface)
    }
}

impl<I, D> core::fmt::Write for Display<I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_text(s).map_err(|_| core::fmt::Error)
    }
}
