//! Display configuration types and builder

use crate::command::{DDRAM_LINE_LENGTH, SET_DDRAM_ADDRESS};
pub use crate::error::{BuilderError, MAX_ROWS};

/// Character font
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Font {
    /// 5x8 dots, any number of lines
    #[default]
    Dots5x8,
    /// 5x10 dots, single line only
    Dots5x10,
}

/// Settle delays required by the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Wait after power-up before the first write (ms)
    pub power_on_ms: u32,
    /// Wait after each 8-bit reset nibble (ms)
    pub reset_ms: u32,
    /// Wait between the reset sequence and the configuration commands (ms)
    pub setup_ms: u32,
    /// Wait after clear and return home (ms)
    pub clear_ms: u32,
    /// Wait after every byte (us)
    pub write_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            power_on_ms: 15,
            reset_ms: 5,
            setup_ms: 1,
            clear_ms: 2,
            write_us: 50,
        }
    }
}

/// Display configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Visible columns
    pub columns: u8,
    /// Visible rows
    pub rows: u8,
    /// DDRAM address of the first column of each row
    pub row_offsets: [u8; MAX_ROWS as usize],
    /// Character font
    pub font: Font,
    /// Controller settle delays
    pub timing: Timing,
}

impl Config {
    /// DDRAM address of (`col`, `row`), if addressable
    ///
    /// Columns past the visible width are valid off-screen DDRAM.
    pub fn address(&self, col: u8, row: u8) -> Option<u8> {
        if row >= self.rows || col >= DDRAM_LINE_LENGTH {
            return None;
        }
        self.row_offsets[usize::from(row)]
            .checked_add(col)
            .filter(|address| *address < SET_DDRAM_ADDRESS)
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use hd44780::Builder;
///
/// let config = Builder::new()
///     .columns(20)
///     .rows(4)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.address(0, 2), Some(0x14));
/// ```
pub struct Builder {
    /// Visible columns
    columns: u8,
    /// Visible rows
    rows: u8,
    /// DDRAM row offsets
    row_offsets: [u8; MAX_ROWS as usize],
    /// Character font
    font: Font,
    /// Controller settle delays
    timing: Timing,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            // 16x2 module
            columns: 16,
            rows: 2,
            // Standard addressing: rows 3 and 4 continue rows 1 and 2
            row_offsets: [0x00, 0x40, 0x14, 0x54],
            font: Font::Dots5x8,
            timing: Timing::default(),
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of visible columns
    pub fn columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    /// Set the number of visible rows
    pub fn rows(mut self, rows: u8) -> Self {
        self.rows = rows;
        self
    }

    /// Set the DDRAM offset of each row
    pub fn row_offsets(mut self, offsets: [u8; MAX_ROWS as usize]) -> Self {
        self.row_offsets = offsets;
        self
    }

    /// Set the character font
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Set the controller settle delays
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns a [`BuilderError`] for row or column counts the controller
    /// cannot address, or a 5x10 font on more than one line.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.rows == 0 || self.rows > MAX_ROWS {
            return Err(BuilderError::InvalidRows(self.rows));
        }
        if self.columns == 0 || self.columns > DDRAM_LINE_LENGTH {
            return Err(BuilderError::InvalidColumns(self.columns));
        }
        if self.font == Font::Dots5x10 && self.rows > 1 {
            return Err(BuilderError::FontNeedsSingleLine);
        }
        Ok(Config {
            columns: self.columns,
            rows: self.rows,
            row_offsets: self.row_offsets,
            font: self.font,
            timing: self.timing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sixteen_by_two() {
        let config = Builder::new().build().unwrap();
        assert_eq!((config.columns, config.rows), (16, 2));
        assert_eq!(config.address(0, 0), Some(0x00));
        assert_eq!(config.address(3, 1), Some(0x43));
    }

    #[test]
    fn off_screen_columns_are_addressable() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.address(39, 0), Some(0x27));
        assert_eq!(config.address(40, 0), None);
        assert_eq!(config.address(0, 2), None);
    }

    #[test]
    fn rejects_unaddressable_geometry() {
        assert_eq!(
            Builder::new().rows(5).build().unwrap_err(),
            BuilderError::InvalidRows(5)
        );
        assert_eq!(
            Builder::new().columns(0).build().unwrap_err(),
            BuilderError::InvalidColumns(0)
        );
        assert!(Builder::new().rows(1).font(Font::Dots5x10).build().is_ok());
    }
}
