//! Register layout and input timing configuration

use crate::error::BuilderError;
use crate::registers::*;

/// Placement of the GPIO block and its registers
///
/// Only constructible through [`LayoutBuilder`], so every pin in
/// `0..=max_pin` is guaranteed to resolve to registers inside the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    peripheral_base: u64,
    gpio_offset: u64,
    block_size: usize,
    fsel_offset: usize,
    set_offset: usize,
    clear_offset: usize,
    level_offset: usize,
    max_pin: u8,
}

impl Layout {
    /// Start building a layout from the BCM2837 defaults
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::new()
    }

    /// Physical address of the GPIO block
    pub fn physical_address(&self) -> u64 {
        self.peripheral_base + self.gpio_offset
    }

    /// Size of the mapped block in bytes
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Highest valid pin number
    pub fn max_pin(&self) -> u8 {
        self.max_pin
    }

    /// Byte offset of the function-select register for `pin` and the shift of its field
    pub fn function_select(&self, pin: u8) -> (usize, u32) {
        let index = usize::from(pin / PINS_PER_FSEL);
        let shift = u32::from((pin % PINS_PER_FSEL) * FSEL_BITS);
        (self.fsel_offset + 4 * index, shift)
    }

    /// Byte offset of the output set register for `pin` and its bit mask
    pub fn set_register(&self, pin: u8) -> (usize, u32) {
        bank_register(self.set_offset, pin)
    }

    /// Byte offset of the output clear register for `pin` and its bit mask
    pub fn clear_register(&self, pin: u8) -> (usize, u32) {
        bank_register(self.clear_offset, pin)
    }

    /// Byte offset of the level register for `pin` and its bit mask
    pub fn level_register(&self, pin: u8) -> (usize, u32) {
        bank_register(self.level_offset, pin)
    }

    /// Number of 32-pin banks needed to cover `0..=max_pin`
    pub fn banks(&self) -> usize {
        usize::from(self.max_pin / PINS_PER_BANK) + 1
    }

    pub(crate) fn set_bank_offsets(&self) -> core::ops::Range<usize> {
        self.set_offset..self.set_offset + 4 * self.banks()
    }

    pub(crate) fn clear_bank_offsets(&self) -> core::ops::Range<usize> {
        self.clear_offset..self.clear_offset + 4 * self.banks()
    }

    pub(crate) fn level_bank_offsets(&self) -> core::ops::Range<usize> {
        self.level_offset..self.level_offset + 4 * self.banks()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            peripheral_base: PERIPHERAL_BASE,
            gpio_offset: GPIO_OFFSET,
            block_size: BLOCK_SIZE,
            fsel_offset: GPFSEL0,
            set_offset: GPSET0,
            clear_offset: GPCLR0,
            level_offset: GPLEV0,
            max_pin: MAX_PIN,
        }
    }
}

fn bank_register(base: usize, pin: u8) -> (usize, u32) {
    let bank = usize::from(pin / PINS_PER_BANK);
    (base + 4 * bank, 1 << (pin % PINS_PER_BANK))
}

/// Builder for constructing a register layout
///
/// # Example
///
/// ```
/// use bcm_gpio::Layout;
///
/// // BCM2835 (Pi 1, Zero) peripherals live lower in the address space
/// let layout = Layout::builder()
///     .peripheral_base(0x2000_0000)
///     .build()
///     .expect("valid layout");
/// assert_eq!(layout.physical_address(), 0x2020_0000);
/// ```
pub struct LayoutBuilder {
    layout: Layout,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        LayoutBuilder {
            layout: Layout::default(),
        }
    }
}

impl LayoutBuilder {
    /// Create a new builder with BCM2837 values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the physical base address of the peripheral bus
    pub fn peripheral_base(mut self, address: u64) -> Self {
        self.layout.peripheral_base = address;
        self
    }

    /// Set the offset of the GPIO block from the peripheral base
    pub fn gpio_offset(mut self, offset: u64) -> Self {
        self.layout.gpio_offset = offset;
        self
    }

    /// Set the number of bytes to map
    pub fn block_size(mut self, size: usize) -> Self {
        self.layout.block_size = size;
        self
    }

    /// Set the offset of the first function-select register
    pub fn fsel_offset(mut self, offset: usize) -> Self {
        self.layout.fsel_offset = offset;
        self
    }

    /// Set the offset of the first output set register
    pub fn set_offset(mut self, offset: usize) -> Self {
        self.layout.set_offset = offset;
        self
    }

    /// Set the offset of the first output clear register
    pub fn clear_offset(mut self, offset: usize) -> Self {
        self.layout.clear_offset = offset;
        self
    }

    /// Set the offset of the first level register
    pub fn level_offset(mut self, offset: usize) -> Self {
        self.layout.level_offset = offset;
        self
    }

    /// Set the highest pin number accepted by the driver
    pub fn max_pin(mut self, pin: u8) -> Self {
        self.layout.max_pin = pin;
        self
    }

    /// Build the layout
    ///
    /// # Errors
    ///
    /// Returns a [`BuilderError`] if the block size or an offset is misaligned,
    /// or if any register needed by `max_pin` lies outside the block.
    pub fn build(self) -> Result<Layout, BuilderError> {
        let layout = self.layout;
        if layout.block_size == 0 || layout.block_size % 4 != 0 {
            return Err(BuilderError::InvalidBlockSize(layout.block_size));
        }

        let pin = layout.max_pin;
        let registers = [
            ("function select", layout.fsel_offset, layout.function_select(pin).0),
            ("set", layout.set_offset, layout.set_register(pin).0),
            ("clear", layout.clear_offset, layout.clear_register(pin).0),
            ("level", layout.level_offset, layout.level_register(pin).0),
        ];

        for (register, base, last) in registers {
            if base % 4 != 0 {
                return Err(BuilderError::UnalignedOffset {
                    register,
                    offset: base,
                });
            }
            if last + 4 > layout.block_size {
                return Err(BuilderError::RegisterOutOfBlock {
                    register,
                    offset: last,
                    pin,
                    block_size: layout.block_size,
                });
            }
        }

        Ok(layout)
    }
}

/// Timing of the debounced input state machine, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Settle time between the two samples of a debounced read
    pub bounce_ms: u32,
    /// Sleep between polls while waiting for a follow-up click
    pub probe_ms: u32,
    /// Idle time after the last click that ends a click session
    pub click_timeout_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            bounce_ms: 30,
            probe_ms: 100,
            click_timeout_ms: 2_000,
        }
    }
}
