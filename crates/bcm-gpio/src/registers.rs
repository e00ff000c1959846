// BCM2837 GPIO register map

// Peripheral placement
pub const PERIPHERAL_BASE: u64 = 0x3F00_0000; // BCM2837 (Pi 2 v1.2, Pi 3, Zero 2)
pub const GPIO_OFFSET: u64 = 0x20_0000; // GPIO controller, relative to PERIPHERAL_BASE
pub const BLOCK_SIZE: usize = 4 * 1024; // One page

// Register offsets within the GPIO block
pub const GPFSEL0: usize = 0x00; // Function select 0 (pins 0-9), 1-5 follow every 4 bytes
pub const GPSET0: usize = 0x1C; // Output set 0 (pins 0-31), write-only
pub const GPCLR0: usize = 0x28; // Output clear 0 (pins 0-31), write-only
pub const GPLEV0: usize = 0x34; // Pin level 0 (pins 0-31), read-only

// Field geometry
pub const PINS_PER_FSEL: u8 = 10;
pub const FSEL_BITS: u8 = 3;
pub const FSEL_MASK: u32 = 0b111;
pub const PINS_PER_BANK: u8 = 32;
pub const MAX_PIN: u8 = 53;

/// A span of 32-bit peripheral registers addressed by byte offset.
///
/// Implementations must treat every access as a side effect: reads of a level
/// register sample the pins, writes to a set or clear register drive them.
/// Offsets are 4-byte aligned and lie within `0..len()`; implementations
/// panic on anything else, the same way slice indexing does.
pub trait RegisterSpan {
    /// Size of the span in bytes
    fn len(&self) -> usize;

    /// Read the register at `offset`
    fn read(&mut self, offset: usize) -> u32;

    /// Write `value` to the register at `offset`
    fn write(&mut self, offset: usize, value: u32);

    /// Whether the span holds no registers
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
