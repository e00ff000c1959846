//! Pin primitives over a register span

use embedded_hal::digital::PinState;
use log::{debug, error};

use crate::config::Layout;
use crate::error::Error;
use crate::mapped::MappedBlock;
use crate::registers::{FSEL_MASK, RegisterSpan};

/// Pin function
///
/// The discriminant is the 3-bit function-select code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    Input = 0b000,
    Output = 0b001,
}

/// GPIO register driver
///
/// Owns the register span for as long as it is mapped. After
/// [`release`](Gpio::release) every pin operation fails with
/// [`Error::Unmapped`].
pub struct Gpio<S> {
    span: Option<S>,
    layout: Layout,
}

impl Gpio<MappedBlock> {
    /// Map the GPIO block from `/dev/mem`
    pub fn open(layout: Layout) -> Result<Self, Error> {
        let block = MappedBlock::open(&layout).inspect_err(|err| error!("{err}"))?;
        Self::new(block, layout)
    }
}

impl<S> Gpio<S>
where
    S: RegisterSpan,
{
    /// Take ownership of `span`
    ///
    /// # Errors
    ///
    /// [`Error::SpanTooSmall`] if the span cannot hold the layout's block.
    pub fn new(span: S, layout: Layout) -> Result<Self, Error> {
        if span.len() < layout.block_size() {
            return Err(Error::SpanTooSmall {
                len: span.len(),
                required: layout.block_size(),
            });
        }
        Ok(Self {
            span: Some(span),
            layout,
        })
    }

    /// Register layout in use
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether the register span is still held
    pub fn is_mapped(&self) -> bool {
        self.span.is_some()
    }

    /// Borrow the register span
    pub fn span(&self) -> Option<&S> {
        self.span.as_ref()
    }

    /// Mutably borrow the register span
    pub fn span_mut(&mut self) -> Option<&mut S> {
        self.span.as_mut()
    }

    /// Give up the register span; later pin operations fail
    pub fn release(&mut self) -> Option<S> {
        self.span.take()
    }

    /// Configure `pin` as input or output
    ///
    /// The pin's function field is always cleared to the input code first;
    /// output then sets its low bit with a second write. The read-modify-write
    /// touches the whole function-select word and is not safe against
    /// concurrent writers.
    pub fn set_direction(&mut self, pin: u8, direction: Direction) -> Result<(), Error> {
        let (offset, shift) = self.layout.function_select(pin);
        let span = self.span_for(pin)?;

        let cleared = span.read(offset) & !(FSEL_MASK << shift);
        span.write(offset, cleared);
        if direction == Direction::Output {
            span.write(offset, cleared | (Direction::Output as u32) << shift);
        }

        debug!("gpio {pin}: {direction:?}");
        Ok(())
    }

    /// Drive `pin` high or low
    ///
    /// Writes a single bit to the write-only set or clear register; other
    /// pins are unaffected, so no read-modify-write is needed.
    pub fn write(&mut self, pin: u8, level: PinState) -> Result<(), Error> {
        let (offset, mask) = match level {
            PinState::High => self.layout.set_register(pin),
            PinState::Low => self.layout.clear_register(pin),
        };
        self.span_for(pin)?.write(offset, mask);
        Ok(())
    }

    /// Raw, undebounced level of `pin`
    pub fn read(&mut self, pin: u8) -> Result<bool, Error> {
        let (offset, mask) = self.layout.level_register(pin);
        Ok(self.span_for(pin)?.read(offset) & mask != 0)
    }

    fn span_for(&mut self, pin: u8) -> Result<&mut S, Error> {
        let max = self.layout.max_pin();
        if pin > max {
            let err = Error::PinOutOfRange { pin, max };
            error!("{err}");
            return Err(err);
        }
        self.span.as_mut().ok_or_else(|| {
            error!("gpio {pin}: register block not mapped");
            Error::Unmapped
        })
    }
}
