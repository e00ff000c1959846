//! embedded-hal pin handles sharing one register driver
//!
//! All handles created from a [`SharedGpio`] refer to the same [`Gpio`]
//! through `Rc<RefCell<_>>`. They are `!Send`: the register block belongs to
//! the thread that mapped it.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState, StatefulOutputPin};

use crate::config::Layout;
use crate::error::Error;
use crate::gpio::{Direction, Gpio};
use crate::mapped::MappedBlock;
use crate::registers::RegisterSpan;

/// Cloneable handle to a register driver
pub struct SharedGpio<S> {
    gpio: Rc<RefCell<Gpio<S>>>,
}

impl<S> Clone for SharedGpio<S> {
    fn clone(&self) -> Self {
        Self {
            gpio: Rc::clone(&self.gpio),
        }
    }
}

impl SharedGpio<MappedBlock> {
    /// Map the GPIO block from `/dev/mem`
    pub fn open(layout: Layout) -> Result<Self, Error> {
        Gpio::open(layout).map(Self::new)
    }
}

impl<S> SharedGpio<S>
where
    S: RegisterSpan,
{
    pub fn new(gpio: Gpio<S>) -> Self {
        Self {
            gpio: Rc::new(RefCell::new(gpio)),
        }
    }

    /// Configure `pin` as an output and return a handle to it
    pub fn output(&self, pin: u8) -> Result<OutputLine<S>, Error> {
        self.gpio.borrow_mut().set_direction(pin, Direction::Output)?;
        Ok(OutputLine {
            gpio: Rc::clone(&self.gpio),
            pin,
        })
    }

    /// Configure `pin` as an input and return a handle to it
    pub fn input(&self, pin: u8) -> Result<InputLine<S>, Error> {
        self.gpio.borrow_mut().set_direction(pin, Direction::Input)?;
        Ok(InputLine {
            gpio: Rc::clone(&self.gpio),
            pin,
        })
    }

    /// Run `f` with exclusive access to the driver
    ///
    /// # Panics
    ///
    /// If called from inside another `with` on the same driver.
    pub fn with<R>(&self, f: impl FnOnce(&mut Gpio<S>) -> R) -> R {
        f(&mut self.gpio.borrow_mut())
    }
}

/// Pin configured as output
pub struct OutputLine<S> {
    gpio: Rc<RefCell<Gpio<S>>>,
    pin: u8,
}

impl<S> OutputLine<S> {
    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl<S> ErrorType for OutputLine<S> {
    type Error = Error;
}

impl<S> OutputPin for OutputLine<S>
where
    S: RegisterSpan,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.gpio.borrow_mut().write(self.pin, PinState::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.gpio.borrow_mut().write(self.pin, PinState::High)
    }
}

impl<S> StatefulOutputPin for OutputLine<S>
where
    S: RegisterSpan,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.gpio.borrow_mut().read(self.pin)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|high| !high)
    }
}

/// Pin configured as input
pub struct InputLine<S> {
    gpio: Rc<RefCell<Gpio<S>>>,
    pin: u8,
}

impl<S> InputLine<S> {
    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl<S> ErrorType for InputLine<S> {
    type Error = Error;
}

impl<S> InputPin for InputLine<S>
where
    S: RegisterSpan,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.gpio.borrow_mut().read(self.pin)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::SimulatedBlock;

    fn shared() -> SharedGpio<SimulatedBlock> {
        let layout = Layout::default();
        SharedGpio::new(Gpio::new(SimulatedBlock::new(layout), layout).unwrap())
    }

    #[test]
    fn handles_configure_direction() {
        let gpio = shared();
        let _led = gpio.output(13).unwrap();
        let _button = gpio.input(19).unwrap();

        gpio.with(|gpio| {
            let block = gpio.span().unwrap();
            assert_eq!(block.function(13), 0b001);
            assert_eq!(block.function(19), 0b000);
        });
    }

    #[test]
    fn output_line_toggles_level() {
        let gpio = shared();
        let mut led = gpio.output(5).unwrap();

        led.set_high().unwrap();
        assert!(led.is_set_high().unwrap());
        led.toggle().unwrap();
        assert!(led.is_set_low().unwrap());
    }

    #[test]
    fn input_line_sees_driven_level() {
        let gpio = shared();
        let mut button = gpio.input(19).unwrap();
        assert!(button.is_low().unwrap());

        gpio.with(|gpio| gpio.span_mut().unwrap().drive(19, true));
        assert!(button.is_high().unwrap());
    }

    #[test]
    fn out_of_range_handle_is_refused() {
        let gpio = shared();
        assert!(matches!(
            gpio.output(60),
            Err(Error::PinOutOfRange { pin: 60, .. })
        ));
    }
}
