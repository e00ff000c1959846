//! Pin assignments and the peripherals wired to them

use bcm_gpio::{DebouncedInput, InputLine, OutputLine, RegisterSpan, SharedGpio, Timing};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use hd44780::{Display, ParallelInterface};
use log::debug;

use crate::error::GameError;

/// 4-bit LCD bus over register-driver output lines
pub type LcdInterface<S> = ParallelInterface<
    OutputLine<S>,
    OutputLine<S>,
    OutputLine<S>,
    OutputLine<S>,
    OutputLine<S>,
    OutputLine<S>,
>;

pub type Lcd<S, D> = Display<LcdInterface<S>, D>;

pub type Button<S, D> = DebouncedInput<InputLine<S>, D>;

/// BCM pin numbers of the LCD bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcdPins {
    pub rs: u8,
    pub en: u8,
    pub d4: u8,
    pub d5: u8,
    pub d6: u8,
    pub d7: u8,
}

impl Default for LcdPins {
    fn default() -> Self {
        LcdPins {
            rs: 25,
            en: 24,
            d4: 23,
            d5: 10,
            d6: 27,
            d7: 22,
        }
    }
}

/// Board wiring and feedback timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub green_led: u8,
    pub red_led: u8,
    pub button: u8,
    pub lcd: LcdPins,
    pub lcd_columns: u8,
    pub lcd_rows: u8,
    /// LED on time, and off time, of one flash (ms)
    pub flash_ms: u32,
    /// Pause before the success screen (ms)
    pub success_pause_ms: u32,
    pub button_timing: Timing,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            green_led: 13,
            red_led: 5,
            button: 19,
            lcd: LcdPins::default(),
            lcd_columns: 16,
            lcd_rows: 2,
            flash_ms: 500,
            success_pause_ms: 1000,
            button_timing: Timing::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Led {
    Green,
    Red,
}

/// LEDs, button and LCD sharing one register driver
pub struct Board<S, D> {
    pub green: OutputLine<S>,
    pub red: OutputLine<S>,
    pub button: Button<S, D>,
    pub lcd: Lcd<S, D>,
    delay: D,
    flash_ms: u32,
    success_pause_ms: u32,
}

impl<S, D> Board<S, D>
where
    S: RegisterSpan,
    D: DelayNs + Clone,
{
    /// Configure every pin direction and build the drivers
    ///
    /// The LCD controller itself is not touched; see [`Lcd::init`].
    pub fn new(gpio: &SharedGpio<S>, config: &BoardConfig, delay: D) -> Result<Self, GameError> {
        let green = gpio.output(config.green_led)?;
        let red = gpio.output(config.red_led)?;
        let button = DebouncedInput::with_timing(
            gpio.input(config.button)?,
            delay.clone(),
            config.button_timing,
        );

        let pins = config.lcd;
        let interface = ParallelInterface::new(
            gpio.output(pins.rs)?,
            gpio.output(pins.en)?,
            gpio.output(pins.d4)?,
            gpio.output(pins.d5)?,
            gpio.output(pins.d6)?,
            gpio.output(pins.d7)?,
        );
        let lcd_config = hd44780::Builder::new()
            .columns(config.lcd_columns)
            .rows(config.lcd_rows)
            .build()?;
        let lcd = Display::new(interface, delay.clone(), lcd_config);

        debug!(
            "board wired: green {}, red {}, button {}",
            config.green_led, config.red_led, config.button
        );

        Ok(Self {
            green,
            red,
            button,
            lcd,
            delay,
            flash_ms: config.flash_ms,
            success_pause_ms: config.success_pause_ms,
        })
    }

    pub fn led(&mut self, led: Led) -> &mut OutputLine<S> {
        match led {
            Led::Green => &mut self.green,
            Led::Red => &mut self.red,
        }
    }

    /// Blink `led` `times` times, leaving it off
    pub fn flash(&mut self, led: Led, times: u8) -> Result<(), GameError> {
        for _ in 0..times {
            self.led(led).set_high()?;
            self.delay.delay_ms(self.flash_ms);
            self.led(led).set_low()?;
            self.delay.delay_ms(self.flash_ms);
        }
        Ok(())
    }

    /// Sleep for one flash period without touching the LEDs
    pub fn hold(&mut self) {
        self.delay.delay_ms(self.flash_ms);
    }

    pub(crate) fn success_pause(&mut self) {
        self.delay.delay_ms(self.success_pause_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InstantDelay, simulated_gpio as shared};
    use bcm_gpio::{Direction, PinState};

    #[test]
    fn pin_directions_follow_wiring() {
        let gpio = shared();
        let config = BoardConfig::default();
        let _board = Board::new(&gpio, &config, InstantDelay).unwrap();

        gpio.with(|gpio| {
            let block = gpio.span().unwrap();
            let output = Direction::Output as u32;
            for pin in [13, 5, 25, 24, 23, 10, 27, 22] {
                assert_eq!(block.function(pin), output, "pin {pin}");
            }
            assert_eq!(block.function(19), Direction::Input as u32);
        });
    }

    #[test]
    fn flash_toggles_the_chosen_led() {
        let gpio = shared();
        let mut board = Board::new(&gpio, &BoardConfig::default(), InstantDelay).unwrap();
        gpio.with(|gpio| gpio.span_mut().unwrap().take_events());

        board.flash(Led::Red, 2).unwrap();

        let events = gpio.with(|gpio| gpio.span_mut().unwrap().take_events());
        let levels: Vec<(u8, PinState)> = events.iter().map(|e| (e.pin, e.level)).collect();
        assert_eq!(
            levels,
            vec![
                (5, PinState::High),
                (5, PinState::Low),
                (5, PinState::High),
                (5, PinState::Low),
            ]
        );
    }

    #[test]
    fn pin_beyond_layout_is_rejected() {
        let gpio = shared();
        let config = BoardConfig {
            button: 60,
            ..BoardConfig::default()
        };
        let result = Board::new(&gpio, &config, InstantDelay);
        assert!(matches!(
            result,
            Err(GameError::Gpio(bcm_gpio::Error::PinOutOfRange { pin: 60, .. }))
        ));
    }
}
