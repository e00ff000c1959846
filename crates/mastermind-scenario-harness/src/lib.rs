//! Host-side scenario test harness for whole games.
//!
//! The game runs against a [`SimulatedBlock`]: button presses are scripted
//! samples on the button pin, and every level change the game drives is
//! decoded back into LED flashes and LCD contents.

mod lcd_bus;

use std::cell::Cell;
use std::rc::Rc;

use bcm_gpio::{Gpio, Layout, PinState, SharedGpio, SimulatedBlock};
use embedded_hal::delay::DelayNs;
use mastermind::{Board, BoardConfig, Game, GameError, Led, Outcome, Secret, Settings};

pub use lcd_bus::LcdBus;

/// Idle samples that end a click session with the default timing
const IDLE_SAMPLES: usize = 20;

/// Delay that only accumulates the time it was asked to wait.
#[derive(Clone, Default)]
pub struct SimDelay {
    elapsed_ns: Rc<Cell<u64>>,
}

impl SimDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns.get() / 1_000_000
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns.set(self.elapsed_ns.get() + u64::from(ns));
    }
}

/// Couples a game, its simulated register block and the decoded outputs.
pub struct ScenarioHarness {
    game: Game<SimulatedBlock, SimDelay>,
    gpio: SharedGpio<SimulatedBlock>,
    config: BoardConfig,
    delay: SimDelay,
    lcd: LcdBus,
    flashes: Vec<Led>,
}

impl ScenarioHarness {
    /// Construct a harness on the default wiring, with the game initialised.
    pub fn new(settings: Settings) -> Self {
        Self::with_config(settings, BoardConfig::default())
    }

    pub fn with_config(settings: Settings, config: BoardConfig) -> Self {
        let layout = Layout::default();
        let gpio = Gpio::new(SimulatedBlock::new(layout), layout)
            .expect("simulated block matches its layout");
        let gpio = SharedGpio::new(gpio);

        let delay = SimDelay::default();
        let board = Board::new(&gpio, &config, delay.clone()).expect("board wiring should succeed");
        let mut game = Game::new(board, settings);
        game.init().expect("game init should succeed");

        let mut harness = Self {
            game,
            gpio,
            config,
            delay,
            lcd: LcdBus::new(config.lcd),
            flashes: Vec::new(),
        };
        harness.sync();
        harness
    }

    /// Queue `clicks` quick clicks followed by enough idle time to end the digit.
    pub fn enter_digit(&mut self, clicks: u8) {
        let mut samples = Vec::new();
        for _ in 0..clicks {
            samples.extend(click());
        }
        samples.extend([false; IDLE_SAMPLES]);
        self.script(samples);
    }

    /// Queue one digit per entry of `digits`.
    pub fn enter_guess(&mut self, digits: &[u8]) {
        for digit in digits {
            self.enter_digit(*digit);
        }
    }

    /// Queue the single click that dismisses the score screen.
    pub fn acknowledge(&mut self) {
        self.script(click().to_vec());
    }

    /// Play against `secret` until the game ends.
    ///
    /// Every press must be queued beforehand: once the script runs dry the
    /// button stays released and the game waits forever.
    pub fn play(&mut self, secret: &[u8]) -> Result<Outcome, GameError> {
        let outcome = self.game.play(&Secret::from_digits(secret));
        self.sync();
        outcome
    }

    /// Visible text of an LCD row.
    pub fn line(&self, row: usize) -> String {
        self.lcd.line(row, usize::from(self.config.lcd_columns))
    }

    /// Access the LCD decoder for assertions.
    pub fn lcd(&self) -> &LcdBus {
        &self.lcd
    }

    /// LED flashes since the last call, in order.
    pub fn take_flashes(&mut self) -> Vec<Led> {
        std::mem::take(&mut self.flashes)
    }

    /// Button samples queued but not read yet.
    pub fn pending_samples(&self) -> usize {
        self.gpio
            .with(|gpio| gpio.span().map_or(0, |block| block.remaining(self.config.button)))
    }

    /// Simulated time spent in delays.
    pub fn elapsed_ms(&self) -> u64 {
        self.delay.elapsed_ms()
    }

    fn script(&mut self, samples: Vec<bool>) {
        let button = self.config.button;
        self.gpio.with(|gpio| {
            if let Some(block) = gpio.span_mut() {
                block.script(button, samples);
            }
        });
    }

    /// Drain recorded level changes into the decoders.
    fn sync(&mut self) {
        let events = self
            .gpio
            .with(|gpio| gpio.span_mut().map(SimulatedBlock::take_events))
            .unwrap_or_default();

        for event in events {
            if event.level == PinState::High {
                if event.pin == self.config.green_led {
                    self.flashes.push(Led::Green);
                } else if event.pin == self.config.red_led {
                    self.flashes.push(Led::Red);
                }
            }
            self.lcd.feed(event);
        }
    }
}

/// Press confirmed by a second high sample, then released
fn click() -> [bool; 3] {
    [true, true, false]
}

/// Render flashes compactly, `G` for green and `R` for red.
pub fn flash_pattern(flashes: &[Led]) -> String {
    flashes
        .iter()
        .map(|led| match led {
            Led::Green => 'G',
            Led::Red => 'R',
        })
        .collect()
}
