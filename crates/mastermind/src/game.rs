//! Round loop: read guesses with the button, answer on the LEDs and LCD

use bcm_gpio::RegisterSpan;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};
use rand::Rng;

use crate::board::{Board, Lcd, Led};
use crate::error::GameError;
use crate::scoring::{Score, score};
use crate::secret::{Digits, Secret};
use crate::settings::Settings;

/// Largest click count the entry field can show
const MAX_SHOWN_COUNT: u8 = 99;
/// LCD columns taken by one entered digit
const ENTRY_WIDTH: u8 = 2;

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Guessed in `rounds` rounds
    Won { rounds: u8 },
    /// Every round used up
    Lost,
}

pub struct Game<S, D> {
    board: Board<S, D>,
    settings: Settings,
    /// LCD column of the digit being entered
    entry_col: u8,
}

impl<S, D> Game<S, D>
where
    S: RegisterSpan,
    D: DelayNs + Clone,
{
    pub fn new(board: Board<S, D>, settings: Settings) -> Self {
        Self {
            board,
            settings,
            entry_col: 0,
        }
    }

    /// LEDs off, LCD initialised with the cursor at the top left
    pub fn init(&mut self) -> Result<(), GameError> {
        self.board.green.set_low()?;
        self.board.red.set_low()?;
        self.board.lcd.init()?;
        self.board.lcd.go_to(0, 0)?;
        Ok(())
    }

    /// Draw a secret from `rng` and play it
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Outcome, GameError> {
        let secret = Secret::generate(rng, self.settings.length, self.settings.max_digit);
        self.play(&secret)
    }

    /// Play every round against `secret`
    pub fn play(&mut self, secret: &Secret) -> Result<Outcome, GameError> {
        if self.settings.debug {
            info!("Secret: {secret}");
        }

        for round in 1..=self.settings.rounds {
            let guess = self.read_guess()?;
            if self.settings.debug {
                info!("Guess: {}", Digits(&guess));
            }

            let result = score(secret.digits(), &guess);
            debug!("round {round}: {result}");
            if result.is_solved(secret.len()) {
                self.show_success(round)?;
                info!("Solved in {round} rounds");
                return Ok(Outcome::Won { rounds: round });
            }
            self.show_miss(result)?;
        }

        self.show_game_over()?;
        info!("Game over");
        Ok(Outcome::Lost)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn board(&self) -> &Board<S, D> {
        &self.board
    }

    pub fn into_board(self) -> Board<S, D> {
        self.board
    }

    fn read_guess(&mut self) -> Result<Vec<u8>, GameError> {
        let mut guess = Vec::with_capacity(usize::from(self.settings.length));
        for _ in 0..self.settings.length {
            let digit = self.read_digit()?;
            self.board.flash(Led::Red, 1)?;
            self.board.flash(Led::Green, digit)?;
            guess.push(digit);
        }

        self.board.lcd.display_cursor(false, false)?;
        self.board.flash(Led::Red, 2)?;
        self.entry_col = 0;
        Ok(guess)
    }

    /// Count clicks for one digit, echoing the running count on the LCD
    fn read_digit(&mut self) -> Result<u8, GameError> {
        let col = self.entry_col;
        let Board { button, lcd, .. } = &mut self.board;

        lcd.display_cursor(true, true)?;

        let mut lcd_error = None;
        let mut on_click = |count: u8| {
            if lcd_error.is_some() {
                return;
            }
            if let Err(err) = show_count(&mut *lcd, col, count) {
                lcd_error = Some(err);
            }
        };
        let digit = button.count_clicks(self.settings.max_digit, Some(&mut on_click))?;
        if let Some(err) = lcd_error {
            return Err(err);
        }

        self.entry_col = col.saturating_add(ENTRY_WIDTH);
        self.board.lcd.go_to(self.entry_col, 0)?;
        self.board.lcd.display_cursor(true, false)?;
        Ok(digit)
    }

    fn show_success(&mut self, round: u8) -> Result<(), GameError> {
        self.board.success_pause();

        let lcd = &mut self.board.lcd;
        lcd.clear()?;
        lcd.go_to(0, 0)?;
        lcd.write_text("Success!")?;
        lcd.go_to(0, 1)?;
        lcd.write_text(&format!("Rounds: {round}"))?;

        self.board.red.set_high()?;
        self.board.hold();
        self.board.flash(Led::Green, 3)?;
        self.board.hold();
        self.board.red.set_low()?;
        Ok(())
    }

    fn show_miss(&mut self, result: Score) -> Result<(), GameError> {
        let lcd = &mut self.board.lcd;
        lcd.clear()?;
        lcd.go_to(0, 0)?;
        lcd.write_text(&format!("Exact: {}", result.exact))?;
        lcd.go_to(0, 1)?;
        lcd.write_text(&format!("Approx: {}", result.approximate))?;

        self.board.flash(Led::Green, result.exact)?;
        self.board.flash(Led::Red, 1)?;
        self.board.flash(Led::Green, result.approximate)?;

        info!("Press the button to continue...");
        self.board.lcd.display_cursor(true, true)?;
        self.board.button.wait_for_click()?;
        self.board.lcd.display_cursor(true, false)?;
        self.board.flash(Led::Red, 3)?;
        self.board.lcd.clear()?;
        Ok(())
    }

    fn show_game_over(&mut self) -> Result<(), GameError> {
        let lcd = &mut self.board.lcd;
        lcd.clear()?;
        lcd.display_cursor(false, false)?;
        lcd.go_to(0, 0)?;
        lcd.write_text("GAME OVER")?;
        Ok(())
    }
}

/// Write `count` over the entry field and put the cursor back on it
fn show_count<S, D>(lcd: &mut Lcd<S, D>, col: u8, count: u8) -> Result<(), GameError>
where
    S: RegisterSpan,
    D: DelayNs,
{
    if count > MAX_SHOWN_COUNT {
        warn!("Click count {count} does not fit the entry field, not displayed");
        return Ok(());
    }
    // Padded so a wrapped count clears the previous second digit
    lcd.write_text(&format!("{count:<2}"))?;
    lcd.go_to(col, 0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardConfig;
    use crate::testing::{InstantDelay, simulated_gpio};
    use bcm_gpio::{SharedGpio, SimulatedBlock};

    const BUTTON: u8 = 19;
    const GREEN: u8 = 13;
    const RED: u8 = 5;

    fn game(settings: Settings) -> (Game<SimulatedBlock, InstantDelay>, SharedGpio<SimulatedBlock>) {
        let gpio = simulated_gpio();
        let board = Board::new(&gpio, &BoardConfig::default(), InstantDelay).unwrap();
        let mut game = Game::new(board, settings);
        game.init().unwrap();
        (game, gpio)
    }

    /// Button samples for `clicks` quick clicks followed by the idle timeout
    fn digit(clicks: u8) -> Vec<bool> {
        let mut samples = Vec::new();
        for _ in 0..clicks {
            samples.extend([true, true, false]);
        }
        samples.extend([false; 20]);
        samples
    }

    fn press(gpio: &SharedGpio<SimulatedBlock>, samples: Vec<bool>) {
        gpio.with(|gpio| gpio.span_mut().unwrap().script(BUTTON, samples));
    }

    /// Count rising edges per LED
    fn flashes(gpio: &SharedGpio<SimulatedBlock>) -> (usize, usize) {
        let events = gpio.with(|gpio| gpio.span_mut().unwrap().take_events());
        let count = |pin| {
            events
                .iter()
                .filter(|e| e.pin == pin && e.level == bcm_gpio::PinState::High)
                .count()
        };
        (count(GREEN), count(RED))
    }

    #[test]
    fn first_round_win() {
        let (mut game, gpio) = game(Settings::default());
        for clicks in [2, 3, 1] {
            press(&gpio, digit(clicks));
        }

        let outcome = game.play(&Secret::from_digits([2, 3, 1])).unwrap();
        assert_eq!(outcome, Outcome::Won { rounds: 1 });
        assert_eq!(gpio.with(|gpio| gpio.span().unwrap().remaining(BUTTON)), 0);
    }

    #[test]
    fn clicks_wrap_at_max_digit() {
        let settings = Settings {
            length: 1,
            ..Settings::default()
        };
        let (mut game, gpio) = game(settings);
        // Five clicks with max 3 enter a 2
        press(&gpio, digit(5));

        let outcome = game.play(&Secret::from_digits([2])).unwrap();
        assert_eq!(outcome, Outcome::Won { rounds: 1 });
    }

    #[test]
    fn every_round_missed_loses() {
        let settings = Settings {
            length: 2,
            rounds: 2,
            ..Settings::default()
        };
        let (mut game, gpio) = game(settings);
        for _ in 0..2 {
            press(&gpio, digit(1));
            press(&gpio, digit(1));
            // Acknowledge the score screen
            press(&gpio, vec![true, true, false]);
        }

        let outcome = game.play(&Secret::from_digits([2, 3])).unwrap();
        assert_eq!(outcome, Outcome::Lost);
        assert_eq!(gpio.with(|gpio| gpio.span().unwrap().remaining(BUTTON)), 0);
    }

    #[test]
    fn led_feedback_for_entry_and_score() {
        let settings = Settings {
            length: 2,
            rounds: 1,
            ..Settings::default()
        };
        let (mut game, gpio) = game(settings);
        press(&gpio, digit(1));
        press(&gpio, digit(3));
        press(&gpio, vec![true, true, false]);
        flashes(&gpio);

        // Secret 3 1 against guess 1 3: no exact, two approximate
        assert_eq!(game.play(&Secret::from_digits([3, 1])).unwrap(), Outcome::Lost);

        // Entry: red + 1 green, red + 3 green, two red to end input
        // Score: 0 green, 1 red, 2 green; then three red after the click
        let (green, red) = flashes(&gpio);
        assert_eq!(green, 1 + 3 + 2);
        assert_eq!(red, 1 + 1 + 2 + 1 + 3);
    }

    #[test]
    fn entry_column_resets_between_rounds() {
        let settings = Settings {
            length: 2,
            rounds: 2,
            ..Settings::default()
        };
        let (mut game, gpio) = game(settings);
        press(&gpio, digit(1));
        press(&gpio, digit(1));
        press(&gpio, vec![true, true, false]);
        press(&gpio, digit(2));
        press(&gpio, digit(2));

        assert_eq!(
            game.play(&Secret::from_digits([2, 2])).unwrap(),
            Outcome::Won { rounds: 2 }
        );
        assert_eq!(game.entry_col, 0);
    }
}
