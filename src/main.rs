use std::process::ExitCode;

use bcm_gpio::{Layout, SharedGpio, StdDelay};
use mastermind::{Board, BoardConfig, Game, GameError, Outcome, Settings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Welcome to Mastermind");

    // Map the hardware before anything else so a missing privilege fails fast
    let gpio = match SharedGpio::open(Layout::default()) {
        Ok(gpio) => gpio,
        Err(err) => {
            log::error!("Failed to initialise the game ({err}). This program has to be run as root");
            return ExitCode::FAILURE;
        }
    };

    let settings = Settings::from_args(std::env::args().skip(1));
    match run(&gpio, settings) {
        Ok(Outcome::Won { rounds }) => {
            log::info!("Won after {rounds} rounds");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Lost) => {
            log::info!("Out of rounds");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Game aborted: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(gpio: &SharedGpio<bcm_gpio::MappedBlock>, settings: Settings) -> Result<Outcome, GameError> {
    let board = Board::new(gpio, &BoardConfig::default(), StdDelay)?;
    let mut game = Game::new(board, settings);
    game.init()?;
    game.run(&mut rand::rng())
}
