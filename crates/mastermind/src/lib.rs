//! Mastermind on a Raspberry Pi
//!
//! The player enters each digit of a guess by clicking a push-button: the
//! number of quick clicks is the digit. The LCD echoes the running count,
//! the LEDs acknowledge every digit, and after each guess the LCD shows how
//! many digits are in the right place (`Exact`) and how many are right but
//! misplaced (`Approx`).
//!
//! ```no_run
//! use bcm_gpio::{Layout, SharedGpio, StdDelay};
//! use mastermind::{Board, BoardConfig, Game, Settings};
//!
//! let gpio = SharedGpio::open(Layout::default())?;
//! let board = Board::new(&gpio, &BoardConfig::default(), StdDelay)?;
//! let mut game = Game::new(board, Settings::from_args(std::env::args().skip(1)));
//! game.init()?;
//! let outcome = game.run(&mut rand::rng())?;
//! println!("{outcome:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

pub mod board;
pub mod error;
pub mod game;
pub mod scoring;
pub mod secret;
pub mod settings;

#[cfg(test)]
mod testing;

pub use board::{Board, BoardConfig, LcdPins, Led};
pub use error::GameError;
pub use game::{Game, Outcome};
pub use scoring::{Score, score};
pub use secret::Secret;
pub use settings::Settings;
