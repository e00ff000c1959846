use thiserror::Error;

/// Errors surfaced by the game
#[derive(Debug, Error)]
pub enum GameError {
    /// Pin access failed
    #[error("GPIO error: {0}")]
    Gpio(#[from] bcm_gpio::Error),

    /// LCD write failed
    #[error("display error: {0}")]
    Display(#[from] hd44780::Error<bcm_gpio::Error>),

    /// LCD geometry rejected
    #[error("invalid display configuration: {0}")]
    DisplayConfig(#[from] hd44780::BuilderError),
}
