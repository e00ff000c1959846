//! Game settings from command-line arguments
//!
//! Arguments take the form `-n=<len>`, `-c=<max digit>` and `-r=<rounds>`,
//! each value an unsigned 8-bit number. `-d` turns on debug output and
//! resets everything to the defaults; arguments after it are ignored.

use log::{error, info, warn};

/// Default sequence length
pub const DEFAULT_LENGTH: u8 = 3;
/// Default largest digit
pub const DEFAULT_MAX_DIGIT: u8 = 3;
/// Default number of rounds
pub const DEFAULT_ROUNDS: u8 = 3;
/// Longest sequence whose entry cursor stays inside one DDRAM line
pub const MAX_LENGTH: u8 = 19;

const DEBUG_ARG: &str = "-d";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Digits in the secret
    pub length: u8,
    /// Digits range over `1..=max_digit`
    pub max_digit: u8,
    /// Guesses allowed
    pub rounds: u8,
    /// Log the secret and every guess
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            length: DEFAULT_LENGTH,
            max_digit: DEFAULT_MAX_DIGIT,
            rounds: DEFAULT_ROUNDS,
            debug: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Setting {
    Length,
    MaxDigit,
    Rounds,
}

impl Setting {
    const ALL: [Setting; 3] = [Setting::Length, Setting::MaxDigit, Setting::Rounds];

    fn prefix(self) -> &'static str {
        match self {
            Setting::Length => "-n=",
            Setting::MaxDigit => "-c=",
            Setting::Rounds => "-r=",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Setting::Length => "Number of numbers (sequence length)",
            Setting::MaxDigit => "Maximum number",
            Setting::Rounds => "Number of rounds",
        }
    }
}

impl Settings {
    /// Parse program arguments, without the program name
    ///
    /// Bad arguments are logged and leave the affected setting unchanged.
    pub fn from_args<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        let mut settings = Settings::default();
        for arg in args {
            let arg = arg.as_ref();
            if arg == DEBUG_ARG {
                warn!("Debugging enabled, default settings will be used. Other arguments will be ignored");
                return Settings {
                    debug: true,
                    ..Settings::default()
                };
            }
            settings.apply(arg);
        }
        settings
    }

    fn apply(&mut self, arg: &str) {
        let Some((setting, value)) = Setting::ALL.iter().find_map(|setting| {
            arg.strip_prefix(setting.prefix())
                .filter(|value| !value.is_empty())
                .map(|value| (*setting, value))
        }) else {
            error!("Argument {arg} is invalid");
            return;
        };

        let current = *self.field(setting);
        match value.parse::<u8>() {
            Ok(0) => error!(
                "{} must be at least 1. Not changed, using {current}",
                setting.description()
            ),
            Ok(value) if setting == Setting::Length && value > MAX_LENGTH => warn!(
                "{} of {value} does not fit the display (max {MAX_LENGTH}). Not changed, using {current}",
                setting.description()
            ),
            Ok(value) => {
                *self.field(setting) = value;
                info!("{} changed to {value}", setting.description());
            }
            Err(_) => error!(
                "Parsing {arg} failed. {} not changed, using {current}",
                setting.description()
            ),
        }
    }

    fn field(&mut self, setting: Setting) -> &mut u8 {
        match setting {
            Setting::Length => &mut self.length,
            Setting::MaxDigit => &mut self.max_digit,
            Setting::Rounds => &mut self.rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_keeps_defaults() {
        let settings = Settings::from_args(Vec::<String>::new());
        assert_eq!(settings, Settings::default());
        assert_eq!((settings.length, settings.max_digit, settings.rounds), (3, 3, 3));
    }

    #[test]
    fn each_prefix_sets_its_value() {
        let settings = Settings::from_args(["-n=4", "-c=6", "-r=10"]);
        assert_eq!(settings.length, 4);
        assert_eq!(settings.max_digit, 6);
        assert_eq!(settings.rounds, 10);
        assert!(!settings.debug);
    }

    #[test]
    fn later_argument_wins() {
        let settings = Settings::from_args(["-r=5", "-r=7"]);
        assert_eq!(settings.rounds, 7);
    }

    #[test]
    fn bad_values_keep_previous_setting() {
        let settings = Settings::from_args(["-n=", "-c=abc", "-r=256", "-n=0", "-c=0", "-n=20"]);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn unknown_arguments_are_ignored() {
        let settings = Settings::from_args(["--verbose", "n=4", "-x=2", "-c=5"]);
        assert_eq!(settings.max_digit, 5);
        assert_eq!(settings.length, DEFAULT_LENGTH);
    }

    #[test]
    fn debug_resets_and_stops_parsing() {
        let settings = Settings::from_args(["-n=5", "-d", "-r=9"]);
        assert_eq!(
            settings,
            Settings {
                debug: true,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn longest_sequence_is_accepted() {
        let settings = Settings::from_args([format!("-n={MAX_LENGTH}")]);
        assert_eq!(settings.length, MAX_LENGTH);
    }
}
