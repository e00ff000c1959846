//! Guess scoring

use core::fmt;

/// Result of comparing a guess with the secret
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    /// Right digit in the right position
    pub exact: u8,
    /// Right digit in the wrong position
    pub approximate: u8,
}

impl Score {
    /// Whether every one of `length` positions matched exactly
    pub fn is_solved(&self, length: usize) -> bool {
        usize::from(self.exact) == length
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exact {}, approximate {}", self.exact, self.approximate)
    }
}

/// Score `guess` against `secret`
///
/// Each secret position is matched at most once, and exact matches claim
/// their position before any approximate match is looked for. Positions past
/// the shorter of the two slices are ignored.
pub fn score(secret: &[u8], guess: &[u8]) -> Score {
    let len = secret.len().min(guess.len());
    let (secret, guess) = (&secret[..len], &guess[..len]);

    let mut claimed: Vec<bool> = secret.iter().zip(guess).map(|(s, g)| s == g).collect();
    let mut result = Score {
        exact: count(&claimed),
        approximate: 0,
    };

    for (i, digit) in guess.iter().enumerate() {
        if secret[i] == *digit {
            continue;
        }
        let found = (0..len).find(|&j| !claimed[j] && secret[j] == *digit);
        if let Some(j) = found {
            claimed[j] = true;
            result.approximate = result.approximate.saturating_add(1);
        }
    }

    result
}

fn count(flags: &[bool]) -> u8 {
    let n = flags.iter().filter(|flag| **flag).count();
    u8::try_from(n).unwrap_or(u8::MAX)
}
