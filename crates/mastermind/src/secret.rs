use core::fmt;

use rand::Rng;

/// The sequence the player has to guess
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Secret {
    digits: Vec<u8>,
}

impl Secret {
    /// Draw `length` digits uniformly from `1..=max_digit`
    ///
    /// A `max_digit` of zero is treated as one.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: u8, max_digit: u8) -> Self {
        let max_digit = max_digit.max(1);
        let digits = (0..length)
            .map(|_| rng.random_range(1..=max_digit))
            .collect();
        Self { digits }
    }

    pub fn from_digits(digits: impl Into<Vec<u8>>) -> Self {
        Self {
            digits: digits.into(),
        }
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Digits(&self.digits), f)
    }
}

/// Space separated digits, as logged in debug mode
pub(crate) struct Digits<'a>(pub &'a [u8]);

impl fmt::Display for Digits<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, digit) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn digits_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let secret = Secret::generate(&mut rng, 5, 4);
            assert_eq!(secret.len(), 5);
            assert!(secret.digits().iter().all(|d| (1..=4).contains(d)));
        }
    }

    #[test]
    fn every_digit_is_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        let secret = Secret::generate(&mut rng, 200, 3);
        for digit in 1..=3 {
            assert!(secret.digits().contains(&digit), "digit {digit} never drawn");
        }
    }

    #[test]
    fn zero_max_digit_yields_ones() {
        let mut rng = StdRng::seed_from_u64(1);
        let secret = Secret::generate(&mut rng, 3, 0);
        assert_eq!(secret.digits(), &[1, 1, 1]);
    }

    #[test]
    fn displays_space_separated() {
        assert_eq!(Secret::from_digits([3, 1, 2]).to_string(), "3 1 2");
        assert_eq!(Secret::from_digits(Vec::new()).to_string(), "");
    }
}
