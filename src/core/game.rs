use core::fmt;

use rand::rngs::SmallRng;
use rand::Rng;

use super::config::{SECRET_MAX, SECRET_MIN};

/// Errors returned when configuring a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Lower bound is greater than the upper bound.
    EmptyRange { low: u32, high: u32 },
    /// Fixed secret lies outside the configured range.
    SecretOutOfRange(u32),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyRange { low, high } => {
                write!(f, "Secret range {}..={} is empty", low, high)
            }
            GameError::SecretOutOfRange(secret) => {
                write!(f, "Secret {} is outside the configured range", secret)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    GaveUp,
}

/// Answer to a single line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Blank input; nothing to say.
    Ignored,
    /// Input was not an integer.
    Invalid { low: u32, high: u32 },
    TooLow,
    TooHigh,
    Correct { secret: u32, attempts: u32 },
    GaveUp { secret: u32 },
}

impl Reply {
    /// Whether this reply ends the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Reply::Correct { .. } | Reply::GaveUp { .. })
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ignored => Ok(()),
            Reply::Invalid { low, high } => {
                write!(f, "Please enter an integer between {} and {}.", low, high)
            }
            Reply::TooLow => f.write_str("Too low."),
            Reply::TooHigh => f.write_str("Too high."),
            Reply::Correct { secret, attempts } => write!(
                f,
                "Correct! The number was {}. Attempts: {}",
                secret, attempts
            ),
            Reply::GaveUp { secret } => write!(f, "You gave up. The number was: {}", secret),
        }
    }
}

/// Number guessing rules: one hidden number, unlimited attempts.
#[derive(Debug, Clone)]
pub struct GuessingGame {
    secret: u32,
    low: u32,
    high: u32,
    attempts: u32,
    status: GameStatus,
}

impl GuessingGame {
    /// Start a game over the default range with a random secret.
    pub fn new(rng: &mut SmallRng) -> Self {
        Self::build(rng.random_range(SECRET_MIN..=SECRET_MAX), SECRET_MIN, SECRET_MAX)
    }

    /// Start a game over `low..=high` with a random secret.
    pub fn with_range(rng: &mut SmallRng, low: u32, high: u32) -> Result<Self, GameError> {
        if low > high {
            return Err(GameError::EmptyRange { low, high });
        }
        Ok(Self::build(rng.random_range(low..=high), low, high))
    }

    /// Start a game over the default range with a known secret.
    pub fn with_secret(secret: u32) -> Result<Self, GameError> {
        if !(SECRET_MIN..=SECRET_MAX).contains(&secret) {
            return Err(GameError::SecretOutOfRange(secret));
        }
        Ok(Self::build(secret, SECRET_MIN, SECRET_MAX))
    }

    fn build(secret: u32, low: u32, high: u32) -> Self {
        Self {
            secret,
            low,
            high,
            attempts: 0,
            status: GameStatus::InProgress,
        }
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    /// Number of guesses counted so far, including non-numeric ones.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Evaluate one line of player input.
    ///
    /// Input after the game has finished is ignored.
    pub fn guess(&mut self, input: &str) -> Reply {
        let input = input.trim();
        if input.is_empty() || self.status != GameStatus::InProgress {
            return Reply::Ignored;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            self.status = GameStatus::GaveUp;
            return Reply::GaveUp {
                secret: self.secret,
            };
        }

        self.attempts += 1;
        let guess: i64 = match input.parse() {
            Ok(n) => n,
            Err(_) => {
                return Reply::Invalid {
                    low: self.low,
                    high: self.high,
                }
            }
        };

        let secret = i64::from(self.secret);
        if guess < secret {
            Reply::TooLow
        } else if guess > secret {
            Reply::TooHigh
        } else {
            self.status = GameStatus::Won;
            Reply::Correct {
                secret: self.secret,
                attempts: self.attempts,
            }
        }
    }
}
