use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("fraction must be between 0 and 1 (got {0})")]
    FractionOutOfRange(f64),
    #[error("fraction must be a number (got {0:?})")]
    InvalidFraction(String),
    #[error("number of lines must be a non-negative integer (got {0:?})")]
    InvalidCount(String),
}

/// Inclusion probability for fraction mode, always within `[0, 1]`.
///
/// Zero is accepted and simply selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Fraction(f64);

impl Fraction {
    pub fn new(p: f64) -> Result<Fraction, ConfigError> {
        if p.is_nan() || !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::FractionOutOfRange(p));
        }
        Ok(Fraction(p))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl FromStr for Fraction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let p: f64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidFraction(s.to_string()))?;
        Fraction::new(p)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How lines are selected. Exactly one mode is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum SampleMode {
    /// Keep each line independently with the given probability.
    Fraction(Fraction),
    /// Keep exactly this many lines (or all of them, if there are fewer).
    Count(usize),
}

impl SampleMode {
    pub fn fraction(p: f64) -> Result<SampleMode, ConfigError> {
        Fraction::new(p).map(SampleMode::Fraction)
    }

    pub fn parse_count(s: &str) -> Result<SampleMode, ConfigError> {
        s.trim()
            .parse::<usize>()
            .map(SampleMode::Count)
            .map_err(|_| ConfigError::InvalidCount(s.to_string()))
    }
}

impl fmt::Display for SampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleMode::Fraction(p) => write!(f, "fraction {p}"),
            SampleMode::Count(n) => write!(f, "count {n}"),
        }
    }
}
