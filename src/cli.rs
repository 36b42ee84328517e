use std::path::PathBuf;
use thiserror::Error;

use crate::mode::{ConfigError, Fraction, SampleMode};

pub const USAGE: &str = "\
usage: linesample [-h] [-V] [-s SEED] (-f FRACTION | -n NUMBER) [--report] [INFILE]

Randomly sample lines from INFILE (or standard input when INFILE is '-' or
omitted), preserving their original order.

options:
  -f, --fraction FRACTION  keep each line with probability FRACTION (0 to 1)
  -n, --number NUMBER      keep exactly NUMBER lines chosen uniformly at random
  -s, --seed SEED          integer seed for the random number generator; negative
                           seeds are reinterpreted as their 64-bit two's complement
      --report             print a JSON summary of the run to standard error
  -h, --help               show this help message and exit
  -V, --version            show the version and exit

Set RUST_LOG=info to log the seed of each run.";

#[derive(Error, Debug, PartialEq)]
pub enum UsageError {
    #[error("a value for exactly one of -f/--fraction or -n/--number is required")]
    MissingMode,
    #[error("-f/--fraction and -n/--number are mutually exclusive")]
    ConflictingModes,
    #[error("unrecognized argument: {0}")]
    UnknownFlag(String),
    #[error("argument {0}: expected one value")]
    MissingValue(&'static str),
    #[error("argument {0} given more than once")]
    Repeated(&'static str),
    #[error("unexpected extra argument: {0}")]
    ExtraArgument(String),
    #[error("argument -s/--seed: invalid seed {0:?}")]
    InvalidSeed(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Where input lines are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        if s == "-" {
            Input::Stdin
        } else {
            Input::File(PathBuf::from(s))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: Input,
    pub mode: SampleMode,
    pub seed: Option<u64>,
    pub report: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
    Version,
}

#[derive(Clone, Copy)]
enum Flag {
    Fraction,
    Number,
    Seed,
}

impl Flag {
    fn from_name(name: &str) -> Option<Flag> {
        let flag = match name {
            "-f" | "--fraction" => Flag::Fraction,
            "-n" | "--number" => Flag::Number,
            "-s" | "--seed" => Flag::Seed,
            _ => return None,
        };

        Some(flag)
    }

    fn display(self) -> &'static str {
        match self {
            Flag::Fraction => "-f/--fraction",
            Flag::Number => "-n/--number",
            Flag::Seed => "-s/--seed",
        }
    }
}

/// Seeds are 64-bit; a negative seed keeps its bit pattern.
fn parse_seed(value: &str) -> Result<u64, UsageError> {
    let trimmed = value.trim();
    trimmed
        .parse::<u64>()
        .or_else(|_| trimmed.parse::<i64>().map(|seed| seed as u64))
        .map_err(|_| UsageError::InvalidSeed(value.to_string()))
}

/// Parse the arguments following the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);

    let mut fraction: Option<Fraction> = None;
    let mut number: Option<SampleMode> = None;
    let mut seed: Option<u64> = None;
    let mut report = false;
    let mut input: Option<Input> = None;
    let mut only_positional = false;

    while let Some(arg) = args.next() {
        if only_positional || arg == "-" || !arg.starts_with('-') {
            if input.is_some() {
                return Err(UsageError::ExtraArgument(arg));
            }
            input = Some(Input::from(arg.as_str()));
            continue;
        }

        match arg.as_str() {
            "--" => {
                only_positional = true;
                continue;
            }
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--report" => {
                report = true;
                continue;
            }
            _ => {}
        }

        let (name, inline_value) = match arg.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (arg.as_str(), None),
        };
        let flag = Flag::from_name(name).ok_or_else(|| UsageError::UnknownFlag(arg.clone()))?;
        let value = match inline_value {
            Some(value) => value,
            None => args
                .next()
                .ok_or(UsageError::MissingValue(flag.display()))?,
        };

        match flag {
            Flag::Fraction => {
                if fraction.replace(value.parse()?).is_some() {
                    return Err(UsageError::Repeated(flag.display()));
                }
            }
            Flag::Number => {
                if number.replace(SampleMode::parse_count(&value)?).is_some() {
                    return Err(UsageError::Repeated(flag.display()));
                }
            }
            Flag::Seed => {
                let parsed = parse_seed(&value)?;
                if seed.replace(parsed).is_some() {
                    return Err(UsageError::Repeated(flag.display()));
                }
            }
        }
    }

    let mode = match (fraction, number) {
        (Some(p), None) => SampleMode::Fraction(p),
        (None, Some(mode)) => mode,
        (Some(_), Some(_)) => return Err(UsageError::ConflictingModes),
        (None, None) => return Err(UsageError::MissingMode),
    };

    Ok(Command::Run(Config {
        input: input.unwrap_or(Input::Stdin),
        mode,
        seed,
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_config(args: &[&str]) -> Config {
        match parse_args(args.iter().copied()) {
            Ok(Command::Run(config)) => config,
            other => panic!("expected a run config, got {other:?}"),
        }
    }

    #[test]
    fn parses_count_with_seed_and_file() {
        let config = run_config(&["-s", "42", "-n", "2", "lines.txt"]);

        assert_eq!(
            config,
            Config {
                input: Input::File(PathBuf::from("lines.txt")),
                mode: SampleMode::Count(2),
                seed: Some(42),
                report: false,
            }
        );
    }

    #[test]
    fn parses_long_flags_with_equals() {
        let config = run_config(&["--fraction=0.25", "--report", "-"]);

        assert_eq!(config.mode, SampleMode::fraction(0.25).unwrap());
        assert_eq!(config.input, Input::Stdin);
        assert_eq!(config.seed, None);
        assert!(config.report);
    }

    #[test]
    fn input_defaults_to_stdin() {
        assert_eq!(run_config(&["-n", "1"]).input, Input::Stdin);
    }

    #[test]
    fn double_dash_ends_flags() {
        let config = run_config(&["-n", "1", "--", "-weird-name"]);
        assert_eq!(config.input, Input::File(PathBuf::from("-weird-name")));
    }

    #[test]
    fn help_wins_over_missing_mode() {
        assert_eq!(parse_args(["--help"]), Ok(Command::Help));
        assert_eq!(parse_args(["-V"]), Ok(Command::Version));
    }

    #[test]
    fn negative_seed_keeps_its_bits() {
        assert_eq!(run_config(&["-s", "-1", "-n", "1"]).seed, Some(u64::MAX));
        assert_eq!(run_config(&["--seed=-2", "-n", "1"]).seed, Some(u64::MAX - 1));
        assert_eq!(
            parse_args(["-s", "x", "-n", "1"]),
            Err(UsageError::InvalidSeed("x".to_string()))
        );
    }

    #[test]
    fn negative_count_is_a_config_error() {
        assert_eq!(
            parse_args(["-n", "-3"]),
            Err(UsageError::Config(ConfigError::InvalidCount("-3".to_string())))
        );
    }
}
