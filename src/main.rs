use anyhow::{Context, Result};
use env_logger::Env;
use linesample::cli::{parse_args, Command, Config, Input, USAGE};
use linesample::report::write_report;
use linesample::sample_lines;
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::process::exit;

const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn open_input(input: &Input) -> Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = match input {
        Input::Stdin => Box::new(io::stdin().lock()),
        Input::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("can't open '{}'", path.display()))?;
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

fn run(config: Config) -> Result<()> {
    let reader = open_input(&config.input)?;
    let writer = BufWriter::new(io::stdout().lock());

    let report = match sample_lines(config.mode, config.seed, reader, writer) {
        Ok(report) => report,
        // The reader went away (e.g. `| head`); nothing left worth reporting.
        Err(err) if err.is_broken_pipe() => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    debug!("{report:?}");

    if config.report {
        write_report(io::stderr().lock(), &report)?;
    }

    Ok(())
}

fn main() {
    env_logger::init_from_env(Env::new().default_filter_or("warn"));

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}", USAGE.lines().next().unwrap_or_default());
            eprintln!("linesample: error: {err}");
            exit(EXIT_USAGE);
        }
    };

    let config = match command {
        Command::Help => {
            println!("{USAGE}");
            return;
        }
        Command::Version => {
            println!("linesample {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Command::Run(config) => config,
    };

    if let Err(err) = run(config) {
        eprintln!("linesample: error: {err:#}");
        exit(EXIT_FAILURE);
    }
}
