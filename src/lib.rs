//! Randomly sample lines from a text stream in a single pass, keeping their original order.
//!
//! Two modes are supported, see [`SampleMode`]:
//! - fraction: each line is kept independently with probability `p`, streamed as it is read;
//! - count: exactly `n` lines are chosen uniformly with a reservoir, then emitted in input
//!   order once the stream ends.
//!
//! Every random decision comes from one explicitly passed generator, so a run is fully
//! determined by its seed and input.

pub mod cli;
pub mod fraction;
pub mod line;
pub mod mode;
pub mod output;
pub mod report;
pub mod reservoir_sample;
pub mod rng;

use log::info;
use rand::Rng;
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub use fraction::{fraction_sample, FractionSample};
pub use line::{Line, LineSource};
pub use mode::{ConfigError, Fraction, SampleMode};
pub use output::LineSink;
pub use report::RunReport;
pub use reservoir_sample::{reservoir_sample, Reservoir};
pub use rng::{seeded_rng, SampleRng, SeedOrigin};

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

impl SampleError {
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, SampleError::Write(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }
}

/// Line counts of a completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub read: usize,
    pub written: usize,
}

/// Sample `reader` according to `mode`, writing the selected lines to `writer`.
///
/// Fraction mode writes each kept line as soon as it is read, so a read error can leave
/// earlier output behind. Count mode writes nothing until the whole input has been read.
pub fn sample_with_rng<B, W, R>(
    mode: SampleMode,
    rng: &mut R,
    reader: B,
    writer: W,
) -> Result<Counts, SampleError>
where
    B: BufRead,
    W: Write,
    R: Rng + ?Sized,
{
    let mut source = LineSource::new(reader);
    let mut sink = LineSink::new(writer);

    match mode {
        SampleMode::Fraction(p) => {
            for line in fraction_sample(rng, &mut source, p) {
                let line = line.map_err(SampleError::Read)?;
                sink.write_line(&line).map_err(SampleError::Write)?;
            }
        }
        SampleMode::Count(n) => {
            let lines = reservoir_sample(rng, &mut source, n).map_err(SampleError::Read)?;
            sink.write_all(&lines).map_err(SampleError::Write)?;
        }
    }

    let counts = Counts {
        read: source.lines_read(),
        written: sink.written(),
    };
    sink.finish().map_err(SampleError::Write)?;

    Ok(counts)
}

/// Seed a generator and run one sampling pass, returning a report of what happened.
pub fn sample_lines<B: BufRead, W: Write>(
    mode: SampleMode,
    seed: Option<u64>,
    reader: B,
    writer: W,
) -> Result<RunReport, SampleError> {
    let (mut rng, seed, seed_origin) = seeded_rng(seed);
    info!("sampling by {mode} with {seed_origin:?} seed {seed}");

    let counts = sample_with_rng(mode, &mut rng, reader, writer)?;

    Ok(RunReport {
        mode,
        seed,
        seed_origin,
        lines_read: counts.read,
        lines_written: counts.written,
    })
}
