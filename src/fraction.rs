use rand::Rng;
use std::io;

use crate::line::Line;
use crate::mode::Fraction;

/// Lazily keeps each line with probability `p`, in arrival order.
///
/// Exactly one `f64` is drawn per line read. Errors from the source are passed through
/// as they arrive.
pub struct FractionSample<'r, I, R: ?Sized> {
    source: I,
    rng: &'r mut R,
    p: f64,
}

pub fn fraction_sample<I, R>(rng: &mut R, source: I, p: Fraction) -> FractionSample<'_, I, R>
where
    I: Iterator<Item = io::Result<Line>>,
    R: Rng + ?Sized,
{
    FractionSample {
        source,
        rng,
        p: p.get(),
    }
}

impl<I, R> Iterator for FractionSample<'_, I, R>
where
    I: Iterator<Item = io::Result<Line>>,
    R: Rng + ?Sized,
{
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.source.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };

            if self.rng.gen::<f64>() < self.p {
                return Some(Ok(line));
            }
        }
    }
}
