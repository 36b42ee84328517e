use itertools::Itertools;
use log::{debug, trace};
use rand::Rng;
use std::io;

use crate::line::Line;

/// A fixed-capacity uniform sample of a line stream (Algorithm R).
///
/// Slots are replaced in an order unrelated to the input, so each slot keeps the line's
/// ordinal and the sample is sorted back into document order when drained. Memory use is
/// bounded by the capacity, never by the length of the stream.
pub struct Reservoir {
    capacity: usize,
    seen: usize,
    slots: Vec<Line>,
}

impl Reservoir {
    pub fn new(capacity: usize) -> Reservoir {
        Reservoir {
            capacity,
            seen: 0,
            slots: Vec::new(),
        }
    }

    /// Offer the next line of the stream.
    ///
    /// The first `capacity` lines are kept unconditionally. The line at 0-based position
    /// `k >= capacity` draws `j` uniformly from `0..=k` and replaces slot `j` if `j` falls
    /// inside the reservoir.
    pub fn offer<R: Rng + ?Sized>(&mut self, rng: &mut R, line: Line) {
        let k = self.seen;
        self.seen += 1;

        if self.capacity == 0 {
            return;
        }

        if self.slots.len() < self.capacity {
            self.slots.push(line);
            if self.slots.len() == self.capacity {
                debug!("reservoir filled with {} lines", self.capacity);
            }
            return;
        }

        let j = rng.gen_range(0..=k);
        if j < self.capacity {
            trace!(
                "line {} replaces line {} in slot {j}",
                line.ordinal,
                self.slots[j].ordinal
            );
            self.slots[j] = line;
        }
    }

    /// Number of lines offered so far.
    pub fn seen(&self) -> usize {
        self.seen
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consume the reservoir, returning its lines in original input order.
    pub fn into_ordered(self) -> Vec<Line> {
        self.slots
            .into_iter()
            .sorted_by_key(|line| line.ordinal)
            .collect()
    }
}

/// Select `min(k, L)` lines uniformly from a stream of unknown length `L`, returned in
/// their original order.
///
/// The whole source is consumed even when `k == 0`, so read errors are never masked.
pub fn reservoir_sample<I, R>(rng: &mut R, source: I, k: usize) -> io::Result<Vec<Line>>
where
    I: Iterator<Item = io::Result<Line>>,
    R: Rng + ?Sized,
{
    let mut reservoir = Reservoir::new(k);

    for line in source {
        reservoir.offer(rng, line?);
    }

    debug!("kept {} of {} lines", reservoir.len(), reservoir.seen());

    Ok(reservoir.into_ordered())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SampleRng;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    fn numbered(n: usize) -> impl Iterator<Item = io::Result<Line>> {
        (0..n).map(|i| Ok(Line::new(i, i.to_string())))
    }

    fn ordinals(lines: &[Line]) -> Vec<usize> {
        lines.iter().map(|l| l.ordinal).collect()
    }

    #[test]
    fn keeps_k_lines_in_order() {
        let mut rng = SampleRng::seed_from_u64(5);
        let sampled = reservoir_sample(&mut rng, numbered(100), 5).unwrap();

        assert_eq!(sampled.len(), 5);
        assert!(sampled.windows(2).all(|w| w[0].ordinal < w[1].ordinal));
    }

    #[test]
    fn short_stream_is_returned_whole() {
        let mut rng = SampleRng::seed_from_u64(5);
        let sampled = reservoir_sample(&mut rng, numbered(3), 5).unwrap();

        assert_eq!(ordinals(&sampled), vec![0, 1, 2]);
    }

    #[test]
    fn huge_capacity_on_short_stream_is_returned_whole() {
        let mut rng = SampleRng::seed_from_u64(5);
        let sampled = reservoir_sample(&mut rng, numbered(3), usize::MAX).unwrap();

        assert_eq!(ordinals(&sampled), vec![0, 1, 2]);
    }

    #[test]
    fn exact_fit_is_returned_whole() {
        let mut rng = SampleRng::seed_from_u64(5);
        let sampled = reservoir_sample(&mut rng, numbered(4), 4).unwrap();

        assert_eq!(ordinals(&sampled), vec![0, 1, 2, 3]);
    }

    #[test]
    fn zero_capacity_keeps_nothing_but_reads_everything() {
        let mut rng = SampleRng::seed_from_u64(5);
        let mut reservoir = Reservoir::new(0);
        for line in numbered(10) {
            reservoir.offer(&mut rng, line.unwrap());
        }

        assert_eq!(reservoir.seen(), 10);
        assert!(reservoir.is_empty());
        assert!(reservoir.into_ordered().is_empty());
    }

    #[test]
    fn replaced_slots_are_reordered_on_drain() {
        // A generator stuck at zero always picks slot 0, so each later line evicts whatever
        // sits there. The last line ends up in the first slot and must be sorted to the end.
        let mut rng = StepRng::new(0, 0);
        let sampled = reservoir_sample(&mut rng, numbered(10), 3).unwrap();

        assert_eq!(ordinals(&sampled), vec![1, 2, 9]);
    }

    #[test]
    fn read_error_aborts_the_pass() {
        let mut rng = SampleRng::seed_from_u64(5);
        let source = numbered(3).chain(std::iter::once(Err(io::Error::new(
            io::ErrorKind::Other,
            "boom",
        ))));

        assert!(reservoir_sample(&mut rng, source, 2).is_err());
    }

    #[test]
    fn distribution_uniform() {
        // Chi-squared smoke test across seeded runs; catches a biased replacement index or
        // an off-by-one in the stream position.
        let n = 50;
        let k = 5;
        let trials = 5_000;
        let mut counts = vec![0usize; n];

        for t in 0..trials {
            let mut rng = SampleRng::seed_from_u64(t as u64);
            for line in reservoir_sample(&mut rng, numbered(n), k).unwrap() {
                counts[line.ordinal] += 1;
            }
        }

        let expected = trials as f64 * (k as f64 / n as f64);
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                (diff * diff) / expected
            })
            .sum();

        // df = 49
        assert!(chi2 < 130.0, "chi2 too large (chi2={chi2:.2}). counts={counts:?}");
    }
}
