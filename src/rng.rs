use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::Serialize;

/// The generator every sampling decision is drawn from.
pub type SampleRng = Xoshiro256StarStar;

/// Where the seed of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedOrigin {
    Explicit,
    Entropy,
}

/// Builds the run's generator.
///
/// With an explicit seed the draw sequence is fully reproducible. Without one a seed is
/// taken from OS entropy; it is returned so callers can log it and replay the run.
pub fn seeded_rng(seed: Option<u64>) -> (SampleRng, u64, SeedOrigin) {
    let (seed, origin) = match seed {
        Some(seed) => (seed, SeedOrigin::Explicit),
        None => (rand::random::<u64>(), SeedOrigin::Entropy),
    };

    (SampleRng::seed_from_u64(seed), seed, origin)
}
