use rand::Rng;

use super::Chunk;

impl Chunk {
    /// Generate a uniformly random [`Chunk`] from the given source of
    /// randomness
    #[must_use]
    pub fn random<R: Rng>(mut rng: R) -> Self {
        let mut bytes = [0; 32];
        rng.fill(&mut bytes);
        Self(bytes)
    }
}
