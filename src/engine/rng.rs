//! Deterministic random number generation.
//!
//! Implements PCG (Permuted Congruential Generator) with partitioned seeds.
//! Every run carries an explicit master seed, and each Monte Carlo sample
//! gets its own derived stream.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, all random number sequences are
//! bitwise-identical across runs and platforms, and independent of how
//! many sample streams were partitioned off before a given one.

use rand::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Deterministic, reproducible random number generator.
///
/// Based on PCG, which provides good statistical properties, fast
/// generation, and independent streams via partitioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Current stream index for partitioning.
    stream: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SimRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        let rng = Pcg64::seed_from_u64(master_seed);
        Self {
            master_seed,
            stream: 0,
            rng,
        }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get current stream index.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// Create partitioned RNGs, one per Monte Carlo sample.
    ///
    /// Each partition gets an independent stream derived from the master
    /// seed, ensuring reproducibility regardless of execution order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use episim::engine::rng::SimRng;
    ///
    /// let mut rng = SimRng::new(42);
    /// let streams = rng.partition(100);
    /// assert_eq!(streams.len(), 100);
    /// ```
    #[must_use]
    pub fn partition(&mut self, n: usize) -> Vec<Self> {
        let partitions: Vec<Self> = (0..n)
            .map(|i| {
                let stream = self.stream + i as u64;
                let seed = self
                    .master_seed
                    .wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
                Self {
                    master_seed: self.master_seed,
                    stream,
                    rng: Pcg64::seed_from_u64(seed),
                }
            })
            .collect();

        self.stream += n as u64;
        partitions
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Property: Same seed produces same sequence.
    #[test]
    fn test_reproducibility() {
        let mut rng1 = SimRng::new(42);
        let mut rng2 = SimRng::new(42);

        let seq1: Vec<f64> = (0..100).map(|_| rng1.gen_f64()).collect();
        let seq2: Vec<f64> = (0..100).map(|_| rng2.gen_f64()).collect();

        assert_eq!(seq1, seq2, "Same seed must produce identical sequences");
    }

    /// Property: Different seeds produce different sequences.
    #[test]
    fn test_different_seeds() {
        let mut rng1 = SimRng::new(42);
        let mut rng2 = SimRng::new(43);

        let seq1: Vec<f64> = (0..100).map(|_| rng1.gen_f64()).collect();
        let seq2: Vec<f64> = (0..100).map(|_| rng2.gen_f64()).collect();

        assert_ne!(
            seq1, seq2,
            "Different seeds must produce different sequences"
        );
    }

    /// Property: Partitions are independent.
    #[test]
    fn test_partition_independence() {
        let mut rng = SimRng::new(42);
        let mut partitions = rng.partition(4);

        let seqs: Vec<Vec<f64>> = partitions
            .iter_mut()
            .map(|p| (0..10).map(|_| p.gen_f64()).collect())
            .collect();

        for i in 0..seqs.len() {
            for j in (i + 1)..seqs.len() {
                assert_ne!(seqs[i], seqs[j], "Partitions must be independent");
            }
        }
    }

    /// Property: Partitions are reproducible.
    #[test]
    fn test_partition_reproducibility() {
        let mut rng1 = SimRng::new(42);
        let mut rng2 = SimRng::new(42);

        let mut partitions1 = rng1.partition(4);
        let mut partitions2 = rng2.partition(4);

        for (p1, p2) in partitions1.iter_mut().zip(partitions2.iter_mut()) {
            let seq1: Vec<f64> = (0..10).map(|_| p1.gen_f64()).collect();
            let seq2: Vec<f64> = (0..10).map(|_| p2.gen_f64()).collect();
            assert_eq!(seq1, seq2, "Partition sequences must be reproducible");
        }
    }

    /// Property: partition must advance the stream counter by n.
    #[test]
    fn test_partition_stream_increment() {
        let mut rng = SimRng::new(42);
        assert_eq!(rng.stream(), 0);

        let _ = rng.partition(4);
        assert_eq!(rng.stream(), 4);

        let _ = rng.partition(3);
        assert_eq!(rng.stream(), 7, "Stream should be 4 + 3 = 7");
    }

    #[test]
    fn test_sim_rng_clone() {
        let rng = SimRng::new(42);
        let cloned = rng.clone();
        assert_eq!(cloned.master_seed(), rng.master_seed());
    }

    /// Property: serializing mid-sequence state and restoring it resumes
    /// the exact same sequence.
    #[test]
    fn test_state_serde_roundtrip() {
        let mut rng = SimRng::new(42);
        let _ = rng.gen_f64();

        let yaml = serde_yaml::to_string(&rng).expect("serialize");
        let mut restored: SimRng = serde_yaml::from_str(&yaml).expect("deserialize");

        assert_eq!(restored.master_seed(), rng.master_seed());
        for _ in 0..10 {
            assert!((rng.gen_f64() - restored.gen_f64()).abs() < f64::EPSILON);
        }
    }
}
