//! Hash-seeded vector initialization.
//!
//! Every word starts training from a pseudo-random vector derived only from
//! the word and the configured seed, so the starting point does not depend on
//! vocabulary order.

use fnv::FnvHasher;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};

/// Hash used to derive per-word initialization seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashFunction {
    /// 64-bit FNV-1a. Stable across processes and platforms.
    #[default]
    Fnv1a,
    /// The standard library's randomly keyed SipHash.
    ///
    /// Keys differ per process, so two runs with the same seed start from
    /// different vectors. Only useful for parity with hash-randomized setups.
    Process,
}

impl HashFunction {
    /// Hash a word together with the training seed.
    pub fn hash_word(&self, word: &str, seed: u64) -> u64 {
        match self {
            HashFunction::Fnv1a => {
                let mut hasher = FnvHasher::default();
                word.hash(&mut hasher);
                seed.hash(&mut hasher);
                hasher.finish()
            }
            HashFunction::Process => {
                let mut hasher = process_state().build_hasher();
                word.hash(&mut hasher);
                seed.hash(&mut hasher);
                hasher.finish()
            }
        }
    }

    /// Initial vector for `word`, components uniform in `[-0.5, 0.5) / dimension`.
    pub fn seeded_vector(&self, word: &str, seed: u64, dimension: usize) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(self.hash_word(word, seed));
        let scale = 1.0 / dimension as f32;
        (0..dimension)
            .map(|_| (rng.gen::<f32>() - 0.5) * scale)
            .collect()
    }
}

fn process_state() -> &'static RandomState {
    static STATE: std::sync::OnceLock<RandomState> = std::sync::OnceLock::new();
    STATE.get_or_init(RandomState::new)
}
