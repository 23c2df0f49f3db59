//! Uniform index selection for seed placement and carve choices
//!
//! Generation only needs "pick an index in `0..len`". Live runs draw from a
//! seeded `StdRng`; tests inject a scripted sequence to pin the carve order.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform indices into non-empty candidate lists
pub trait ChoiceSource {
    /// Return an index in `0..len`
    ///
    /// Callers never pass `len == 0`; implementations return 0 in that case.
    fn choose(&mut self, len: usize) -> usize;
}

impl<C: ChoiceSource + ?Sized> ChoiceSource for &mut C {
    fn choose(&mut self, len: usize) -> usize {
        (**self).choose(len)
    }
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl ChoiceSource for RandomSelector {
    fn choose(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of picks, reduced modulo the candidate count
///
/// Once exhausted the script restarts from the beginning. An empty script
/// always picks the first candidate.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChoices {
    picks: Vec<usize>,
    cursor: usize,
    requests: Vec<usize>,
}

impl ScriptedChoices {
    /// Create a script from raw picks
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            cursor: 0,
            requests: Vec::new(),
        }
    }

    /// Candidate counts seen so far, one entry per call
    pub fn requests(&self) -> &[usize] {
        &self.requests
    }
}

impl ChoiceSource for ScriptedChoices {
    fn choose(&mut self, len: usize) -> usize {
        self.requests.push(len);
        if len == 0 || self.picks.is_empty() {
            return 0;
        }
        let pick = self
            .picks
            .get(self.cursor % self.picks.len())
            .copied()
            .unwrap_or(0);
        self.cursor += 1;
        pick % len
    }
}
