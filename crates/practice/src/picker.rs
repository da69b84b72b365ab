//! Target selection.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Chooses the next practice target from an alphabet.
pub trait TargetPicker: Send {
    fn pick(&mut self, alphabet: &'static [&'static str]) -> &'static str;
}

/// Uniform choice, independent each time, repeats allowed.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetPicker for RandomPicker {
    fn pick(&mut self, alphabet: &'static [&'static str]) -> &'static str {
        alphabet.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

/// Replays a fixed list of targets in order, cycling at the end.
#[derive(Debug, Clone)]
pub struct ScriptedPicker {
    targets: Vec<&'static str>,
    next: usize,
}

impl ScriptedPicker {
    pub fn new(targets: Vec<&'static str>) -> Self {
        Self { targets, next: 0 }
    }
}

impl TargetPicker for ScriptedPicker {
    fn pick(&mut self, alphabet: &'static [&'static str]) -> &'static str {
        if self.targets.is_empty() {
            return alphabet.first().copied().unwrap_or_default();
        }
        let target = self.targets[self.next % self.targets.len()];
        self.next += 1;
        target
    }
}
