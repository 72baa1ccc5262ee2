use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{CompiledMdp, StateKey};

#[derive(Debug, Clone)]
/// Seeded simulator over a compiled MDP.
pub struct MdpSimulator {
    mdp: CompiledMdp,
    rng: ChaCha8Rng,
}

impl MdpSimulator {
    /// Create a simulator with deterministic RNG seed.
    pub fn new(mdp: CompiledMdp, seed: u64) -> Self {
        Self {
            mdp,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Borrow the underlying compiled MDP.
    pub fn mdp(&self) -> &CompiledMdp {
        &self.mdp
    }

    /// Sample one `(next_state, reward)` transition.
    /// Returns `None` for unknown state/action inputs.
    pub fn step(&mut self, state_key: StateKey, action: usize) -> Option<(StateKey, f64)> {
        let sample = (self.rng.next_u64() as f64) / ((u64::MAX as f64) + 1.0);
        self.mdp.sample_transition(state_key, action, sample)
    }

    /// Follow `policy` for `steps` transitions from `start` and return the
    /// discounted sum of rewards. Stops early if the policy picks an invalid action.
    pub fn episode_return<F>(
        &mut self,
        start: StateKey,
        steps: usize,
        discount: f64,
        mut policy: F,
    ) -> f64
    where
        F: FnMut(StateKey) -> usize,
    {
        let mut state = start;
        let mut weight = 1.0;
        let mut total = 0.0;

        for _ in 0..steps {
            let action = policy(state);
            let Some((next, reward)) = self.step(state, action) else {
                break;
            };
            total += weight * reward;
            weight *= discount;
            state = next;
        }

        total
    }
}
