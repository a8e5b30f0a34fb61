use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::{Pack, PackRotation};

use super::{Command, TurnState};

/// Decides what to do with a turn's pack.
pub trait PlacementPolicy {
    /// Chooses the command for `turn`, whose pack (as scheduled, unrotated) is `pack`.
    ///
    /// `turn` is expected to be normalized already.
    fn decide(&mut self, turn: &TurnState, pack: &Pack) -> Command;
}

/// Picks a rotation and a drop column uniformly at random.
///
/// The generator is owned by the policy, so a fixed seed reproduces the same
/// sequence of decisions.
#[derive(Debug, Clone)]
pub struct RandomPolicy<R = Pcg32> {
    rng: R,
}

impl RandomPolicy<Pcg32> {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R> RandomPolicy<R>
where
    R: Rng,
{
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R> PlacementPolicy for RandomPolicy<R>
where
    R: Rng,
{
    fn decide(&mut self, turn: &TurnState, _pack: &Pack) -> Command {
        let rotation = PackRotation::new(self.rng.random_range(0..4));
        let columns = turn.player().board().geometry().drop_columns();
        let column = if columns.is_empty() {
            0
        } else {
            self.rng.random_range(columns)
        };
        Command::Drop { column, rotation }
    }
}
