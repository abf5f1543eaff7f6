use crate::error::Error;
use crate::pool::{ImagePool, PoolScope, QuestionItem};
use rand::Rng;
use tracing::{debug, info};

pub const PLAYER_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Winner(usize),
    Tie,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub player: usize,
    pub correct: bool,
    pub answer: String,
    pub next_player: usize,
    pub completed: bool,
}

/// Two players alternating over one shared pool, one image per turn.
///
/// The run ends once as many turns have been played as the pool has images,
/// so every image is shown exactly once.
#[derive(Debug)]
pub struct MultiplayerSession {
    pool: ImagePool,
    scores: [u32; PLAYER_COUNT],
    current_player: usize,
    current: Option<QuestionItem>,
    turns: usize,
    total_turns: usize,
}

impl MultiplayerSession {
    pub fn start<R: Rng + ?Sized>(mut pool: ImagePool, rng: &mut R) -> Result<Self, Error> {
        let first = pool.next(rng)?.clone();
        let total_turns = pool.len();
        info!(
            "Two-player quiz started on {} ({} images)",
            pool.scope(),
            total_turns
        );
        Ok(Self {
            pool,
            scores: [0; PLAYER_COUNT],
            current_player: 0,
            current: Some(first),
            turns: 0,
            total_turns,
        })
    }

    /// The turn passes to the other player whether or not the answer was right.
    pub fn submit<R: Rng + ?Sized>(&mut self, text: &str, rng: &mut R) -> Result<TurnOutcome, Error> {
        let current = self.current.take().ok_or(Error::QuizComplete)?;
        let player = self.current_player;
        let correct = current.accepts(text);
        if correct {
            self.scores[player] += 1;
        }

        self.turns += 1;
        self.current_player = (self.current_player + 1) % PLAYER_COUNT;
        let completed = self.turns >= self.total_turns;
        if !completed {
            self.current = Some(self.pool.next(rng)?.clone());
        } else {
            info!("Two-player quiz finished with scores {:?}", self.scores);
        }
        debug!(
            "Player {} answered {}, scores now {:?}",
            player + 1,
            if correct { "correctly" } else { "incorrectly" },
            self.scores
        );

        Ok(TurnOutcome {
            player,
            correct,
            answer: current.answer,
            next_player: self.current_player,
            completed,
        })
    }

    pub fn standing(&self) -> Standing {
        standing(self.scores)
    }

    pub fn scores(&self) -> [u32; PLAYER_COUNT] {
        self.scores
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn current(&self) -> Option<&QuestionItem> {
        self.current.as_ref()
    }

    pub fn scope(&self) -> &PoolScope {
        self.pool.scope()
    }

    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn total_turns(&self) -> usize {
        self.total_turns
    }
}

/// Strictly higher score wins; equal scores are a tie.
pub fn standing(scores: [u32; PLAYER_COUNT]) -> Standing {
    match scores[0].cmp(&scores[1]) {
        std::cmp::Ordering::Greater => Standing::Winner(0),
        std::cmp::Ordering::Less => Standing::Winner(1),
        std::cmp::Ordering::Equal => Standing::Tie,
    }
}
