//! Score and PVP match bookkeeping.
//!
//! Stored in `SimulationEngine`, not as ECS entities.

use orbit_arena_core::enums::PvpState;
use orbit_arena_core::state::{PvpView, ScoreView};

/// Running single-player score.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: u32,
    pub enemies_killed: u32,
}

impl ScoreState {
    pub fn view(&self, enemies_alive: u32) -> ScoreView {
        ScoreView {
            score: self.score,
            enemies_alive,
        }
    }
}

/// What a finished round means for the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    /// More rounds to play.
    RoundEnd,
    /// Last round played; `winner` is the top scorer.
    MatchOver { winner: u8 },
}

#[derive(Debug, Clone, Default)]
pub struct PvpSession {
    state: PvpState,
    player_count: u8,
    round: u32,
    max_rounds: u32,
    scores: Vec<u32>,
    /// Round winners in order; draws are not recorded.
    winners: Vec<u8>,
}

impl PvpSession {
    /// Rounds in a match for the given number of players.
    pub fn rounds_for(player_count: u8) -> u32 {
        match player_count {
            0..=2 => 3,
            3 => 4,
            _ => 6,
        }
    }

    pub fn init_session(&mut self, player_count: u8) {
        *self = Self {
            state: PvpState::RoundStart,
            player_count,
            round: 1,
            max_rounds: Self::rounds_for(player_count),
            scores: vec![0; player_count as usize],
            winners: Vec::new(),
        };
    }

    pub fn start_battle(&mut self) {
        if self.state == PvpState::RoundStart {
            self.state = PvpState::Battle;
        }
    }

    /// Close the current round. The winner (if any) scores a point.
    pub fn finish_round(&mut self, winner: Option<u8>) -> RoundResult {
        if let Some(slot) = winner {
            let index = (slot as usize).checked_sub(1);
            if let Some(score) = index.and_then(|i| self.scores.get_mut(i)) {
                *score += 1;
                self.winners.push(slot);
            }
        }
        if self.round >= self.max_rounds {
            self.state = PvpState::MatchOver;
            RoundResult::MatchOver {
                winner: self.match_winner(),
            }
        } else {
            self.state = PvpState::RoundEnd;
            RoundResult::RoundEnd
        }
    }

    /// Move to the next round. Only valid after `RoundEnd`.
    pub fn next_round(&mut self) -> bool {
        if self.state != PvpState::RoundEnd {
            return false;
        }
        self.round += 1;
        self.state = PvpState::RoundStart;
        true
    }

    /// Highest score; the lowest slot wins ties.
    pub fn match_winner(&self) -> u8 {
        let mut best = 0;
        for (i, score) in self.scores.iter().enumerate() {
            if *score > self.scores[best] {
                best = i;
            }
        }
        best as u8 + 1
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn state(&self) -> PvpState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn player_count(&self) -> u8 {
        self.player_count
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn winners(&self) -> &[u8] {
        &self.winners
    }

    pub fn view(&self) -> PvpView {
        PvpView {
            state: self.state,
            round: self.round,
            max_rounds: self.max_rounds,
            scores: self.scores.clone(),
        }
    }
}
