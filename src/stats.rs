//! Session statistics for repeated deals.
//!
//! A deal counts as won when it is reset with every foundation at King;
//! any other reset is a loss.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionStats {
    pub wins: usize,
    pub losses: usize,
    pub current_moves: usize,
    pub total_moves: usize,
    pub winning_moves: usize,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_move(&mut self) {
        self.current_moves += 1;
    }

    /// Closes the current deal.
    pub fn finish_deal(&mut self, won: bool) {
        self.total_moves += self.current_moves;
        if won {
            self.wins += 1;
            self.winning_moves += self.current_moves;
        } else {
            self.losses += 1;
        }
        self.current_moves = 0;
    }

    pub fn games(&self) -> usize {
        self.wins + self.losses
    }

    /// Percentage of finished deals that were won.
    pub fn win_rate(&self) -> Option<f64> {
        (self.games() > 0).then(|| self.wins as f64 / self.games() as f64 * 100.0)
    }

    pub fn moves_per_game(&self) -> Option<f64> {
        (self.games() > 0).then(|| self.total_moves as f64 / self.games() as f64)
    }

    pub fn moves_per_win(&self) -> Option<f64> {
        (self.wins > 0).then(|| self.winning_moves as f64 / self.wins as f64)
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wins: {} | Losses: {}", self.wins, self.losses)?;
        if let Some(rate) = self.win_rate() {
            write!(f, " | Winrate: {rate:.2}%")?;
        }
        if let Some(moves) = self.moves_per_game() {
            write!(f, " | Moves per Game: {moves:.2}")?;
        }
        if let Some(moves) = self.moves_per_win() {
            write!(f, " | Moves per Win: {moves:.2}")?;
        }
        Ok(())
    }
}
