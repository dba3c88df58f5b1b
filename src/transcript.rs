//! Binary record of advised deals, for replaying and analysing runs offline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::Directive;
use crate::error::TranscriptError;
use crate::state::{DrawMode, Snapshot};

/// One advisory call: what was observed and what was recommended.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub snapshot: Snapshot,
    pub directive: Directive,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealRecord {
    pub draw_mode: DrawMode,
    pub turns: Vec<Turn>,
    pub won: bool,
}

impl DealRecord {
    pub fn new(draw_mode: DrawMode) -> Self {
        Self {
            draw_mode,
            turns: Vec::new(),
            won: false,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transcript {
    pub seed: u64,
    pub deals: Vec<DealRecord>,
}

impl Transcript {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            deals: Vec::new(),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, TranscriptError> {
        Ok(bincode::serde::encode_to_vec(
            self,
            bincode::config::standard(),
        )?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TranscriptError> {
        let (transcript, _) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(transcript)
    }

    pub fn save(&self, path: &Path) -> Result<(), TranscriptError> {
        fs::write(path, self.encode()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, TranscriptError> {
        Self::decode(&fs::read(path)?)
    }
}
