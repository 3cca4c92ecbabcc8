//! Save/restore of costume playback state.
//!
//! Record order, all little-endian `i32`:
//!
//! ```text
//! chore_count
//! per chore:      state (0 stopped, 1 playing, 2 looping), time_ms
//! playing_count, playing chore ids (most recent first)
//! per material:   active texture index (cache order)
//! worn chore id   (-1 = none)
//! ```
//!
//! Restore must read in exactly this order.

use crate::chore::PlayState;
use crate::costume::Costume;
use crate::error::{Result, StateError};
use crate::ids::ChoreId;

/// Save-game integer primitives.
pub trait SaveGame {
    fn write_le_i32(&mut self, v: i32);
    fn read_le_i32(&mut self) -> Result<i32, StateError>;
}

/// In-memory save buffer with a read cursor.
#[derive(Debug, Default, Clone)]
pub struct MemorySaveGame {
    data: Vec<u8>,
    pos: usize,
}

impl MemorySaveGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Restart reading from the beginning.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}

impl SaveGame for MemorySaveGame {
    fn write_le_i32(&mut self, v: i32) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    fn read_le_i32(&mut self) -> Result<i32, StateError> {
        let end = self.pos + 4;
        let bytes = self.data.get(self.pos..end).ok_or(StateError::UnexpectedEof)?;
        self.pos = end;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl Costume {
    /// Write chore playback state, active textures and the worn chore.
    pub fn save_state(&self, state: &mut dyn SaveGame) {
        self.save_base_state(state);
        for mat in self.materials.iter() {
            state.write_le_i32(mat.active_texture());
        }
        state.write_le_i32(self.wear_chore.map_or(-1, |c| c.0 as i32));
    }

    /// Mirror of [`Costume::save_state`]. If the chore section fails to read,
    /// nothing else is restored.
    pub fn restore_state(&mut self, state: &mut dyn SaveGame) -> Result<()> {
        self.restore_base_state(state)?;

        for mat in self.materials.iter_mut() {
            mat.set_active_texture(state.read_le_i32()?);
        }

        let id = state.read_le_i32()?;
        if id >= 0 {
            if id as usize >= self.chores.len() {
                return Err(StateError::ChoreIdOutOfRange {
                    id,
                    count: self.chores.len(),
                }
                .into());
            }
            self.set_wear_chore(ChoreId(id as u32))?;
        }
        Ok(())
    }

    fn save_base_state(&self, state: &mut dyn SaveGame) {
        state.write_le_i32(self.chores.len() as i32);
        for chore in &self.chores {
            state.write_le_i32(chore.state().as_raw());
            state.write_le_i32(chore.time_ms().clamp(-1, i64::from(i32::MAX)) as i32);
        }
        state.write_le_i32(self.playing.len() as i32);
        for id in &self.playing {
            state.write_le_i32(id.0 as i32);
        }
    }

    fn restore_base_state(&mut self, state: &mut dyn SaveGame) -> Result<(), StateError> {
        let count = state.read_le_i32()?;
        if count < 0 || count as usize != self.chores.len() {
            return Err(StateError::ChoreCountMismatch {
                saved: count,
                loaded: self.chores.len(),
            });
        }

        let mut restored = Vec::with_capacity(self.chores.len());
        for idx in 0..self.chores.len() {
            let raw = state.read_le_i32()?;
            let play = PlayState::from_raw(raw).ok_or(StateError::InvalidChoreState {
                chore: idx,
                value: raw,
            })?;
            let time = state.read_le_i32()?;
            restored.push((play, time));
        }

        let playing_count = state.read_le_i32()?.max(0) as usize;
        let mut playing = Vec::with_capacity(playing_count.min(self.chores.len()));
        for _ in 0..playing_count {
            let id = state.read_le_i32()?;
            if id < 0 || id as usize >= self.chores.len() {
                return Err(StateError::ChoreIdOutOfRange {
                    id,
                    count: self.chores.len(),
                });
            }
            playing.push(ChoreId(id as u32));
        }

        for (chore, (play, time)) in self.chores.iter_mut().zip(restored) {
            chore.restore(play, i64::from(time));
        }
        self.playing = playing.into();
        Ok(())
    }
}
