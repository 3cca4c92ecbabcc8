//! Writer for the binary chore format, driven by JSON-friendly descriptions.
//!
//! Times and lengths are written raw, exactly as given (seconds for short
//! chores, the loader does the scaling).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostumeDesc {
    pub chores: Vec<ChoreDesc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoreDesc {
    pub name: String,
    pub length: f32,
    #[serde(default)]
    pub tracks: Vec<TrackDesc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackDesc {
    /// `!` + tag + name, written verbatim.
    pub descriptor: String,
    #[serde(default = "no_parent")]
    pub parent: i32,
    #[serde(default)]
    pub reserved: u32,
    /// `(time, value)` pairs as raw floats.
    #[serde(default)]
    pub keys: Vec<(f32, f32)>,
}

fn no_parent() -> i32 {
    -1
}

impl CostumeDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chore(mut self, chore: ChoreDesc) -> Self {
        self.chores.push(chore);
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, self.chores.len() as u32);
        for chore in &self.chores {
            put_u32(&mut out, chore.name.len() as u32);
            out.extend_from_slice(chore.name.as_bytes());
            out.extend_from_slice(&chore.length.to_le_bytes());
            put_u32(&mut out, chore.tracks.len() as u32);
            for track in &chore.tracks {
                put_u32(&mut out, track.descriptor.len() as u32);
                out.extend_from_slice(track.descriptor.as_bytes());
                put_u32(&mut out, track.reserved);
                out.extend_from_slice(&track.parent.to_le_bytes());
                put_u32(&mut out, track.keys.len() as u32);
                for (time, value) in &track.keys {
                    out.extend_from_slice(&time.to_le_bytes());
                    out.extend_from_slice(&value.to_le_bytes());
                }
            }
        }
        out
    }
}

impl ChoreDesc {
    pub fn new(name: &str, length: f32) -> Self {
        Self {
            name: name.to_string(),
            length,
            tracks: Vec::new(),
        }
    }

    pub fn track(mut self, track: TrackDesc) -> Self {
        self.tracks.push(track);
        self
    }
}

impl TrackDesc {
    pub fn new(descriptor: &str, parent: i32) -> Self {
        Self {
            descriptor: descriptor.to_string(),
            parent,
            reserved: 0,
            keys: Vec::new(),
        }
    }

    pub fn keys(mut self, keys: &[(f32, f32)]) -> Self {
        self.keys.extend_from_slice(keys);
        self
    }
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}
