//! Binary chore loader.
//!
//! Layout (little-endian):
//!
//! ```text
//! chore_count: u32
//! per chore:   name_len: u32, name: [u8; name_len], length: f32, track_count: u32
//! per track:   desc_len: u32, descriptor: [u8; desc_len], reserved: u32,
//!              parent: i32, key_count: u32, keys: [(time: f32, value: f32); key_count]
//! ```
//!
//! Every track occupies one slot of the flat component table, whether or not
//! its descriptor produced a component, so parent indices stay stable.

use log::debug;

use crate::chore::{Chore, Keyframe, Track, TrackComponent};
use crate::component::{Component, ComponentContext, ParentIndex, ParentRef};
use crate::config::LoaderConfig;
use crate::error::{CostumeError, Result};
use crate::factory::load_component;
use crate::ids::{ChoreId, ComponentHandle, ComponentId, CostumeId};
use crate::stream::ByteStream;
use crate::tag::Tag;

/// The root component of the previous costume in a stack, as seen by the loader.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrevRoot {
    pub handle: ComponentHandle,
    /// Tag of the component in slot 0, `None` if that slot is empty.
    pub tag: Option<Tag>,
}

impl PrevRoot {
    /// The hand-off is only valid onto a mesh.
    fn candidate(&self) -> Option<ComponentHandle> {
        (self.tag == Some(Tag::MESH)).then_some(self.handle)
    }
}

/// Output of a successful load.
#[derive(Debug, Default)]
pub struct LoadedChores {
    pub chores: Vec<Chore>,
    pub components: Vec<Option<Component>>,
}

/// Seconds-or-milliseconds heuristic for raw chore lengths.
pub fn normalize_length(raw: f32, cfg: &LoaderConfig) -> f32 {
    if raw < cfg.seconds_threshold {
        raw * 1000.0
    } else {
        raw
    }
}

/// Parse a costume payload into chores and the flat component table.
///
/// Components are bound to `costume` and initialized through `ctx` as they are
/// read. Any error aborts the whole load.
pub fn load_chores(
    stream: &mut dyn ByteStream,
    cfg: &LoaderConfig,
    costume: CostumeId,
    prev: Option<PrevRoot>,
    ctx: &mut ComponentContext<'_>,
) -> Result<LoadedChores> {
    let chore_count = stream.read_u32_le("chore count")?;
    let mut out = LoadedChores {
        chores: Vec::with_capacity(chore_count.min(1024) as usize),
        components: Vec::new(),
    };

    for ci in 0..chore_count {
        let name_len = stream.read_u32_le("chore name length")?;
        if name_len >= cfg.max_name_len {
            return Err(CostumeError::NameTooLong {
                len: name_len,
                max: cfg.max_name_len,
            });
        }
        let name = c_string(stream.read_bytes(name_len as usize, "chore name")?);
        let raw_length = stream.read_f32_le("chore length")?;
        let track_count = stream.read_u32_le("track count")?;

        let mut length = normalize_length(raw_length, cfg);
        let mut chore = Chore::new(ChoreId(ci), name, 0);
        debug!(
            "loading chore {ci} '{}': {track_count} tracks, nominal {length}ms",
            chore.name
        );

        for ti in 0..track_count {
            let desc_len = stream.read_u32_le("descriptor length")? as usize;
            let descriptor = stream.read_bytes(desc_len, "descriptor")?.to_vec();
            stream.read_u32_le("reserved")?;
            let raw_parent = stream.read_i32_le("parent index")?;

            let mut handoff = None;
            let parent_index = match raw_parent {
                -1 if ci == 0 && ti == 0 && prev.is_some() => {
                    handoff = prev.and_then(|p| p.candidate());
                    ParentIndex::SharedRoot
                }
                p if p < 0 => ParentIndex::None,
                p => {
                    if p as usize >= out.components.len() {
                        return Err(CostumeError::ParentOutOfRange {
                            index: p,
                            available: out.components.len(),
                        });
                    }
                    ParentIndex::Direct(ComponentId(p as u32))
                }
            };
            let parent = match parent_index {
                ParentIndex::None => None,
                ParentIndex::SharedRoot => handoff.map(ParentRef::Shared),
                ParentIndex::Direct(id) => out.components[id.index()]
                    .as_ref()
                    .map(|_| ParentRef::Local(id)),
            };

            let slot = ComponentId(out.components.len() as u32);
            let mut component = load_component(&descriptor, parent, parent_index, handoff)?;
            let track_component = match component.as_mut() {
                Some(c) => {
                    c.set_costume(costume);
                    c.init(ctx);
                    chore.add_component(slot, c.tag());
                    TrackComponent::Owned(slot)
                }
                None => TrackComponent::None,
            };
            out.components.push(component);

            let key_count = stream.read_u32_le("key count")?;
            let mut keys = Vec::with_capacity(key_count.min(4096) as usize);
            for _ in 0..key_count {
                let time = stream.read_f32_le("key time")?;
                let value = stream.read_f32_le("key value")?;
                let time_ms = time * 1000.0;
                length = length.max(time_ms);
                keys.push(Keyframe {
                    time_ms: time_ms as i32,
                    value: value as i32,
                });
            }
            keys.sort_by_key(|k| k.time_ms);
            chore.tracks.push(Track {
                component: track_component,
                keys,
            });
        }

        // Some chores report a length shorter than their last key.
        chore.length_ms = length.ceil().max(0.0) as u32;
        out.chores.push(chore);
    }

    Ok(out)
}

fn c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
