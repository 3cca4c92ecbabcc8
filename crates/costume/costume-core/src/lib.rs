//! Costume Core
//!
//! Loads binary costume payloads (chores, tracks and tag-typed components),
//! drives per-frame update/draw over the chores currently playing, caches
//! materials, and saves/restores the observable playback state.
//!
//! Rendering, skeletal math and script execution stay with the host; the
//! [`Renderer`], [`ResourceLoader`], [`ByteStream`] and [`SaveGame`] traits
//! are the seams.

pub mod chore;
pub mod component;
pub mod config;
pub mod costume;
pub mod error;
pub mod factory;
pub mod ids;
pub mod loader;
pub mod material;
pub mod persistence;
pub mod render;
pub mod stack;
pub mod stream;
pub mod tag;

// Re-exports for hosts
pub use chore::{Chore, KeyEvent, Keyframe, PlayState, Track, TrackComponent};
pub use component::{
    Component, ComponentKind, ParentIndex, ParentRef, PoseContribution, ScriptRequest,
    SkeletonComponent,
};
pub use config::{CostumeConfig, LoaderConfig};
pub use costume::{Costume, FrameReport};
pub use error::{CostumeError, Result, StateError};
pub use factory::load_component;
pub use ids::{ChoreId, ComponentHandle, ComponentId, CostumeId};
pub use loader::load_chores;
pub use material::{FsNameLoader, Material, MaterialCache, MaterialId, ResourceLoader};
pub use persistence::{MemorySaveGame, SaveGame};
pub use render::{DrawCall, DrawLog, Renderer};
pub use stack::CostumeStack;
pub use stream::{ByteStream, SliceStream};
pub use tag::Tag;
