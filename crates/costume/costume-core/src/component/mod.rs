//! Costume components: the typed units that chore tracks animate and draw.
//!
//! Variants form a closed set keyed by their four-character tag. Shared data
//! (tag, name, parent links, hand-off candidate) lives in [`ComponentBase`];
//! per-variant state lives in [`ComponentKind`].

mod anim;
mod mesh;
mod script;
mod skeleton;
mod sprite;
mod texture;

pub use anim::{AnimComponent, AnimState};
pub use mesh::MeshComponent;
pub use script::{ScriptCodeComponent, ScriptRequest, ScriptVarComponent};
pub use skeleton::{PoseContribution, SkeletonComponent};
pub use sprite::SpriteComponent;
pub use texture::TextureComponent;

use serde::{Deserialize, Serialize};

use crate::ids::{ComponentHandle, ComponentId, CostumeId};
use crate::material::{MaterialCache, ResourceLoader};
use crate::render::Renderer;
use crate::tag::Tag;

/// Where a component's parent comes from, as encoded in the track record.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ParentIndex {
    /// No parent (`-1` without a previous costume).
    None,
    /// Attach to the previous costume's root (`-2`).
    SharedRoot,
    /// An earlier slot of this costume's component table.
    Direct(ComponentId),
}

impl ParentIndex {
    /// The on-disk / legacy integer encoding.
    pub fn as_raw(self) -> i32 {
        match self {
            ParentIndex::None => -1,
            ParentIndex::SharedRoot => -2,
            ParentIndex::Direct(id) => id.0 as i32,
        }
    }
}

/// Resolved parent of a component.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ParentRef {
    /// Owned by the same costume.
    Local(ComponentId),
    /// Non-owning reference into a previous costume's graph.
    Shared(ComponentHandle),
}

/// State every component variant carries.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentBase {
    pub tag: Tag,
    pub name: String,
    pub parent_index: ParentIndex,
    pub parent: Option<ParentRef>,
    /// Root component of the previous costume this one may share.
    pub handoff: Option<ComponentHandle>,
    pub costume: Option<CostumeId>,
}

/// Collaborators a component may touch while initializing or taking a key.
pub struct ComponentContext<'a> {
    pub materials: &'a mut MaterialCache,
    pub loader: &'a mut dyn ResourceLoader,
    pub scripts: &'a mut Vec<ScriptRequest>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ComponentKind {
    Mesh(MeshComponent),
    Skeleton(SkeletonComponent),
    Texture(TextureComponent),
    Animation(AnimComponent),
    ScriptCode(ScriptCodeComponent),
    ScriptVar(ScriptVarComponent),
    Sprite(SpriteComponent),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    pub base: ComponentBase,
    pub kind: ComponentKind,
}

impl Component {
    pub fn new(base: ComponentBase, kind: ComponentKind) -> Self {
        Self { base, kind }
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.base.tag
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.base.name
    }

    #[inline]
    pub fn parent(&self) -> Option<ParentRef> {
        self.base.parent
    }

    #[inline]
    pub fn parent_index(&self) -> ParentIndex {
        self.base.parent_index
    }

    #[inline]
    pub fn is_component_type(&self, tag: Tag) -> bool {
        self.base.tag == tag
    }

    pub fn set_costume(&mut self, costume: CostumeId) {
        self.base.costume = Some(costume);
    }

    /// One-time setup after the component is bound to its costume.
    pub fn init(&mut self, ctx: &mut ComponentContext<'_>) {
        match &mut self.kind {
            ComponentKind::Texture(t) => t.init(&self.base, ctx),
            ComponentKind::Mesh(m) => m.init(&self.base),
            _ => {}
        }
    }

    /// Apply a keyframe value reached by the owning track.
    pub fn set_key(&mut self, value: i32, ctx: &mut ComponentContext<'_>) {
        match &mut self.kind {
            ComponentKind::Mesh(m) => m.set_key(value),
            ComponentKind::Skeleton(_) => {}
            ComponentKind::Texture(t) => t.set_key(value, ctx),
            ComponentKind::Animation(a) => a.set_key(value),
            ComponentKind::ScriptCode(s) => s.set_key(&self.base, value, ctx),
            ComponentKind::ScriptVar(s) => s.set_key(&self.base, value, ctx),
            ComponentKind::Sprite(s) => s.set_key(value),
        }
    }

    /// Advance by `dt_ms`. Animations return the pose they want applied to
    /// the active skeleton.
    pub fn update(&mut self, dt_ms: u32) -> Option<PoseContribution> {
        match &mut self.kind {
            ComponentKind::Animation(a) => a.update(&self.base, dt_ms),
            _ => None,
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        match &self.kind {
            ComponentKind::Mesh(m) => m.draw(&self.base, renderer),
            ComponentKind::Sprite(s) => s.draw(&self.base, renderer),
            _ => {}
        }
    }

    pub fn as_skeleton(&self) -> Option<&SkeletonComponent> {
        match &self.kind {
            ComponentKind::Skeleton(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_skeleton_mut(&mut self) -> Option<&mut SkeletonComponent> {
        match &mut self.kind {
            ComponentKind::Skeleton(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&MeshComponent> {
        match &self.kind {
            ComponentKind::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_anim(&self) -> Option<&AnimComponent> {
        match &self.kind {
            ComponentKind::Animation(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_texture(&self) -> Option<&TextureComponent> {
        match &self.kind {
            ComponentKind::Texture(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_sprite(&self) -> Option<&SpriteComponent> {
        match &self.kind {
            ComponentKind::Sprite(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_script_var(&self) -> Option<&ScriptVarComponent> {
        match &self.kind {
            ComponentKind::ScriptVar(s) => Some(s),
            _ => None,
        }
    }
}
