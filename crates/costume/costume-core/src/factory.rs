//! Component factory: descriptor string → component variant.
//!
//! Descriptors look like `!meshguy_body.mesh`: a `!` marker, a four-character
//! big-endian tag and the component name.

use log::{error, warn};

use crate::component::{
    AnimComponent, Component, ComponentBase, ComponentKind, MeshComponent, ParentIndex,
    ParentRef, ScriptCodeComponent, ScriptVarComponent, SkeletonComponent, SpriteComponent,
    TextureComponent,
};
use crate::error::{CostumeError, Result};
use crate::ids::ComponentHandle;
use crate::tag::Tag;

pub const DESCRIPTOR_MARKER: u8 = b'!';

/// A descriptor split into its tag and name.
#[derive(Clone, Debug, PartialEq)]
pub struct Descriptor {
    pub tag: Tag,
    pub name: String,
}

/// Split a raw descriptor. Trailing NUL padding is dropped from the name.
pub fn parse_descriptor(raw: &[u8]) -> Result<Descriptor> {
    let trimmed = match raw.iter().position(|&b| b == 0) {
        Some(end) => &raw[..end],
        None => raw,
    };
    if trimmed.first() != Some(&DESCRIPTOR_MARKER) {
        let descriptor = String::from_utf8_lossy(trimmed).into_owned();
        error!("component descriptor without marker: {descriptor:?}");
        return Err(CostumeError::MissingMarker { descriptor });
    }
    let body = &trimmed[1..];
    if body.len() < 4 {
        return Err(CostumeError::Truncated {
            what: "component tag",
            needed: 4,
            remaining: body.len(),
        });
    }
    let tag = Tag::from_bytes([body[0], body[1], body[2], body[3]]);
    let name = String::from_utf8_lossy(&body[4..]).into_owned();
    Ok(Descriptor { tag, name })
}

/// Instantiate the component a descriptor names.
///
/// Returns `Ok(None)` for tags that are known but produce no component, and
/// `UnknownTag` for anything outside the table.
pub fn load_component(
    raw: &[u8],
    parent: Option<ParentRef>,
    parent_index: ParentIndex,
    handoff: Option<ComponentHandle>,
) -> Result<Option<Component>> {
    let Descriptor { tag, name } = parse_descriptor(raw)?;

    let kind = match tag {
        Tag::MESH => ComponentKind::Mesh(MeshComponent::default()),
        Tag::SKEL => ComponentKind::Skeleton(SkeletonComponent::default()),
        Tag::TEXI => ComponentKind::Texture(TextureComponent::default()),
        Tag::ANIM => ComponentKind::Animation(AnimComponent::default()),
        Tag::LUAC => ComponentKind::ScriptCode(ScriptCodeComponent::default()),
        Tag::LUAV => ComponentKind::ScriptVar(ScriptVarComponent::default()),
        Tag::SPRT => ComponentKind::Sprite(SpriteComponent::default()),
        Tag::SHAD => {
            warn!("Implement SHAD-handling: {name}");
            return Ok(None);
        }
        Tag::AWGT => {
            warn!("Implement AWGT-handling: {name}");
            return Ok(None);
        }
        // Leftover from the earlier engine's sound system.
        Tag::SND2 => return Ok(None),
        other => {
            error!("missing component tag: {name} for {other}");
            return Err(CostumeError::UnknownTag { tag: other, name });
        }
    };

    let base = ComponentBase {
        tag,
        name,
        parent_index,
        parent,
        handoff,
        costume: None,
    };
    Ok(Some(Component::new(base, kind)))
}
