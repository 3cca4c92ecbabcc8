use crate::material::MaterialId;

use super::{ComponentBase, ComponentContext};

/// Texture switcher: keys select the active texture of one material.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextureComponent {
    pub material: Option<MaterialId>,
}

impl TextureComponent {
    pub(super) fn init(&mut self, base: &ComponentBase, ctx: &mut ComponentContext<'_>) {
        self.material = Some(ctx.materials.load(&mut *ctx.loader, &base.name));
    }

    pub(super) fn set_key(&mut self, value: i32, ctx: &mut ComponentContext<'_>) {
        if let Some(mat) = self.material.and_then(|id| ctx.materials.get_mut(id)) {
            mat.set_active_texture(value);
        }
    }
}
