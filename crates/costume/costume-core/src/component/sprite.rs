use crate::render::Renderer;

use super::ComponentBase;

/// Billboard sprite, hidden until a key shows it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteComponent {
    pub visible: bool,
}

impl SpriteComponent {
    pub(super) fn set_key(&mut self, value: i32) {
        self.visible = value != 0;
    }

    pub(super) fn draw(&self, base: &ComponentBase, renderer: &mut dyn Renderer) {
        if self.visible {
            renderer.draw_sprite(&base.name);
        }
    }
}
