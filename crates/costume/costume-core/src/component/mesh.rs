use crate::ids::ComponentHandle;
use crate::render::Renderer;

use super::{ComponentBase, ParentIndex};

/// A skinned model. The root mesh of a costume may reuse the node hierarchy
/// of the previous costume's root.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshComponent {
    pub visible: bool,
    /// Set by `init` when this mesh shares the previous costume's hierarchy.
    pub shared_from: Option<ComponentHandle>,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            visible: true,
            shared_from: None,
        }
    }
}

impl MeshComponent {
    pub(super) fn init(&mut self, base: &ComponentBase) {
        if base.parent_index == ParentIndex::SharedRoot {
            self.shared_from = base.handoff;
        }
    }

    pub(super) fn set_key(&mut self, value: i32) {
        self.visible = value != 0;
    }

    pub(super) fn draw(&self, base: &ComponentBase, renderer: &mut dyn Renderer) {
        if self.visible {
            renderer.draw_mesh(&base.name, self.shared_from);
        }
    }
}
