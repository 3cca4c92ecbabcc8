//! Draw-call seam. Components hand their draw requests to a [`Renderer`];
//! the skeletal mesh and GPU work live behind it.

use serde::{Deserialize, Serialize};

use crate::ids::ComponentHandle;

pub trait Renderer {
    /// Draw a mesh model. `shared_from` is set when the model is the root
    /// inherited from a previous costume.
    fn draw_mesh(&mut self, model: &str, shared_from: Option<ComponentHandle>);
    fn draw_sprite(&mut self, sprite: &str);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCall {
    Mesh {
        model: String,
        shared_from: Option<ComponentHandle>,
    },
    Sprite {
        sprite: String,
    },
}

/// Renderer that records calls in order.
#[derive(Debug, Default, Clone)]
pub struct DrawLog {
    pub calls: Vec<DrawCall>,
}

impl DrawLog {
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn meshes(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Mesh { model, .. } => Some(model.as_str()),
            DrawCall::Sprite { .. } => None,
        })
    }
}

impl Renderer for DrawLog {
    fn draw_mesh(&mut self, model: &str, shared_from: Option<ComponentHandle>) {
        self.calls.push(DrawCall::Mesh {
            model: model.to_string(),
            shared_from,
        });
    }

    fn draw_sprite(&mut self, sprite: &str) {
        self.calls.push(DrawCall::Sprite {
            sprite: sprite.to_string(),
        });
    }
}
