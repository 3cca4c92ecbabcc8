//! A stack of costumes worn by one actor.
//!
//! Each pushed costume is loaded with the current top as its previous
//! costume, so its root may share the top's root mesh. Only the top can be
//! popped, which keeps every [`ComponentHandle`] pointing at a live costume.

use log::debug;

use crate::component::Component;
use crate::config::CostumeConfig;
use crate::costume::Costume;
use crate::error::Result;
use crate::ids::{ComponentHandle, CostumeId, IdAllocator};
use crate::material::ResourceLoader;
use crate::stream::SliceStream;

#[derive(Debug, Default)]
pub struct CostumeStack {
    ids: IdAllocator,
    costumes: Vec<Costume>,
    cfg: CostumeConfig,
}

impl CostumeStack {
    pub fn new(cfg: CostumeConfig) -> Self {
        Self {
            ids: IdAllocator::new(),
            costumes: Vec::new(),
            cfg,
        }
    }

    /// Load `bytes` as a new costume on top of the stack.
    pub fn push_costume(
        &mut self,
        filename: &str,
        bytes: &[u8],
        loader: Box<dyn ResourceLoader>,
    ) -> Result<CostumeId> {
        let id = self.ids.alloc_costume();
        let mut stream = SliceStream::new(bytes);
        let costume = Costume::load(
            id,
            filename,
            &mut stream,
            self.costumes.last(),
            loader,
            self.cfg.clone(),
        )?;
        debug!("pushed costume '{filename}' as {id:?}");
        self.costumes.push(costume);
        Ok(id)
    }

    /// Remove and return the top costume.
    pub fn pop_costume(&mut self) -> Option<Costume> {
        self.costumes.pop()
    }

    pub fn top(&self) -> Option<&Costume> {
        self.costumes.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Costume> {
        self.costumes.last_mut()
    }

    pub fn get(&self, id: CostumeId) -> Option<&Costume> {
        self.costumes.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: CostumeId) -> Option<&mut Costume> {
        self.costumes.iter_mut().find(|c| c.id() == id)
    }

    /// Follow a non-owning handle to the component it names.
    pub fn resolve(&self, handle: ComponentHandle) -> Option<&Component> {
        self.get(handle.costume)?.component(handle.component)
    }

    pub fn len(&self) -> usize {
        self.costumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costumes.is_empty()
    }
}
