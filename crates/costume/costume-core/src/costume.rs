//! Costume: owns chores, the flat component table and the material cache,
//! and schedules per-frame update/draw across the playing chores.

use std::collections::VecDeque;
use std::fmt;

use hashbrown::HashMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::chore::Chore;
use crate::component::{Component, ComponentContext, ScriptRequest, SkeletonComponent};
use crate::config::CostumeConfig;
use crate::error::{CostumeError, Result};
use crate::ids::{ChoreId, ComponentHandle, ComponentId, CostumeId};
use crate::loader::{load_chores, PrevRoot};
use crate::material::{Material, MaterialCache, MaterialId, ResourceLoader};
use crate::render::Renderer;
use crate::stream::{ByteStream, SliceStream};
use crate::tag::Tag;

/// What happened during one [`Costume::update`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Chores that finished this frame and left the playing set.
    pub finished: Vec<ChoreId>,
    /// Script work queued by script components, in firing order.
    pub script_requests: Vec<ScriptRequest>,
}

pub struct Costume {
    pub(crate) id: CostumeId,
    pub(crate) filename: String,
    pub(crate) chores: Vec<Chore>,
    pub(crate) components: Vec<Option<Component>>,
    chore_names: HashMap<String, ChoreId>,
    /// Most recently started first.
    pub(crate) playing: VecDeque<ChoreId>,
    pub(crate) wear_chore: Option<ChoreId>,
    skeleton: Option<ComponentId>,
    pub(crate) materials: MaterialCache,
    loader: Box<dyn ResourceLoader>,
    scripts: Vec<ScriptRequest>,
}

impl fmt::Debug for Costume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Costume")
            .field("id", &self.id)
            .field("filename", &self.filename)
            .field("chores", &self.chores.len())
            .field("components", &self.components.len())
            .field("playing", &self.playing)
            .field("wear_chore", &self.wear_chore)
            .field("materials", &self.materials.len())
            .finish_non_exhaustive()
    }
}

impl Costume {
    /// Load a costume from a chore stream.
    ///
    /// `prev` is the costume below this one in the actor's costume stack; its
    /// root mesh may be shared by this costume's first component. It must
    /// outlive this costume.
    pub fn load(
        id: CostumeId,
        filename: impl Into<String>,
        stream: &mut dyn ByteStream,
        prev: Option<&Costume>,
        mut loader: Box<dyn ResourceLoader>,
        cfg: CostumeConfig,
    ) -> Result<Self> {
        let filename = filename.into();
        let mut materials = MaterialCache::with_capacity(cfg.initial_material_capacity);
        let mut scripts = Vec::new();
        let prev_root = prev.map(Costume::root_for_handoff);

        let loaded = {
            let mut ctx = ComponentContext {
                materials: &mut materials,
                loader: loader.as_mut(),
                scripts: &mut scripts,
            };
            load_chores(stream, &cfg.loader, id, prev_root, &mut ctx)?
        };
        debug!(
            "loaded costume '{filename}': {} chores, {} component slots",
            loaded.chores.len(),
            loaded.components.len()
        );

        let chore_names = loaded
            .chores
            .iter()
            .map(|c| (c.name.clone(), c.id))
            .collect();

        Ok(Self {
            id,
            filename,
            chores: loaded.chores,
            components: loaded.components,
            chore_names,
            playing: VecDeque::new(),
            wear_chore: None,
            skeleton: None,
            materials,
            loader,
            scripts,
        })
    }

    /// [`Costume::load`] over an in-memory payload with default config.
    pub fn from_bytes(
        id: CostumeId,
        filename: impl Into<String>,
        bytes: &[u8],
        prev: Option<&Costume>,
        loader: Box<dyn ResourceLoader>,
    ) -> Result<Self> {
        let mut stream = SliceStream::new(bytes);
        Self::load(
            id,
            filename,
            &mut stream,
            prev,
            loader,
            CostumeConfig::default(),
        )
    }

    fn root_for_handoff(&self) -> PrevRoot {
        PrevRoot {
            handle: ComponentHandle {
                costume: self.id,
                component: ComponentId(0),
            },
            tag: self.component(ComponentId(0)).map(Component::tag),
        }
    }

    pub fn id(&self) -> CostumeId {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn chores(&self) -> &[Chore] {
        &self.chores
    }

    pub fn chore(&self, id: ChoreId) -> Option<&Chore> {
        self.chores.get(id.index())
    }

    pub fn chore_by_name(&self, name: &str) -> Option<ChoreId> {
        self.chore_names.get(name).copied()
    }

    /// The flat component table; `None` slots belong to tracks whose
    /// descriptor produced no component.
    pub fn components(&self) -> &[Option<Component>] {
        &self.components
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.index()).and_then(Option::as_ref)
    }

    fn check_chore(&self, id: ChoreId) -> Result<()> {
        if id.index() < self.chores.len() {
            Ok(())
        } else {
            Err(CostumeError::ChoreOutOfRange {
                index: id.index(),
                count: self.chores.len(),
            })
        }
    }

    /// Play a chore once. A wear chore dresses the costume first.
    pub fn play_chore(&mut self, id: ChoreId) -> Result<()> {
        self.check_chore(id)?;
        if self.chores[id.index()].is_wear_chore() {
            self.set_wear_chore(id)?;
        }
        self.chores[id.index()].play();
        self.mark_playing(id);
        Ok(())
    }

    /// Play a chore on loop. A wear chore dresses the costume first.
    pub fn play_chore_looping(&mut self, id: ChoreId) -> Result<()> {
        self.check_chore(id)?;
        if self.chores[id.index()].is_wear_chore() {
            self.set_wear_chore(id)?;
        }
        self.chores[id.index()].play_looping();
        self.mark_playing(id);
        Ok(())
    }

    fn mark_playing(&mut self, id: ChoreId) {
        if !self.playing.contains(&id) {
            self.playing.push_front(id);
        }
    }

    /// Stop a chore and drop it from the playing set immediately. State its
    /// keys already applied stays applied.
    pub fn stop_chore(&mut self, id: ChoreId) -> Result<()> {
        self.check_chore(id)?;
        self.chores[id.index()].stop();
        self.playing.retain(|c| *c != id);
        Ok(())
    }

    pub fn stop_all(&mut self) {
        for id in self.playing.drain(..) {
            self.chores[id.index()].stop();
        }
    }

    pub fn is_chore_playing(&self, id: ChoreId) -> bool {
        self.playing.contains(&id)
    }

    /// Playing chores, most recently started first.
    pub fn playing_chores(&self) -> impl Iterator<Item = ChoreId> + '_ {
        self.playing.iter().copied()
    }

    /// Make `id` the worn chore and bind its skeleton. No-op if already worn.
    pub fn set_wear_chore(&mut self, id: ChoreId) -> Result<()> {
        self.check_chore(id)?;
        if self.wear_chore == Some(id) {
            return Ok(());
        }
        self.wear_chore = Some(id);
        if let Some(skel) = self.skeleton_mut() {
            skel.reset();
        }
        self.skeleton = self.chores[id.index()].skeleton();
        debug!(
            "costume '{}' now wears chore '{}'",
            self.filename,
            self.chores[id.index()].name
        );
        Ok(())
    }

    pub fn wear_chore(&self) -> Option<ChoreId> {
        self.wear_chore
    }

    /// Slot of the skeleton bound by the worn chore.
    pub fn active_skeleton(&self) -> Option<ComponentId> {
        self.skeleton
    }

    pub fn skeleton(&self) -> Option<&SkeletonComponent> {
        self.skeleton
            .and_then(|id| self.component(id))
            .and_then(Component::as_skeleton)
    }

    fn skeleton_mut(&mut self) -> Option<&mut SkeletonComponent> {
        let id = self.skeleton?;
        self.components
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .and_then(Component::as_skeleton_mut)
    }

    /// Advance every playing chore by `dt_ms`, apply crossed keys, update the
    /// bound components and prune chores that finished.
    pub fn update(&mut self, dt_ms: u32) -> FrameReport {
        if let Some(skel) = self.skeleton_mut() {
            skel.reset();
        }

        let skeleton = self.skeleton;
        let Self {
            chores,
            components,
            playing,
            materials,
            loader,
            scripts,
            ..
        } = self;
        let mut ctx = ComponentContext {
            materials: &mut *materials,
            loader: &mut **loader,
            scripts: &mut *scripts,
        };

        let mut finished = Vec::new();
        let mut pose = Vec::new();
        for &cid in playing.iter() {
            let chore = &mut chores[cid.index()];
            for ev in chore.advance(dt_ms) {
                if let Some(Some(c)) = components.get_mut(ev.component.index()) {
                    c.set_key(ev.value, &mut ctx);
                }
            }
            for track in &chore.tracks {
                let Some(id) = track.component.resolve() else {
                    continue;
                };
                if let Some(Some(c)) = components.get_mut(id.index()) {
                    pose.extend(c.update(dt_ms));
                }
            }
            if !chore.is_playing() {
                finished.push(cid);
            }
        }
        if !finished.is_empty() {
            trace!("pruning finished chores {finished:?}");
            playing.retain(|c| !finished.contains(c));
        }

        if let Some(skel) = skeleton
            .and_then(|id| components.get_mut(id.index()))
            .and_then(Option::as_mut)
            .and_then(Component::as_skeleton_mut)
        {
            for contribution in pose {
                skel.accumulate(contribution);
            }
            skel.commit();
        }

        FrameReport {
            finished,
            script_requests: std::mem::take(scripts),
        }
    }

    /// Draw every component bound to a playing chore. Falls back to the worn
    /// chore's mesh when no mesh was drawn. Returns whether a playing chore drew a mesh.
    pub fn draw(&self, renderer: &mut dyn Renderer) -> bool {
        let mut drew_mesh = false;
        for cid in self.playing_chores() {
            for track in &self.chores[cid.index()].tracks {
                let Some(c) = track.component.resolve().and_then(|id| self.component(id)) else {
                    continue;
                };
                c.draw(renderer);
                if c.is_component_type(Tag::MESH) {
                    drew_mesh = true;
                }
            }
        }

        if !drew_mesh {
            if let Some(mesh) = self
                .wear_chore
                .and_then(|w| self.chores[w.index()].mesh())
                .and_then(|id| self.component(id))
            {
                mesh.draw(renderer);
            }
        }
        drew_mesh
    }

    /// Cached material for `name`, if loaded.
    pub fn find_material(&self, name: &str) -> Option<MaterialId> {
        self.materials.find(self.loader.as_ref(), name)
    }

    /// Cached material for `name`, loading it on a miss.
    pub fn load_material(&mut self, name: &str) -> MaterialId {
        self.materials.load(self.loader.as_mut(), name)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    pub fn materials(&self) -> &MaterialCache {
        &self.materials
    }
}
