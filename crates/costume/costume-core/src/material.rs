//! Material (texture set) cache keyed by canonical filename.

use serde::{Deserialize, Serialize};

/// Index into a costume's material cache.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// A loaded material: one file holding one or more textures, of which one is active.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub filename: String,
    pub active_texture: i32,
}

impl Material {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            active_texture: 0,
        }
    }

    #[inline]
    pub fn active_texture(&self) -> i32 {
        self.active_texture
    }

    #[inline]
    pub fn set_active_texture(&mut self, index: i32) {
        self.active_texture = index;
    }
}

/// Resource loader collaborator: filename canonicalization and material loading.
pub trait ResourceLoader {
    fn fix_filename(&self, name: &str) -> String;
    fn load_material(&mut self, name: &str) -> Material;
}

/// Loader that canonicalizes names the way archive lookups expect and
/// creates materials without touching the filesystem.
#[derive(Debug, Default, Clone)]
pub struct FsNameLoader {
    /// Every name passed to `load_material`, in call order.
    pub requests: Vec<String>,
}

impl ResourceLoader for FsNameLoader {
    fn fix_filename(&self, name: &str) -> String {
        let mut fixed = name.trim().replace('\\', "/").to_ascii_lowercase();
        let has_ext = fixed
            .rsplit('/')
            .next()
            .map(|base| base.contains('.'))
            .unwrap_or(false);
        if !has_ext {
            fixed.push_str(".sur");
        }
        fixed
    }

    fn load_material(&mut self, name: &str) -> Material {
        self.requests.push(name.to_string());
        Material::new(self.fix_filename(name))
    }
}

/// Cache of loaded materials. One entry per canonical filename, no eviction;
/// iteration order is insertion order.
#[derive(Debug, Default, Clone)]
pub struct MaterialCache {
    entries: Vec<Material>,
}

impl MaterialCache {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap),
        }
    }

    /// Find the cached material whose filename matches `name` once canonicalized.
    pub fn find(&self, loader: &dyn ResourceLoader, name: &str) -> Option<MaterialId> {
        let fixed = loader.fix_filename(name);
        self.entries
            .iter()
            .position(|m| m.filename == fixed)
            .map(|i| MaterialId(i as u32))
    }

    /// Return the cached material for `name`, loading and caching it on a miss.
    pub fn load(&mut self, loader: &mut dyn ResourceLoader, name: &str) -> MaterialId {
        if let Some(id) = self.find(&*loader, name) {
            return id;
        }
        let mut mat = loader.load_material(name);
        // Keep the entry keyed by the canonical name regardless of what the loader reports.
        mat.filename = loader.fix_filename(name);
        self.entries.push(mat);
        MaterialId((self.entries.len() - 1) as u32)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.entries.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.entries.get_mut(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
