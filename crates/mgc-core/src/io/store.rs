use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MgcError, Result};
use crate::frame::Image;

use super::image_io::{load_image, save_image};

/// Named image storage the pipeline resolves its inputs from.
///
/// Implementations own the images they hold; `load` hands out a copy.
pub trait ImageStore {
    /// Fetch the image stored under `id`.
    fn load(&self, id: &str) -> Result<Image>;

    /// Store `image` under `id`, replacing any previous image. Returns the id.
    fn store(&mut self, id: &str, image: Image) -> Result<String>;

    /// Drop the image stored under `id`.
    fn release(&mut self, id: &str) -> Result<()>;

    fn contains(&self, id: &str) -> bool;
}

/// In-process image store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    images: HashMap<String, Image>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Ids currently held, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.images.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl ImageStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Image> {
        self.images
            .get(id)
            .cloned()
            .ok_or_else(|| MgcError::UnknownImage(id.to_string()))
    }

    fn store(&mut self, id: &str, image: Image) -> Result<String> {
        self.images.insert(id.to_string(), image);
        Ok(id.to_string())
    }

    fn release(&mut self, id: &str) -> Result<()> {
        self.images
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| MgcError::UnknownImage(id.to_string()))
    }

    fn contains(&self, id: &str) -> bool {
        self.images.contains_key(id)
    }
}

/// Extensions probed on load, in order. New images are written as TIFF.
const STORE_EXTENSIONS: [&str; 3] = ["tiff", "tif", "png"];

/// Image store backed by files in a directory: id `foo` is `<dir>/foo.tiff`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn existing_path(&self, id: &str) -> Option<PathBuf> {
        STORE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{id}.{ext}")))
            .find(|p| p.is_file())
    }
}

impl ImageStore for DirectoryStore {
    fn load(&self, id: &str) -> Result<Image> {
        let path = self
            .existing_path(id)
            .ok_or_else(|| MgcError::UnknownImage(id.to_string()))?;
        debug!(path = %path.display(), "Loading image");
        load_image(&path)
    }

    fn store(&mut self, id: &str, image: Image) -> Result<String> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(format!("{id}.{}", STORE_EXTENSIONS[0]));
        save_image(&image, &path)?;
        debug!(path = %path.display(), "Stored image");
        Ok(id.to_string())
    }

    fn release(&mut self, id: &str) -> Result<()> {
        let path = self
            .existing_path(id)
            .ok_or_else(|| MgcError::UnknownImage(id.to_string()))?;
        std::fs::remove_file(path)?;
        Ok(())
    }

    fn contains(&self, id: &str) -> bool {
        self.existing_path(id).is_some()
    }
}
