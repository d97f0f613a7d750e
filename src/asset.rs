//! Diagnostic model import.
//!
//! The demo imports one model at startup purely to report its size, then
//! drops it. Nothing from the import is rendered or retained.

use std::path::Path;

/// Counts reported by [`probe_model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelStats {
    pub meshes: usize,
    pub materials: usize,
}

/// Imports the glTF asset at `path` just long enough to count its meshes and
/// materials. Returns `None` if the file is missing or fails to import; a
/// missing diagnostic asset is not an error.
pub fn probe_model(path: &Path) -> Option<ModelStats> {
    let (document, _buffers, _images) = gltf::import(path).ok()?;
    Some(ModelStats {
        meshes: document.meshes().count(),
        materials: document.materials().count(),
    })
}
