//! # Model Importers
//!
//! Text asset formats are turned into [`Model`]s here. Textures referenced by
//! material libraries are loaded on the way through a [`TextureLoader`], normally the
//! session's [`ResourceCache`](crate::gfx::resources::ResourceCache).
//!
//! ```no_run
//! use std::path::Path;
//! use model_viewer::gfx::resources::backend::HeadlessBackend;
//! use model_viewer::importers::{importer_for_path, ImportOptions};
//!
//! let path = Path::new("assets/cube.obj");
//! let importer = importer_for_path(path, ImportOptions::default())?;
//! let model = importer.load_model(path, &mut HeadlessBackend::new())?;
//! println!("{} has {} meshes", model.name(), model.meshes().len());
//! # Ok::<(), model_viewer::importers::ImportError>(())
//! ```

pub mod error;
mod line;
pub mod mtl;
pub mod obj;

use std::path::Path;

pub use error::{AttributeKind, ImportError};
pub use obj::ObjImporter;

use crate::gfx::{resources::texture::TextureLoader, scene::Model};

/// Knobs that change how geometry is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Fan-triangulate faces with more than three corners. When off, such faces
    /// are rejected.
    pub triangulate: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { triangulate: true }
    }
}

pub trait ModelImporter {
    fn load_model(
        &self,
        path: &Path,
        textures: &mut dyn TextureLoader,
    ) -> Result<Model, ImportError>;
}

/// Picks an importer from the file extension (case-insensitive).
pub fn importer_for_path(
    path: &Path,
    options: ImportOptions,
) -> Result<Box<dyn ModelImporter>, ImportError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("obj") => Ok(Box::new(ObjImporter::new(options))),
        _ => Err(ImportError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_extension() {
        assert!(importer_for_path(Path::new("a/b/cube.obj"), ImportOptions::default()).is_ok());
        assert!(importer_for_path(Path::new("CUBE.OBJ"), ImportOptions::default()).is_ok());

        for path in ["cube.fbx", "cube", "obj", "cube.obj.bak"] {
            let result = importer_for_path(Path::new(path), ImportOptions::default());
            assert!(
                matches!(result, Err(ImportError::UnsupportedFormat { .. })),
                "{path} should be unsupported"
            );
        }
    }
}
