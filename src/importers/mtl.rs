//! Material library (`.mtl`) reader.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::{error::ImportError, line::SourceLine};
use crate::gfx::resources::{
    material::Material,
    texture::{TextureKind, TextureLoader},
};

/// Opens and parses a material library.
pub fn load_material_library(
    path: &Path,
    textures: &mut dyn TextureLoader,
) -> Result<Vec<Material>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_material_library(BufReader::new(file), path, textures)
}

/// Parses a material library in declaration order.
///
/// Texture maps are resolved against the library's own directory and loaded
/// immediately through `textures`. A name declared twice appears twice; callers
/// merging into a table let the later entry win.
pub fn parse_material_library<R: BufRead>(
    reader: R,
    library_path: &Path,
    textures: &mut dyn TextureLoader,
) -> Result<Vec<Material>, ImportError> {
    let base_dir = library_path.parent().unwrap_or_else(|| Path::new(""));
    let mut materials = Vec::new();
    let mut current: Option<Material> = None;

    for (index, text) in reader.lines().enumerate() {
        let text = text.map_err(|source| ImportError::Io {
            path: library_path.to_path_buf(),
            source,
        })?;
        let Some(line) = SourceLine::parse(library_path, index + 1, &text) else {
            continue;
        };

        if line.directive == "newmtl" {
            let name = line.name()?;
            materials.extend(current.replace(Material::new(name)));
            continue;
        }

        let Some(material) = current.as_mut() else {
            log::warn!(
                "{}:{}: '{}' before any newmtl, ignored",
                library_path.display(),
                line.number,
                line.directive
            );
            continue;
        };

        match line.directive {
            "Ka" => material.ambient_color = line.floats()?,
            "Kd" => material.diffuse_color = line.floats()?,
            "Ks" => material.specular_color = line.floats()?,
            "Ns" => material.specular_exponent = line.float(0)?,
            "Ni" => material.optical_density = line.float(0)?,
            "map_Kd" => load_map(&line, base_dir, material, TextureKind::Diffuse, textures)?,
            "map_Ks" => load_map(&line, base_dir, material, TextureKind::SpecularColour, textures)?,
            "map_Ns" => {
                load_map(&line, base_dir, material, TextureKind::SpecularHighlight, textures)?
            }
            other => log::warn!(
                "{}:{}: skipping unsupported material directive '{other}'",
                library_path.display(),
                line.number
            ),
        }
    }

    materials.extend(current);
    log::debug!(
        "read {} material(s) from {}",
        materials.len(),
        library_path.display()
    );
    Ok(materials)
}

/// Map options such as `-bm 1.0` may precede the file name, so the last operand is used.
fn load_map(
    line: &SourceLine<'_>,
    base_dir: &Path,
    material: &mut Material,
    kind: TextureKind,
    textures: &mut dyn TextureLoader,
) -> Result<(), ImportError> {
    let file_name = line
        .operands
        .last()
        .ok_or_else(|| line.missing_operand())?;
    let texture = base_dir.join(file_name);

    let handle = textures
        .load_texture(&texture)
        .map_err(|source| ImportError::Texture {
            path: line.path.to_path_buf(),
            line: line.number,
            texture,
            source,
        })?;
    material.set_texture(kind, handle);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::{
        backend::{BackendError, HeadlessBackend},
        material::MaterialType,
        texture::TextureHandle,
    };
    use std::{io::Cursor, path::PathBuf};

    /// Records requested paths instead of touching the filesystem.
    #[derive(Default)]
    struct RecordingLoader {
        requested: Vec<PathBuf>,
    }

    impl TextureLoader for RecordingLoader {
        fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError> {
            self.requested.push(path.to_path_buf());
            Ok(TextureHandle(self.requested.len() as u32))
        }
    }

    fn parse(source: &str, loader: &mut dyn TextureLoader) -> Result<Vec<Material>, ImportError> {
        parse_material_library(Cursor::new(source), Path::new("assets/lib.mtl"), loader)
    }

    #[test]
    fn test_colours_and_scalars() {
        let source = "\
# two materials
newmtl red
Ka 0.1 0.0 0.0
Kd 1.0 0.0 0.0
Ks 0.5 0.5 0.5
Ns 96.0
Ni 1.45

newmtl blue
Kd 0 0 1
";
        let materials = parse(source, &mut RecordingLoader::default()).expect("valid library");
        assert_eq!(materials.len(), 2);

        let red = &materials[0];
        assert_eq!(red.name, "red");
        assert_eq!(red.ambient_color, [0.1, 0.0, 0.0]);
        assert_eq!(red.diffuse_color, [1.0, 0.0, 0.0]);
        assert_eq!(red.specular_color, [0.5, 0.5, 0.5]);
        assert_eq!(red.specular_exponent, 96.0);
        assert_eq!(red.optical_density, 1.45);

        assert_eq!(materials[1].name, "blue");
        assert_eq!(materials[1].diffuse_color, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_texture_maps_resolve_relative_to_library() {
        let source = "\
newmtl brick
map_Kd textures/brick.png
map_Ks -bm 0.5 brick_spec.png
map_Ns brick_gloss.png
";
        let mut loader = RecordingLoader::default();
        let materials = parse(source, &mut loader).expect("valid library");

        assert_eq!(
            loader.requested,
            [
                PathBuf::from("assets/textures/brick.png"),
                PathBuf::from("assets/brick_spec.png"),
                PathBuf::from("assets/brick_gloss.png"),
            ]
        );
        let brick = &materials[0];
        assert_eq!(brick.diffuse_texture, Some(TextureHandle(1)));
        assert_eq!(brick.specular_color_texture, Some(TextureHandle(2)));
        assert_eq!(brick.specular_highlight_texture, Some(TextureHandle(3)));
        assert_eq!(brick.material_type(), MaterialType::DiffuseSpecular);
    }

    #[test]
    fn test_directives_before_newmtl_are_ignored() {
        let source = "Kd 1 1 1\nnewmtl only\n";
        let materials = parse(source, &mut RecordingLoader::default()).expect("valid library");
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].diffuse_color, [0.0; 3]);
    }

    #[test]
    fn test_bad_number_aborts() {
        let source = "newmtl m\nNs shiny\n";
        let err = parse(source, &mut RecordingLoader::default()).unwrap_err();
        assert!(matches!(err, ImportError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_texture_is_reported_with_line() {
        let source = "newmtl m\n\nmap_Kd nowhere.png\n";
        let mut backend = HeadlessBackend::new();
        let err = parse(source, &mut backend).unwrap_err();
        match err {
            ImportError::Texture { line, texture, .. } => {
                assert_eq!(line, 3);
                assert_eq!(texture, PathBuf::from("assets/nowhere.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_library_file() {
        let mut loader = RecordingLoader::default();
        let err = load_material_library(Path::new("/no/such/dir/lib.mtl"), &mut loader).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
