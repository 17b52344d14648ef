//! Wavefront OBJ importer.
//!
//! Every face-vertex reference becomes its own [`Vertex`]; nothing is shared between
//! faces, so the index buffer of each mesh simply counts upwards.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::Arc,
};

use super::{
    error::{AttributeKind, ImportError},
    line::SourceLine,
    mtl, ImportOptions, ModelImporter,
};
use crate::gfx::{
    resources::{material::Material, texture::TextureLoader},
    scene::{Mesh, Model, Vertex},
};

/// 1-based attribute indices of one face corner, as written in the file.
#[derive(Debug, Clone, Copy)]
struct FaceVertex {
    position: i64,
    tex_coord: Option<i64>,
    normal: Option<i64>,
}

#[derive(Debug)]
struct Face {
    vertices: Vec<FaceVertex>,
    line: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjImporter {
    options: ImportOptions,
}

impl ObjImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ImportOptions {
        self.options
    }

    /// Parses OBJ text. `source_path` names the model and anchors `mtllib` lookups.
    pub fn parse<R: BufRead>(
        &self,
        reader: R,
        source_path: &Path,
        textures: &mut dyn TextureLoader,
    ) -> Result<Model, ImportError> {
        let mut state = ObjState::new(source_path, self.options);

        for (index, text) in reader.lines().enumerate() {
            let text = text.map_err(|source| ImportError::Io {
                path: source_path.to_path_buf(),
                source,
            })?;
            if let Some(line) = SourceLine::parse(source_path, index + 1, &text) {
                state.apply(&line, textures)?;
            }
        }
        state.flush()?;

        let name = source_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        let model = Model::new(state.meshes, name);

        log::info!(
            "imported {} ({} meshes, {} vertices, {} materials)",
            source_path.display(),
            model.meshes().len(),
            model.vertex_count(),
            state.materials.len()
        );
        Ok(model)
    }
}

impl ModelImporter for ObjImporter {
    fn load_model(
        &self,
        path: &Path,
        textures: &mut dyn TextureLoader,
    ) -> Result<Model, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(BufReader::new(file), path, textures)
    }
}

/// Running state while reading one file.
struct ObjState<'a> {
    path: &'a Path,
    options: ImportOptions,
    positions: Vec<[f32; 3]>,
    tex_coords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    faces: Vec<Face>,
    materials: HashMap<String, Arc<Material>>,
    active_material: Option<Arc<Material>>,
    meshes: Vec<Mesh>,
}

impl<'a> ObjState<'a> {
    fn new(path: &'a Path, options: ImportOptions) -> Self {
        Self {
            path,
            options,
            positions: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
            materials: HashMap::new(),
            active_material: None,
            meshes: Vec::new(),
        }
    }

    fn apply(
        &mut self,
        line: &SourceLine<'_>,
        textures: &mut dyn TextureLoader,
    ) -> Result<(), ImportError> {
        match line.directive {
            "v" => self.positions.push(line.floats()?),
            "vt" => {
                let u = line.float(0)?;
                // Flip to a top-left origin; a missing v maps to 0.
                let v = if line.operands.len() > 1 {
                    1.0 - line.float(1)?
                } else {
                    0.0
                };
                self.tex_coords.push([u, v]);
            }
            "vn" => self.normals.push(line.floats()?),
            "f" => {
                let face = self.parse_face(line)?;
                self.faces.push(face);
            }
            "o" => {
                if !self.faces.is_empty() {
                    self.flush()?;
                    self.active_material = None;
                }
            }
            "g" | "s" => {}
            "mtllib" => {
                if line.operands.is_empty() {
                    return Err(line.missing_operand());
                }
                let base_dir = self.path.parent().unwrap_or_else(|| Path::new(""));
                for file_name in &line.operands {
                    let library = mtl::load_material_library(&base_dir.join(file_name), textures)?;
                    for material in library {
                        self.materials
                            .insert(material.name.clone(), Arc::new(material));
                    }
                }
            }
            "usemtl" => {
                let name = line.name()?;
                let material = self.materials.get(name).cloned().ok_or_else(|| {
                    ImportError::UnknownMaterial {
                        path: self.path.to_path_buf(),
                        line: line.number,
                        name: name.to_string(),
                    }
                })?;
                // Faces read so far keep the material that was active for them.
                self.flush()?;
                self.active_material = Some(material);
            }
            other => log::warn!(
                "{}:{}: skipping unsupported directive '{other}'",
                self.path.display(),
                line.number
            ),
        }
        Ok(())
    }

    fn parse_face(&self, line: &SourceLine<'_>) -> Result<Face, ImportError> {
        let vertices = line
            .operands
            .iter()
            .map(|token| parse_face_vertex(line, token))
            .collect::<Result<Vec<_>, _>>()?;

        let count = vertices.len();
        if count < 3 {
            return Err(ImportError::DegenerateFace {
                path: self.path.to_path_buf(),
                line: line.number,
                count,
            });
        }
        if count > 3 && !self.options.triangulate {
            return Err(ImportError::NonTriangularFace {
                path: self.path.to_path_buf(),
                line: line.number,
                count,
            });
        }

        Ok(Face {
            vertices,
            line: line.number,
        })
    }

    /// Turns the pending faces into a mesh bound to the active material.
    fn flush(&mut self) -> Result<(), ImportError> {
        if self.faces.is_empty() {
            return Ok(());
        }

        let mut vertices = Vec::new();
        for face in &self.faces {
            // Fan around the first corner; a triangle yields itself.
            for i in 1..face.vertices.len() - 1 {
                for corner in [face.vertices[0], face.vertices[i], face.vertices[i + 1]] {
                    vertices.push(self.resolve(corner, face.line)?);
                }
            }
        }
        let indices = (0..vertices.len() as u32).collect();

        log::debug!(
            "mesh {} from {} face(s), {} vertices",
            self.meshes.len(),
            self.faces.len(),
            vertices.len()
        );
        self.faces.clear();
        self.meshes
            .push(Mesh::new(vertices, indices, self.active_material.clone()));
        Ok(())
    }

    fn resolve(&self, corner: FaceVertex, line: usize) -> Result<Vertex, ImportError> {
        let position = lookup(&self.positions, corner.position, AttributeKind::Position)
            .map_err(|err| err.at(self.path, line))?;
        let tex_coords = corner
            .tex_coord
            .map(|index| lookup(&self.tex_coords, index, AttributeKind::TexCoord))
            .transpose()
            .map_err(|err| err.at(self.path, line))?
            .unwrap_or_default();
        let normal = corner
            .normal
            .map(|index| lookup(&self.normals, index, AttributeKind::Normal))
            .transpose()
            .map_err(|err| err.at(self.path, line))?
            .unwrap_or_default();

        Ok(Vertex::new(position, normal, tex_coords))
    }
}

/// Index lookup failure before the file position is attached.
struct OutOfRange {
    kind: AttributeKind,
    index: i64,
    available: usize,
}

impl OutOfRange {
    fn at(self, path: &Path, line: usize) -> ImportError {
        ImportError::IndexOutOfRange {
            path: path.to_path_buf(),
            line,
            kind: self.kind,
            index: self.index,
            available: self.available,
        }
    }
}

/// Resolves a 1-based index. Relative (negative) and zero indices are rejected.
fn lookup<T: Copy>(list: &[T], index: i64, kind: AttributeKind) -> Result<T, OutOfRange> {
    usize::try_from(index)
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| list.get(index))
        .copied()
        .ok_or(OutOfRange {
            kind,
            index,
            available: list.len(),
        })
}

/// Accepts `p`, `p/t`, `p/t/n` and `p//n`.
fn parse_face_vertex(line: &SourceLine<'_>, token: &str) -> Result<FaceVertex, ImportError> {
    let mut parts = token.split('/');
    let parse_index = |part: &str| -> Result<i64, ImportError> {
        part.parse().map_err(|_| line.parse_error(token))
    };
    let optional = |part: Option<&str>| -> Result<Option<i64>, ImportError> {
        match part {
            Some(part) if !part.is_empty() => parse_index(part).map(Some),
            _ => Ok(None),
        }
    };

    let position = parse_index(parts.next().unwrap_or_default())?;
    let tex_coord = optional(parts.next())?;
    let normal = optional(parts.next())?;
    if parts.next().is_some() {
        return Err(line.parse_error(token));
    }

    Ok(FaceVertex {
        position,
        tex_coord,
        normal,
    })
}
