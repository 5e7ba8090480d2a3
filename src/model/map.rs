//! Static map geometry loaded from a Wavefront OBJ file and drawn as a wireframe.

use std::collections::HashSet;
use std::path::Path;

use glam::{Mat4, Quat};

use crate::error::AssetError;
use crate::utils::{Mesh, Vertex};

const EDGE_COLOR: [f32; 4] = [0.85, 0.85, 0.85, 1.0];

pub struct MapModel {
    /// Unique edges of every face, in model space
    pub mesh: Mesh,
    pub transform: Mat4,
}

impl MapModel {
    pub fn load(path: &Path, rotation: Quat) -> Result<Self, AssetError> {
        let source = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_obj_str(&source, path, rotation)?;
        tracing::info!(
            path = %path.display(),
            vertices = model.mesh.vertices.len(),
            edges = model.mesh.segment_count(),
            "map model loaded"
        );
        Ok(model)
    }

    /// `path` is only used for error messages
    pub fn from_obj_str(source: &str, path: &Path, rotation: Quat) -> Result<Self, AssetError> {
        let parse_err = |line: usize, message: String| AssetError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        };

        let mut vertices: Vec<Vertex> = Vec::new();
        let mut edges: HashSet<(u32, u32)> = HashSet::new();
        let mut indices = Vec::new();

        for (n, raw) in source.lines().enumerate() {
            let line_no = n + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("v") => {
                    let mut coord = [0.0f32; 3];
                    for c in coord.iter_mut() {
                        let token = parts.next().ok_or_else(|| parse_err(line_no, "vertex needs three coordinates".into()))?;
                        *c = token.parse().map_err(|_| parse_err(line_no, format!("bad coordinate `{token}`")))?;
                    }
                    vertices.push(Vertex { pos: coord, color: EDGE_COLOR });
                }
                Some("f") => {
                    let mut face = Vec::new();
                    for token in parts {
                        // v, v/vt, v//vn, v/vt/vn
                        let index_token = token.split('/').next().unwrap_or(token);
                        let raw_index: i64 = index_token
                            .parse()
                            .map_err(|_| parse_err(line_no, format!("bad face index `{token}`")))?;
                        face.push(resolve_index(raw_index, vertices.len()).ok_or_else(|| {
                            parse_err(line_no, format!("face index {raw_index} out of range"))
                        })?);
                    }
                    if face.len() < 2 {
                        return Err(parse_err(line_no, "face needs at least two vertices".into()));
                    }
                    for i in 0..face.len() {
                        let a = face[i];
                        let b = face[(i + 1) % face.len()];
                        if a == b {
                            continue;
                        }
                        if edges.insert((a.min(b), a.max(b))) {
                            indices.extend_from_slice(&[a, b]);
                        }
                    }
                }
                // normals, texcoords, groups, materials: not needed for a wireframe
                _ => {}
            }
        }

        if indices.is_empty() {
            return Err(AssetError::Empty(path.to_path_buf()));
        }

        Ok(Self {
            mesh: Mesh { vertices, indices },
            transform: Mat4::from_quat(rotation.normalize()),
        })
    }
}

/// OBJ indices are 1-based; negative values count back from the last vertex
fn resolve_index(raw: i64, vertex_count: usize) -> Option<u32> {
    let count = vertex_count as i64;
    let idx = if raw > 0 { raw - 1 } else if raw < 0 { count + raw } else { return None };
    (0..count).contains(&idx).then_some(idx as u32)
}
