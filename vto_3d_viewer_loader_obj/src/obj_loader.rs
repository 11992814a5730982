/// Wavefront OBJ implementation of the MeshFormatLoader capability.
///
/// `begin_load` returns immediately; a background thread opens the
/// file, parses `v`/`vn`/`f`/`o`/`g` records into raw mesh parts, and
/// delivers progress plus the terminal outcome over the load channel.
/// Faces are triangulated as fans; vertices are deduplicated per part
/// by their (position, normal) index pair. Unsupported records
/// (`vt`, `s`, `usemtl`, `mtllib`, ...) are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use glam::Vec3;
use rustc_hash::FxHashMap;
use vto_3d_viewer::loader::{
    LoadFeed, MeshFormatLoader, PendingMesh, RawMeshContent, RawMeshPart,
};

const SOURCE: &str = "vto3d::obj::Loader";

/// Progress is reported once per this many consumed bytes.
const PROGRESS_CHUNK_BYTES: u64 = 64 * 1024;

/// OBJ mesh loader backend.
pub struct ObjMeshLoader;

impl ObjMeshLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ObjMeshLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshFormatLoader for ObjMeshLoader {
    fn begin_load(&self, url: &str) -> PendingMesh {
        let (feed, pending) = PendingMesh::channel();
        let path = resolve_url(url);

        let spawned = std::thread::Builder::new()
            .name("vto3d-obj-loader".to_string())
            .spawn(move || match load_obj_file(&path, &feed) {
                Ok(content) => feed.resolve(content),
                Err(cause) => feed.fail(cause),
            });

        // A failed spawn drops the feed; the viewer observes the
        // abandoned channel and fails the load.
        if let Err(error) = spawned {
            vto_3d_viewer::viewer_error!(SOURCE, "Failed to spawn loader thread: {}", error);
        }

        pending
    }
}

/// Map a `file://` URL to a filesystem path; plain paths pass through.
fn resolve_url(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
}

fn load_obj_file(path: &Path, feed: &LoadFeed) -> Result<RawMeshContent, String> {
    let file = File::open(path).map_err(|e| format!("open {}: {}", path.display(), e))?;
    let total_bytes = file.metadata().map(|m| m.len()).unwrap_or(0);
    parse_obj(BufReader::new(file), total_bytes, feed)
}

// ============================================================================
// Parsing
// ============================================================================

#[derive(Default)]
struct GlobalPools {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
}

struct PartBuilder {
    name: String,
    positions: Vec<Vec3>,
    normals: Vec<Option<Vec3>>,
    indices: Vec<u32>,
    /// (position, normal) index pair in the global pools -> local vertex
    remap: FxHashMap<(u32, Option<u32>), u32>,
}

impl PartBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            remap: FxHashMap::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn local_vertex(
        &mut self,
        global: &GlobalPools,
        position_index: u32,
        normal_index: Option<u32>,
    ) -> u32 {
        if let Some(&local) = self.remap.get(&(position_index, normal_index)) {
            return local;
        }
        let local = self.positions.len() as u32;
        self.positions.push(global.positions[position_index as usize]);
        self.normals
            .push(normal_index.map(|index| global.normals[index as usize]));
        self.remap.insert((position_index, normal_index), local);
        local
    }

    fn build(self) -> RawMeshPart {
        // Normals are kept only when every vertex carried one;
        // otherwise the part is treated as unshaded raw geometry.
        let normals = if self.normals.iter().all(|n| n.is_some()) {
            self.normals.into_iter().flatten().collect()
        } else {
            Vec::new()
        };
        RawMeshPart {
            name: self.name,
            positions: self.positions,
            normals,
            indices: self.indices,
        }
    }
}

fn parse_obj<R: BufRead>(
    reader: R,
    total_bytes: u64,
    feed: &LoadFeed,
) -> Result<RawMeshContent, String> {
    let mut global = GlobalPools::default();
    let mut parts: Vec<RawMeshPart> = Vec::new();
    let mut current = PartBuilder::new("default".to_string());
    let mut consumed: u64 = 0;
    let mut last_report: u64 = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| format!("read error at line {}: {}", line_no, e))?;
        consumed += line.len() as u64 + 1;
        if total_bytes > 0 && consumed - last_report >= PROGRESS_CHUNK_BYTES {
            last_report = consumed;
            feed.progress((consumed as f32 / total_bytes as f32).min(1.0));
        }

        let record = line.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }
        let mut tokens = record.split_whitespace();
        let Some(keyword) = tokens.next() else { continue };

        match keyword {
            "v" => global.positions.push(parse_vec3(&mut tokens, line_no)?),
            "vn" => global.normals.push(parse_vec3(&mut tokens, line_no)?),
            "o" | "g" => {
                let name = tokens.next().unwrap_or("default").to_string();
                let previous = std::mem::replace(&mut current, PartBuilder::new(name));
                if !previous.is_empty() {
                    parts.push(previous.build());
                }
            }
            "f" => {
                let mut face: Vec<u32> = Vec::new();
                for token in tokens {
                    let (position_index, normal_index) =
                        parse_face_vertex(token, &global, line_no)?;
                    face.push(current.local_vertex(&global, position_index, normal_index));
                }
                if face.len() < 3 {
                    return Err(format!("line {}: face with fewer than 3 vertices", line_no));
                }
                // Triangle fan for quads and larger polygons.
                for i in 1..face.len() - 1 {
                    current.indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                }
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        parts.push(current.build());
    }

    if parts.is_empty() {
        if global.positions.is_empty() {
            return Err("no geometry found".to_string());
        }
        // Vertex-only file: expose the raw point set as one part.
        parts.push(RawMeshPart {
            name: "default".to_string(),
            positions: global.positions,
            normals: Vec::new(),
            indices: Vec::new(),
        });
    }

    Ok(RawMeshContent { parts })
}

fn parse_vec3<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<Vec3, String> {
    let mut components = [0.0f32; 3];
    for component in &mut components {
        let token = tokens
            .next()
            .ok_or_else(|| format!("line {}: expected 3 components", line_no))?;
        *component = token
            .parse()
            .map_err(|_| format!("line {}: invalid number '{}'", line_no, token))?;
    }
    Ok(Vec3::from_array(components))
}

/// Parse one face-vertex token (`i`, `i/t`, `i//n`, or `i/t/n`) into
/// validated zero-based indices into the global pools.
fn parse_face_vertex(
    token: &str,
    global: &GlobalPools,
    line_no: usize,
) -> Result<(u32, Option<u32>), String> {
    let mut fields = token.split('/');

    let position_field = fields
        .next()
        .ok_or_else(|| format!("line {}: empty face vertex", line_no))?;
    let position_index =
        resolve_index(position_field, global.positions.len(), "vertex", line_no)?;

    // Texture coordinates are not used.
    let _ = fields.next();

    let normal_index = match fields.next() {
        Some(field) if !field.is_empty() => {
            Some(resolve_index(field, global.normals.len(), "normal", line_no)?)
        }
        _ => None,
    };

    Ok((position_index, normal_index))
}

/// Resolve a one-based (or negative, relative) OBJ index against a
/// pool of `len` elements.
fn resolve_index(field: &str, len: usize, what: &str, line_no: usize) -> Result<u32, String> {
    let raw: i64 = field
        .parse()
        .map_err(|_| format!("line {}: invalid {} index '{}'", line_no, what, field))?;

    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        len as i64 + raw
    } else {
        return Err(format!("line {}: {} index 0 is not valid", line_no, what));
    };

    if resolved < 0 || resolved >= len as i64 {
        return Err(format!(
            "line {}: {} index {} out of range (pool has {})",
            line_no, what, raw, len
        ));
    }
    Ok(resolved as u32)
}

#[cfg(test)]
#[path = "obj_loader_tests.rs"]
mod tests;
