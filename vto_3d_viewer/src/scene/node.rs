/// Mesh node types for the scene graph.
///
/// A MeshNode is the normalized, material-assigned form of raw loader
/// content: centered on the origin, uniformly scaled so its largest
/// dimension equals `NORMALIZED_MAX_EXTENT`, with the slot's fixed
/// material and shadow flags applied to every part.

use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use crate::error::{Error, Result};
use crate::loader::RawMeshContent;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a MeshNode within a Scene.
    ///
    /// A key becomes invalid only when its own node is detached.
    pub struct NodeKey;
}

// ===== AABB =====

/// Axis-Aligned Bounding Box
///
/// Stored in the node's raw (pre-normalization) space and transformed
/// by the node's world matrix when world-space bounds are needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl Aabb {
    /// Smallest AABB enclosing the given points. `None` if `points` is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Aabb> {
        let first = *points.first()?;
        let mut aabb = Aabb { min: first, max: first };
        for &p in &points[1..] {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    /// Smallest AABB enclosing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extents along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest extent across the three axes.
    pub fn max_extent(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB
    /// extents for an exact (tight) result without transforming all
    /// 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        Aabb { min: new_min, max: new_max }
    }
}

// ===== FLAGS =====

/// Node casts shadows
pub const FLAG_CAST_SHADOW: u64    = 1 << 0;
/// Node receives shadows
pub const FLAG_RECEIVE_SHADOW: u64 = 1 << 1;
// Bits 2-63 reserved for future extensions

// ===== COLOR =====

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    /// Build a color from a 0xRRGGBB hex value.
    pub fn from_hex(hex: u32) -> Color {
        Color {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// 8-bit RGB components, for framebuffer clears.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

// ===== MATERIAL =====

/// Fixed material descriptor assigned to every part of a loaded node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
}

impl MaterialDesc {
    /// Skin-tone material for the body slot.
    pub fn body() -> MaterialDesc {
        MaterialDesc {
            color: Color::from_hex(0xffd7ba),
            roughness: 0.7,
            metalness: 0.1,
        }
    }

    /// Blue fabric material for the garment slot.
    pub fn garment() -> MaterialDesc {
        MaterialDesc {
            color: Color::from_hex(0x2196f3),
            roughness: 0.8,
            metalness: 0.2,
        }
    }
}

// ===== MESH PART =====

/// One drawable piece of a loaded node: geometry plus the material and
/// shadow flags applied during normalization.
#[derive(Debug, Clone)]
pub struct MeshPart {
    name: String,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    material: MaterialDesc,
    flags: u64,
}

impl MeshPart {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertex positions in the node's raw space.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Vertex normals; empty when the asset carried none.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle indices; empty for non-indexed parts.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn material(&self) -> MaterialDesc {
        self.material
    }

    pub fn casts_shadow(&self) -> bool {
        self.flags & FLAG_CAST_SHADOW != 0
    }

    pub fn receives_shadow(&self) -> bool {
        self.flags & FLAG_RECEIVE_SHADOW != 0
    }

    /// Raw byte view of the positions, for surface backends that upload
    /// vertex data directly.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

// ===== MESH NODE =====

/// Target size of a normalized node's largest dimension.
pub const NORMALIZED_MAX_EXTENT: f32 = 1.5;

/// A loaded, normalized mesh occupying one scene slot.
///
/// Normalization scales about the raw bounding-box center, so the
/// node's world-space bounds are centered exactly on the origin.
#[derive(Debug, Clone)]
pub struct MeshNode {
    parts: Vec<MeshPart>,
    raw_aabb: Aabb,
    /// Translation applied before scaling (negated raw center).
    offset: Vec3,
    /// Uniform scale (`NORMALIZED_MAX_EXTENT / max raw extent`).
    scale: f32,
}

impl MeshNode {
    /// Normalize raw loader content into a scene-ready node.
    ///
    /// Computes the bounding box over all parts, centers it on the
    /// origin, scales uniformly so the largest dimension equals
    /// `NORMALIZED_MAX_EXTENT`, and applies `material` with cast and
    /// receive shadow flags to every part.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidContent` when the content has no vertices
    /// or a zero-extent bounding box (uniform scale would be undefined).
    pub fn normalized(content: RawMeshContent, material: MaterialDesc) -> Result<MeshNode> {
        let raw_aabb = content.aabb().ok_or_else(|| {
            Error::InvalidContent("mesh content has no vertices".to_string())
        })?;

        let max_extent = raw_aabb.max_extent();
        if max_extent <= f32::EPSILON {
            return Err(Error::InvalidContent(
                "mesh content has a zero-extent bounding box".to_string(),
            ));
        }

        let parts = content
            .parts
            .into_iter()
            .filter(|part| !part.positions.is_empty())
            .map(|part| MeshPart {
                name: part.name,
                positions: part.positions,
                normals: part.normals,
                indices: part.indices,
                material,
                flags: FLAG_CAST_SHADOW | FLAG_RECEIVE_SHADOW,
            })
            .collect();

        Ok(MeshNode {
            parts,
            offset: -raw_aabb.center(),
            scale: NORMALIZED_MAX_EXTENT / max_extent,
            raw_aabb,
        })
    }

    pub fn parts(&self) -> &[MeshPart] {
        &self.parts
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Total vertex count across all parts.
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.positions.len()).sum()
    }

    /// Bounding box in the raw (pre-normalization) space.
    pub fn raw_aabb(&self) -> Aabb {
        self.raw_aabb
    }

    /// Centering translation applied before scaling.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Uniform normalization scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// World transform: scale about the raw bounding-box center.
    ///
    /// `p' = scale * (p + offset)`, so the raw center maps to the origin.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale)) * Mat4::from_translation(self.offset)
    }

    /// Bounding box after normalization (world space).
    pub fn world_aabb(&self) -> Aabb {
        self.raw_aabb.transformed(&self.world_matrix())
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
