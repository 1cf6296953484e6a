use std::collections::HashMap;

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use super::types::{Aabb, Plane};
use crate::error::{CollisionError, Result};

const TRIANGLE_STRIDE: usize = 9;
const PLANE_STRIDE: usize = 4;

/// Where positions live inside a (possibly interleaved) vertex buffer, in floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexLayout {
    pub stride: usize,
    pub position_offset: usize,
    pub position_components: usize,
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self {
            stride: 3,
            position_offset: 0,
            position_components: 3,
        }
    }
}

impl VertexLayout {
    /// Interleaved layout with a 3-component position at `position_offset`.
    pub fn interleaved(stride: usize, position_offset: usize) -> Self {
        Self {
            stride,
            position_offset,
            position_components: 3,
        }
    }

    fn validate(&self, len: usize) -> Result<()> {
        if self.position_components != 3 {
            return Err(CollisionError::PositionComponents(self.position_components));
        }
        if self.stride == 0 || self.stride < self.position_offset + 3 || len % self.stride != 0 {
            return Err(CollisionError::VertexStride {
                stride: self.stride,
                offset: self.position_offset,
                len,
            });
        }
        Ok(())
    }
}

/// What to do with zero-area triangles while cooking a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegeneratePolicy {
    /// Fail the build with [`CollisionError::DegenerateTriangle`].
    #[default]
    Reject,
    /// Drop the triangle and keep going.
    Skip,
    /// Keep it with a zero-normal plane; the detector culls such triangles.
    Keep,
}

/// Immutable triangle soup prepared for swept collision queries.
///
/// Triangle corners are stored flat, nine floats per triangle, next to one
/// plane equation (`normal.x, normal.y, normal.z, d`) per triangle. Planes
/// follow the winding declared at build time so that normals point away from
/// the solid side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionMesh {
    triangles: Vec<f32>,
    planes: Vec<f32>,
    num_triangles: usize,
    clockwise: bool,
    bounds: Aabb,
}

impl CollisionMesh {
    /// Builds a mesh from tightly packed `xyz` positions and optional triangle indices.
    pub fn build(vertices: &[f32], indices: Option<&[u32]>, clockwise: bool) -> Result<Self> {
        let mut builder = MeshBuilder::new(vertices.to_vec()).clockwise(clockwise);
        if let Some(indices) = indices {
            builder = builder.indices(indices.to_vec());
        }
        builder.build()
    }

    pub fn from_points(points: &[Vec3], indices: Option<&[u32]>, clockwise: bool) -> Result<Self> {
        let flat: Vec<f32> = points.iter().flat_map(|p| p.to_array()).collect();
        Self::build(&flat, indices, clockwise)
    }

    pub fn builder(vertices: Vec<f32>) -> MeshBuilder {
        MeshBuilder::new(vertices)
    }

    pub fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    pub fn is_empty(&self) -> bool {
        self.num_triangles == 0
    }

    /// Flat corner buffer, `9 * num_triangles` floats.
    pub fn triangle_vertices(&self) -> &[f32] {
        &self.triangles
    }

    /// Flat plane buffer, `4 * num_triangles` floats.
    pub fn planes(&self) -> &[f32] {
        &self.planes
    }

    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
        let start = index.checked_mul(TRIANGLE_STRIDE)?;
        let end = start.checked_add(TRIANGLE_STRIDE)?;
        self.triangles
            .get(start..end)
            .map(corners_from_slice)
    }

    pub fn plane(&self, index: usize) -> Option<Plane> {
        let start = index.checked_mul(PLANE_STRIDE)?;
        let end = start.checked_add(PLANE_STRIDE)?;
        self.planes.get(start..end).map(|p| Plane {
            normal: Vec3::new(p[0], p[1], p[2]),
            d: p[3],
        })
    }

    /// Iterates triangle corners in storage order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.triangles
            .chunks_exact(TRIANGLE_STRIDE)
            .map(corners_from_slice)
    }
}

fn corners_from_slice(c: &[f32]) -> [Vec3; 3] {
    [
        Vec3::new(c[0], c[1], c[2]),
        Vec3::new(c[3], c[4], c[5]),
        Vec3::new(c[6], c[7], c[8]),
    ]
}

/// Helper used to cook collision meshes from raw vertex/index buffers.
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    vertices: Vec<f32>,
    indices: Option<Vec<u32>>,
    layout: VertexLayout,
    clockwise: bool,
    degenerate: DegeneratePolicy,
    weld_epsilon: Option<f32>,
}

impl MeshBuilder {
    pub fn new(vertices: Vec<f32>) -> Self {
        Self {
            vertices,
            indices: None,
            layout: VertexLayout::default(),
            clockwise: false,
            degenerate: DegeneratePolicy::default(),
            weld_epsilon: None,
        }
    }

    pub fn indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn layout(mut self, layout: VertexLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Declares the source winding; the buffers carry no normals to infer it from.
    pub fn clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    pub fn degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Deduplicates vertices using a quantized grid before triangles are extracted.
    pub fn weld_vertices(mut self, epsilon: f32) -> Self {
        self.weld_epsilon = (epsilon > 0.0).then_some(epsilon);
        self
    }

    pub fn build(self) -> Result<CollisionMesh> {
        self.layout.validate(self.vertices.len())?;

        let offset = self.layout.position_offset;
        let mut positions: Vec<Vec3> = self
            .vertices
            .chunks_exact(self.layout.stride)
            .map(|v| Vec3::new(v[offset], v[offset + 1], v[offset + 2]))
            .collect();

        let mut indices = match self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(CollisionError::TriangleTopology {
                        what: "indices",
                        count: indices.len(),
                    });
                }
                if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                    return Err(CollisionError::IndexOutOfRange {
                        index,
                        vertex_count: positions.len(),
                    });
                }
                indices
            }
            None => {
                if positions.len() % 3 != 0 {
                    return Err(CollisionError::TriangleTopology {
                        what: "vertices",
                        count: positions.len(),
                    });
                }
                (0..positions.len() as u32).collect()
            }
        };

        if let Some(epsilon) = self.weld_epsilon {
            weld(&mut positions, &mut indices, epsilon);
        }

        let num_input = indices.len() / 3;
        let mut triangles = Vec::with_capacity(num_input * TRIANGLE_STRIDE);
        let mut planes = Vec::with_capacity(num_input * PLANE_STRIDE);
        let mut bounds = Aabb::empty();
        let mut skipped = 0usize;

        for (tri, chunk) in indices.chunks_exact(3).enumerate() {
            let p1 = positions[chunk[0] as usize];
            let p2 = positions[chunk[1] as usize];
            let p3 = positions[chunk[2] as usize];

            let plane = Plane::from_triangle(p1, p2, p3, self.clockwise);
            if plane.is_degenerate() {
                match self.degenerate {
                    DegeneratePolicy::Reject => return Err(CollisionError::DegenerateTriangle(tri)),
                    DegeneratePolicy::Skip => {
                        debug!("skipping zero-area triangle {tri}");
                        skipped += 1;
                        continue;
                    }
                    DegeneratePolicy::Keep => {}
                }
            }

            for p in [p1, p2, p3] {
                triangles.extend_from_slice(&p.to_array());
                bounds.extend(p);
            }
            planes.extend_from_slice(&[plane.normal.x, plane.normal.y, plane.normal.z, plane.d]);
        }

        let num_triangles = triangles.len() / TRIANGLE_STRIDE;
        debug!(
            "built collision mesh: {num_triangles} triangles ({skipped} skipped), clockwise = {}",
            self.clockwise
        );

        Ok(CollisionMesh {
            triangles,
            planes,
            num_triangles,
            clockwise: self.clockwise,
            bounds,
        })
    }
}

fn weld(positions: &mut Vec<Vec3>, indices: &mut [u32], epsilon: f32) {
    let inv = 1.0 / epsilon;
    let mut map: HashMap<(i32, i32, i32), u32> = HashMap::new();
    let mut welded: Vec<Vec3> = Vec::new();
    let mut remap: Vec<u32> = Vec::with_capacity(positions.len());

    for v in positions.iter() {
        let key = (
            (v.x * inv).round() as i32,
            (v.y * inv).round() as i32,
            (v.z * inv).round() as i32,
        );
        let index = *map.entry(key).or_insert_with(|| {
            let idx = welded.len() as u32;
            welded.push(*v);
            idx
        });
        remap.push(index);
    }

    for index in indices.iter_mut() {
        *index = remap[*index as usize];
    }
    *positions = welded;
}
