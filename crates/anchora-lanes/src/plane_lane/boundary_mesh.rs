// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anchora_core::{
    renderer::{IndexFormat, PrimitiveTopology},
    tracking::TrackedPolygon,
};

use super::{GrowableBuffer, MeshBuildError};

/// Default inset distance between the outer and inner rings, in meters.
pub const DEFAULT_FADE_RADIUS: f32 = 0.25;

/// Number of boundary vertices the reusable buffers are sized for up front.
pub const INITIAL_BUFFER_BOUNDARY_VERTS: usize = 64;

/// Floats per emitted vertex: local X, local Z, fade alpha.
pub const COORDS_PER_VERTEX: usize = 3;

/// Every boundary vertex produces one outer and one inner vertex.
pub const VERTS_PER_BOUNDARY_VERT: usize = 2;

/// The strip uses exactly three indices per boundary vertex.
pub const INDICES_PER_BOUNDARY_VERT: usize = 3;

/// The largest polygon the builder accepts.
///
/// Strip indices are 16-bit and must stay within the signed range that shader
/// backends without unsigned short support can read.
pub const MAX_BOUNDARY_VERTS: usize = i16::MAX as usize / 2;

const OUTER_ALPHA: f32 = 0.0;
const INNER_ALPHA: f32 = 1.0;

/// A renderable plane boundary: interleaved `(x, z, alpha)` vertices and the
/// 16-bit index sequence of a single triangle-strip draw.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryMesh {
    /// Interleaved vertices, three floats each. Even vertices form the outer
    /// ring, odd vertices the inner ring.
    pub vertices: Vec<f32>,
    /// Triangle-strip indices into `vertices`.
    pub indices: Vec<u16>,
    /// The per-plane style index the mesh was built for.
    pub style_index: u32,
}

impl BoundaryMesh {
    /// Creates a mesh with no geometry.
    pub fn empty(style_index: u32) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            style_index,
        }
    }

    /// Returns `true` if the mesh has nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the number of vertices (not floats).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / COORDS_PER_VERTEX
    }

    /// Returns the number of boundary vertices of the source polygon.
    #[inline]
    pub fn boundary_vertex_count(&self) -> usize {
        self.vertex_count() / VERTS_PER_BOUNDARY_VERT
    }

    /// Returns vertex `index` as `[x, z, alpha]`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn vertex(&self, index: usize) -> [f32; 3] {
        let start = index * COORDS_PER_VERTEX;
        [
            self.vertices[start],
            self.vertices[start + 1],
            self.vertices[start + 2],
        ]
    }

    /// The topology the indices must be drawn with.
    #[inline]
    pub fn primitive_topology(&self) -> PrimitiveTopology {
        PrimitiveTopology::TriangleStrip
    }

    /// The format of the index buffer.
    #[inline]
    pub fn index_format(&self) -> IndexFormat {
        IndexFormat::Uint16
    }

    /// The byte stride of one vertex.
    #[inline]
    pub fn vertex_stride(&self) -> usize {
        COORDS_PER_VERTEX * std::mem::size_of::<f32>()
    }

    /// The vertex data as raw bytes, ready for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index data as raw bytes, ready for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Builds fading boundary meshes for tracked plane polygons.
///
/// The builder owns two [`GrowableBuffer`]s that are reused across calls and
/// sized to the largest polygon seen so far. Geometry depends only on the
/// polygon and the fade radius; the style index is carried through untouched.
#[derive(Debug, Clone)]
pub struct BoundaryMeshBuilder {
    fade_radius: f32,
    vertices: GrowableBuffer<f32>,
    indices: GrowableBuffer<u16>,
}

impl Default for BoundaryMeshBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_RADIUS, INITIAL_BUFFER_BOUNDARY_VERTS)
    }
}

impl BoundaryMeshBuilder {
    /// Creates a builder with the given fade radius, with buffers pre-sized for
    /// polygons of up to `initial_boundary_verts` vertices.
    pub fn new(fade_radius: f32, initial_boundary_verts: usize) -> Self {
        Self {
            fade_radius,
            vertices: GrowableBuffer::new(
                initial_boundary_verts * VERTS_PER_BOUNDARY_VERT * COORDS_PER_VERTEX,
                "boundary vertices",
            ),
            indices: GrowableBuffer::new(
                initial_boundary_verts * INDICES_PER_BOUNDARY_VERT,
                "boundary indices",
            ),
        }
    }

    /// Returns the current `(vertex float, index)` capacity of the reusable buffers.
    #[inline]
    pub fn capacity(&self) -> (usize, usize) {
        (self.vertices.capacity(), self.indices.capacity())
    }

    /// Computes the per-axis factors that shrink the boundary onto the inner ring.
    ///
    /// Extents no larger than twice the fade radius collapse the inner ring
    /// onto the origin along that axis.
    pub fn inset_scales(&self, extent_x: f32, extent_z: f32) -> (f32, f32) {
        let inset = 2.0 * self.fade_radius;
        (
            ((extent_x - inset) / extent_x).max(0.0),
            ((extent_z - inset) / extent_z).max(0.0),
        )
    }

    /// Builds the boundary mesh for `polygon`.
    ///
    /// Polygons with fewer than three vertices, or with non-positive or
    /// non-finite extents, produce an empty mesh. Polygons larger than
    /// [`MAX_BOUNDARY_VERTS`] are rejected.
    pub fn build(
        &mut self,
        polygon: &TrackedPolygon,
        style_index: u32,
    ) -> Result<BoundaryMesh, MeshBuildError> {
        let boundary_verts = polygon.vertex_count();
        if boundary_verts < 3 || !valid_extent(polygon.extent_x) || !valid_extent(polygon.extent_z)
        {
            log::trace!(
                "BoundaryMeshBuilder: degenerate polygon ({} vertices, extents {}x{}), empty mesh",
                boundary_verts,
                polygon.extent_x,
                polygon.extent_z
            );
            return Ok(BoundaryMesh::empty(style_index));
        }
        if boundary_verts > MAX_BOUNDARY_VERTS {
            return Err(MeshBuildError::TooManyVertices {
                count: boundary_verts,
                max: MAX_BOUNDARY_VERTS,
            });
        }

        let num_vertices = boundary_verts * VERTS_PER_BOUNDARY_VERT;
        let num_indices = boundary_verts * INDICES_PER_BOUNDARY_VERT;
        self.vertices.begin(num_vertices * COORDS_PER_VERTEX)?;
        self.indices.begin(num_indices)?;

        let (x_scale, z_scale) = self.inset_scales(polygon.extent_x, polygon.extent_z);
        for v in &polygon.vertices {
            let inner = v.scale_by(x_scale, z_scale);
            self.vertices.push(v.x);
            self.vertices.push(v.y);
            self.vertices.push(OUTER_ALPHA);
            self.vertices.push(inner.x);
            self.vertices.push(inner.y);
            self.vertices.push(INNER_ALPHA);
        }

        self.push_strip_indices(boundary_verts);
        debug_assert_eq!(self.indices.len(), num_indices);

        Ok(BoundaryMesh {
            vertices: self.vertices.as_slice().to_vec(),
            indices: self.indices.as_slice().to_vec(),
            style_index,
        })
    }

    /// Writes the strip for `n` boundary vertices. Bounded by
    /// [`MAX_BOUNDARY_VERTS`], every index fits in a `u16`.
    fn push_strip_indices(&mut self, n: usize) {
        let outer = |i: usize| (i * 2) as u16;
        let inner = |i: usize| (i * 2 + 1) as u16;

        // Perimeter: zig-zag between the rings, entering from the last outer
        // vertex and closing on the first inner one.
        self.indices.push(outer(n - 1));
        for i in 0..n {
            self.indices.push(outer(i));
            self.indices.push(inner(i));
        }
        self.indices.push(inner(0));

        // Interior: walk the inner ring from both ends towards the middle.
        for i in 1..n / 2 {
            self.indices.push(inner(n - 1 - i));
            self.indices.push(inner(i));
        }
        if n % 2 != 0 {
            self.indices.push(inner(n / 2));
        }
    }
}

#[inline]
fn valid_extent(extent: f32) -> bool {
    extent.is_finite() && extent > 0.0
}
