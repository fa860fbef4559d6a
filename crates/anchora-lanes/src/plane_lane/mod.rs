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

//! Plane lane - procedural boundary meshes for tracked planes.
//!
//! Every tracked plane is visualized as a double-ring triangle strip: an outer
//! ring on the boundary (alpha `0.0`) and an inner ring inset by roughly the
//! fade radius (alpha `1.0`). The plane shader interpolates the alpha across
//! the rim, so the overlay fades out towards the edge of the surface.

mod boundary_mesh;
mod buffer;
mod style;

pub use boundary_mesh::*;
pub use buffer::*;
pub use style::*;

use std::collections::TryReserveError;
use thiserror::Error;

/// An error that prevents a boundary mesh from being built for one plane.
///
/// A failure only affects the plane it was raised for; the caller skips that
/// plane for the current frame and tries again on the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshBuildError {
    /// The polygon has more vertices than 16-bit strip indices can address.
    #[error("polygon has {count} vertices, the 16-bit index limit is {max}")]
    TooManyVertices {
        /// The number of boundary vertices supplied.
        count: usize,
        /// The largest supported number of boundary vertices.
        max: usize,
    },
    /// Growing the reusable vertex or index buffer failed.
    #[error("failed to grow mesh buffer: {0}")]
    Allocation(#[from] TryReserveError),
}
